use crate::config::OllamaConfig;
use crate::provider::{ModelError, ModelProvider, ModelResult};
use crate::types::{ChatMessage, ChatRequest, ChatResponse, MessageRole, ModelInfo, Usage};
use async_trait::async_trait;
use ollama_rs::Ollama;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

#[derive(Serialize)]
struct OllamaApiRequest {
    model: String,
    messages: Vec<OllamaApiMessage>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<OllamaApiOptions>,
}

#[derive(Serialize)]
struct OllamaApiMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct OllamaApiOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

#[derive(Deserialize)]
struct OllamaApiResponse {
    message: OllamaApiResponseMessage,
    #[allow(dead_code)]
    done: bool,
    prompt_eval_count: Option<u64>,
    eval_count: Option<u64>,
}

#[derive(Deserialize)]
struct OllamaApiResponseMessage {
    #[allow(dead_code)]
    role: String,
    content: String,
}

pub struct OllamaProvider {
    client: Ollama,
    http_client: reqwest::Client,
    base_url: String,
    #[allow(dead_code)]
    config: OllamaConfig,
}

impl OllamaProvider {
    pub fn new(config: OllamaConfig) -> ModelResult<Self> {
        config
            .validate()
            .map_err(|msg| ModelError::InvalidConfig { message: msg })?;

        let base_url = if config.base_url.ends_with('/') {
            config.base_url.clone()
        } else {
            format!("{}/", config.base_url)
        };

        let client = Ollama::new(config.base_url.clone(), 11434);

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ModelError::Unknown {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            http_client,
            base_url,
            config,
        })
    }

    pub fn with_default_config() -> ModelResult<Self> {
        Self::new(OllamaConfig::default())
    }

    fn convert_message_to_api(msg: &ChatMessage) -> OllamaApiMessage {
        let role = match &msg.role {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        };

        OllamaApiMessage {
            role: role.to_string(),
            content: msg.content.clone(),
        }
    }

    fn build_request_body(request: &ChatRequest) -> OllamaApiRequest {
        let messages = request
            .messages
            .iter()
            .map(Self::convert_message_to_api)
            .collect();

        let options = if request.temperature.is_some() || request.max_tokens.is_some() {
            Some(OllamaApiOptions {
                temperature: request.temperature,
                num_predict: request.max_tokens,
            })
        } else {
            None
        };

        OllamaApiRequest {
            model: request.model.clone(),
            messages,
            stream: false,
            options,
        }
    }

    fn parse_response(response: OllamaApiResponse) -> ChatResponse {
        let message = ChatMessage::assistant(response.message.content);

        let usage = Some(Usage {
            prompt_tokens: response.prompt_eval_count.unwrap_or(0) as u32,
            completion_tokens: response.eval_count.unwrap_or(0) as u32,
            total_tokens: (response.prompt_eval_count.unwrap_or(0)
                + response.eval_count.unwrap_or(0)) as u32,
        });

        ChatResponse { message, usage }
    }

    fn handle_ollama_error(err: ollama_rs::error::OllamaError) -> ModelError {
        match err {
            ollama_rs::error::OllamaError::ReqwestError(e) => {
                if e.is_timeout() {
                    ModelError::ServiceUnavailable {
                        message: "Request timeout".to_string(),
                    }
                } else if e.is_connect() {
                    ModelError::ServiceUnavailable {
                        message: "Cannot connect to Ollama service".to_string(),
                    }
                } else {
                    ModelError::Unknown {
                        message: format!("Network error: {}", e),
                    }
                }
            }
            ollama_rs::error::OllamaError::JsonError(e) => ModelError::Serialization(e),
            _ => ModelError::Unknown {
                message: format!("Ollama error: {}", err),
            },
        }
    }
}

#[async_trait]
impl ModelProvider for OllamaProvider {
    async fn chat(&self, request: ChatRequest) -> ModelResult<ChatResponse> {
        debug!("Starting chat request with model: {}", request.model);

        let model = request.model.clone();
        let body = Self::build_request_body(&request);
        let url = format!("{}api/chat", self.base_url);

        let http_response = self
            .http_client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ModelError::ServiceUnavailable {
                        message: "Request timeout".to_string(),
                    }
                } else if e.is_connect() {
                    ModelError::ServiceUnavailable {
                        message: "Cannot connect to Ollama service".to_string(),
                    }
                } else {
                    ModelError::Network(e)
                }
            })?;

        let status = http_response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            error!("Model not found: {}", model);
            return Err(ModelError::ModelNotFound { model });
        }
        if !status.is_success() {
            let error_text = http_response.text().await.unwrap_or_default();
            return Err(ModelError::Unknown {
                message: format!("Ollama API returned {}: {}", status, error_text),
            });
        }

        let api_response: OllamaApiResponse =
            http_response.json().await.map_err(ModelError::Network)?;

        let chat_response = Self::parse_response(api_response);

        info!("Chat request completed successfully");

        Ok(chat_response)
    }

    async fn list_models(&self) -> ModelResult<Vec<ModelInfo>> {
        debug!("Listing available models");

        let models = self
            .client
            .list_local_models()
            .await
            .map_err(Self::handle_ollama_error)?;

        let model_infos: Vec<ModelInfo> = models
            .into_iter()
            .map(|model| ModelInfo {
                name: model.name,
                size: Some(model.size),
                modified_at: Some(model.modified_at),
            })
            .collect();

        info!("Retrieved {} models", model_infos.len());
        Ok(model_infos)
    }

    async fn health_check(&self) -> ModelResult<()> {
        debug!("Performing health check");

        match self.list_models().await {
            Ok(_) => {
                info!("Health check passed");
                Ok(())
            }
            Err(e) => {
                error!("Health check failed: {}", e);
                Err(e)
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        "ollama"
    }
}
