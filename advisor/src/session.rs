//! Advisory generation and interactive Q&A over aggregated results.
//!
//! Generic over [`ModelProvider`] and console streams so the driver
//! behavior is exercisable without a live Ollama service.

use crate::prompt;
use crate::results::ResultSet;
use model::{ChatMessage, ChatRequest, ModelProvider, ModelResult};
use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};
use tracing::error;

/// Issue one chat request and return the response text.
pub async fn ask_model<P: ModelProvider>(
    provider: &P,
    model: &str,
    temperature: f32,
    prompt: String,
) -> ModelResult<String> {
    let request =
        ChatRequest::new(model, vec![ChatMessage::user(prompt)]).with_temperature(temperature);
    let response = provider.chat(request).await?;
    Ok(response.message.content)
}

/// The one-shot advisory over the aggregated results.
///
/// An empty result set yields `None` without issuing any chat call.
pub async fn advisory<P: ModelProvider>(
    provider: &P,
    model: &str,
    temperature: f32,
    results: &ResultSet,
    averages: &BTreeMap<String, f64>,
) -> ModelResult<Option<String>> {
    if results.is_empty() {
        return Ok(None);
    }

    let advice = ask_model(
        provider,
        model,
        temperature,
        prompt::advisory_prompt(results, averages),
    )
    .await?;

    Ok(Some(advice))
}

/// Q&A loop over the aggregated results until the user enters `exit`
/// (case-insensitive) or the input stream ends.
///
/// Every question re-sends the full result table; nothing is carried
/// between turns. Empty lines re-prompt. A failed chat call is reported
/// on `output` and the session continues.
pub async fn interactive_mode<P, R, W>(
    provider: &P,
    model: &str,
    temperature: f32,
    results: &ResultSet,
    averages: &BTreeMap<String, f64>,
    mut input: R,
    output: &mut W,
) -> io::Result<()>
where
    P: ModelProvider,
    R: BufRead,
    W: Write,
{
    writeln!(
        output,
        "\nYou can now ask questions about your lab results. Type 'exit' to quit."
    )?;

    loop {
        write!(output, "Ask a question: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();

        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("exit") {
            break;
        }

        let question = prompt::question_prompt(results, averages, line);
        match ask_model(provider, model, temperature, question).await {
            Ok(answer) => writeln!(output, "\nResponse: {}", answer)?,
            Err(e) => {
                error!("Chat request failed: {}", e);
                writeln!(output, "\nRequest failed: {}", e)?;
            }
        }
    }

    Ok(())
}
