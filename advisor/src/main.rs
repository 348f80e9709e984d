use advisor::{scan_folder, session};
use clap::{Parser, Subcommand};
use model::prelude::*;
use std::io;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "advisor")]
#[command(about = "Aggregate bloodwork PDF lab results and discuss them with a local model")]
struct Cli {
    /// Ollama base URL
    #[arg(long, default_value = "http://localhost:11434")]
    base_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a folder of bloodwork PDFs, print an advisory, then answer questions
    Advise {
        /// Folder containing the bloodwork PDF reports
        #[arg(short, long, default_value = "bloodwork_pdfs")]
        folder: PathBuf,
        /// The model to use
        #[arg(short, long, default_value = "deepseek-r1:7b")]
        model: String,
        /// Temperature setting (0.0 to 2.0)
        #[arg(long, default_value = "0.7", value_parser = parse_temperature)]
        temperature: f32,
    },
    /// List available models
    Models,
    /// Health check
    Health,
}

fn parse_temperature(s: &str) -> Result<f32, String> {
    let temperature: f32 = s.parse().map_err(|e| format!("{}", e))?;
    if (0.0..=2.0).contains(&temperature) {
        Ok(temperature)
    } else {
        Err("temperature must be between 0.0 and 2.0".to_string())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = OllamaConfig::default().with_base_url(cli.base_url);
    let provider = OllamaProvider::new(config)?;

    match cli.command {
        Commands::Advise {
            folder,
            model,
            temperature,
        } => {
            run_advisory(&provider, &folder, &model, temperature).await?;
        }
        Commands::Models => {
            list_models(&provider).await?;
        }
        Commands::Health => {
            health_check(&provider).await?;
        }
    }

    Ok(())
}

async fn run_advisory(
    provider: &OllamaProvider,
    folder: &std::path::Path,
    model: &str,
    temperature: f32,
) -> Result<(), Box<dyn std::error::Error>> {
    let results = scan_folder(folder);
    let averages = results.averages();

    let Some(advice) = session::advisory(provider, model, temperature, &results, &averages).await?
    else {
        println!("No valid lab results found.");
        return Ok(());
    };

    info!(
        "Aggregated {} report dates, {} distinct tests",
        results.len(),
        averages.len()
    );

    println!("\n--- Summary Across All Tests ---");
    println!("{}", advice);

    let stdin = io::stdin();
    session::interactive_mode(
        provider,
        model,
        temperature,
        &results,
        &averages,
        stdin.lock(),
        &mut io::stdout(),
    )
    .await?;

    Ok(())
}

async fn list_models(provider: &OllamaProvider) -> Result<(), Box<dyn std::error::Error>> {
    println!("Available models:");
    let models = provider.list_models().await?;

    if models.is_empty() {
        println!("  No models found. Make sure Ollama is running and has models installed.");
    } else {
        for model in models {
            println!(
                "  - {} ({})",
                model.name,
                model
                    .size
                    .map(|s| format!("{:.1} GB", s as f64 / 1_000_000_000.0))
                    .unwrap_or_else(|| "unknown size".to_string())
            );
        }
    }

    Ok(())
}

async fn health_check(provider: &OllamaProvider) -> Result<(), Box<dyn std::error::Error>> {
    println!("Performing health check...");

    match provider.health_check().await {
        Ok(()) => {
            println!("✓ Health check passed. Ollama is running and accessible.");
            info!("Health check successful");
        }
        Err(e) => {
            println!("✗ Health check failed: {}", e);
            error!("Health check failed: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_temperature_accepts_range() {
        assert_eq!(parse_temperature("0.0"), Ok(0.0));
        assert_eq!(parse_temperature("0.7"), Ok(0.7));
        assert_eq!(parse_temperature("2.0"), Ok(2.0));
    }

    #[test]
    fn test_parse_temperature_rejects_out_of_range() {
        assert!(parse_temperature("-0.1").is_err());
        assert!(parse_temperature("2.1").is_err());
        assert!(parse_temperature("hot").is_err());
    }

    #[test]
    fn test_cli_rejects_out_of_range_temperature() {
        let result = Cli::try_parse_from(["advisor", "advise", "--temperature", "3.0"]);
        assert!(result.is_err());

        let result = Cli::try_parse_from(["advisor", "advise", "--temperature", "1.0"]);
        assert!(result.is_ok());
    }
}
