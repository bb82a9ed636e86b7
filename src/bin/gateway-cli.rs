use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Management CLI for the AgriVision inference gateway", long_about = None)]
struct Cli {
    /// Gateway base URL.
    #[arg(short, long, default_value = "http://localhost:5000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the gateway liveness banner
    Status,
    /// Probe the health endpoint
    Health,
    /// Send an image through a configured model
    Predict {
        /// Model name (e.g. disease, pest)
        model: String,

        /// Path to the image file
        file: PathBuf,

        /// Declared content type of the image
        #[arg(long, default_value = "image/jpeg")]
        content_type: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Status => {
            let body: Value = client
                .get(format!("{}/", cli.url))
                .send()
                .await?
                .json()
                .await?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        Commands::Health => {
            let body: Value = client
                .get(format!("{}/health", cli.url))
                .send()
                .await?
                .json()
                .await?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        Commands::Predict {
            model,
            file,
            content_type,
        } => {
            let bytes = tokio::fs::read(&file).await?;
            let filename = file
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or("upload.jpg")
                .to_string();

            let part = reqwest::multipart::Part::bytes(bytes)
                .file_name(filename)
                .mime_str(&content_type)?;
            let form = reqwest::multipart::Form::new().part("file", part);

            let response = client
                .post(format!("{}/api/{}/predict", cli.url, model))
                .multipart(form)
                .send()
                .await?;

            let status = response.status();
            let body: Value = response.json().await?;
            println!("HTTP {status}");
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
    }

    Ok(())
}
