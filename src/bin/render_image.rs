//! Streams a combined image and text generation and writes each image part
//! to disk.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use futures::StreamExt;

use mediaforge::domain::{ResponseChunk, extension_for};
use mediaforge::infrastructure::llm::{GeminiClient, GenerateRequest};
use mediaforge::infrastructure::observability::{TracingConfig, init_tracing};
use mediaforge::presentation::{Environment, Settings};

#[derive(Debug, Parser)]
#[command(name = "render-image", about = "Stream Gemini image generation into files")]
struct Args {
    /// Description of the picture to generate.
    #[arg(long)]
    prompt: String,

    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Overrides `gemini.stream_image_model`.
    #[arg(long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(&environment).context("failed to load settings")?;
    init_tracing(
        &TracingConfig::new(&environment, &settings.logging),
        "render-image",
    );

    let client = GeminiClient::new(&settings.gemini, &settings.content.language);
    let model = args
        .model
        .unwrap_or_else(|| settings.gemini.stream_image_model.clone());
    let request = GenerateRequest::user_text(&args.prompt).with_modalities(&["IMAGE", "TEXT"]);

    tokio::fs::create_dir_all(&args.out_dir).await?;

    let mut stream = client.stream_generate(&model, &request).await?;
    let mut saved = 0usize;

    while let Some(chunk) = stream.next().await {
        match chunk? {
            ResponseChunk::Binary { mime_type, data } => {
                let extension = extension_for(&mime_type).unwrap_or("bin");
                let path = args
                    .out_dir
                    .join(format!("image_output_{}.{}", saved, extension));
                tokio::fs::write(&path, &data)
                    .await
                    .with_context(|| format!("failed to write {}", path.display()))?;
                tracing::info!(path = %path.display(), mime_type = %mime_type, "Saved image");
                saved += 1;
            }
            ResponseChunk::Text(text) => tracing::info!(text = %text, "Model text"),
        }
    }

    if saved == 0 {
        tracing::warn!("No image data received from the model");
    }

    Ok(())
}
