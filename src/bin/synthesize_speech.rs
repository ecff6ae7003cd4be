//! Streams text-to-speech output from Gemini and writes every audio chunk
//! to disk. Raw PCM chunks are wrapped in a WAV container.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use futures::StreamExt;

use mediaforge::domain::{ResponseChunk, WavContainer, extension_for};
use mediaforge::infrastructure::llm::GeminiClient;
use mediaforge::infrastructure::observability::{TracingConfig, init_tracing};
use mediaforge::presentation::{Environment, Settings};

#[derive(Debug, Parser)]
#[command(name = "synthesize-speech", about = "Stream Gemini TTS into audio files")]
struct Args {
    /// Text to read aloud.
    #[arg(long)]
    text: String,

    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Overrides `gemini.tts_model`.
    #[arg(long)]
    model: Option<String>,

    /// Overrides `gemini.tts_voice`.
    #[arg(long)]
    voice: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(&environment).context("failed to load settings")?;
    init_tracing(
        &TracingConfig::new(&environment, &settings.logging),
        "synthesize-speech",
    );

    let client = GeminiClient::new(&settings.gemini, &settings.content.language);
    let model = args.model.unwrap_or_else(|| settings.gemini.tts_model.clone());
    let request = client.speech_request(&args.text, args.voice.as_deref());

    tokio::fs::create_dir_all(&args.out_dir).await?;

    let mut stream = client.stream_generate(&model, &request).await?;
    let mut saved = 0usize;

    while let Some(chunk) = stream.next().await {
        match chunk? {
            ResponseChunk::Binary { mime_type, data } => {
                let (bytes, extension) = match extension_for(&mime_type) {
                    Some(extension) => (data, extension),
                    None => (WavContainer::encode(&data, &mime_type).into_bytes(), "wav"),
                };
                let path = args
                    .out_dir
                    .join(format!("audio_output_{}.{}", saved, extension));
                tokio::fs::write(&path, &bytes)
                    .await
                    .with_context(|| format!("failed to write {}", path.display()))?;
                tracing::info!(path = %path.display(), mime_type = %mime_type, bytes = bytes.len(), "Saved audio chunk");
                saved += 1;
            }
            ResponseChunk::Text(text) => tracing::info!(text = %text, "Model text"),
        }
    }

    if saved == 0 {
        tracing::warn!("No audio data received from the model");
    }

    Ok(())
}
