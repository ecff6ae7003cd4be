use async_trait::async_trait;

use crate::domain::{Category, GeneratedContent, GeneratedMedia};

#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate_script(
        &self,
        category: &Category,
    ) -> Result<GeneratedContent, GeneratorError>;

    /// Raw provider audio as returned by the model (typically
    /// `audio/L16;rate=24000` PCM). `None` when the response carried no audio.
    async fn synthesize_speech(&self, text: &str) -> Result<Option<GeneratedMedia>, GeneratorError>;

    async fn generate_image(&self, prompt: &str) -> Result<Option<GeneratedMedia>, GeneratorError>;
}

#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error("api key is not configured")]
    MissingApiKey,
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
