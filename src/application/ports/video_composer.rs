use std::path::{Path, PathBuf};

use async_trait::async_trait;

#[async_trait]
pub trait VideoComposer: Send + Sync {
    /// Renders a slideshow of `images` over `audio` into `output`.
    async fn compose(
        &self,
        audio: &Path,
        images: &[PathBuf],
        output: &Path,
    ) -> Result<(), VideoComposerError>;

    fn is_available(&self) -> bool;
}

#[derive(Debug, thiserror::Error)]
pub enum VideoComposerError {
    #[error("no images provided")]
    NoImages,
    #[error("failed to probe audio duration: {0}")]
    Probe(String),
    #[error("failed to render segment {index}: {reason}")]
    Segment { index: usize, reason: String },
    #[error("failed to merge segments: {0}")]
    Merge(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
