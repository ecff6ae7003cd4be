use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use chrono::Utc;

use crate::application::ports::{
    MediaRepository, MediaStore, MediaStoreError, RepositoryError, VideoComposer,
    VideoComposerError,
};
use crate::domain::{ContentId, MediaFileType, NewMediaFile, ObjectKey};

const VIDEO_MIME: &str = "video/mp4";

/// A file received from a multipart upload.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub data: Bytes,
}

#[derive(Debug, Clone)]
pub struct RenderedVideo {
    pub file_name: String,
    pub video_url: Option<String>,
}

pub struct VideoService {
    composer: Arc<dyn VideoComposer>,
    media_store: Arc<dyn MediaStore>,
    media_repository: Arc<dyn MediaRepository>,
    work_dir: PathBuf,
    url_expiry: Duration,
}

impl VideoService {
    pub fn new(
        composer: Arc<dyn VideoComposer>,
        media_store: Arc<dyn MediaStore>,
        media_repository: Arc<dyn MediaRepository>,
        work_dir: PathBuf,
        url_expiry: Duration,
    ) -> Self {
        Self {
            composer,
            media_store,
            media_repository,
            work_dir,
            url_expiry,
        }
    }

    pub fn composer_available(&self) -> bool {
        self.composer.is_available()
    }

    /// Renders the uploads into an MP4 and publishes it. A failed upload
    /// still yields the rendered file name, without a download URL.
    #[tracing::instrument(skip(self, audio, images), fields(content_id = %content_id, images = images.len()))]
    pub async fn create_video(
        &self,
        content_id: ContentId,
        audio: UploadedFile,
        images: Vec<UploadedFile>,
    ) -> Result<RenderedVideo, VideoServiceError> {
        if images.is_empty() {
            return Err(VideoComposerError::NoImages.into());
        }

        tokio::fs::create_dir_all(&self.work_dir).await?;
        let scratch = tempfile::Builder::new()
            .prefix("video_")
            .tempdir_in(&self.work_dir)?;

        let audio_path = scratch.path().join(upload_name(&audio.file_name, "audio"));
        tokio::fs::write(&audio_path, &audio.data).await?;

        let mut image_paths = Vec::with_capacity(images.len());
        for (index, image) in images.iter().enumerate() {
            let path = scratch.path().join(format!(
                "image_{}_{}",
                index,
                upload_name(&image.file_name, "image")
            ));
            tokio::fs::write(&path, &image.data).await?;
            image_paths.push(path);
        }

        let file_name = format!("video_{}.mp4", Utc::now().timestamp());
        let output_path = scratch.path().join(&file_name);

        self.composer
            .compose(&audio_path, &image_paths, &output_path)
            .await?;

        let video_url = match self.publish(content_id, &file_name, &output_path).await {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to publish rendered video");
                None
            }
        };

        Ok(RenderedVideo {
            file_name,
            video_url,
        })
    }

    async fn publish(
        &self,
        content_id: ContentId,
        file_name: &str,
        path: &Path,
    ) -> Result<String, VideoServiceError> {
        let key = ObjectKey::named(content_id, file_name);

        self.media_store.ensure_bucket().await?;
        let size = self.media_store.put_file(&key, path, VIDEO_MIME).await?;

        self.media_repository
            .insert(&NewMediaFile {
                content_id,
                file_type: MediaFileType::Video,
                file_name: key.as_str().to_string(),
                file_url: key.public_url(self.media_store.bucket()),
            })
            .await?;

        tracing::info!(key = %key, bytes = size, "Video uploaded");

        Ok(self
            .media_store
            .presigned_url(&key, self.url_expiry)
            .await?)
    }
}

// Client-supplied names are reduced to their final component.
fn upload_name<'a>(file_name: &'a str, fallback: &'a str) -> &'a str {
    Path::new(file_name)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .unwrap_or(fallback)
}

#[derive(Debug, thiserror::Error)]
pub enum VideoServiceError {
    #[error("composition: {0}")]
    Composition(#[from] VideoComposerError),
    #[error("media store: {0}")]
    Store(#[from] MediaStoreError),
    #[error("repository: {0}")]
    Repository(#[from] RepositoryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
