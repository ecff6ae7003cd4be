use std::sync::Arc;

use bytes::Bytes;

use crate::application::ports::{
    ContentGenerator, GeneratorError, MediaRepository, MediaStore, MediaStoreError, ObjectStream,
    RepositoryError,
};
use crate::domain::{
    ContentId, GeneratedMedia, MediaFile, MediaFileId, MediaFileType, NewMediaFile, ObjectKey,
    WavContainer,
};
use crate::infrastructure::observability::sanitize_prompt;

const WAV_MIME: &str = "audio/wav";

/// An artifact that has been uploaded and recorded.
#[derive(Debug, Clone)]
pub struct StoredMedia {
    pub etag: Option<String>,
    pub file_url: String,
    pub media: MediaFile,
}

pub struct MediaService {
    generator: Arc<dyn ContentGenerator>,
    media_store: Arc<dyn MediaStore>,
    media_repository: Arc<dyn MediaRepository>,
}

impl MediaService {
    pub fn new(
        generator: Arc<dyn ContentGenerator>,
        media_store: Arc<dyn MediaStore>,
        media_repository: Arc<dyn MediaRepository>,
    ) -> Self {
        Self {
            generator,
            media_store,
            media_repository,
        }
    }

    #[tracing::instrument(skip(self, text), fields(content_id = %content_id))]
    pub async fn generate_audio(
        &self,
        content_id: ContentId,
        text: &str,
    ) -> Result<StoredMedia, MediaServiceError> {
        tracing::debug!(text = %sanitize_prompt(text), "Synthesizing speech");
        self.media_store.ensure_bucket().await?;

        let audio = self
            .generator
            .synthesize_speech(text)
            .await?
            .filter(GeneratedMedia::is_audio)
            .ok_or(MediaServiceError::NoMediaReturned(MediaFileType::Audio))?;

        let (data, extension, mime_type) = match audio.extension() {
            Some(extension) => (audio.data, extension, audio.mime_type),
            None => {
                let wav = WavContainer::encode(&audio.data, &audio.mime_type);
                tracing::debug!(
                    source_mime = %audio.mime_type,
                    pcm_bytes = audio.data.len(),
                    wav_bytes = wav.len(),
                    "Wrapped raw PCM as WAV"
                );
                (wav.into_bytes(), "wav", WAV_MIME.to_string())
            }
        };

        self.store(content_id, MediaFileType::Audio, data, extension, &mime_type)
            .await
    }

    #[tracing::instrument(skip(self, prompt), fields(content_id = %content_id))]
    pub async fn generate_image(
        &self,
        content_id: ContentId,
        prompt: &str,
    ) -> Result<StoredMedia, MediaServiceError> {
        tracing::debug!(prompt = %sanitize_prompt(prompt), "Generating image");
        self.media_store.ensure_bucket().await?;

        let image = self
            .generator
            .generate_image(prompt)
            .await?
            .ok_or(MediaServiceError::NoMediaReturned(MediaFileType::Image))?;

        let extension = image.extension().unwrap_or("png");
        self.store(
            content_id,
            MediaFileType::Image,
            image.data,
            extension,
            &image.mime_type,
        )
        .await
    }

    pub async fn list_media(
        &self,
        content_id: ContentId,
        file_type: Option<MediaFileType>,
    ) -> Result<Vec<MediaFile>, MediaServiceError> {
        Ok(self
            .media_repository
            .list_by_content(content_id, file_type)
            .await?)
    }

    /// Looks up a media row and opens its object for streaming.
    pub async fn open_media(
        &self,
        media_id: MediaFileId,
    ) -> Result<(MediaFile, ObjectStream), MediaServiceError> {
        let media = self
            .media_repository
            .get_by_id(media_id)
            .await?
            .ok_or(MediaServiceError::MediaNotFound(media_id))?;

        let stream = self
            .media_store
            .get_stream(&ObjectKey::from_raw(media.file_name.clone()))
            .await?;

        Ok((media, stream))
    }

    async fn store(
        &self,
        content_id: ContentId,
        file_type: MediaFileType,
        data: Bytes,
        extension: &str,
        mime_type: &str,
    ) -> Result<StoredMedia, MediaServiceError> {
        let key = ObjectKey::generated(content_id, extension);
        let size = data.len();
        let etag = self.media_store.put(&key, data, mime_type).await?;
        let file_url = key.public_url(self.media_store.bucket());

        let media = self
            .media_repository
            .insert(&NewMediaFile {
                content_id,
                file_type,
                file_name: key.as_str().to_string(),
                file_url: file_url.clone(),
            })
            .await?;

        tracing::info!(
            media_id = %media.id,
            key = %key,
            bytes = size,
            file_type = %file_type,
            "Media stored"
        );

        Ok(StoredMedia {
            etag,
            file_url,
            media,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MediaServiceError {
    #[error("model returned no {0} data")]
    NoMediaReturned(MediaFileType),
    #[error("media {0} not found")]
    MediaNotFound(MediaFileId),
    #[error("generation: {0}")]
    Generation(#[from] GeneratorError),
    #[error("media store: {0}")]
    Store(#[from] MediaStoreError),
    #[error("repository: {0}")]
    Repository(#[from] RepositoryError),
}
