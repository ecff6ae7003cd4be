use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;

use mediaforge::application::ports::{
    ContentGenerator, GeneratorError, MediaStore, MediaStoreError, ObjectStream, VideoComposer,
    VideoComposerError,
};
use mediaforge::domain::{Category, CategoryId, GeneratedContent, GeneratedMedia, ObjectKey};

pub const TTS_MIME: &str = "audio/L16;codec=pcm;rate=24000";

pub fn sample_category(id: i64, name: &str) -> Category {
    Category {
        id: CategoryId::new(id),
        name: name.to_string(),
        description: Some(format!("{} tips", name)),
        target_audience: Some("young professionals".to_string()),
        content_goal: Some("educational".to_string()),
        example_use_case: None,
        last_picked_at: None,
        created_at: Utc::now(),
    }
}

pub fn sample_script() -> GeneratedContent {
    GeneratedContent {
        title: "Save energy".to_string(),
        caption: "Small habits, big savings".to_string(),
        script_text: "Turn off the lights when you leave.".to_string(),
        prompt_image: "A warm living room at dusk".to_string(),
    }
}

/// Generator with canned answers. `None` media means the model returned
/// nothing of that kind.
pub struct MockGenerator {
    pub audio: Option<GeneratedMedia>,
    pub image: Option<GeneratedMedia>,
    pub rate_limited: bool,
    pub speech_calls: AtomicUsize,
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self {
            audio: Some(GeneratedMedia::new(vec![0u8; 480], TTS_MIME)),
            image: Some(GeneratedMedia::new(vec![0x89, b'P', b'N', b'G'], "image/png")),
            rate_limited: false,
            speech_calls: AtomicUsize::new(0),
        }
    }
}

impl MockGenerator {
    pub fn silent() -> Self {
        Self {
            audio: None,
            image: None,
            ..Self::default()
        }
    }

    pub fn rate_limited() -> Self {
        Self {
            rate_limited: true,
            ..Self::default()
        }
    }

    fn check_limit(&self) -> Result<(), GeneratorError> {
        if self.rate_limited {
            return Err(GeneratorError::RateLimited);
        }
        Ok(())
    }
}

#[async_trait]
impl ContentGenerator for MockGenerator {
    async fn generate_script(
        &self,
        _category: &Category,
    ) -> Result<GeneratedContent, GeneratorError> {
        self.check_limit()?;
        Ok(sample_script())
    }

    async fn synthesize_speech(&self, _text: &str) -> Result<Option<GeneratedMedia>, GeneratorError> {
        self.check_limit()?;
        self.speech_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.audio.clone())
    }

    async fn generate_image(&self, _prompt: &str) -> Result<Option<GeneratedMedia>, GeneratorError> {
        self.check_limit()?;
        Ok(self.image.clone())
    }
}

/// Writes a placeholder file instead of invoking ffmpeg.
#[derive(Default)]
pub struct MockComposer {
    pub calls: Mutex<Vec<(PathBuf, Vec<PathBuf>)>>,
}

#[async_trait]
impl VideoComposer for MockComposer {
    async fn compose(
        &self,
        audio: &Path,
        images: &[PathBuf],
        output: &Path,
    ) -> Result<(), VideoComposerError> {
        if images.is_empty() {
            return Err(VideoComposerError::NoImages);
        }
        tokio::fs::write(output, b"fake mp4").await?;
        self.calls
            .lock()
            .unwrap()
            .push((audio.to_path_buf(), images.to_vec()));
        Ok(())
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// A store whose every write fails.
pub struct FailingMediaStore;

#[async_trait]
impl MediaStore for FailingMediaStore {
    fn bucket(&self) -> &str {
        "media"
    }

    async fn bucket_exists(&self) -> Result<bool, MediaStoreError> {
        Err(MediaStoreError::Bucket("unreachable".to_string()))
    }

    async fn ensure_bucket(&self) -> Result<(), MediaStoreError> {
        Err(MediaStoreError::Bucket("unreachable".to_string()))
    }

    async fn put(
        &self,
        _key: &ObjectKey,
        _data: Bytes,
        _content_type: &str,
    ) -> Result<Option<String>, MediaStoreError> {
        Err(MediaStoreError::UploadFailed("unreachable".to_string()))
    }

    async fn put_file(
        &self,
        _key: &ObjectKey,
        _path: &Path,
        _content_type: &str,
    ) -> Result<u64, MediaStoreError> {
        Err(MediaStoreError::UploadFailed("unreachable".to_string()))
    }

    async fn get_stream(&self, key: &ObjectKey) -> Result<ObjectStream, MediaStoreError> {
        Err(MediaStoreError::NotFound(key.to_string()))
    }

    async fn presigned_url(
        &self,
        _key: &ObjectKey,
        _expires_in: Duration,
    ) -> Result<String, MediaStoreError> {
        Err(MediaStoreError::PresignUnsupported("unreachable".to_string()))
    }
}
