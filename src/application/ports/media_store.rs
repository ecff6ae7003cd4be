use std::io;
use std::path::Path;
use std::time::Duration;

use bytes::Bytes;
use futures::stream::BoxStream;

use crate::domain::ObjectKey;

pub type ObjectStream = BoxStream<'static, Result<Bytes, MediaStoreError>>;

#[async_trait::async_trait]
pub trait MediaStore: Send + Sync {
    fn bucket(&self) -> &str;

    /// Read-only existence check; never creates anything.
    async fn bucket_exists(&self) -> Result<bool, MediaStoreError>;

    /// Creates the bucket when it does not exist yet.
    async fn ensure_bucket(&self) -> Result<(), MediaStoreError>;

    /// Returns the entity tag reported by the store, when there is one.
    async fn put(
        &self,
        key: &ObjectKey,
        data: Bytes,
        content_type: &str,
    ) -> Result<Option<String>, MediaStoreError>;

    /// Uploads a local file without reading it into memory at once.
    async fn put_file(
        &self,
        key: &ObjectKey,
        path: &Path,
        content_type: &str,
    ) -> Result<u64, MediaStoreError>;

    async fn get_stream(&self, key: &ObjectKey) -> Result<ObjectStream, MediaStoreError>;

    async fn presigned_url(
        &self,
        key: &ObjectKey,
        expires_in: Duration,
    ) -> Result<String, MediaStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum MediaStoreError {
    #[error("store configuration invalid: {0}")]
    Configuration(String),
    #[error("bucket operation failed: {0}")]
    Bucket(String),
    #[error("upload failed: {0}")]
    UploadFailed(String),
    #[error("object not found: {0}")]
    NotFound(String),
    #[error("download failed: {0}")]
    DownloadFailed(String),
    #[error("presigning unsupported: {0}")]
    PresignUnsupported(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
