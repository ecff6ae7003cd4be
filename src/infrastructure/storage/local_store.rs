use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use object_store::local::LocalFileSystem;
use object_store::{Attributes, ObjectStore, PutPayload};

use crate::application::ports::{MediaStore, MediaStoreError, ObjectStream};
use crate::domain::ObjectKey;

use super::object_ops::{copy_file, open_stream, store_path};

/// Directory-backed store; the bucket is a sub-directory of `base_path`.
/// Content types are not persisted.
pub struct LocalMediaStore {
    inner: Arc<LocalFileSystem>,
    root: PathBuf,
    bucket: String,
}

impl LocalMediaStore {
    pub fn new(base_path: PathBuf, bucket: &str) -> Result<Self, MediaStoreError> {
        let root = base_path.join(bucket);
        std::fs::create_dir_all(&root).map_err(MediaStoreError::Io)?;
        let fs = LocalFileSystem::new_with_prefix(&root)
            .map_err(|e| MediaStoreError::Configuration(e.to_string()))?;
        Ok(Self {
            inner: Arc::new(fs),
            root,
            bucket: bucket.to_string(),
        })
    }
}

#[async_trait::async_trait]
impl MediaStore for LocalMediaStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn bucket_exists(&self) -> Result<bool, MediaStoreError> {
        Ok(tokio::fs::try_exists(&self.root).await?)
    }

    async fn ensure_bucket(&self) -> Result<(), MediaStoreError> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    async fn put(
        &self,
        key: &ObjectKey,
        data: Bytes,
        _content_type: &str,
    ) -> Result<Option<String>, MediaStoreError> {
        let result = self
            .inner
            .put(&store_path(key), PutPayload::from(data))
            .await
            .map_err(|e| MediaStoreError::UploadFailed(e.to_string()))?;
        Ok(result.e_tag)
    }

    async fn put_file(
        &self,
        key: &ObjectKey,
        path: &Path,
        _content_type: &str,
    ) -> Result<u64, MediaStoreError> {
        let store: Arc<dyn ObjectStore> = Arc::clone(&self.inner) as Arc<dyn ObjectStore>;
        copy_file(store, key, path, Attributes::new()).await
    }

    async fn get_stream(&self, key: &ObjectKey) -> Result<ObjectStream, MediaStoreError> {
        open_stream(self.inner.as_ref(), key).await
    }

    async fn presigned_url(
        &self,
        key: &ObjectKey,
        _expires_in: Duration,
    ) -> Result<String, MediaStoreError> {
        let path = self
            .inner
            .path_to_filesystem(&store_path(key))
            .map_err(|e| MediaStoreError::PresignUnsupported(e.to_string()))?;
        Ok(format!("file://{}", path.display()))
    }
}
