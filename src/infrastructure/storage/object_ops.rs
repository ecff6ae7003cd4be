use std::path::Path;
use std::sync::Arc;

use futures::{StreamExt, TryStreamExt};
use object_store::buffered::BufWriter;
use object_store::path::Path as StorePath;
use object_store::{Attribute, Attributes, ObjectStore};
use tokio::io::AsyncWriteExt;

use crate::application::ports::{MediaStoreError, ObjectStream};
use crate::domain::ObjectKey;

pub(super) fn store_path(key: &ObjectKey) -> StorePath {
    StorePath::from(key.as_str())
}

pub(super) fn content_type(value: &str) -> Attributes {
    let mut attributes = Attributes::new();
    attributes.insert(Attribute::ContentType, value.to_string().into());
    attributes
}

pub(super) async fn open_stream(
    store: &dyn ObjectStore,
    key: &ObjectKey,
) -> Result<ObjectStream, MediaStoreError> {
    let result = store.get(&store_path(key)).await.map_err(|e| match e {
        object_store::Error::NotFound { .. } => MediaStoreError::NotFound(key.to_string()),
        other => MediaStoreError::DownloadFailed(other.to_string()),
    })?;

    Ok(result
        .into_stream()
        .map_err(|e| MediaStoreError::DownloadFailed(e.to_string()))
        .boxed())
}

/// Streams a local file into the store through a buffered multipart writer.
pub(super) async fn copy_file(
    store: Arc<dyn ObjectStore>,
    key: &ObjectKey,
    source: &Path,
    attributes: Attributes,
) -> Result<u64, MediaStoreError> {
    let mut file = tokio::fs::File::open(source).await?;
    let mut writer = BufWriter::new(store, store_path(key)).with_attributes(attributes);

    let copied = match tokio::io::copy(&mut file, &mut writer).await {
        Ok(n) => n,
        Err(e) => {
            let _ = writer.abort().await;
            return Err(MediaStoreError::UploadFailed(e.to_string()));
        }
    };

    writer
        .shutdown()
        .await
        .map_err(|e| MediaStoreError::UploadFailed(e.to_string()))?;

    Ok(copied)
}
