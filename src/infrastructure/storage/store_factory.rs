use std::path::PathBuf;
use std::sync::Arc;

use crate::application::ports::{MediaStore, MediaStoreError};
use crate::presentation::config::{StorageProvider, StorageSettings};

use super::local_store::LocalMediaStore;
use super::s3_store::S3MediaStore;

pub struct MediaStoreFactory;

impl MediaStoreFactory {
    pub fn create(settings: &StorageSettings) -> Result<Arc<dyn MediaStore>, MediaStoreError> {
        match settings.provider {
            StorageProvider::Local => {
                let path = PathBuf::from(&settings.local_path);
                let store = LocalMediaStore::new(path, &settings.bucket)?;
                Ok(Arc::new(store))
            }
            StorageProvider::S3 => {
                if settings.access_key.is_empty() || settings.secret_key.is_empty() {
                    return Err(MediaStoreError::Configuration(
                        "storage.access_key and storage.secret_key are required for s3".into(),
                    ));
                }
                let store = S3MediaStore::new(settings)?;
                Ok(Arc::new(store))
            }
        }
    }
}
