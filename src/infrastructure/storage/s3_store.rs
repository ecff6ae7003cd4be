use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path as StorePath;
use object_store::signer::Signer;
use object_store::{ObjectStore, PutOptions, PutPayload};
use reqwest::{Method, StatusCode};

use crate::application::ports::{MediaStore, MediaStoreError, ObjectStream};
use crate::domain::ObjectKey;
use crate::presentation::config::StorageSettings;

use super::object_ops::{content_type, copy_file, open_stream, store_path};

const DEFAULT_REGION: &str = "us-east-1";
// Bucket-level calls are sent immediately after signing.
const BUCKET_SIGNATURE_TTL: Duration = Duration::from_secs(60);

/// S3-compatible store (MinIO, AWS) scoped to a single bucket.
pub struct S3MediaStore {
    inner: Arc<AmazonS3>,
    http: reqwest::Client,
    bucket: String,
    region: String,
}

impl S3MediaStore {
    pub fn new(settings: &StorageSettings) -> Result<Self, MediaStoreError> {
        if settings.bucket.is_empty() {
            return Err(MediaStoreError::Configuration(
                "storage.bucket is required".to_string(),
            ));
        }

        let region = if settings.region.is_empty() {
            DEFAULT_REGION.to_string()
        } else {
            settings.region.clone()
        };

        let mut builder = AmazonS3Builder::new()
            .with_bucket_name(&settings.bucket)
            .with_region(&region)
            .with_access_key_id(&settings.access_key)
            .with_secret_access_key(&settings.secret_key)
            .with_allow_http(settings.allow_http)
            .with_virtual_hosted_style_request(false);

        if !settings.endpoint.is_empty() {
            builder = builder.with_endpoint(&settings.endpoint);
        }

        let store = builder
            .build()
            .map_err(|e| MediaStoreError::Configuration(e.to_string()))?;

        Ok(Self {
            inner: Arc::new(store),
            http: reqwest::Client::new(),
            bucket: settings.bucket.clone(),
            region,
        })
    }

    // The empty object path signs the bucket root, `{endpoint}/{bucket}/`.
    async fn bucket_request(
        &self,
        method: Method,
        body: Option<String>,
    ) -> Result<StatusCode, MediaStoreError> {
        let url = self
            .inner
            .signed_url(method.clone(), &StorePath::from(""), BUCKET_SIGNATURE_TTL)
            .await
            .map_err(|e| MediaStoreError::Bucket(e.to_string()))?;

        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| MediaStoreError::Bucket(e.to_string()))?;

        Ok(response.status())
    }

    fn create_bucket_body(&self) -> Option<String> {
        (self.region != DEFAULT_REGION).then(|| {
            format!(
                "<CreateBucketConfiguration xmlns=\"http://s3.amazonaws.com/doc/2006-03-01/\">\
                 <LocationConstraint>{}</LocationConstraint></CreateBucketConfiguration>",
                self.region
            )
        })
    }
}

#[async_trait::async_trait]
impl MediaStore for S3MediaStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn bucket_exists(&self) -> Result<bool, MediaStoreError> {
        let status = self.bucket_request(Method::HEAD, None).await?;
        if status.is_success() {
            Ok(true)
        } else if status == StatusCode::NOT_FOUND {
            Ok(false)
        } else {
            Err(MediaStoreError::Bucket(format!(
                "bucket check returned HTTP {}",
                status
            )))
        }
    }

    #[tracing::instrument(skip(self), fields(bucket = %self.bucket))]
    async fn ensure_bucket(&self) -> Result<(), MediaStoreError> {
        if self.bucket_exists().await? {
            return Ok(());
        }

        tracing::info!("Bucket missing, creating it");
        let status = self
            .bucket_request(Method::PUT, self.create_bucket_body())
            .await?;

        // 409: created concurrently by another request.
        if status.is_success() || status == StatusCode::CONFLICT {
            Ok(())
        } else {
            Err(MediaStoreError::Bucket(format!(
                "bucket creation returned HTTP {}",
                status
            )))
        }
    }

    #[tracing::instrument(skip(self, data), fields(key = %key, bytes = data.len()))]
    async fn put(
        &self,
        key: &ObjectKey,
        data: Bytes,
        content_type_value: &str,
    ) -> Result<Option<String>, MediaStoreError> {
        let options = PutOptions {
            attributes: content_type(content_type_value),
            ..Default::default()
        };

        let result = self
            .inner
            .put_opts(&store_path(key), PutPayload::from(data), options)
            .await
            .map_err(|e| MediaStoreError::UploadFailed(e.to_string()))?;

        tracing::debug!(etag = ?result.e_tag, "Object uploaded");
        Ok(result.e_tag)
    }

    async fn put_file(
        &self,
        key: &ObjectKey,
        path: &Path,
        content_type_value: &str,
    ) -> Result<u64, MediaStoreError> {
        let store: Arc<dyn ObjectStore> = Arc::clone(&self.inner) as Arc<dyn ObjectStore>;
        copy_file(store, key, path, content_type(content_type_value)).await
    }

    async fn get_stream(&self, key: &ObjectKey) -> Result<ObjectStream, MediaStoreError> {
        open_stream(self.inner.as_ref(), key).await
    }

    async fn presigned_url(
        &self,
        key: &ObjectKey,
        expires_in: Duration,
    ) -> Result<String, MediaStoreError> {
        let url = self
            .inner
            .signed_url(Method::GET, &store_path(key), expires_in)
            .await
            .map_err(|e| MediaStoreError::PresignUnsupported(e.to_string()))?;
        Ok(url.to_string())
    }
}
