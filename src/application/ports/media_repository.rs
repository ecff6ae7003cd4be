use async_trait::async_trait;

use crate::domain::{ContentId, MediaFile, MediaFileId, MediaFileType, NewMediaFile};

use super::RepositoryError;

#[async_trait]
pub trait MediaRepository: Send + Sync {
    async fn insert(&self, media: &NewMediaFile) -> Result<MediaFile, RepositoryError>;

    /// Newest first.
    async fn list_by_content(
        &self,
        content_id: ContentId,
        file_type: Option<MediaFileType>,
    ) -> Result<Vec<MediaFile>, RepositoryError>;

    async fn get_by_id(&self, id: MediaFileId) -> Result<Option<MediaFile>, RepositoryError>;
}
