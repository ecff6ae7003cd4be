use async_trait::async_trait;

use crate::domain::{CategoryId, Content, ContentId, GeneratedContent};

use super::RepositoryError;

#[async_trait]
pub trait ContentRepository: Send + Sync {
    async fn create(
        &self,
        category_id: CategoryId,
        content: &GeneratedContent,
    ) -> Result<Content, RepositoryError>;

    async fn get_by_id(&self, id: ContentId) -> Result<Option<Content>, RepositoryError>;
}
