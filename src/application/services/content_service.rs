use std::sync::Arc;

use crate::application::ports::{
    CategoryRepository, ContentGenerator, ContentRepository, GeneratorError, RepositoryError,
};
use crate::domain::{CategoryId, Content};

pub struct ContentService {
    category_repository: Arc<dyn CategoryRepository>,
    content_repository: Arc<dyn ContentRepository>,
    generator: Arc<dyn ContentGenerator>,
}

impl ContentService {
    pub fn new(
        category_repository: Arc<dyn CategoryRepository>,
        content_repository: Arc<dyn ContentRepository>,
        generator: Arc<dyn ContentGenerator>,
    ) -> Self {
        Self {
            category_repository,
            content_repository,
            generator,
        }
    }

    /// Writes a fresh script for the category and stores it as pending content.
    #[tracing::instrument(skip(self), fields(category_id = %category_id))]
    pub async fn generate_for_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Content, ContentServiceError> {
        let category = self
            .category_repository
            .get_by_id(category_id)
            .await?
            .ok_or(ContentServiceError::CategoryNotFound(category_id))?;

        tracing::info!(category = %category.name, "Generating content script");

        let generated = self.generator.generate_script(&category).await?;
        let content = self
            .content_repository
            .create(category.id, &generated)
            .await?;

        tracing::info!(content_id = %content.id, title = %content.title, "Content saved");

        Ok(content)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ContentServiceError {
    #[error("category {0} not found")]
    CategoryNotFound(CategoryId),
    #[error("generation: {0}")]
    Generation(#[from] GeneratorError),
    #[error("repository: {0}")]
    Repository(#[from] RepositoryError),
}
