use async_trait::async_trait;

use crate::domain::{Category, CategoryId};

use super::RepositoryError;

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Picks the category that has gone longest without being picked (never
    /// picked first) and stamps it as picked, atomically.
    async fn next_round_robin(&self) -> Result<Option<Category>, RepositoryError>;

    async fn get_by_id(&self, id: CategoryId) -> Result<Option<Category>, RepositoryError>;
}
