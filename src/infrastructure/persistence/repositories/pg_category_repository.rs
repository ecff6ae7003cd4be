use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use crate::application::ports::{CategoryRepository, RepositoryError};
use crate::domain::{Category, CategoryId};

use super::rows::{CategoryRow, query_failed};

pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    // Selection and stamping happen in one statement; SKIP LOCKED lets a
    // concurrent picker move on to the next-oldest row instead of taking
    // the same one.
    #[instrument(skip(self))]
    async fn next_round_robin(&self) -> Result<Option<Category>, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            UPDATE categories
            SET last_picked_at = NOW()
            WHERE id = (
                SELECT id
                FROM categories
                ORDER BY last_picked_at ASC NULLS FIRST, id ASC
                LIMIT 1
                FOR UPDATE SKIP LOCKED
            )
            RETURNING id, name, description, target_audience, content_goal,
                      example_use_case, last_picked_at, created_at
            "#,
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(query_failed)?;

        Ok(row.map(Category::from))
    }

    #[instrument(skip(self), fields(category_id = %id))]
    async fn get_by_id(&self, id: CategoryId) -> Result<Option<Category>, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name, description, target_audience, content_goal,
                   example_use_case, last_picked_at, created_at
            FROM categories
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(query_failed)?;

        Ok(row.map(Category::from))
    }
}
