use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use crate::application::ports::{ContentRepository, RepositoryError};
use crate::domain::{CategoryId, Content, ContentId, ContentStatus, GeneratedContent};

use super::rows::{ContentRow, query_failed};

pub struct PgContentRepository {
    pool: PgPool,
}

impl PgContentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContentRepository for PgContentRepository {
    #[instrument(skip(self, content), fields(category_id = %category_id))]
    async fn create(
        &self,
        category_id: CategoryId,
        content: &GeneratedContent,
    ) -> Result<Content, RepositoryError> {
        let row = sqlx::query_as::<_, ContentRow>(
            r#"
            INSERT INTO contents (category_id, title, caption, script_text, metadata, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, category_id, title, caption, script_text, metadata, status, created_at
            "#,
        )
        .bind(category_id.as_i64())
        .bind(&content.title)
        .bind(&content.caption)
        .bind(&content.script_text)
        .bind(content.metadata())
        .bind(ContentStatus::Pending.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(query_failed)?;

        Content::try_from(row)
    }

    #[instrument(skip(self), fields(content_id = %id))]
    async fn get_by_id(&self, id: ContentId) -> Result<Option<Content>, RepositoryError> {
        let row = sqlx::query_as::<_, ContentRow>(
            r#"
            SELECT id, category_id, title, caption, script_text, metadata, status, created_at
            FROM contents
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(query_failed)?;

        row.map(Content::try_from).transpose()
    }
}
