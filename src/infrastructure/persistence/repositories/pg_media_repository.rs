use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use crate::application::ports::{MediaRepository, RepositoryError};
use crate::domain::{ContentId, MediaFile, MediaFileId, MediaFileType, NewMediaFile};

use super::rows::{MediaFileRow, query_failed};

pub struct PgMediaRepository {
    pool: PgPool,
}

impl PgMediaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MediaRepository for PgMediaRepository {
    #[instrument(skip(self, media), fields(content_id = %media.content_id, file_type = %media.file_type))]
    async fn insert(&self, media: &NewMediaFile) -> Result<MediaFile, RepositoryError> {
        let row = sqlx::query_as::<_, MediaFileRow>(
            r#"
            INSERT INTO media_files (content_id, file_type, file_name, file_url)
            VALUES ($1, $2, $3, $4)
            RETURNING id, content_id, file_type, file_name, file_url, created_at
            "#,
        )
        .bind(media.content_id.as_i64())
        .bind(media.file_type.as_str())
        .bind(&media.file_name)
        .bind(&media.file_url)
        .fetch_one(&self.pool)
        .await
        .map_err(query_failed)?;

        MediaFile::try_from(row)
    }

    #[instrument(skip(self), fields(content_id = %content_id))]
    async fn list_by_content(
        &self,
        content_id: ContentId,
        file_type: Option<MediaFileType>,
    ) -> Result<Vec<MediaFile>, RepositoryError> {
        let rows = sqlx::query_as::<_, MediaFileRow>(
            r#"
            SELECT id, content_id, file_type, file_name, file_url, created_at
            FROM media_files
            WHERE content_id = $1
              AND ($2::TEXT IS NULL OR file_type = $2)
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(content_id.as_i64())
        .bind(file_type.map(|t| t.as_str()))
        .fetch_all(&self.pool)
        .await
        .map_err(query_failed)?;

        rows.into_iter().map(MediaFile::try_from).collect()
    }

    #[instrument(skip(self), fields(media_id = %id))]
    async fn get_by_id(&self, id: MediaFileId) -> Result<Option<MediaFile>, RepositoryError> {
        let row = sqlx::query_as::<_, MediaFileRow>(
            r#"
            SELECT id, content_id, file_type, file_name, file_url, created_at
            FROM media_files
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(query_failed)?;

        row.map(MediaFile::try_from).transpose()
    }
}
