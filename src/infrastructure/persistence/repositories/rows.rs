use chrono::{DateTime, Utc};

use crate::application::ports::RepositoryError;
use crate::domain::{
    Category, CategoryId, Content, ContentId, ContentStatus, MediaFile, MediaFileId, MediaFileType,
};

#[derive(sqlx::FromRow)]
pub(super) struct CategoryRow {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub target_audience: Option<String>,
    pub content_goal: Option<String>,
    pub example_use_case: Option<String>,
    pub last_picked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<CategoryRow> for Category {
    fn from(r: CategoryRow) -> Self {
        Category {
            id: CategoryId::new(r.id),
            name: r.name,
            description: r.description,
            target_audience: r.target_audience,
            content_goal: r.content_goal,
            example_use_case: r.example_use_case,
            last_picked_at: r.last_picked_at,
            created_at: r.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(super) struct ContentRow {
    pub id: i64,
    pub category_id: i64,
    pub title: String,
    pub caption: String,
    pub script_text: String,
    pub metadata: serde_json::Value,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ContentRow> for Content {
    type Error = RepositoryError;

    fn try_from(r: ContentRow) -> Result<Self, Self::Error> {
        let status = r
            .status
            .parse::<ContentStatus>()
            .map_err(RepositoryError::CorruptRow)?;

        Ok(Content {
            id: ContentId::new(r.id),
            category_id: CategoryId::new(r.category_id),
            title: r.title,
            caption: r.caption,
            script_text: r.script_text,
            metadata: r.metadata,
            status,
            created_at: r.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
pub(super) struct MediaFileRow {
    pub id: i64,
    pub content_id: i64,
    pub file_type: String,
    pub file_name: String,
    pub file_url: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<MediaFileRow> for MediaFile {
    type Error = RepositoryError;

    fn try_from(r: MediaFileRow) -> Result<Self, Self::Error> {
        let file_type = r
            .file_type
            .parse::<MediaFileType>()
            .map_err(RepositoryError::CorruptRow)?;

        Ok(MediaFile {
            id: MediaFileId::new(r.id),
            content_id: ContentId::new(r.content_id),
            file_type,
            file_name: r.file_name,
            file_url: r.file_url,
            created_at: r.created_at,
        })
    }
}

pub(super) fn query_failed(e: sqlx::Error) -> RepositoryError {
    match &e {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() || db.is_unique_violation() => {
            RepositoryError::ConstraintViolation(db.message().to_string())
        }
        _ => RepositoryError::QueryFailed(e.to_string()),
    }
}
