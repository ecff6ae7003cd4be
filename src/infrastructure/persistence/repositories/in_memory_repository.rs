use std::sync::Mutex;

use chrono::Utc;

use crate::application::ports::{
    CategoryRepository, ContentRepository, MediaRepository, RepositoryError,
};
use crate::domain::{
    Category, CategoryId, Content, ContentId, ContentStatus, GeneratedContent, MediaFile,
    MediaFileId, MediaFileType, NewMediaFile,
};

fn poisoned<T>(_: T) -> RepositoryError {
    RepositoryError::QueryFailed("in-memory store lock poisoned".to_string())
}

#[derive(Default)]
pub struct InMemoryCategoryRepository {
    categories: Mutex<Vec<Category>>,
}

impl InMemoryCategoryRepository {
    pub fn new(categories: Vec<Category>) -> Self {
        Self {
            categories: Mutex::new(categories),
        }
    }
}

#[async_trait::async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn next_round_robin(&self) -> Result<Option<Category>, RepositoryError> {
        let mut categories = self.categories.lock().map_err(poisoned)?;
        let next = categories
            .iter_mut()
            .min_by_key(|c| (c.last_picked_at.is_some(), c.last_picked_at, c.id.as_i64()));

        Ok(next.map(|category| {
            category.last_picked_at = Some(Utc::now());
            category.clone()
        }))
    }

    async fn get_by_id(&self, id: CategoryId) -> Result<Option<Category>, RepositoryError> {
        let categories = self.categories.lock().map_err(poisoned)?;
        Ok(categories.iter().find(|c| c.id == id).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryContentRepository {
    contents: Mutex<Vec<Content>>,
}

#[async_trait::async_trait]
impl ContentRepository for InMemoryContentRepository {
    async fn create(
        &self,
        category_id: CategoryId,
        content: &GeneratedContent,
    ) -> Result<Content, RepositoryError> {
        let mut contents = self.contents.lock().map_err(poisoned)?;
        let created = Content {
            id: ContentId::new(contents.len() as i64 + 1),
            category_id,
            title: content.title.clone(),
            caption: content.caption.clone(),
            script_text: content.script_text.clone(),
            metadata: content.metadata(),
            status: ContentStatus::Pending,
            created_at: Utc::now(),
        };
        contents.push(created.clone());
        Ok(created)
    }

    async fn get_by_id(&self, id: ContentId) -> Result<Option<Content>, RepositoryError> {
        let contents = self.contents.lock().map_err(poisoned)?;
        Ok(contents.iter().find(|c| c.id == id).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryMediaRepository {
    media: Mutex<Vec<MediaFile>>,
}

#[async_trait::async_trait]
impl MediaRepository for InMemoryMediaRepository {
    async fn insert(&self, media: &NewMediaFile) -> Result<MediaFile, RepositoryError> {
        let mut rows = self.media.lock().map_err(poisoned)?;
        let created = MediaFile {
            id: MediaFileId::new(rows.len() as i64 + 1),
            content_id: media.content_id,
            file_type: media.file_type,
            file_name: media.file_name.clone(),
            file_url: media.file_url.clone(),
            created_at: Utc::now(),
        };
        rows.push(created.clone());
        Ok(created)
    }

    async fn list_by_content(
        &self,
        content_id: ContentId,
        file_type: Option<MediaFileType>,
    ) -> Result<Vec<MediaFile>, RepositoryError> {
        let rows = self.media.lock().map_err(poisoned)?;
        Ok(rows
            .iter()
            .rev()
            .filter(|m| m.content_id == content_id)
            .filter(|m| file_type.is_none_or(|t| m.file_type == t))
            .cloned()
            .collect())
    }

    async fn get_by_id(&self, id: MediaFileId) -> Result<Option<MediaFile>, RepositoryError> {
        let rows = self.media.lock().map_err(poisoned)?;
        Ok(rows.iter().find(|m| m.id == id).cloned())
    }
}
