use std::sync::Arc;

use crate::application::ports::{CategoryRepository, MediaStore};
use crate::application::services::{ContentService, MediaService, VideoService};
use crate::presentation::config::Settings;

/// Shared handler state. Every dependency is injected by the caller.
#[derive(Clone)]
pub struct AppState {
    pub category_repository: Arc<dyn CategoryRepository>,
    pub content_service: Arc<ContentService>,
    pub media_service: Arc<MediaService>,
    pub video_service: Arc<VideoService>,
    pub media_store: Arc<dyn MediaStore>,
    pub settings: Arc<Settings>,
}
