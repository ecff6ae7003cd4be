use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;

use mediaforge::application::ports::{
    CategoryRepository, ContentGenerator, ContentRepository, MediaRepository, MediaStore,
};
use mediaforge::application::services::{ContentService, MediaService, VideoService};
use mediaforge::domain::Category;
use mediaforge::infrastructure::persistence::{
    InMemoryCategoryRepository, InMemoryContentRepository, InMemoryMediaRepository,
};
use mediaforge::infrastructure::storage::LocalMediaStore;
use mediaforge::presentation::{AppState, Settings, create_router};

use super::mocks::{MockComposer, MockGenerator};

pub const TEST_BUCKET: &str = "media";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub media_repository: Arc<dyn MediaRepository>,
    pub generator: Arc<MockGenerator>,
    pub composer: Arc<MockComposer>,
}

/// Wires the router over in-memory repositories and a directory-backed store
/// rooted at `dir`.
pub fn build_app(dir: &Path, categories: Vec<Category>, generator: MockGenerator) -> TestApp {
    let category_repository: Arc<dyn CategoryRepository> =
        Arc::new(InMemoryCategoryRepository::new(categories));
    let content_repository: Arc<dyn ContentRepository> =
        Arc::new(InMemoryContentRepository::default());
    let media_repository: Arc<dyn MediaRepository> = Arc::new(InMemoryMediaRepository::default());
    let media_store: Arc<dyn MediaStore> =
        Arc::new(LocalMediaStore::new(dir.join("store"), TEST_BUCKET).unwrap());

    let generator = Arc::new(generator);
    let composer = Arc::new(MockComposer::default());
    let as_generator: Arc<dyn ContentGenerator> = generator.clone();

    let state = AppState {
        category_repository: Arc::clone(&category_repository),
        content_service: Arc::new(ContentService::new(
            category_repository,
            content_repository,
            Arc::clone(&as_generator),
        )),
        media_service: Arc::new(MediaService::new(
            as_generator,
            Arc::clone(&media_store),
            Arc::clone(&media_repository),
        )),
        video_service: Arc::new(VideoService::new(
            composer.clone(),
            Arc::clone(&media_store),
            Arc::clone(&media_repository),
            dir.join("work"),
            Duration::from_secs(60),
        )),
        media_store,
        settings: Arc::new(Settings::default()),
    };

    TestApp {
        router: create_router(state.clone()),
        state,
        media_repository,
        generator,
        composer,
    }
}
