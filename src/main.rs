use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;

use mediaforge::application::ports::{
    CategoryRepository, ContentGenerator, ContentRepository, MediaRepository,
};
use mediaforge::application::services::{ContentService, MediaService, VideoService};
use mediaforge::infrastructure::llm::GeminiClient;
use mediaforge::infrastructure::observability::{TracingConfig, init_tracing};
use mediaforge::infrastructure::persistence::{
    PgCategoryRepository, PgContentRepository, PgMediaRepository, create_pool, run_migrations,
};
use mediaforge::infrastructure::storage::MediaStoreFactory;
use mediaforge::infrastructure::video::FfmpegVideoComposer;
use mediaforge::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(&environment).context("failed to load settings")?;

    init_tracing(
        &TracingConfig::new(&environment, &settings.logging),
        env!("CARGO_PKG_NAME"),
    );

    if settings.gemini.api_key.is_empty() {
        tracing::warn!("APP_GEMINI__API_KEY is not set; generation endpoints will fail");
    }

    let pool = create_pool(&settings.database.url, settings.database.max_connections).await?;
    run_migrations(&pool).await?;

    let category_repository: Arc<dyn CategoryRepository> =
        Arc::new(PgCategoryRepository::new(pool.clone()));
    let content_repository: Arc<dyn ContentRepository> =
        Arc::new(PgContentRepository::new(pool.clone()));
    let media_repository: Arc<dyn MediaRepository> = Arc::new(PgMediaRepository::new(pool));

    let generator: Arc<dyn ContentGenerator> = Arc::new(GeminiClient::new(
        &settings.gemini,
        &settings.content.language,
    ));
    let media_store = MediaStoreFactory::create(&settings.storage)?;
    let composer = Arc::new(FfmpegVideoComposer::new(&settings.video));

    let content_service = Arc::new(ContentService::new(
        Arc::clone(&category_repository),
        content_repository,
        Arc::clone(&generator),
    ));
    let media_service = Arc::new(MediaService::new(
        generator,
        Arc::clone(&media_store),
        Arc::clone(&media_repository),
    ));
    let video_service = Arc::new(VideoService::new(
        composer,
        Arc::clone(&media_store),
        media_repository,
        PathBuf::from(&settings.video.work_dir),
        Duration::from_secs(settings.storage.presign_expiry_secs),
    ));

    if !video_service.composer_available() {
        tracing::warn!("ffmpeg/ffprobe not found; /create-video will fail");
    }

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let state = AppState {
        category_repository,
        content_service,
        media_service,
        video_service,
        media_store,
        settings: Arc::new(settings),
    };

    let router = create_router(state);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
