use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    create_video_handler, download_media_handler, generate_audio_handler,
    generate_content_handler, generate_image_handler, health_handler, list_media_handler,
    next_category_handler,
};
use crate::presentation::state::AppState;

const BYTES_PER_MB: usize = 1024 * 1024;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let body_limit = state.settings.server.body_limit_mb.saturating_mul(BYTES_PER_MB);

    Router::new()
        .route("/health", get(health_handler))
        .route("/category/next", get(next_category_handler))
        .route("/media/file/{media_id}", get(download_media_handler))
        .route("/media/{content_id}", get(list_media_handler))
        .route("/generate/audio", post(generate_audio_handler))
        .route("/generate/image", post(generate_image_handler))
        .route("/generate/content", post(generate_content_handler))
        .route("/create-video", post(create_video_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
