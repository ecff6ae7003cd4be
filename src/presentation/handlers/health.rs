use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::presentation::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub ffmpeg: bool,
    pub storage: bool,
}

pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let storage = match state.media_store.bucket_exists().await {
        Ok(exists) => exists,
        Err(e) => {
            tracing::warn!(error = %e, "Storage health check failed");
            false
        }
    };

    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            ffmpeg: state.video_service.composer_available(),
            storage,
        }),
    )
}
