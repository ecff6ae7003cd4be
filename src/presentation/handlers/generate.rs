use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::application::ports::GeneratorError;
use crate::application::services::{
    ContentServiceError, MediaServiceError, StoredMedia,
};
use crate::domain::{CategoryId, Content, ContentId};
use crate::presentation::state::AppState;

use super::responses;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateAudioRequest {
    pub text: Option<String>,
    pub content_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImageRequest {
    pub prompt: Option<String>,
    pub content_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub category_id: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedMediaResponse {
    pub message: String,
    pub etag: Option<String>,
    pub file_url: String,
    pub content_id: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentResponse {
    pub id: i64,
    pub category_id: i64,
    pub title: String,
    pub caption: String,
    pub script_text: String,
    pub metadata: serde_json::Value,
    pub status: String,
    pub created_at: String,
}

impl From<Content> for ContentResponse {
    fn from(content: Content) -> Self {
        Self {
            id: content.id.as_i64(),
            category_id: content.category_id.as_i64(),
            title: content.title,
            caption: content.caption,
            script_text: content.script_text,
            metadata: content.metadata,
            status: content.status.as_str().to_string(),
            created_at: content.created_at.to_rfc3339(),
        }
    }
}

#[tracing::instrument(skip(state, payload))]
pub async fn generate_audio_handler(
    State(state): State<AppState>,
    payload: Result<Json<GenerateAudioRequest>, JsonRejection>,
) -> Response {
    let request = payload.ok().map(|Json(r)| r);
    let Some((text, content_id)) = request.and_then(|r| {
        let text = r.text.filter(|t| !t.trim().is_empty())?;
        Some((text, r.content_id?))
    }) else {
        return responses::message(StatusCode::BAD_REQUEST, "Text and contentId are required.");
    };

    let content_id = ContentId::new(content_id);
    match state.media_service.generate_audio(content_id, &text).await {
        Ok(stored) => media_created("Audio generated and uploaded successfully", content_id, stored),
        Err(e) => media_failure(e, "Failed to generate audio."),
    }
}

#[tracing::instrument(skip(state, payload))]
pub async fn generate_image_handler(
    State(state): State<AppState>,
    payload: Result<Json<GenerateImageRequest>, JsonRejection>,
) -> Response {
    let request = payload.ok().map(|Json(r)| r);
    let Some((prompt, content_id)) = request.and_then(|r| {
        let prompt = r.prompt.filter(|p| !p.trim().is_empty())?;
        Some((prompt, r.content_id?))
    }) else {
        return responses::message(StatusCode::BAD_REQUEST, "Prompt and contentId are required.");
    };

    let content_id = ContentId::new(content_id);
    match state.media_service.generate_image(content_id, &prompt).await {
        Ok(stored) => media_created("Image generated and uploaded successfully", content_id, stored),
        Err(e) => media_failure(e, "Failed to generate image."),
    }
}

#[tracing::instrument(skip(state, payload))]
pub async fn generate_content_handler(
    State(state): State<AppState>,
    payload: Result<Json<GenerateContentRequest>, JsonRejection>,
) -> Response {
    let Some(category_id) = payload.ok().and_then(|Json(r)| r.category_id) else {
        return responses::error(StatusCode::BAD_REQUEST, "categoryId is required in the request body.");
    };

    match state
        .content_service
        .generate_for_category(CategoryId::new(category_id))
        .await
    {
        Ok(content) => (StatusCode::CREATED, Json(ContentResponse::from(content))).into_response(),
        Err(ContentServiceError::CategoryNotFound(id)) => responses::error(
            StatusCode::NOT_FOUND,
            format!("Category with ID {} was not found.", id),
        ),
        Err(ContentServiceError::Generation(GeneratorError::RateLimited)) => responses::error(
            StatusCode::TOO_MANY_REQUESTS,
            "Generation rate limited, try again later.",
        ),
        Err(e) => {
            tracing::error!(error = %e, "Content generation failed");
            responses::error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to create or save content. Please try again.",
            )
        }
    }
}

fn media_created(message: &str, content_id: ContentId, stored: StoredMedia) -> Response {
    (
        StatusCode::OK,
        Json(GeneratedMediaResponse {
            message: message.to_string(),
            etag: stored.etag,
            file_url: stored.file_url,
            content_id: content_id.as_i64(),
        }),
    )
        .into_response()
}

fn media_failure(error: MediaServiceError, no_media_message: &str) -> Response {
    match error {
        MediaServiceError::NoMediaReturned(file_type) => {
            tracing::warn!(file_type = %file_type, "Model returned no media");
            responses::message(StatusCode::INTERNAL_SERVER_ERROR, no_media_message)
        }
        MediaServiceError::Generation(GeneratorError::RateLimited) => responses::error(
            StatusCode::TOO_MANY_REQUESTS,
            "Generation rate limited, try again later.",
        ),
        e => {
            tracing::error!(error = %e, "Media generation failed");
            responses::error(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
        }
    }
}
