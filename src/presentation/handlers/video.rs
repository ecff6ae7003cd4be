use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::ports::VideoComposerError;
use crate::application::services::{UploadedFile, VideoServiceError};
use crate::domain::ContentId;
use crate::presentation::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

impl VideoResponse {
    fn failure(status: StatusCode, message: impl Into<String>) -> Response {
        (
            status,
            Json(Self {
                success: false,
                message: message.into(),
                filename: None,
                video_url: None,
            }),
        )
            .into_response()
    }
}

#[derive(Default)]
struct VideoForm {
    content_id: Option<String>,
    audio: Option<UploadedFile>,
    images: Vec<UploadedFile>,
}

/// Accepts `contentId`, one `audio` file and one or more `images` files.
#[tracing::instrument(skip(state, multipart))]
pub async fn create_video_handler(State(state): State<AppState>, multipart: Multipart) -> Response {
    let form = match read_form(multipart).await {
        Ok(form) => form,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to parse multipart form");
            return VideoResponse::failure(
                StatusCode::BAD_REQUEST,
                format!("Failed to parse multipart form: {}", e),
            );
        }
    };

    let Some(content_id) = form.content_id.filter(|id| !id.trim().is_empty()) else {
        return VideoResponse::failure(StatusCode::BAD_REQUEST, "contentId is required");
    };
    let Ok(content_id) = content_id.trim().parse::<i64>() else {
        return VideoResponse::failure(StatusCode::BAD_REQUEST, "contentId must be a number");
    };
    let Some(audio) = form.audio else {
        return VideoResponse::failure(StatusCode::BAD_REQUEST, "Audio file is required");
    };
    if form.images.is_empty() {
        return VideoResponse::failure(StatusCode::BAD_REQUEST, "At least one image is required");
    }

    tracing::info!(content_id, images = form.images.len(), "Creating video");

    match state
        .video_service
        .create_video(ContentId::new(content_id), audio, form.images)
        .await
    {
        Ok(video) => (
            StatusCode::OK,
            Json(VideoResponse {
                success: true,
                message: "Video created successfully".to_string(),
                filename: Some(video.file_name),
                video_url: video.video_url,
            }),
        )
            .into_response(),
        Err(VideoServiceError::Composition(VideoComposerError::NoImages)) => {
            VideoResponse::failure(StatusCode::BAD_REQUEST, "At least one image is required")
        }
        Err(e) => {
            tracing::error!(error = %e, "Video creation failed");
            VideoResponse::failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to create video: {}", e),
            )
        }
    }
}

async fn read_form(mut multipart: Multipart) -> Result<VideoForm, axum::extract::multipart::MultipartError> {
    let mut form = VideoForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().unwrap_or_default().to_string();

        match name.as_str() {
            "contentId" => form.content_id = Some(field.text().await?),
            "audio" => {
                form.audio = Some(UploadedFile {
                    file_name,
                    data: field.bytes().await?,
                })
            }
            "images" | "images[]" => form.images.push(UploadedFile {
                file_name,
                data: field.bytes().await?,
            }),
            other => tracing::debug!(field = %other, "Ignoring unknown form field"),
        }
    }

    Ok(form)
}
