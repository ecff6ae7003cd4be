use axum::Json;
use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::application::ports::MediaStoreError;
use crate::application::services::MediaServiceError;
use crate::domain::{ContentId, MediaFile, MediaFileId, MediaFileType, mime_for_file_name};
use crate::presentation::state::AppState;

use super::responses;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaFileResponse {
    pub id: i64,
    pub content_id: i64,
    pub file_type: String,
    pub file_name: String,
    pub file_url: String,
    pub created_at: String,
}

impl From<MediaFile> for MediaFileResponse {
    fn from(media: MediaFile) -> Self {
        Self {
            id: media.id.as_i64(),
            content_id: media.content_id.as_i64(),
            file_type: media.file_type.as_str().to_string(),
            file_name: media.file_name,
            file_url: media.file_url,
            created_at: media.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct MediaQuery {
    #[serde(rename = "type")]
    pub file_type: Option<String>,
}

#[tracing::instrument(skip(state))]
pub async fn list_media_handler(
    State(state): State<AppState>,
    Path(content_id): Path<String>,
    Query(query): Query<MediaQuery>,
) -> Response {
    let Ok(content_id) = content_id.parse::<i64>() else {
        return responses::error(StatusCode::BAD_REQUEST, "Invalid content ID");
    };

    let file_type = match query.file_type.as_deref().map(str::parse::<MediaFileType>) {
        None => None,
        Some(Ok(file_type)) => Some(file_type),
        Some(Err(e)) => return responses::error(StatusCode::BAD_REQUEST, e),
    };

    match state
        .media_service
        .list_media(ContentId::new(content_id), file_type)
        .await
    {
        Ok(media) => {
            let body: Vec<MediaFileResponse> = media.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to list media");
            responses::error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to get media")
        }
    }
}

/// Streams a stored object back as a download.
#[tracing::instrument(skip(state))]
pub async fn download_media_handler(
    State(state): State<AppState>,
    Path(media_id): Path<String>,
) -> Response {
    let Ok(media_id) = media_id.parse::<i64>() else {
        return responses::error(StatusCode::BAD_REQUEST, "Invalid media ID");
    };

    match state.media_service.open_media(MediaFileId::new(media_id)).await {
        Ok((media, stream)) => {
            let file_name = media.download_name().replace('"', "");
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, mime_for_file_name(&file_name).to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", file_name),
                    ),
                ],
                Body::from_stream(stream),
            )
                .into_response()
        }
        Err(MediaServiceError::MediaNotFound(_)) => {
            responses::error(StatusCode::NOT_FOUND, "Media not found")
        }
        Err(MediaServiceError::Store(MediaStoreError::NotFound(key))) => {
            tracing::warn!(key = %key, "Media row points at a missing object");
            responses::error(StatusCode::NOT_FOUND, "Media file missing from storage")
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to open media");
            responses::error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to get file")
        }
    }
}
