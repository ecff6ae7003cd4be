use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::domain::Category;
use crate::presentation::state::AppState;

use super::responses;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub target_audience: Option<String>,
    pub content_goal: Option<String>,
    pub example_use_case: Option<String>,
    pub last_picked_at: Option<String>,
    pub created_at: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id.as_i64(),
            name: category.name,
            description: category.description,
            target_audience: category.target_audience,
            content_goal: category.content_goal,
            example_use_case: category.example_use_case,
            last_picked_at: category.last_picked_at.map(|t| t.to_rfc3339()),
            created_at: category.created_at.to_rfc3339(),
        }
    }
}

/// Hands out categories in round-robin order, least recently picked first.
#[tracing::instrument(skip(state))]
pub async fn next_category_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.category_repository.next_round_robin().await {
        Ok(Some(category)) => {
            tracing::info!(category_id = %category.id, name = %category.name, "Category picked");
            (StatusCode::OK, Json(CategoryResponse::from(category))).into_response()
        }
        Ok(None) => responses::message(StatusCode::NOT_FOUND, "No categories found."),
        Err(e) => {
            tracing::error!(error = %e, "Failed to pick next category");
            responses::error(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
        }
    }
}
