use axum::{Json, extract::{Path, State}, http::StatusCode};
use util::state::AppState;

use crate::response::ApiResponse;
use db::models::announcement;

/// GET /api/organizations/{organization_id}/announcements
pub async fn list_announcements(
    State(state): State<AppState>,
    Path(organization_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<Vec<announcement::Model>>>) {
    match announcement::Model::find_for_organization(state.db(), organization_id).await {
        Ok(list) => (
            StatusCode::OK,
            Json(ApiResponse::success(list, "Announcements")),
        ),
        Err(e) => {
            tracing::error!("announcement list failed for organization {organization_id}: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Failed to load announcements")),
            )
        }
    }
}
