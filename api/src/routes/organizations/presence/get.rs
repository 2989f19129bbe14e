use axum::{Json, extract::{Path, State}, http::StatusCode};
use util::state::AppState;

use crate::response::ApiResponse;
use services::roster::RosterEntry;

/// GET /api/organizations/{organization_id}/presence
///
/// REST pull of the same snapshot the WebSocket pushes; useful for observers
/// that just (re)connected and for non-streaming clients.
pub async fn get_presence(
    State(state): State<AppState>,
    Path(organization_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<Vec<RosterEntry>>>) {
    match services::roster::organization_roster(state.db(), organization_id).await {
        Ok(roster) => (
            StatusCode::OK,
            Json(ApiResponse::success(roster, "Current presence")),
        ),
        Err(e) => {
            tracing::error!("presence read failed for organization {organization_id}: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Failed to load presence")),
            )
        }
    }
}
