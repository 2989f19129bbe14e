use axum::{Json, extract::{Path, State}, http::StatusCode};
use util::state::AppState;

use crate::auth::guards::Empty;
use crate::response::ApiResponse;
use crate::ws::presence::emit;

/// POST /api/organizations/{organization_id}/presence/snapshot
///
/// Trigger one immediate broadcast on the org topic without requiring a new
/// scan — there is no replay, so this is how a dashboard refreshes everyone.
pub async fn request_snapshot(
    State(state): State<AppState>,
    Path(organization_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<Empty>>) {
    emit::roster_updated(state.ws(), state.db(), organization_id).await;
    (
        StatusCode::OK,
        Json(ApiResponse::success(Empty, "Snapshot broadcast")),
    )
}
