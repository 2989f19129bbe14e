use axum::{Json, extract::{Path, State}, http::StatusCode};
use serde::Serialize;
use util::state::AppState;

use crate::response::ApiResponse;
use db::models::zone_session::Model as ZoneSessionModel;

#[derive(Serialize, Default)]
pub struct PurgeResult {
    pub deleted: u64,
}

/// DELETE /api/organizations/{organization_id}/analytics
///
/// Administrative reset: removes every session of the organization.
/// Irreversible.
pub async fn purge_organization_analytics(
    State(state): State<AppState>,
    Path(organization_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<PurgeResult>>) {
    match ZoneSessionModel::purge_for_organization(state.db(), organization_id).await {
        Ok(deleted) => {
            tracing::info!(organization_id, deleted, "analytics purged");
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    PurgeResult { deleted },
                    "Analytics data cleared",
                )),
            )
        }
        Err(e) => {
            tracing::error!("analytics purge failed for organization {organization_id}: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Failed to clear analytics")),
            )
        }
    }
}
