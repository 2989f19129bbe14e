use axum::{Json, extract::{Path, State}, http::StatusCode};
use util::state::AppState;

use crate::response::ApiResponse;
use crate::routes::scans::TRANSITIONS;
use db::models::zone_session::{Model as ZoneSessionModel, ZoneAggregate};

/// GET /api/organizations/{organization_id}/analytics
///
/// Per-zone totals over closed sessions, entry/exit zones excluded, ordered
/// by total time descending.
pub async fn get_organization_analytics(
    State(state): State<AppState>,
    Path(organization_id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<Vec<ZoneAggregate>>>) {
    let exclude = TRANSITIONS.zones().analytics_exclusions();

    match ZoneSessionModel::aggregate_for_organization(state.db(), organization_id, &exclude).await
    {
        Ok(stats) => (
            StatusCode::OK,
            Json(ApiResponse::success(stats, "Zone analytics")),
        ),
        Err(e) => {
            tracing::error!("analytics query failed for organization {organization_id}: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Failed to load analytics")),
            )
        }
    }
}
