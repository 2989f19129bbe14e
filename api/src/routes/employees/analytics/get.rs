use axum::{Extension, Json, extract::{Path, State}, http::StatusCode};
use util::state::AppState;

use crate::{auth::AuthUser, response::ApiResponse, routes::scans::TRANSITIONS};
use db::models::employee;
use db::models::zone_session::{Model as ZoneSessionModel, ZoneAggregate};

/// GET /api/employees/{employee_id}/analytics
///
/// Readable by anyone in the same organization — the employee themself, the
/// org admin, or a coworker. The org id is not in the path, so the tenant
/// check happens here against the resolved employee.
pub async fn get_employee_analytics(
    State(state): State<AppState>,
    Path(employee_id): Path<i64>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> (StatusCode, Json<ApiResponse<Vec<ZoneAggregate>>>) {
    let db = state.db();

    let target = match employee::Model::find_by_id(db, employee_id).await {
        Ok(Some(e)) => e,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error("Employee not found")),
            );
        }
        Err(e) => {
            tracing::error!("employee lookup failed: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Failed to load analytics")),
            );
        }
    };

    if target.organization_id != claims.organization_id {
        return (
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error("Organization access denied")),
        );
    }

    let exclude = TRANSITIONS.zones().analytics_exclusions();
    match ZoneSessionModel::aggregate_for_employee(db, employee_id, &exclude).await {
        Ok(stats) => (
            StatusCode::OK,
            Json(ApiResponse::success(stats, "Zone analytics")),
        ),
        Err(e) => {
            tracing::error!("analytics query failed for employee {employee_id}: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Failed to load analytics")),
            )
        }
    }
}
