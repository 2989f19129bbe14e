use axum::{Extension, Json, extract::{Path, State}, http::StatusCode};
use serde::Deserialize;
use validator::Validate;

use crate::{auth::AuthUser, response::ApiResponse};
use db::models::announcement;
use util::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateAnnouncementReq {
    #[validate(length(min = 1, message = "message is required"))]
    pub message: String,
}

/// POST /api/organizations/{organization_id}/announcements (admin)
pub async fn create_announcement(
    State(state): State<AppState>,
    Path(organization_id): Path<i64>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(body): Json<CreateAnnouncementReq>,
) -> (StatusCode, Json<ApiResponse<Option<announcement::Model>>>) {
    if !claims.admin {
        return (
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error("Admin access required")),
        );
    }
    if let Err(e) = body.validate() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiResponse::error(e.to_string())),
        );
    }

    match announcement::Model::create(state.db(), organization_id, &body.message).await {
        Ok(row) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(Some(row), "Announcement created")),
        ),
        Err(e) => {
            tracing::error!("announcement create failed for organization {organization_id}: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Failed to create announcement")),
            )
        }
    }
}
