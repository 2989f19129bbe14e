use axum::{Extension, Json, extract::{Path, State}, http::StatusCode};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use crate::{auth::AuthUser, auth::guards::Empty, response::ApiResponse};
use db::models::announcement::{Column, Entity, Model};
use util::state::AppState;

/// DELETE /api/organizations/{organization_id}/announcements/{announcement_id} (admin)
pub async fn delete_announcement(
    State(state): State<AppState>,
    Path((organization_id, announcement_id)): Path<(i64, i64)>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> (StatusCode, Json<ApiResponse<Empty>>) {
    if !claims.admin {
        return (
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error("Admin access required")),
        );
    }

    // Resolve within the org so one tenant cannot delete another's rows.
    let found = Entity::find()
        .filter(Column::Id.eq(announcement_id))
        .filter(Column::OrganizationId.eq(organization_id))
        .one(state.db())
        .await;

    match found {
        Ok(Some(_)) => match Model::delete(state.db(), announcement_id).await {
            Ok(()) => (
                StatusCode::OK,
                Json(ApiResponse::success(Empty, "Announcement deleted")),
            ),
            Err(e) => {
                tracing::error!("announcement delete failed: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::error("Failed to delete announcement")),
                )
            }
        },
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Announcement not found")),
        ),
        Err(e) => {
            tracing::error!("announcement lookup failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Failed to delete announcement")),
            )
        }
    }
}
