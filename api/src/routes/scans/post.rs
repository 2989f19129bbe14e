use axum::{Extension, Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use validator::Validate;

use db::models::employee;
use services::error::ScanError;
use util::state::AppState;

use super::TRANSITIONS;
use crate::{auth::AuthUser, response::ApiResponse, ws::presence::emit};

#[derive(Debug, Deserialize, Validate)]
pub struct ScanRequest {
    pub employee_id: i64,
    #[validate(length(min = 1, message = "zone is required"))]
    pub zone: String,
}

/// Synchronous-style scan result; `reason` is only present on rejection.
#[derive(Debug, Default, Serialize)]
pub struct ScanResult {
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
}

/// POST /api/scans
///
/// Employees scan for themselves; an admin may submit on behalf of any
/// employee of their own organization. On success the org's presence topic
/// receives a fresh roster; rejections go to the requester only.
pub async fn submit_scan(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(body): Json<ScanRequest>,
) -> (StatusCode, Json<ApiResponse<ScanResult>>) {
    if let Err(e) = body.validate() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiResponse {
                success: false,
                data: ScanResult {
                    reason: Some("VALIDATION_ERROR"),
                    ..Default::default()
                },
                message: e.to_string(),
            }),
        );
    }

    let db = state.db();

    // Actor check before any state is touched.
    if claims.admin {
        match employee::Model::find_by_id(db, body.employee_id).await {
            Ok(Some(e)) if e.organization_id == claims.organization_id => {}
            Ok(Some(_)) => {
                return rejection(
                    StatusCode::FORBIDDEN,
                    "ACCESS_DENIED",
                    "Employee belongs to another organization",
                );
            }
            Ok(None) => {
                return rejection(StatusCode::NOT_FOUND, "NOT_FOUND", "Employee not found");
            }
            Err(e) => {
                tracing::error!("employee lookup failed: {e}");
                return rejection(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORE_ERROR",
                    "Scan could not be recorded, please try again",
                );
            }
        }
    } else if claims.sub != body.employee_id {
        return rejection(
            StatusCode::FORBIDDEN,
            "ACCESS_DENIED",
            "Scans may only be submitted for yourself",
        );
    }

    match TRANSITIONS.submit_scan(db, body.employee_id, &body.zone).await {
        Ok(accepted) => {
            // Observers only ever see committed state: the broadcast happens
            // strictly after the transition has been persisted.
            emit::roster_updated(state.ws(), db, accepted.organization_id).await;

            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    ScanResult {
                        accepted: true,
                        zone: Some(accepted.zone),
                        reason: None,
                    },
                    "Scan accepted",
                )),
            )
        }
        Err(err) => {
            let status = match &err {
                ScanError::UnknownZone(_) => StatusCode::UNPROCESSABLE_ENTITY,
                ScanError::AccessDenied(_) => StatusCode::FORBIDDEN,
                ScanError::EmployeeNotFound => StatusCode::NOT_FOUND,
                ScanError::Store(e) => {
                    tracing::error!("scan transition failed in store: {e}");
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            rejection(status, err.reason(), err.public_message())
        }
    }
}

fn rejection(
    status: StatusCode,
    reason: &'static str,
    message: impl Into<String>,
) -> (StatusCode, Json<ApiResponse<ScanResult>>) {
    (
        status,
        Json(ApiResponse {
            success: false,
            data: ScanResult {
                accepted: false,
                zone: None,
                reason: Some(reason),
            },
            message: message.into(),
        }),
    )
}
