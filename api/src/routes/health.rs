use axum::{Json, Router, http::StatusCode, routing::get};
use serde::Serialize;
use util::state::AppState;

use crate::response::ApiResponse;

#[derive(Serialize, Default)]
pub struct HealthStatus {
    pub status: &'static str,
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health))
}

async fn health() -> (StatusCode, Json<ApiResponse<HealthStatus>>) {
    (
        StatusCode::OK,
        Json(ApiResponse::success(
            HealthStatus { status: "ok" },
            "Service healthy",
        )),
    )
}
