use axum::{Router, routing::get};
use util::state::AppState;

pub mod analytics;

pub fn employee_routes() -> Router<AppState> {
    Router::new().route(
        "/{employee_id}/analytics",
        get(analytics::get::get_employee_analytics),
    )
}
