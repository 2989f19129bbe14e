use axum::{Router, middleware::from_fn, routing::delete, routing::get};
use util::state::AppState;

pub mod delete;
pub mod get;

use crate::auth::guards::allow_admin;

/// Org-wide analytics are an admin view; employees read their own numbers
/// through `/employees/{employee_id}/analytics`.
pub fn analytics_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get::get_organization_analytics))
        .route("/", delete(delete::purge_organization_analytics))
        .route_layer(from_fn(allow_admin))
}
