//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → liveness probe (public)
//! - `/scans` → scan submission (authenticated)
//! - `/employees` → per-employee analytics (authenticated, org-checked in
//!   the handler since the org id is not in the path)
//! - `/organizations/{organization_id}` → presence, analytics and
//!   announcements, all behind the tenant-boundary guard

use axum::{Router, middleware::from_fn};
use util::state::AppState;

use crate::auth::guards::{allow_authenticated, allow_same_organization};

pub mod employees;
pub mod health;
pub mod organizations;
pub mod scans;

pub fn routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/health", health::health_routes())
        .nest(
            "/scans",
            scans::scan_routes().route_layer(from_fn(allow_authenticated)),
        )
        .nest(
            "/employees",
            employees::employee_routes().route_layer(from_fn(allow_authenticated)),
        )
        .nest(
            "/organizations/{organization_id}",
            organizations::organization_routes().route_layer(from_fn(allow_same_organization)),
        )
        .with_state(app_state)
}
