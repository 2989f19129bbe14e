use axum::Router;
use util::state::AppState;

pub mod analytics;
pub mod announcements;
pub mod presence;

/// Everything under `/organizations/{organization_id}`; the tenant-boundary
/// guard is applied by the parent router.
pub fn organization_routes() -> Router<AppState> {
    Router::new()
        .nest("/presence", presence::presence_routes())
        .nest("/analytics", analytics::analytics_routes())
        .nest("/announcements", announcements::announcement_routes())
}
