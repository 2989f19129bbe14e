use axum::{Router, routing::post};
use once_cell::sync::Lazy;
use services::scan::TransitionService;
use util::state::AppState;

pub mod post;

/// One processor for the whole process: its per-employee locks are only
/// effective if every scan goes through the same instance.
pub static TRANSITIONS: Lazy<TransitionService> = Lazy::new(TransitionService::from_config);

pub fn scan_routes() -> Router<AppState> {
    Router::new().route("/", post(post::submit_scan))
}
