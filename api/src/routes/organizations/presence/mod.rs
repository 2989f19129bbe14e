use axum::{Router, routing::get, routing::post};
use util::state::AppState;

pub mod get;
pub mod post;

pub fn presence_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get::get_presence))
        .route("/snapshot", post(post::request_snapshot))
}
