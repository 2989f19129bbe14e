use axum::{Router, routing::delete, routing::get};
use util::state::AppState;

pub mod delete;
pub mod get;
pub mod post;

pub fn announcement_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get::list_announcements).post(post::create_announcement))
        .route("/{announcement_id}", delete(delete::delete_announcement))
}
