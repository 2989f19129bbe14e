use axum::{Router, middleware::from_fn};
use util::state::AppState;

use crate::auth::guards::allow_authenticated;
use crate::ws::presence::ws_presence_routes;

pub mod core;
pub mod presence;

pub fn ws_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/organizations", ws_presence_routes())
        .route_layer(from_fn(allow_authenticated))
        .with_state(app_state)
}
