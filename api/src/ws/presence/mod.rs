use axum::{Router, middleware::from_fn, routing::get};
use util::state::AppState;

pub mod common;
pub mod emit;
pub mod handlers;
pub mod payload;
pub mod topics;
pub mod ws_handlers;

use crate::auth::guards::allow_same_organization;
use handlers::organization_presence_ws_handler;

pub fn ws_presence_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/{organization_id}/presence",
            get(organization_presence_ws_handler),
        )
        .route_layer(from_fn(allow_same_organization))
}
