use axum::{
    Extension,
    extract::{Path, State, WebSocketUpgrade},
    response::IntoResponse,
};
use std::sync::Arc;
use util::state::AppState;
use util::ws::axum_adapter::ws_route;
use util::ws::serve::WsServerOptions;

use super::topics::organization_presence_topic;
use super::ws_handlers::PresenceWsHandler;
use crate::auth::AuthUser;

/// GET /ws/organizations/{organization_id}/presence
///
/// Org scoping is enforced by the route guard; by the time this runs the
/// caller is known to belong to `organization_id`.
pub async fn organization_presence_ws_handler(
    ws: WebSocketUpgrade,
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Path(organization_id): Path<i64>,
) -> impl IntoResponse {
    let uid_opt = Some(claims.sub);

    let handler = Arc::new(PresenceWsHandler {
        state: app_state.clone(),
        organization_id,
    });

    let topic = move || organization_presence_topic(organization_id);

    let opts = WsServerOptions {
        ws_ping_sec: util::config::ws_ping_seconds(),
        ..WsServerOptions::default()
    };

    ws_route(ws, State(app_state), Extension(uid_opt), topic, handler, opts).await
}
