use super::handler_trait::WsHandler;
use super::serve::{WsServerOptions, serve_topic};
use crate::state::AppState;
use axum::{
    Extension,
    extract::{State, WebSocketUpgrade, ws::WebSocket},
    response::IntoResponse,
};
use std::sync::Arc;

/// Upgrade an HTTP request into a topic-bound WebSocket session.
///
/// `topic_fn` is evaluated once per connection, so route handlers can close
/// over path parameters when building the topic name.
pub async fn ws_route<H, FTopic, Uid>(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Extension(user_id): Extension<Uid>,
    topic_fn: FTopic,
    handler: Arc<H>,
    opts: WsServerOptions,
) -> impl IntoResponse
where
    H: WsHandler,
    FTopic: Fn() -> String + Send + 'static,
    Uid: Into<Option<i64>> + Clone + Send + Sync + 'static,
{
    let manager = state.ws_clone();
    let uid_opt = user_id.into();

    ws.on_upgrade(move |socket: WebSocket| {
        let topic = topic_fn();
        let handler = Arc::clone(&handler);
        let manager = manager.clone();
        async move {
            serve_topic(socket, manager, topic, uid_opt, handler, opts).await;
        }
    })
}
