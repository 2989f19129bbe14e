use super::runtime::WsContext;
use serde::de::DeserializeOwned;
use std::future::Future;

/// Per-connection behavior for a topic-bound WebSocket.
///
/// Implementations receive already-parsed messages of their `In` type; frames
/// that fail to parse are logged and dropped by the serving loop.
pub trait WsHandler: Send + Sync + 'static {
    /// The incoming message type (a tagged enum in practice).
    type In: DeserializeOwned + Send;

    /// Called once after the socket is set up and presence is registered.
    fn on_open(&self, ctx: &WsContext) -> impl Future<Output = ()> + Send {
        async move {
            let _ = ctx;
        }
    }

    /// Called for every parsed text frame.
    fn on_message(&self, ctx: &WsContext, msg: Self::In) -> impl Future<Output = ()> + Send;

    /// Called when the client closes; presence is unregistered afterwards.
    fn on_close(&self, ctx: &WsContext) -> impl Future<Output = ()> + Send {
        async move {
            let _ = ctx;
        }
    }
}
