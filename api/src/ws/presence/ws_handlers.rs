use serde_json::json;
use util::state::AppState;
use util::ws::EventEnvelope;
use util::ws::handler_trait::WsHandler;
use util::ws::runtime::WsContext;

use super::common::PresenceIncoming;
use super::emit;
use super::payload;
use crate::ws::core::event::Event;

pub struct PresenceWsHandler {
    pub state: AppState,
    pub organization_id: i64,
}

impl WsHandler for PresenceWsHandler {
    type In = PresenceIncoming;

    /// Pull-on-join: delivery is at-most-once with no replay, so a joining
    /// observer gets a fresh snapshot directly — the topic stays quiet.
    async fn on_open(&self, ctx: &WsContext) {
        match services::roster::organization_roster(self.state.db(), self.organization_id).await {
            Ok(employees) => {
                let event = emit::RosterEvent {
                    payload: payload::Roster {
                        organization_id: self.organization_id,
                        employees,
                    },
                };
                let envelope =
                    EventEnvelope::new(emit::RosterEvent::NAME, &ctx.topic, &event);
                if let Ok(text) = serde_json::to_string(&envelope) {
                    let _ = ctx.reply_text(text).await;
                }
            }
            Err(e) => {
                tracing::error!(
                    "initial roster load failed for organization {}: {e}",
                    self.organization_id
                );
            }
        }
    }

    async fn on_message(&self, ctx: &WsContext, msg: Self::In) {
        match msg {
            PresenceIncoming::RequestRoster => {
                emit::roster_updated(&ctx.ws, self.state.db(), self.organization_id).await;
            }
            PresenceIncoming::Ping => {
                let _ = ctx
                    .reply_text(
                        json!({
                            "event": "pong",
                            "topic": ctx.topic,
                            "payload": {},
                            "ts": chrono::Utc::now().to_rfc3339(),
                        })
                        .to_string(),
                    )
                    .await;
            }
        }
    }
}
