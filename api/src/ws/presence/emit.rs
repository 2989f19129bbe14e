use sea_orm::DatabaseConnection;
use serde::Serialize;
use util::ws::WebSocketManager;

use super::payload;
use super::topics::organization_presence_topic;
use crate::ws::core::{envelope, event::Event};

#[derive(Debug, Serialize)]
pub struct RosterEvent {
    #[serde(flatten)]
    pub payload: payload::Roster,
}

impl Event for RosterEvent {
    const NAME: &'static str = "presence.roster";
    fn topic_path(&self) -> String {
        organization_presence_topic(self.payload.organization_id)
    }
}

/// Load the organization's roster and push it to every observer of the org
/// topic. Best-effort: a load failure is logged and nothing is sent, a
/// lagging observer just misses this snapshot.
pub async fn roster_updated(
    ws: &WebSocketManager,
    db: &DatabaseConnection,
    organization_id: i64,
) {
    match services::roster::organization_roster(db, organization_id).await {
        Ok(employees) => {
            let event = RosterEvent {
                payload: payload::Roster {
                    organization_id,
                    employees,
                },
            };
            envelope::emit(ws, &event).await;
        }
        Err(e) => {
            tracing::error!("roster load failed for organization {organization_id}: {e}");
        }
    }
}
