use serde::Serialize;
use services::roster::RosterEntry;

/// Full presence snapshot for one organization.
#[derive(Debug, Clone, Serialize)]
pub struct Roster {
    pub organization_id: i64,
    pub employees: Vec<RosterEntry>,
}
