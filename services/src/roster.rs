//! The presence snapshot dashboards consume.

use sea_orm::{DatabaseConnection, DbErr};
use serde::Serialize;

use db::models::employee;

/// One dashboard row: who, and where they currently are. `zone` is `None`
/// for an employee who is not in any zone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterEntry {
    pub employee_id: i64,
    pub employee_number: String,
    pub name: String,
    pub email: String,
    pub zone: Option<String>,
}

/// Full snapshot of an organization's employees with their current zones.
/// This is what gets pushed to every observer of the org's presence topic.
pub async fn organization_roster(
    db: &DatabaseConnection,
    organization_id: i64,
) -> Result<Vec<RosterEntry>, DbErr> {
    let employees = employee::Model::find_for_organization(db, organization_id).await?;
    Ok(employees
        .into_iter()
        .map(|e| RosterEntry {
            employee_id: e.id,
            employee_number: e.employee_number,
            name: e.name,
            email: e.email,
            zone: e.current_zone,
        })
        .collect())
}
