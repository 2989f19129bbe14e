//! The transition processor: one scan in, one atomic presence change out.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use serde::Serialize;

use db::models::employee::{self, Presence};
use db::models::zone_session;

use crate::error::ScanError;
use crate::zones::{self, ZoneTable};

/// Outcome of an accepted scan, echoed to the requester and used by the
/// caller to fan the new roster out to the employee's organization.
#[derive(Debug, Clone, Serialize)]
pub struct ScanAccepted {
    pub employee_id: i64,
    pub organization_id: i64,
    pub zone: String,
    pub entered_at: DateTime<Utc>,
}

/// Serializes transitions per employee and drives the
/// validate -> close -> open -> presence pipeline.
///
/// Scans for different employees run fully in parallel; scans for the same
/// employee are forced through a keyed async mutex so interleaved steps can
/// never leave two sessions open.
pub struct TransitionService {
    zones: ZoneTable,
    locks: Mutex<HashMap<i64, Arc<tokio::sync::Mutex<()>>>>,
}

impl TransitionService {
    pub fn new(zones: ZoneTable) -> Self {
        Self {
            zones,
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn from_config() -> Self {
        Self::new(ZoneTable::from_config())
    }

    pub fn zones(&self) -> &ZoneTable {
        &self.zones
    }

    fn lock_for(&self, employee_id: i64) -> Arc<tokio::sync::Mutex<()>> {
        let mut map = self.locks.lock().expect("employee lock map poisoned");
        map.entry(employee_id)
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone()
    }

    /// Process one scan event for `employee_id` targeting `requested_zone`.
    ///
    /// On success the store holds the new open session and the updated
    /// presence pointer; nothing has been broadcast yet. On any error the
    /// observable state is unchanged.
    pub async fn submit_scan(
        &self,
        db: &DatabaseConnection,
        employee_id: i64,
        requested_zone: &str,
    ) -> Result<ScanAccepted, ScanError> {
        let zone = self
            .zones
            .classify(requested_zone)
            .ok_or_else(|| ScanError::UnknownZone(requested_zone.trim().to_owned()))?;

        let lock = self.lock_for(employee_id);
        let _guard = lock.lock().await;

        // Presence is read under the lock so a concurrent scan for the same
        // employee cannot validate against a stale zone.
        let employee = employee::Model::find_by_id(db, employee_id)
            .await?
            .ok_or(ScanError::EmployeeNotFound)?;

        zones::validate(&employee.presence(), &zone, &self.zones)?;

        let now = Utc::now();

        // Close whatever is open, unconditionally. A dangling session from a
        // lost exit event gets sealed here instead of growing forever.
        if let Some(open) = zone_session::Model::find_open(db, employee.id).await? {
            zone_session::Model::close(db, open, now).await?;
        }

        zone_session::Model::open(db, employee.id, employee.organization_id, &zone.label, now)
            .await?;
        employee::Model::set_presence(db, employee.id, &Presence::InZone(zone.label.clone()))
            .await?;

        tracing::info!(employee_id, zone = %zone.label, "zone transition applied");

        Ok(ScanAccepted {
            employee_id: employee.id,
            organization_id: employee.organization_id,
            zone: zone.label,
            entered_at: now,
        })
    }
}
