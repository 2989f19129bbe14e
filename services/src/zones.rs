//! Zone classification and the transition rule.
//!
//! The zone set is configuration, not code: one entry label, one exit label,
//! and an open set of interior labels. Matching is deliberately asymmetric —
//! the two special zones match case-insensitively while interior zones match
//! exactly — preserving the deployed scanner behavior. `classify` returns the
//! canonical configured label, so everything downstream (sessions, presence,
//! analytics exclusion) works with exact strings.

use crate::error::ScanError;
use db::models::employee::Presence;
use util::config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneKind {
    Entry,
    Exit,
    Interior,
}

/// A recognized zone: canonical label plus its access class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zone {
    pub label: String,
    pub kind: ZoneKind,
}

#[derive(Debug, Clone)]
pub struct ZoneTable {
    entry: String,
    exit: String,
    interior: Vec<String>,
}

impl ZoneTable {
    pub fn new(entry: impl Into<String>, exit: impl Into<String>, interior: Vec<String>) -> Self {
        Self {
            entry: entry.into(),
            exit: exit.into(),
            interior,
        }
    }

    pub fn from_config() -> Self {
        Self::new(
            config::zone_entry_label(),
            config::zone_exit_label(),
            config::zone_interior_labels(),
        )
    }

    pub fn entry_label(&self) -> &str {
        &self.entry
    }

    pub fn exit_label(&self) -> &str {
        &self.exit
    }

    /// Labels analytics must leave out of per-zone totals.
    pub fn analytics_exclusions(&self) -> Vec<String> {
        vec![self.entry.clone(), self.exit.clone()]
    }

    /// Resolve a scanned name to its canonical zone, or `None` if the name is
    /// not in the table.
    pub fn classify(&self, raw: &str) -> Option<Zone> {
        let scanned = raw.trim();
        if scanned.eq_ignore_ascii_case(&self.entry) {
            return Some(Zone {
                label: self.entry.clone(),
                kind: ZoneKind::Entry,
            });
        }
        if scanned.eq_ignore_ascii_case(&self.exit) {
            return Some(Zone {
                label: self.exit.clone(),
                kind: ZoneKind::Exit,
            });
        }
        self.interior
            .iter()
            .find(|z| z.as_str() == scanned)
            .map(|z| Zone {
                label: z.clone(),
                kind: ZoneKind::Interior,
            })
    }

    pub fn is_exit_label(&self, label: &str) -> bool {
        label.eq_ignore_ascii_case(&self.exit)
    }
}

/// The transition rule. Pure: no clock, no store.
///
/// Entry and exit scans are always legal — entering starts a session from
/// anywhere, exiting ends one from anywhere. An interior zone requires the
/// employee to actually be inside: current presence must be a zone other than
/// the exit zone.
pub fn validate(current: &Presence, requested: &Zone, table: &ZoneTable) -> Result<(), ScanError> {
    match requested.kind {
        ZoneKind::Entry | ZoneKind::Exit => Ok(()),
        ZoneKind::Interior => match current {
            Presence::NoActiveZone => Err(denied(table)),
            Presence::InZone(label) if table.is_exit_label(label) => Err(denied(table)),
            Presence::InZone(_) => Ok(()),
        },
    }
}

fn denied(table: &ZoneTable) -> ScanError {
    ScanError::access_denied(format!(
        "Scan '{}' first before accessing other zones",
        table.entry_label()
    ))
}
