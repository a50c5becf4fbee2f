//! Write-through mirror of the record list into a snapshot slot.

use std::collections::HashSet;

use platform_storage::SnapshotSlots;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{employee::Employee, error::HrResult};

/// Slot key the register has always been saved under.
pub const SNAPSHOT_KEY: &str = "employeeList";

pub struct PersistenceBridge {
    slots: Box<dyn SnapshotSlots>,
    key: String,
}

impl PersistenceBridge {
    pub fn new(slots: impl SnapshotSlots + 'static) -> Self {
        Self {
            slots: Box::new(slots),
            key: SNAPSHOT_KEY.to_string(),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the startup snapshot. Missing, unreadable or corrupt data all
    /// yield an empty list; a malformed record drops only itself.
    pub fn load(&self) -> Vec<Employee> {
        let raw = match self.slots.read(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "no snapshot found, starting empty");
                return Vec::new();
            }
            Err(err) => {
                warn!(key = %self.key, error = %err, "snapshot unreadable, starting empty");
                return Vec::new();
            }
        };

        // `null` is what an explicitly cleared slot holds.
        let entries = match serde_json::from_str::<Option<Vec<Value>>>(&raw) {
            Ok(entries) => entries.unwrap_or_default(),
            Err(err) => {
                warn!(key = %self.key, error = %err, "snapshot corrupt, starting empty");
                return Vec::new();
            }
        };

        let records: Vec<Employee> = entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value(entry) {
                Ok(employee) => Some(employee),
                Err(err) => {
                    warn!(key = %self.key, index, error = %err, "skipping malformed record");
                    None
                }
            })
            .collect();

        let mut seen = HashSet::new();
        let before = records.len();
        let records: Vec<Employee> = records
            .into_iter()
            .filter(|employee| seen.insert(employee.id.clone()))
            .collect();
        if records.len() != before {
            warn!(
                key = %self.key,
                dropped = before - records.len(),
                "snapshot contained duplicate ids, kept first occurrences"
            );
        }
        debug!(key = %self.key, count = records.len(), "snapshot loaded");
        records
    }

    /// Overwrite the slot with the full record list.
    pub fn persist(&mut self, records: &[Employee]) -> HrResult<()> {
        let encoded = serde_json::to_string(records)?;
        self.slots.write(&self.key, &encoded)?;
        debug!(key = %self.key, count = records.len(), "snapshot written");
        Ok(())
    }
}
