//! Canonical, in-memory list of employee records.

use tracing::{info, warn};

use crate::{
    employee::{Employee, EmployeeField, EmployeeFields, EmployeeId},
    error::HrResult,
    persistence::PersistenceBridge,
};

/// Owns every employee record. Each committed mutation bumps the revision and
/// is written through to the persistence bridge.
pub struct RecordStore {
    records: Vec<Employee>,
    bridge: PersistenceBridge,
    revision: u64,
    synced: bool,
}

impl RecordStore {
    /// Load the startup snapshot once and take ownership of the bridge.
    pub fn open(bridge: PersistenceBridge) -> Self {
        let records = bridge.load();
        Self {
            records,
            bridge,
            revision: 0,
            synced: true,
        }
    }

    pub fn records(&self) -> &[Employee] {
        &self.records
    }

    pub fn get(&self, id: &EmployeeId) -> Option<&Employee> {
        self.records.iter().find(|employee| &employee.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Incremented on every committed mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// False when the last write-through failed and the slot lags behind.
    pub fn is_synced(&self) -> bool {
        self.synced
    }

    pub fn add(&mut self, fields: EmployeeFields) -> &Employee {
        let mut id = EmployeeId::generate();
        while self.get(&id).is_some() {
            id = EmployeeId::generate();
        }
        info!(%id, "employee added");
        self.records.push(Employee::new(id, fields));
        self.commit();
        let last = self.records.len() - 1;
        &self.records[last]
    }

    /// Returns whether a record was removed. A miss is not an error.
    pub fn remove(&mut self, id: &EmployeeId) -> bool {
        let before = self.records.len();
        self.records.retain(|employee| &employee.id != id);
        if self.records.len() == before {
            return false;
        }
        info!(%id, "employee removed");
        self.commit();
        true
    }

    /// Overwrite the patched fields of the record with `id`. The identity is
    /// not an `EmployeeField`, so it can never be patched.
    pub fn update<I>(&mut self, id: &EmployeeId, patch: I) -> bool
    where
        I: IntoIterator<Item = (EmployeeField, String)>,
    {
        let Some(employee) = self.records.iter_mut().find(|employee| &employee.id == id) else {
            return false;
        };
        for (field, value) in patch {
            employee.fields.set(field, value);
        }
        info!(%id, "employee updated");
        self.commit();
        true
    }

    /// Retry writing the current list, e.g. after a failed write-through.
    pub fn flush(&mut self) -> HrResult<()> {
        self.bridge.persist(&self.records)?;
        self.synced = true;
        Ok(())
    }

    fn commit(&mut self) {
        self.revision += 1;
        match self.bridge.persist(&self.records) {
            Ok(()) => self.synced = true,
            Err(err) => {
                warn!(error = %err, key = self.bridge.key(), "snapshot write failed");
                self.synced = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::SNAPSHOT_KEY;
    use platform_storage::{MemorySlots, SnapshotSlots, StorageError, StorageResult};

    fn named(first_name: &str) -> EmployeeFields {
        EmployeeFields {
            first_name: first_name.into(),
            ..EmployeeFields::default()
        }
    }

    fn open_memory() -> (RecordStore, MemorySlots) {
        let slots = MemorySlots::new();
        (RecordStore::open(PersistenceBridge::new(slots.clone())), slots)
    }

    #[test]
    fn add_assigns_fresh_ids_and_persists() {
        let (mut store, slots) = open_memory();
        let first = store.add(named("John")).id.clone();
        let second = store.add(named("Alice")).id.clone();
        assert_ne!(first, second);
        assert_eq!(store.len(), 2);
        assert_eq!(store.revision(), 2);

        let raw = slots.read(SNAPSHOT_KEY).unwrap().unwrap();
        assert!(raw.contains("Alice"));
    }

    #[test]
    fn remove_missing_is_a_noop() {
        let (mut store, slots) = open_memory();
        store.add(named("John"));
        let revision = store.revision();
        assert!(!store.remove(&EmployeeId::from("missing")));
        assert_eq!(store.len(), 1);
        assert_eq!(store.revision(), revision);
        assert!(slots.read(SNAPSHOT_KEY).unwrap().is_some());
    }

    #[test]
    fn update_overwrites_only_patched_fields() {
        let (mut store, _slots) = open_memory();
        let id = store
            .add(EmployeeFields {
                first_name: "John".into(),
                city: "Boston".into(),
                ..EmployeeFields::default()
            })
            .id
            .clone();
        assert!(store.update(&id, [(EmployeeField::City, "Denver".to_string())]));
        let employee = store.get(&id).unwrap();
        assert_eq!(employee.get(EmployeeField::City), "Denver");
        assert_eq!(employee.get(EmployeeField::FirstName), "John");
        assert!(!store.update(&EmployeeId::from("nope"), [(EmployeeField::City, "X".to_string())]));
    }

    struct FailingSlots;

    impl SnapshotSlots for FailingSlots {
        fn read(&self, _key: &str) -> StorageResult<Option<String>> {
            Ok(None)
        }

        fn write(&mut self, key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::InvalidKey(key.to_string()))
        }
    }

    #[test]
    fn failed_write_keeps_memory_state_and_marks_unsynced() {
        let mut store = RecordStore::open(PersistenceBridge::new(FailingSlots));
        store.add(named("John"));
        assert_eq!(store.len(), 1);
        assert!(!store.is_synced());
        assert!(store.flush().is_err());
    }
}
