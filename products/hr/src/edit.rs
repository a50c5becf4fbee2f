//! Inline edit session: at most one record is edited at a time.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::{
    confirm::{Confirm, DELETE_PROMPT, UPDATE_PROMPT},
    employee::{Employee, EmployeeField, EmployeeFields, EmployeeId},
    error::{HrError, HrResult},
    store::RecordStore,
    validation::{invalid_edit_fields, is_blank},
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Idle,
    Editing {
        id: EmployeeId,
        scratch: EmployeeFields,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The scratch copy was committed and the session is idle again.
    Saved(EmployeeId),
    /// Validation failed; these fields are flagged and nothing was written.
    Invalid(BTreeSet<EmployeeField>),
    /// The user declined; still editing with the scratch copy intact.
    Declined,
    /// Confirmed, but the record was removed while being edited. Nothing
    /// was written and the session is idle again.
    Missing(EmployeeId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    Removed,
    /// Confirmed, but no record had that id.
    Missing,
    Declined,
}

#[derive(Clone, Debug, Default)]
pub struct EditSession {
    state: EditState,
    errors: BTreeSet<EmployeeField>,
}

impl EditSession {
    pub fn state(&self) -> &EditState {
        &self.state
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, EditState::Editing { .. })
    }

    pub fn editing_id(&self) -> Option<&EmployeeId> {
        match &self.state {
            EditState::Editing { id, .. } => Some(id),
            EditState::Idle => None,
        }
    }

    pub fn scratch(&self) -> Option<&EmployeeFields> {
        match &self.state {
            EditState::Editing { scratch, .. } => Some(scratch),
            EditState::Idle => None,
        }
    }

    /// Fields currently flagged invalid.
    pub fn errors(&self) -> &BTreeSet<EmployeeField> {
        &self.errors
    }

    /// Start editing `record`. An edit already in progress on another
    /// record is discarded without prompting.
    pub fn enter_edit(&mut self, record: &Employee) {
        if let Some(previous) = self.editing_id() {
            if previous != &record.id {
                debug!(%previous, next = %record.id, "switching edit target, discarding scratch");
            }
        }
        self.errors.clear();
        self.state = EditState::Editing {
            id: record.id.clone(),
            scratch: record.fields.clone(),
        };
    }

    pub fn change_field(
        &mut self,
        field: EmployeeField,
        value: impl Into<String>,
    ) -> HrResult<()> {
        let EditState::Editing { scratch, .. } = &mut self.state else {
            return Err(HrError::NotEditing);
        };
        let value = value.into();
        if !is_blank(&value) {
            self.errors.remove(&field);
        }
        scratch.set(field, value);
        Ok(())
    }

    /// Validate the scratch copy and, once confirmed, write it to `store`.
    pub fn save(
        &mut self,
        store: &mut RecordStore,
        confirm: &mut dyn Confirm,
        today: NaiveDate,
    ) -> HrResult<SaveOutcome> {
        let EditState::Editing { id, scratch } = &self.state else {
            return Err(HrError::NotEditing);
        };

        let invalid = invalid_edit_fields(scratch, today);
        if !invalid.is_empty() {
            warn!(%id, fields = ?invalid, "edit rejected by validation");
            self.errors = invalid.clone();
            return Ok(SaveOutcome::Invalid(invalid));
        }
        self.errors.clear();

        if !confirm.confirm(UPDATE_PROMPT) {
            debug!(%id, "update declined");
            return Ok(SaveOutcome::Declined);
        }

        let EditState::Editing { id, scratch } = std::mem::take(&mut self.state) else {
            return Err(HrError::NotEditing);
        };
        let patch = scratch
            .iter()
            .map(|(field, value)| (field, value.to_string()))
            .collect::<Vec<_>>();
        if !store.update(&id, patch) {
            warn!(%id, "edited employee no longer exists, nothing saved");
            return Ok(SaveOutcome::Missing(id));
        }
        Ok(SaveOutcome::Saved(id))
    }

    pub fn cancel(&mut self) {
        self.state = EditState::Idle;
        self.errors.clear();
    }

    /// Remove `id` after confirmation, ending the edit if it targeted `id`.
    pub fn delete(
        &mut self,
        store: &mut RecordStore,
        confirm: &mut dyn Confirm,
        id: &EmployeeId,
    ) -> DeleteOutcome {
        if !confirm.confirm(DELETE_PROMPT) {
            debug!(%id, "delete declined");
            return DeleteOutcome::Declined;
        }
        if self.editing_id() == Some(id) {
            self.cancel();
        }
        if store.remove(id) {
            info!(%id, "employee deleted");
            DeleteOutcome::Removed
        } else {
            DeleteOutcome::Missing
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::PersistenceBridge;
    use platform_storage::MemorySlots;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn john() -> EmployeeFields {
        EmployeeFields {
            first_name: "John".into(),
            last_name: "Doe".into(),
            date_of_birth: "1990-04-12".into(),
            start_date: "2020-01-01".into(),
            street: "1 Main St".into(),
            city: "Boston".into(),
            state: "MA".into(),
            zip_code: "02110".into(),
            department: "Sales".into(),
        }
    }

    fn store_with_john() -> (RecordStore, EmployeeId) {
        let mut store = RecordStore::open(PersistenceBridge::new(MemorySlots::new()));
        let id = store.add(john()).id.clone();
        (store, id)
    }

    fn record(store: &RecordStore, id: &EmployeeId) -> Employee {
        store.get(id).cloned().unwrap()
    }

    #[test]
    fn idle_rejects_field_changes_and_saves() {
        let (mut store, _) = store_with_john();
        let mut session = EditSession::default();
        assert!(matches!(
            session.change_field(EmployeeField::City, "Denver"),
            Err(HrError::NotEditing)
        ));
        let mut yes = |_: &str| true;
        assert!(matches!(
            session.save(&mut store, &mut yes, today()),
            Err(HrError::NotEditing)
        ));
    }

    #[test]
    fn blank_field_blocks_save() {
        let (mut store, id) = store_with_john();
        let before = store.revision();
        let mut session = EditSession::default();
        session.enter_edit(&record(&store, &id));
        session.change_field(EmployeeField::FirstName, "").unwrap();

        let mut asked = false;
        let mut confirm = |_: &str| {
            asked = true;
            true
        };
        let outcome = session.save(&mut store, &mut confirm, today()).unwrap();
        assert_eq!(
            outcome,
            SaveOutcome::Invalid(BTreeSet::from([EmployeeField::FirstName]))
        );
        assert!(!asked);
        assert!(session.is_editing());
        assert!(session.errors().contains(&EmployeeField::FirstName));
        assert_eq!(store.revision(), before);
    }

    #[test]
    fn correcting_a_field_clears_its_flag() {
        let (mut store, id) = store_with_john();
        let mut session = EditSession::default();
        session.enter_edit(&record(&store, &id));
        session.change_field(EmployeeField::City, " ").unwrap();
        session.change_field(EmployeeField::Street, "").unwrap();
        session.save(&mut store, &mut |_: &str| true, today()).unwrap();
        assert_eq!(session.errors().len(), 2);

        session.change_field(EmployeeField::City, "Denver").unwrap();
        assert_eq!(
            session.errors().iter().copied().collect::<Vec<_>>(),
            vec![EmployeeField::Street]
        );
        session.change_field(EmployeeField::Street, "   ").unwrap();
        assert!(session.errors().contains(&EmployeeField::Street));
    }

    #[test]
    fn confirmed_save_commits_and_goes_idle() {
        let (mut store, id) = store_with_john();
        let mut session = EditSession::default();
        session.enter_edit(&record(&store, &id));
        session.change_field(EmployeeField::City, "Denver").unwrap();

        let mut prompts = Vec::new();
        let mut confirm = |message: &str| {
            prompts.push(message.to_string());
            true
        };
        let outcome = session.save(&mut store, &mut confirm, today()).unwrap();
        assert_eq!(outcome, SaveOutcome::Saved(id.clone()));
        assert_eq!(prompts, [UPDATE_PROMPT]);
        assert_eq!(session.state(), &EditState::Idle);
        assert_eq!(record(&store, &id).get(EmployeeField::City), "Denver");
    }

    #[test]
    fn declined_save_keeps_scratch() {
        let (mut store, id) = store_with_john();
        let mut session = EditSession::default();
        session.enter_edit(&record(&store, &id));
        session.change_field(EmployeeField::City, "Denver").unwrap();

        let outcome = session.save(&mut store, &mut |_: &str| false, today()).unwrap();
        assert_eq!(outcome, SaveOutcome::Declined);
        assert_eq!(session.scratch().unwrap().city, "Denver");
        assert_eq!(record(&store, &id).get(EmployeeField::City), "Boston");
    }

    #[test]
    fn future_birth_date_is_invalid() {
        let (mut store, id) = store_with_john();
        let mut session = EditSession::default();
        session.enter_edit(&record(&store, &id));
        session.change_field(EmployeeField::DateOfBirth, "2999-01-01").unwrap();
        let outcome = session.save(&mut store, &mut |_: &str| true, today()).unwrap();
        assert_eq!(
            outcome,
            SaveOutcome::Invalid(BTreeSet::from([EmployeeField::DateOfBirth]))
        );
    }

    #[test]
    fn entering_another_record_discards_previous_scratch() {
        let (mut store, john_id) = store_with_john();
        let alice_id = store
            .add(EmployeeFields {
                first_name: "Alice".into(),
                ..john()
            })
            .id
            .clone();
        let mut session = EditSession::default();
        session.enter_edit(&record(&store, &john_id));
        session.change_field(EmployeeField::City, "").unwrap();
        session.save(&mut store, &mut |_: &str| true, today()).unwrap();

        session.enter_edit(&record(&store, &alice_id));
        assert_eq!(session.editing_id(), Some(&alice_id));
        assert_eq!(session.scratch().unwrap().first_name, "Alice");
        assert!(session.errors().is_empty());
    }

    #[test]
    fn cancel_discards_everything() {
        let (store, id) = store_with_john();
        let mut session = EditSession::default();
        session.enter_edit(&record(&store, &id));
        session.change_field(EmployeeField::City, "Denver").unwrap();
        session.cancel();
        assert_eq!(session.state(), &EditState::Idle);
        assert!(session.errors().is_empty());
        assert_eq!(record(&store, &id).get(EmployeeField::City), "Boston");
    }

    #[test]
    fn deleting_the_edited_record_ends_the_session() {
        let (mut store, id) = store_with_john();
        let mut session = EditSession::default();
        session.enter_edit(&record(&store, &id));

        let outcome = session.delete(&mut store, &mut |m: &str| m == DELETE_PROMPT, &id);
        assert_eq!(outcome, DeleteOutcome::Removed);
        assert!(store.is_empty());
        assert!(!session.is_editing());
    }

    #[test]
    fn declined_delete_changes_nothing() {
        let (mut store, id) = store_with_john();
        let mut session = EditSession::default();
        session.enter_edit(&record(&store, &id));
        let outcome = session.delete(&mut store, &mut |_: &str| false, &id);
        assert_eq!(outcome, DeleteOutcome::Declined);
        assert_eq!(store.len(), 1);
        assert!(session.is_editing());
    }

    #[test]
    fn saving_a_vanished_record_reports_missing() {
        let (mut store, id) = store_with_john();
        let mut session = EditSession::default();
        session.enter_edit(&record(&store, &id));
        session.change_field(EmployeeField::City, "Denver").unwrap();
        assert!(store.remove(&id));
        let before = store.revision();

        let outcome = session.save(&mut store, &mut |_: &str| true, today()).unwrap();
        assert_eq!(outcome, SaveOutcome::Missing(id));
        assert!(!session.is_editing());
        assert!(store.is_empty());
        assert_eq!(store.revision(), before);
    }

    #[test]
    fn deleting_unknown_id_is_missing() {
        let (mut store, _) = store_with_john();
        let mut session = EditSession::default();
        let outcome = session.delete(&mut store, &mut |_: &str| true, &EmployeeId::from("nope"));
        assert_eq!(outcome, DeleteOutcome::Missing);
        assert_eq!(store.len(), 1);
    }
}
