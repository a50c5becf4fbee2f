//! HR module: the employee register behind the HRnet screens.
//!
//! [`HrModule`] owns the [`RecordStore`] together with the table state
//! (search query, entries limit, sort, inline edit). Every store mutation and
//! every query or limit change goes through it, so the displayed rows are
//! re-derived immediately and can never lag behind the data.

pub mod confirm;
pub mod edit;
pub mod employee;
pub mod error;
pub mod form;
pub mod persistence;
pub mod reference;
pub mod sort;
pub mod store;
pub mod validation;
pub mod view;

pub use confirm::{AssumeYes, Confirm, DELETE_PROMPT, UPDATE_PROMPT};
pub use edit::{DeleteOutcome, EditSession, EditState, SaveOutcome};
pub use employee::{Employee, EmployeeField, EmployeeFields, EmployeeId};
pub use error::{HrError, HrResult};
pub use form::NewEmployeeForm;
pub use persistence::{PersistenceBridge, SNAPSHOT_KEY};
pub use reference::{ReferenceData, UsState};
pub use sort::{SortDirection, SortEngine};
pub use store::RecordStore;
pub use validation::{Clock, FixedClock, SystemClock};
pub use view::{EntriesLimit, ViewSummary};

use tracing::debug;

pub struct HrModule {
    store: RecordStore,
    reference: ReferenceData,
    confirm: Box<dyn Confirm>,
    clock: Box<dyn Clock>,
    query: String,
    limit: EntriesLimit,
    rows: Vec<Employee>,
    sort: SortEngine,
    edit: EditSession,
}

impl HrModule {
    /// Wrap a loaded store. The entries limit starts at "all" when the store
    /// already holds records, otherwise at ten.
    pub fn new(store: RecordStore, confirm: impl Confirm + 'static) -> Self {
        let limit = EntriesLimit::initial(store.len());
        let mut module = Self {
            store,
            reference: ReferenceData::default(),
            confirm: Box::new(confirm),
            clock: Box::new(SystemClock),
            query: String::new(),
            limit,
            rows: Vec::new(),
            sort: SortEngine::default(),
            edit: EditSession::default(),
        };
        module.refresh();
        module
    }

    pub fn with_reference(mut self, reference: ReferenceData) -> Self {
        self.reference = reference;
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    /// Rows currently displayed, filtered, truncated and possibly sorted.
    pub fn rows(&self) -> &[Employee] {
        &self.rows
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn limit(&self) -> EntriesLimit {
        self.limit
    }

    pub fn active_sort(&self) -> Option<(EmployeeField, SortDirection)> {
        self.sort.active()
    }

    pub fn edit_session(&self) -> &EditSession {
        &self.edit
    }

    pub fn summary(&self) -> ViewSummary {
        ViewSummary::new(self.rows.len(), self.store.len())
    }

    /// Validate the create form and append the new record.
    pub fn add_employee(&mut self, form: &NewEmployeeForm) -> HrResult<EmployeeId> {
        let fields = form.submit(&self.reference, self.clock.today())?;
        let id = self.store.add(fields).id.clone();
        self.refresh();
        Ok(id)
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.refresh();
    }

    pub fn set_limit(&mut self, limit: EntriesLimit) {
        self.limit = limit;
        self.refresh();
    }

    /// Reorder the displayed rows. Returns false when that sort was already
    /// active and nothing changed.
    pub fn sort_by(&mut self, field: EmployeeField, direction: SortDirection) -> bool {
        self.sort.sort_by(&mut self.rows, field, direction)
    }

    /// Begin editing `id`. Returns false when no such record exists.
    pub fn enter_edit(&mut self, id: &EmployeeId) -> bool {
        match self.store.get(id) {
            Some(record) => {
                self.edit.enter_edit(record);
                true
            }
            None => false,
        }
    }

    pub fn change_field(
        &mut self,
        field: EmployeeField,
        value: impl Into<String>,
    ) -> HrResult<()> {
        self.edit.change_field(field, value)
    }

    pub fn save_edit(&mut self) -> HrResult<SaveOutcome> {
        let today = self.clock.today();
        let outcome = self.edit.save(&mut self.store, self.confirm.as_mut(), today)?;
        if matches!(outcome, SaveOutcome::Saved(_)) {
            self.refresh();
        }
        Ok(outcome)
    }

    pub fn cancel_edit(&mut self) {
        self.edit.cancel();
    }

    pub fn delete_employee(&mut self, id: &EmployeeId) -> DeleteOutcome {
        let outcome = self.edit.delete(&mut self.store, self.confirm.as_mut(), id);
        if outcome == DeleteOutcome::Removed {
            self.refresh();
        }
        outcome
    }

    pub fn is_synced(&self) -> bool {
        self.store.is_synced()
    }

    pub fn flush(&mut self) -> HrResult<()> {
        self.store.flush()
    }

    fn refresh(&mut self) {
        self.rows = view::derive_view(self.store.records(), &self.query, self.limit);
        self.sort.reset();
        debug!(
            query = %self.query,
            limit = %self.limit,
            rows = self.rows.len(),
            revision = self.store.revision(),
            "view derived"
        );
    }
}
