//! RosterTable - explicit store for the employee table
//!
//! Owns the in-memory record set, the selection/modal state and the ledger
//! of in-flight optimistic mutations.
//!
//! ```text
//! presentation ──action──▶ RosterTable ──optimistic write──▶ records
//!      ▲                       │                                │
//!      │ watch<TableSnapshot>  │ spawned (per-record FIFO)      │
//!      └───────────────────────┤                                │
//!                              ▼                                │
//!                         RecordStore ──Ok──▶ confirm           │
//!                                     └─Err─▶ roll back ────────┘
//!                                               + notify
//! ```
//!
//! The state mutex is never held across an `.await`; the optimistic write is
//! visible to `snapshot()` before the remote call starts. Mutation methods
//! take `self: &Arc<Self>` because the remote leg outlives the caller's future.

use dashmap::DashMap;
use parking_lot::Mutex;
use roster_client::{ClientError, ClientResult, RecordStore};
use shared::{EmployeeId, EmployeeRecord};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::{oneshot, watch};

use crate::error::{TableError, TableResult};
use crate::modal::ModalState;
use crate::notify::{NotificationKind, Notifier};
use crate::pending::{MutationId, PendingLedger, RecordPatch};
use crate::validation::{
    DetailField, DetailsFormErrors, EmailFormErrors, validate_details_submit,
    validate_email_submit,
};

/// Read model handed to subscribers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableSnapshot {
    pub records: Vec<EmployeeRecord>,
    pub modal: ModalState,
}

impl TableSnapshot {
    pub fn record(&self, id: &EmployeeId) -> Option<&EmployeeRecord> {
        self.records.iter().find(|r| &r.employee_id == id)
    }
}

/// Validation errors that blocked a save
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormErrors {
    Details(DetailsFormErrors),
    Email(EmailFormErrors),
}

/// How a mutation ended
#[derive(Debug)]
pub enum MutationOutcome {
    /// Remote store accepted; optimistic value kept
    Confirmed,
    /// Remote store failed; prior value restored
    RolledBack(ClientError),
    /// Validation failed; nothing written, nothing sent
    Rejected(FormErrors),
}

impl MutationOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, MutationOutcome::Confirmed)
    }

    pub fn is_rolled_back(&self) -> bool {
        matches!(self, MutationOutcome::RolledBack(_))
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, MutationOutcome::Rejected(_))
    }
}

#[derive(Debug, Clone, Copy)]
enum Operation {
    Status,
    Email,
    Details,
}

impl Operation {
    fn name(self) -> &'static str {
        match self {
            Operation::Status => "update_status",
            Operation::Email => "update_email",
            Operation::Details => "update_details",
        }
    }

    fn success_message(self) -> &'static str {
        match self {
            Operation::Status => "Status updated successfully",
            Operation::Email => "Email updated successfully",
            Operation::Details => "Updated successfully",
        }
    }

    fn failure_message(self) -> &'static str {
        match self {
            Operation::Status => "Error updating status",
            Operation::Email => "Error updating email",
            Operation::Details => "Error updating backend data",
        }
    }
}

struct RosterState {
    records: Vec<EmployeeRecord>,
    modal: ModalState,
    ledger: PendingLedger,
}

impl RosterState {
    fn position(&self, id: &EmployeeId) -> TableResult<usize> {
        self.records
            .iter()
            .position(|r| &r.employee_id == id)
            .ok_or_else(|| TableError::UnknownEmployee(id.clone()))
    }

    fn begin(&mut self, idx: usize, patch: &RecordPatch) -> MutationId {
        self.ledger.begin(&mut self.records[idx], patch)
    }

    fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            records: self.records.clone(),
            modal: self.modal.clone(),
        }
    }
}

/// Employee table store and optimistic mutation engine
pub struct RosterTable {
    state: Mutex<RosterState>,
    snapshots: watch::Sender<TableSnapshot>,
    store: Arc<dyn RecordStore>,
    notifier: Arc<dyn Notifier>,
    /// Tail of each record's remote-call queue
    tails: DashMap<EmployeeId, oneshot::Receiver<()>>,
}

/// Place in a record's remote-call queue
struct Turn {
    prev: Option<oneshot::Receiver<()>>,
    done: oneshot::Sender<()>,
}

impl Turn {
    /// Wait until the previous mutation on the record has settled
    ///
    /// The returned sender releases the next turn when dropped.
    async fn wait(self) -> oneshot::Sender<()> {
        if let Some(prev) = self.prev {
            // senders are dropped, never sent on
            prev.await.ok();
        }
        self.done
    }
}

impl RosterTable {
    /// Build a table over an already loaded record set
    ///
    /// Duplicate ids keep their first occurrence.
    pub fn new(
        mut records: Vec<EmployeeRecord>,
        store: Arc<dyn RecordStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Arc<Self> {
        let mut seen = HashSet::new();
        records.retain(|r| {
            let fresh = seen.insert(r.employee_id.clone());
            if !fresh {
                tracing::warn!(employee_id = %r.employee_id, "Dropping duplicate employee record");
            }
            fresh
        });

        let state = RosterState {
            records,
            modal: ModalState::Closed,
            ledger: PendingLedger::new(),
        };
        let (snapshots, _) = watch::channel(state.snapshot());

        Arc::new(Self {
            state: Mutex::new(state),
            snapshots,
            store,
            notifier,
            tails: DashMap::new(),
        })
    }

    /// Load the roster once from the record store
    ///
    /// A failed load is logged and leaves the table empty.
    pub async fn load(store: Arc<dyn RecordStore>, notifier: Arc<dyn Notifier>) -> Arc<Self> {
        let records = match store.list_all().await {
            Ok(records) => {
                tracing::info!(count = records.len(), "Loaded employee records");
                records
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load employee records");
                Vec::new()
            }
        };
        Self::new(records, store, notifier)
    }

    // ========== Read side ==========

    pub fn snapshot(&self) -> TableSnapshot {
        self.state.lock().snapshot()
    }

    /// Receive a new snapshot after every state change
    pub fn subscribe(&self) -> watch::Receiver<TableSnapshot> {
        self.snapshots.subscribe()
    }

    pub fn record(&self, id: &EmployeeId) -> Option<EmployeeRecord> {
        self.state
            .lock()
            .records
            .iter()
            .find(|r| &r.employee_id == id)
            .cloned()
    }

    pub fn modal(&self) -> ModalState {
        self.state.lock().modal.clone()
    }

    /// Unresolved mutations for one record
    pub fn in_flight(&self, id: &EmployeeId) -> usize {
        self.state.lock().ledger.in_flight(id)
    }

    fn publish(&self, state: &RosterState) {
        self.snapshots.send_replace(state.snapshot());
    }

    fn update<T>(&self, f: impl FnOnce(&mut RosterState) -> TableResult<T>) -> TableResult<T> {
        let mut state = self.state.lock();
        let out = f(&mut *state)?;
        self.publish(&state);
        Ok(out)
    }

    // ========== Selection & modals ==========

    pub fn open_menu(&self, id: &EmployeeId) -> TableResult<()> {
        self.update(|state| {
            let idx = state.position(id)?;
            state.modal.open_menu(&state.records[idx])
        })
    }

    pub fn close_menu(&self) {
        let mut state = self.state.lock();
        state.modal.close_menu();
        self.publish(&state);
    }

    /// "View/Edit Details" from the open menu
    pub fn open_details(&self) -> TableResult<()> {
        self.update(|state| state.modal.view_details(&state.records))
    }

    /// "Edit Email" from the open menu
    pub fn open_email(&self) -> TableResult<()> {
        self.update(|state| state.modal.edit_email(&state.records))
    }

    /// Close any menu or modal; drafts are discarded
    pub fn close_modal(&self) {
        let mut state = self.state.lock();
        state.modal.close();
        self.publish(&state);
    }

    /// Edit a details-form field; returns the live error
    pub fn edit_detail(&self, field: DetailField, value: &str) -> TableResult<Option<String>> {
        self.update(|state| state.modal.edit_detail(field, value))
    }

    /// Edit the email-form draft; returns the live error
    pub fn edit_email(&self, value: &str) -> TableResult<Option<String>> {
        self.update(|state| state.modal.edit_email_draft(value))
    }

    // ========== Mutations ==========
    //
    // The optimistic write happens before the first `.await`. The remote call
    // and its confirm/rollback run in a spawned task, so dropping the returned
    // future never leaves a write unreconciled.

    /// Flip a record's status
    pub async fn toggle_status(self: &Arc<Self>, id: &EmployeeId) -> TableResult<MutationOutcome> {
        let (mutation, status, prev) = {
            let mut state = self.state.lock();
            let idx = state.position(id)?;
            let status = state.records[idx].status.toggled();
            let mutation = state.begin(idx, &RecordPatch::status(status));
            self.publish(&state);
            (mutation, status, self.enqueue(id))
        };

        let table = Arc::clone(self);
        let employee_id = id.clone();
        self.dispatch(Operation::Status, id, async move {
            let _done = prev.wait().await;
            let result = table
                .store
                .update_status(&employee_id, status.is_active())
                .await;
            table.settle(Operation::Status, &employee_id, mutation, result)
        })
        .await
    }

    /// Save the open details modal
    pub async fn save_details(self: &Arc<Self>) -> TableResult<MutationOutcome> {
        let (employee_id, mutation, prev) = {
            let mut state = self.state.lock();
            let ModalState::DetailsOpen {
                employee_id,
                draft,
                errors,
            } = &mut state.modal
            else {
                return Err(TableError::WrongModal { expected: "details" });
            };

            let found = validate_details_submit(draft);
            if found.has_errors() {
                tracing::debug!(employee_id = %employee_id, ?found, "Details save rejected");
                *errors = found.clone();
                self.publish(&state);
                return Ok(MutationOutcome::Rejected(FormErrors::Details(found)));
            }

            let employee_id = employee_id.clone();
            let patch = RecordPatch::details(draft);
            let idx = state.position(&employee_id)?;
            state.modal = ModalState::Closed;
            let mutation = state.begin(idx, &patch);
            self.publish(&state);
            let prev = self.enqueue(&employee_id);
            (employee_id, mutation, prev)
        };

        let table = Arc::clone(self);
        let id = employee_id.clone();
        self.dispatch(Operation::Details, &employee_id, async move {
            let _done = prev.wait().await;
            let result = match table.payload(&id, mutation) {
                Ok(payload) => table.store.update_details(&id, &payload).await,
                Err(e) => Err(ClientError::NotFound(e.to_string())),
            };
            table.settle(Operation::Details, &id, mutation, result)
        })
        .await
    }

    /// Save the open email modal
    pub async fn save_email(self: &Arc<Self>) -> TableResult<MutationOutcome> {
        let (employee_id, mutation, email, prev) = {
            let mut state = self.state.lock();
            let ModalState::EmailOpen {
                employee_id,
                draft_email,
                errors,
            } = &mut state.modal
            else {
                return Err(TableError::WrongModal { expected: "email" });
            };

            let found = validate_email_submit(draft_email);
            if found.has_errors() {
                tracing::debug!(employee_id = %employee_id, ?found, "Email save rejected");
                *errors = found.clone();
                self.publish(&state);
                return Ok(MutationOutcome::Rejected(FormErrors::Email(found)));
            }

            let employee_id = employee_id.clone();
            let email = draft_email.clone();
            let idx = state.position(&employee_id)?;
            state.modal = ModalState::Closed;
            let mutation = state.begin(idx, &RecordPatch::email(email.clone()));
            self.publish(&state);
            let prev = self.enqueue(&employee_id);
            (employee_id, mutation, email, prev)
        };

        let table = Arc::clone(self);
        let id = employee_id.clone();
        self.dispatch(Operation::Email, &employee_id, async move {
            let _done = prev.wait().await;
            let result = table.store.update_email(&id, &email).await;
            table.settle(Operation::Email, &id, mutation, result)
        })
        .await
    }

    /// Take the next place in a record's remote-call queue
    ///
    /// Called under the state lock right after the optimistic write, so queue
    /// order always matches write order.
    fn enqueue(&self, id: &EmployeeId) -> Turn {
        let (done, next) = oneshot::channel();
        let prev = self.tails.insert(id.clone(), next);
        Turn { prev, done }
    }

    /// Run the remote leg of a mutation to completion in its own task
    async fn dispatch<F>(
        &self,
        op: Operation,
        employee_id: &EmployeeId,
        task: F,
    ) -> TableResult<MutationOutcome>
    where
        F: Future<Output = MutationOutcome> + Send + 'static,
    {
        tokio::spawn(task).await.map_err(|e| {
            tracing::error!(
                employee_id = %employee_id,
                operation = op.name(),
                error = %e,
                "Mutation task failed"
            );
            TableError::MutationTask(e.to_string())
        })
    }

    /// Record as it stood right after `mutation`, ignoring later optimistic writes
    fn payload(&self, id: &EmployeeId, mutation: MutationId) -> TableResult<EmployeeRecord> {
        let state = self.state.lock();
        let idx = state.position(id)?;
        Ok(state.ledger.view_as_of(&state.records[idx], mutation))
    }

    fn settle(
        &self,
        op: Operation,
        employee_id: &EmployeeId,
        mutation: MutationId,
        result: ClientResult<()>,
    ) -> MutationOutcome {
        match result {
            Ok(()) => {
                self.state.lock().ledger.confirm(employee_id, mutation);
                tracing::info!(employee_id = %employee_id, operation = op.name(), "Mutation confirmed");
                self.notifier
                    .notify(NotificationKind::Success, op.success_message());
                MutationOutcome::Confirmed
            }
            Err(error) => {
                {
                    let mut state = self.state.lock();
                    if let Ok(idx) = state.position(employee_id) {
                        let RosterState {
                            records, ledger, ..
                        } = &mut *state;
                        ledger.roll_back(&mut records[idx], mutation);
                    }
                    self.publish(&state);
                }
                tracing::warn!(
                    employee_id = %employee_id,
                    operation = op.name(),
                    error = %error,
                    "Mutation failed, rolled back"
                );
                self.notifier
                    .notify(NotificationKind::Failure, op.failure_message());
                MutationOutcome::RolledBack(error)
            }
        }
    }
}
