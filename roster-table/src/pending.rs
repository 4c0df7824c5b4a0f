//! In-flight optimistic mutations
//!
//! Every optimistic write is recorded as the inverse patch of the fields it
//! touched (the exact prior values). Pending mutations are kept per record in
//! submission order so overlapping writes to the same field resolve like this:
//!
//! - on failure, the prior value goes to the next pending mutation touching
//!   the same field (it becomes that mutation's rollback target); only when no
//!   later mutation touched the field is it written back into the record
//! - on success, earlier pending mutations stop owning the fields the
//!   confirmed mutation wrote

use shared::{EmployeeId, EmployeeRecord, EmployeeStatus};
use std::collections::HashMap;

use crate::modal::DetailsDraft;

/// Record field a mutation can touch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    FirstName,
    LastName,
    Email,
    Phone,
    Status,
}

impl RecordField {
    const ALL: [RecordField; 5] = [
        RecordField::FirstName,
        RecordField::LastName,
        RecordField::Email,
        RecordField::Phone,
        RecordField::Status,
    ];
}

/// Partial record: `Some` marks a touched field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<Option<String>>,
    pub status: Option<EmployeeStatus>,
}

impl RecordPatch {
    pub fn status(status: EmployeeStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Self::default()
        }
    }

    /// Patch for a validated details draft
    pub fn details(draft: &DetailsDraft) -> Self {
        let phone = if draft.phone.is_empty() {
            None
        } else {
            Some(draft.phone.clone())
        };
        Self {
            first_name: Some(draft.first_name.clone()),
            last_name: Some(draft.last_name.clone()),
            email: Some(draft.email.clone()),
            phone: Some(phone),
            status: None,
        }
    }

    pub fn touches(&self, field: RecordField) -> bool {
        match field {
            RecordField::FirstName => self.first_name.is_some(),
            RecordField::LastName => self.last_name.is_some(),
            RecordField::Email => self.email.is_some(),
            RecordField::Phone => self.phone.is_some(),
            RecordField::Status => self.status.is_some(),
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = RecordField> + '_ {
        RecordField::ALL.into_iter().filter(|f| self.touches(*f))
    }

    /// Write the touched fields into `record`, returning their previous values
    pub fn apply(&self, record: &mut EmployeeRecord) -> RecordPatch {
        let mut prior = RecordPatch::default();
        for field in self.fields() {
            prior.capture(record, field);
            self.write_field(record, field);
        }
        prior
    }

    fn capture(&mut self, record: &EmployeeRecord, field: RecordField) {
        match field {
            RecordField::FirstName => self.first_name = Some(record.first_name.clone()),
            RecordField::LastName => self.last_name = Some(record.last_name.clone()),
            RecordField::Email => self.email = Some(record.email.clone()),
            RecordField::Phone => self.phone = Some(record.phone.clone()),
            RecordField::Status => self.status = Some(record.status),
        }
    }

    /// Write one touched field into `record`; untouched fields are ignored
    fn write_field(&self, record: &mut EmployeeRecord, field: RecordField) {
        match field {
            RecordField::FirstName => {
                if let Some(v) = &self.first_name {
                    record.first_name = v.clone();
                }
            }
            RecordField::LastName => {
                if let Some(v) = &self.last_name {
                    record.last_name = v.clone();
                }
            }
            RecordField::Email => {
                if let Some(v) = &self.email {
                    record.email = v.clone();
                }
            }
            RecordField::Phone => {
                if let Some(v) = &self.phone {
                    record.phone = v.clone();
                }
            }
            RecordField::Status => {
                if let Some(v) = self.status {
                    record.status = v;
                }
            }
        }
    }

    fn copy_field(&mut self, from: &RecordPatch, field: RecordField) {
        match field {
            RecordField::FirstName => self.first_name = from.first_name.clone(),
            RecordField::LastName => self.last_name = from.last_name.clone(),
            RecordField::Email => self.email = from.email.clone(),
            RecordField::Phone => self.phone = from.phone.clone(),
            RecordField::Status => self.status = from.status,
        }
    }

    fn clear_field(&mut self, field: RecordField) {
        match field {
            RecordField::FirstName => self.first_name = None,
            RecordField::LastName => self.last_name = None,
            RecordField::Email => self.email = None,
            RecordField::Phone => self.phone = None,
            RecordField::Status => self.status = None,
        }
    }
}

/// Handle of an in-flight mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MutationId(u64);

#[derive(Debug)]
struct PendingMutation {
    id: MutationId,
    /// Rollback target of the fields this mutation still owns
    prior: RecordPatch,
}

/// Per-record ledger of optimistic writes awaiting confirmation
#[derive(Debug, Default)]
pub struct PendingLedger {
    next_id: u64,
    by_record: HashMap<EmployeeId, Vec<PendingMutation>>,
}

impl PendingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `patch` optimistically and remember the prior values
    pub fn begin(&mut self, record: &mut EmployeeRecord, patch: &RecordPatch) -> MutationId {
        self.next_id += 1;
        let id = MutationId(self.next_id);
        let prior = patch.apply(record);
        self.by_record
            .entry(record.employee_id.clone())
            .or_default()
            .push(PendingMutation { id, prior });
        id
    }

    /// Keep the optimistic write
    pub fn confirm(&mut self, employee_id: &EmployeeId, id: MutationId) {
        let Some(queue) = self.by_record.get_mut(employee_id) else {
            return;
        };
        let Some(pos) = queue.iter().position(|m| m.id == id) else {
            return;
        };
        let confirmed = queue.remove(pos);
        for earlier in &mut queue[..pos] {
            for field in confirmed.prior.fields() {
                earlier.prior.clear_field(field);
            }
        }
        self.prune(employee_id);
    }

    /// Undo the optimistic write, handing prior values down to later writers
    pub fn roll_back(&mut self, record: &mut EmployeeRecord, id: MutationId) {
        let employee_id = record.employee_id.clone();
        let Some(queue) = self.by_record.get_mut(&employee_id) else {
            return;
        };
        let Some(pos) = queue.iter().position(|m| m.id == id) else {
            return;
        };
        let failed = queue.remove(pos);
        for field in failed.prior.fields() {
            match queue[pos..].iter_mut().find(|m| m.prior.touches(field)) {
                Some(later) => later.prior.copy_field(&failed.prior, field),
                None => failed.prior.write_field(record, field),
            }
        }
        self.prune(&employee_id);
    }

    /// Local view of `record` right after mutation `id` was applied
    ///
    /// Undoes later pending writes, newest first.
    pub fn view_as_of(&self, record: &EmployeeRecord, id: MutationId) -> EmployeeRecord {
        let mut view = record.clone();
        if let Some(queue) = self.by_record.get(&record.employee_id)
            && let Some(pos) = queue.iter().position(|m| m.id == id)
        {
            for later in queue[pos + 1..].iter().rev() {
                for field in later.prior.fields() {
                    later.prior.write_field(&mut view, field);
                }
            }
        }
        view
    }

    /// Number of unresolved mutations for a record
    pub fn in_flight(&self, employee_id: &EmployeeId) -> usize {
        self.by_record.get(employee_id).map_or(0, Vec::len)
    }

    fn prune(&mut self, employee_id: &EmployeeId) {
        if self
            .by_record
            .get(employee_id)
            .is_some_and(|queue| queue.is_empty())
        {
            self.by_record.remove(employee_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> EmployeeRecord {
        EmployeeRecord {
            employee_id: "E1".into(),
            first_name: "John".into(),
            last_name: "Doe".into(),
            email: "john@doe.com".into(),
            phone: Some("0123456789".into()),
            status: EmployeeStatus::Active,
        }
    }

    #[test]
    fn test_rollback_restores_exact_prior() {
        let mut r = record();
        let original = r.clone();
        let mut ledger = PendingLedger::new();

        let m = ledger.begin(&mut r, &RecordPatch::status(EmployeeStatus::Inactive));
        assert_eq!(r.status, EmployeeStatus::Inactive);
        assert_eq!(ledger.in_flight(&r.employee_id), 1);

        ledger.roll_back(&mut r, m);
        assert_eq!(r, original);
        assert_eq!(ledger.in_flight(&r.employee_id), 0);
    }

    #[test]
    fn test_rollback_only_touches_own_fields() {
        let mut r = record();
        let mut ledger = PendingLedger::new();
        let draft = DetailsDraft {
            first_name: "Jane".into(),
            last_name: "Roe".into(),
            email: "john@doe.com".into(),
            phone: "9876543210".into(),
        };

        let details = ledger.begin(&mut r, &RecordPatch::details(&draft));
        let status = ledger.begin(&mut r, &RecordPatch::status(EmployeeStatus::Inactive));

        ledger.roll_back(&mut r, details);
        ledger.confirm(&r.employee_id.clone(), status);

        assert_eq!(r.first_name, "John");
        assert_eq!(r.phone.as_deref(), Some("0123456789"));
        assert_eq!(r.status, EmployeeStatus::Inactive);
    }

    #[test]
    fn test_both_fail_restores_original() {
        let mut r = record();
        let mut ledger = PendingLedger::new();

        let first = ledger.begin(&mut r, &RecordPatch::status(EmployeeStatus::Inactive));
        let second = ledger.begin(&mut r, &RecordPatch::status(EmployeeStatus::Active));

        ledger.roll_back(&mut r, first);
        // the later writer still shows its value
        assert_eq!(r.status, EmployeeStatus::Active);
        ledger.roll_back(&mut r, second);
        assert_eq!(r.status, EmployeeStatus::Active);

        // and in the opposite settle order
        let first = ledger.begin(&mut r, &RecordPatch::status(EmployeeStatus::Inactive));
        let second = ledger.begin(&mut r, &RecordPatch::status(EmployeeStatus::Active));
        ledger.roll_back(&mut r, second);
        assert_eq!(r.status, EmployeeStatus::Inactive);
        ledger.roll_back(&mut r, first);
        assert_eq!(r.status, EmployeeStatus::Active);
    }

    #[test]
    fn test_confirm_then_later_failure_keeps_confirmed_value() {
        let mut r = record();
        let mut ledger = PendingLedger::new();

        let first = ledger.begin(&mut r, &RecordPatch::email("a@b.com"));
        let second = ledger.begin(&mut r, &RecordPatch::email("c@d.com"));

        ledger.confirm(&r.employee_id.clone(), first);
        ledger.roll_back(&mut r, second);
        assert_eq!(r.email, "a@b.com");
    }

    #[test]
    fn test_later_confirm_wins_over_earlier_failure() {
        let mut r = record();
        let mut ledger = PendingLedger::new();

        let first = ledger.begin(&mut r, &RecordPatch::email("a@b.com"));
        let second = ledger.begin(&mut r, &RecordPatch::email("c@d.com"));

        ledger.confirm(&r.employee_id.clone(), second);
        ledger.roll_back(&mut r, first);
        assert_eq!(r.email, "c@d.com");
    }

    #[test]
    fn test_view_as_of_hides_later_writes() {
        let mut r = record();
        let mut ledger = PendingLedger::new();
        let draft = DetailsDraft {
            first_name: "Jane".into(),
            ..DetailsDraft::from_record(&r)
        };

        let details = ledger.begin(&mut r, &RecordPatch::details(&draft));
        let _status = ledger.begin(&mut r, &RecordPatch::status(EmployeeStatus::Inactive));

        let view = ledger.view_as_of(&r, details);
        assert_eq!(view.first_name, "Jane");
        assert_eq!(view.status, EmployeeStatus::Active);
        assert_eq!(r.status, EmployeeStatus::Inactive);
    }

    #[test]
    fn test_empty_draft_phone_becomes_absent() {
        let draft = DetailsDraft {
            phone: String::new(),
            ..DetailsDraft::default()
        };
        assert_eq!(RecordPatch::details(&draft).phone, Some(None));
    }
}
