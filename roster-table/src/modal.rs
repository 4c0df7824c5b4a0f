//! Selection & modal state machine
//!
//! ```text
//!            open_menu(r)              view_details
//!  Closed ───────────────▶ MenuOpen(r) ─────────────▶ DetailsOpen(r, draft)
//!    ▲                        │  │                           │
//!    │        close           │  │ edit_email                │ close / valid save
//!    ├────────────────────────┘  ▼                           │
//!    │                    EmailOpen(r, draft_email)          │
//!    │                           │ close / valid save        │
//!    └───────────────────────────┴───────────────────────────┘
//! ```
//!
//! A single enum holds the selection, so at most one record is selected and
//! at most one modal is open. Drafts never touch the record set; they are
//! dropped with the state they belong to.

use shared::{EmployeeId, EmployeeRecord};

use crate::error::{TableError, TableResult};
use crate::validation::{
    self, DetailField, DetailsFormErrors, EmailFormErrors, validate_email_format,
};

/// Working copy of the editable fields of one record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailsDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

impl DetailsDraft {
    /// Field-by-field copy of `record`
    pub fn from_record(record: &EmployeeRecord) -> Self {
        Self {
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            email: record.email.clone(),
            phone: record.phone_or_empty().to_string(),
        }
    }

    pub fn get(&self, field: DetailField) -> &str {
        match field {
            DetailField::FirstName => &self.first_name,
            DetailField::LastName => &self.last_name,
            DetailField::Email => &self.email,
            DetailField::Phone => &self.phone,
        }
    }

    pub fn set(&mut self, field: DetailField, value: impl Into<String>) {
        let slot = match field {
            DetailField::FirstName => &mut self.first_name,
            DetailField::LastName => &mut self.last_name,
            DetailField::Email => &mut self.email,
            DetailField::Phone => &mut self.phone,
        };
        *slot = value.into();
    }
}

/// Selection context and open modal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ModalState {
    #[default]
    Closed,
    MenuOpen {
        employee_id: EmployeeId,
    },
    DetailsOpen {
        employee_id: EmployeeId,
        draft: DetailsDraft,
        errors: DetailsFormErrors,
    },
    EmailOpen {
        employee_id: EmployeeId,
        draft_email: String,
        errors: EmailFormErrors,
    },
}

impl ModalState {
    /// Record targeted by the open menu or modal
    pub fn selected(&self) -> Option<&EmployeeId> {
        match self {
            ModalState::Closed => None,
            ModalState::MenuOpen { employee_id }
            | ModalState::DetailsOpen { employee_id, .. }
            | ModalState::EmailOpen { employee_id, .. } => Some(employee_id),
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, ModalState::Closed)
    }

    pub fn is_modal_open(&self) -> bool {
        matches!(
            self,
            ModalState::DetailsOpen { .. } | ModalState::EmailOpen { .. }
        )
    }

    /// `Closed | MenuOpen → MenuOpen(record)`; inactive records have no menu
    pub fn open_menu(&mut self, record: &EmployeeRecord) -> TableResult<()> {
        if self.is_modal_open() {
            return Err(TableError::ModalAlreadyOpen);
        }
        if !record.status.is_active() {
            return Err(TableError::EmployeeInactive(record.employee_id.clone()));
        }
        *self = ModalState::MenuOpen {
            employee_id: record.employee_id.clone(),
        };
        Ok(())
    }

    /// Menu target, provided it is still present and active
    fn menu_target<'a>(&self, records: &'a [EmployeeRecord]) -> TableResult<&'a EmployeeRecord> {
        let ModalState::MenuOpen { employee_id } = self else {
            return Err(TableError::NoMenuOpen);
        };
        let record = records
            .iter()
            .find(|r| &r.employee_id == employee_id)
            .ok_or_else(|| TableError::UnknownEmployee(employee_id.clone()))?;
        if !record.status.is_active() {
            return Err(TableError::EmployeeInactive(employee_id.clone()));
        }
        Ok(record)
    }

    /// `MenuOpen(r) → DetailsOpen(r, copy(r))`
    pub fn view_details(&mut self, records: &[EmployeeRecord]) -> TableResult<()> {
        let record = self.menu_target(records)?;
        *self = ModalState::DetailsOpen {
            employee_id: record.employee_id.clone(),
            draft: DetailsDraft::from_record(record),
            errors: DetailsFormErrors::default(),
        };
        Ok(())
    }

    /// `MenuOpen(r) → EmailOpen(r, r.email)`
    pub fn edit_email(&mut self, records: &[EmployeeRecord]) -> TableResult<()> {
        let record = self.menu_target(records)?;
        *self = ModalState::EmailOpen {
            employee_id: record.employee_id.clone(),
            draft_email: record.email.clone(),
            errors: EmailFormErrors::default(),
        };
        Ok(())
    }

    /// Close the menu without opening a modal; no-op unless a menu is open
    pub fn close_menu(&mut self) {
        if matches!(self, ModalState::MenuOpen { .. }) {
            *self = ModalState::Closed;
        }
    }

    /// Close whatever is open, discarding drafts
    pub fn close(&mut self) {
        *self = ModalState::Closed;
    }

    /// Keystroke in the details form; returns the live error for the field
    pub fn edit_detail(&mut self, field: DetailField, value: &str) -> TableResult<Option<String>> {
        let ModalState::DetailsOpen { draft, errors, .. } = self else {
            return Err(TableError::WrongModal { expected: "details" });
        };
        if field == DetailField::Email {
            return Err(TableError::ReadOnlyField(field));
        }
        let error = validation::validate(field, value);
        errors.set(field, error.clone());
        draft.set(field, value);
        Ok(error)
    }

    /// Keystroke in the email form; returns the live error
    pub fn edit_email_draft(&mut self, value: &str) -> TableResult<Option<String>> {
        let ModalState::EmailOpen {
            draft_email,
            errors,
            ..
        } = self
        else {
            return Err(TableError::WrongModal { expected: "email" });
        };
        let error = validate_email_format(value);
        errors.email = error.clone();
        *draft_email = value.to_string();
        Ok(error)
    }
}
