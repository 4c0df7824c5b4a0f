//! Table error types

use shared::EmployeeId;
use thiserror::Error;

use crate::validation::DetailField;

/// Refused selection or modal transition
///
/// Returned to the presentation layer; a refused action never changes state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("Employee not found: {0}")]
    UnknownEmployee(EmployeeId),

    /// Inactive employees have their menu disabled
    #[error("Employee {0} is inactive")]
    EmployeeInactive(EmployeeId),

    #[error("No menu is open")]
    NoMenuOpen,

    #[error("A modal is already open")]
    ModalAlreadyOpen,

    #[error("The {expected} modal is not open")]
    WrongModal { expected: &'static str },

    #[error("Field {0} is read-only")]
    ReadOnlyField(DetailField),

    /// The remote leg of a mutation panicked or was cancelled
    #[error("Mutation task failed: {0}")]
    MutationTask(String),
}

/// Result type for table operations
pub type TableResult<T> = Result<T, TableError>;
