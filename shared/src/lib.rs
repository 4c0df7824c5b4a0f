//! Shared types for the employee roster
//!
//! Wire and domain types used by both the record store adapter
//! (`roster-client`) and the roster table core (`roster-table`).

pub mod models;

// Re-exports
pub use models::{EmailUpdate, EmployeeId, EmployeeRecord, EmployeeStatus, StatusUpdate};
pub use serde::{Deserialize, Serialize};
