//! Data models
//!
//! Shared between the record store adapter and the roster table.
//! JSON field names follow the remote store (camelCase).

pub mod employee;

// Re-exports
pub use employee::*;
