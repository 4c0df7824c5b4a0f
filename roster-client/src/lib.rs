//! Roster Client - record store adapter for the employee roster
//!
//! Wraps the four remote operations (list-all, update-status, update-email,
//! update-details) behind the [`RecordStore`] trait and normalizes every
//! transport outcome into a [`ClientResult`].

pub mod config;
pub mod error;
pub mod http;
pub mod store;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use store::{HttpRecordStore, MemoryRecordStore, RecordStore};

// Re-export shared types for convenience
pub use shared::{EmployeeId, EmployeeRecord, EmployeeStatus};
