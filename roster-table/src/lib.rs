//! Roster Table - state reconciliation engine for the employee table
//!
//! Holds the authoritative in-memory copy of the employee records, gates
//! edits through field validation, applies optimistic mutations and rolls
//! them back when the record store refuses them.
//!
//! # Modules
//!
//! - [`validation`] - live and submit-time field checks
//! - [`modal`] - selection & modal state machine, edit drafts
//! - [`pending`] - ledger of in-flight optimistic writes
//! - [`table`] - [`RosterTable`], the store and mutation engine
//! - [`notify`] - notification surface
//! - [`view`] - row view models for presentation

pub mod config;
pub mod error;
pub mod logger;
pub mod modal;
pub mod notify;
pub mod pending;
pub mod table;
pub mod validation;
pub mod view;

pub use config::ShellConfig;
pub use error::{TableError, TableResult};
pub use modal::{DetailsDraft, ModalState};
pub use notify::{BroadcastNotifier, Notification, NotificationKind, Notifier, TracingNotifier};
pub use table::{FormErrors, MutationOutcome, RosterTable, TableSnapshot};
pub use validation::{DetailField, DetailsFormErrors, EmailFormErrors};
