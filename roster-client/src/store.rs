//! Record store adapter
//!
//! [`RecordStore`] is the seam between the roster table and the remote
//! employee store. Two implementations are provided:
//!
//! - [`HttpRecordStore`] talks to the REST backend
//! - [`MemoryRecordStore`] keeps the records in process (offline mode, tests)

use async_trait::async_trait;
use parking_lot::Mutex;
use shared::{EmailUpdate, EmployeeId, EmployeeRecord, EmployeeStatus, StatusUpdate};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::{ClientConfig, ClientError, ClientResult, HttpClient};

/// Remote employee record store
///
/// Every call is single-shot: no retry, timeouts belong to the transport.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch the full roster
    async fn list_all(&self) -> ClientResult<Vec<EmployeeRecord>>;

    /// Persist a new status
    async fn update_status(&self, id: &EmployeeId, active: bool) -> ClientResult<()>;

    /// Persist a new email address
    async fn update_email(&self, id: &EmployeeId, email: &str) -> ClientResult<()>;

    /// Persist the full record
    async fn update_details(&self, id: &EmployeeId, record: &EmployeeRecord) -> ClientResult<()>;
}

/// REST implementation
#[derive(Debug, Clone)]
pub struct HttpRecordStore {
    http: HttpClient,
}

impl HttpRecordStore {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self {
            http: HttpClient::new(config)?,
        })
    }
}

#[async_trait]
impl RecordStore for HttpRecordStore {
    async fn list_all(&self) -> ClientResult<Vec<EmployeeRecord>> {
        self.http.get(&["users", "all"]).await
    }

    async fn update_status(&self, id: &EmployeeId, active: bool) -> ClientResult<()> {
        self.http
            .put(
                &["users", "updateStatus", id.as_str()],
                &StatusUpdate { status: active },
            )
            .await
    }

    async fn update_email(&self, id: &EmployeeId, email: &str) -> ClientResult<()> {
        self.http
            .put(
                &["users", "updateEmail", id.as_str()],
                &EmailUpdate {
                    email: email.to_string(),
                },
            )
            .await
    }

    async fn update_details(&self, id: &EmployeeId, record: &EmployeeRecord) -> ClientResult<()> {
        self.http
            .put(&["users", "updateDetails", id.as_str()], record)
            .await
    }
}

/// In-process record store
///
/// Keeps insertion order. `set_unavailable(true)` makes every following
/// call fail with [`ClientError::Unavailable`].
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: Mutex<Vec<EmployeeRecord>>,
    unavailable: AtomicBool,
}

impl MemoryRecordStore {
    pub fn new(records: Vec<EmployeeRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Toggle forced failure for subsequent calls
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Current stored copy of a record
    pub fn get(&self, id: &EmployeeId) -> Option<EmployeeRecord> {
        self.records
            .lock()
            .iter()
            .find(|r| &r.employee_id == id)
            .cloned()
    }

    fn ensure_available(&self) -> ClientResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(ClientError::Unavailable("memory store switched off".into()));
        }
        Ok(())
    }

    fn with_record<F>(&self, id: &EmployeeId, f: F) -> ClientResult<()>
    where
        F: FnOnce(&mut EmployeeRecord),
    {
        self.ensure_available()?;
        let mut records = self.records.lock();
        let record = records
            .iter_mut()
            .find(|r| &r.employee_id == id)
            .ok_or_else(|| ClientError::NotFound(format!("employee {id}")))?;
        f(record);
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn list_all(&self) -> ClientResult<Vec<EmployeeRecord>> {
        self.ensure_available()?;
        Ok(self.records.lock().clone())
    }

    async fn update_status(&self, id: &EmployeeId, active: bool) -> ClientResult<()> {
        self.with_record(id, |r| r.status = EmployeeStatus::from(active))
    }

    async fn update_email(&self, id: &EmployeeId, email: &str) -> ClientResult<()> {
        self.with_record(id, |r| r.email = email.to_string())
    }

    async fn update_details(&self, id: &EmployeeId, record: &EmployeeRecord) -> ClientResult<()> {
        self.with_record(id, |r| {
            r.first_name = record.first_name.clone();
            r.last_name = record.last_name.clone();
            r.email = record.email.clone();
            r.phone = record.phone.clone();
            r.status = record.status;
        })
    }
}
