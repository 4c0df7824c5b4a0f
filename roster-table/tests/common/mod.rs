// roster-table/tests/common/mod.rs
// 测试辅助: 可控的记录存储与通知收集器

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use roster_client::{ClientError, ClientResult, RecordStore};
use roster_table::{Notification, NotificationKind, Notifier};
use serde_json::{Value, json};
use shared::{EmployeeId, EmployeeRecord, EmployeeStatus};
use tokio::sync::{mpsc, oneshot};

pub fn employee(id: &str, first: &str, status: EmployeeStatus) -> EmployeeRecord {
    EmployeeRecord {
        employee_id: id.into(),
        first_name: first.into(),
        last_name: "Doe".into(),
        email: format!("{}@example.com", first.to_lowercase()),
        phone: Some("0123456789".into()),
        status,
    }
}

pub fn roster() -> Vec<EmployeeRecord> {
    vec![
        employee("E1", "John", EmployeeStatus::Active),
        employee("E2", "Mary", EmployeeStatus::Active),
        employee("E3", "Carl", EmployeeStatus::Inactive),
    ]
}

/// Collects every notification
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn all(&self) -> Vec<Notification> {
        self.seen.lock().clone()
    }

    pub fn count(&self, kind: NotificationKind) -> usize {
        self.seen.lock().iter().filter(|n| n.kind == kind).count()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, kind: NotificationKind, message: &str) {
        self.seen.lock().push(Notification {
            kind,
            message: message.to_string(),
        });
    }
}

/// A remote call held until the test answers it
#[derive(Debug)]
pub struct Call {
    pub op: &'static str,
    pub employee_id: EmployeeId,
    pub payload: Value,
    reply: oneshot::Sender<ClientResult<()>>,
}

impl Call {
    pub fn succeed(self) {
        let _ = self.reply.send(Ok(()));
    }

    pub fn fail(self) {
        let _ = self
            .reply
            .send(Err(ClientError::Unavailable("scripted failure".into())));
    }
}

/// Record store whose update calls block until released by the test
pub struct GateStore {
    records: Vec<EmployeeRecord>,
    calls: mpsc::UnboundedSender<Call>,
}

impl GateStore {
    pub fn new(records: Vec<EmployeeRecord>) -> (Self, mpsc::UnboundedReceiver<Call>) {
        let (calls, rx) = mpsc::unbounded_channel();
        (Self { records, calls }, rx)
    }

    async fn gate(&self, op: &'static str, id: &EmployeeId, payload: Value) -> ClientResult<()> {
        let (reply, answer) = oneshot::channel();
        self.calls
            .send(Call {
                op,
                employee_id: id.clone(),
                payload,
                reply,
            })
            .map_err(|_| ClientError::Unavailable("test stopped listening".into()))?;
        answer
            .await
            .unwrap_or_else(|_| Err(ClientError::Unavailable("call dropped".into())))
    }
}

#[async_trait]
impl RecordStore for GateStore {
    async fn list_all(&self) -> ClientResult<Vec<EmployeeRecord>> {
        Ok(self.records.clone())
    }

    async fn update_status(&self, id: &EmployeeId, active: bool) -> ClientResult<()> {
        self.gate("update_status", id, json!({ "status": active }))
            .await
    }

    async fn update_email(&self, id: &EmployeeId, email: &str) -> ClientResult<()> {
        self.gate("update_email", id, json!({ "email": email })).await
    }

    async fn update_details(&self, id: &EmployeeId, record: &EmployeeRecord) -> ClientResult<()> {
        let payload = serde_json::to_value(record)
            .map_err(ClientError::Serialization)?;
        self.gate("update_details", id, payload).await
    }
}
