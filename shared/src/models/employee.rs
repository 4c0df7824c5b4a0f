//! Employee Model

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Stable employee identifier (primary key of the roster)
///
/// The remote store may send either a JSON string or a JSON integer;
/// both are held as a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EmployeeId(String);

impl EmployeeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EmployeeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for EmployeeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl<'de> Deserialize<'de> for EmployeeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => Self(s),
            RawId::Number(n) => Self(n.to_string()),
        })
    }
}

/// Employee status, persisted as a boolean (`true` = active)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "bool", into = "bool")]
pub enum EmployeeStatus {
    #[default]
    Active,
    Inactive,
}

impl EmployeeStatus {
    pub fn is_active(self) -> bool {
        matches!(self, EmployeeStatus::Active)
    }

    /// The opposite status
    pub fn toggled(self) -> Self {
        match self {
            EmployeeStatus::Active => EmployeeStatus::Inactive,
            EmployeeStatus::Inactive => EmployeeStatus::Active,
        }
    }

    /// Display label used by the table
    pub fn label(self) -> &'static str {
        match self {
            EmployeeStatus::Active => "Active",
            EmployeeStatus::Inactive => "Inactive",
        }
    }
}

impl From<bool> for EmployeeStatus {
    fn from(active: bool) -> Self {
        if active {
            EmployeeStatus::Active
        } else {
            EmployeeStatus::Inactive
        }
    }
}

impl From<EmployeeStatus> for bool {
    fn from(status: EmployeeStatus) -> Self {
        status.is_active()
    }
}

impl fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Employee record as held by the roster and exchanged with the record store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRecord {
    pub employee_id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// 10 digits when present
    #[serde(default, deserialize_with = "phone_opt")]
    pub phone: Option<String>,
    #[serde(default)]
    pub status: EmployeeStatus,
}

impl EmployeeRecord {
    /// Phone as shown in the table and copied into edit drafts
    pub fn phone_or_empty(&self) -> &str {
        self.phone.as_deref().unwrap_or("")
    }
}

/// Phone arrives as a string, a number, null, or an empty string
fn phone_opt<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPhone {
        Text(String),
        Number(u64),
    }

    Ok(match Option::<RawPhone>::deserialize(deserializer)? {
        Some(RawPhone::Text(s)) if s.is_empty() => None,
        Some(RawPhone::Text(s)) => Some(s),
        Some(RawPhone::Number(n)) => Some(n.to_string()),
        None => None,
    })
}

/// Update status payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: bool,
}

/// Update email payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailUpdate {
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_from_backend_json() {
        let json = r#"{
            "employeeId": 1001,
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "phone": 5551234567,
            "status": false
        }"#;
        let record: EmployeeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.employee_id.as_str(), "1001");
        assert_eq!(record.phone.as_deref(), Some("5551234567"));
        assert_eq!(record.status, EmployeeStatus::Inactive);
    }

    #[test]
    fn test_empty_or_missing_phone_is_absent() {
        let json = r#"{"employeeId":"E1","firstName":"A","lastName":"B","email":"a@b.co","phone":"","status":true}"#;
        let record: EmployeeRecord = serde_json::from_str(json).unwrap();
        assert!(record.phone.is_none());

        let json = r#"{"employeeId":"E1","firstName":"A","lastName":"B","email":"a@b.co","status":true}"#;
        let record: EmployeeRecord = serde_json::from_str(json).unwrap();
        assert!(record.phone.is_none());
        assert_eq!(record.phone_or_empty(), "");
    }

    #[test]
    fn test_status_serializes_as_bool() {
        let record = EmployeeRecord {
            employee_id: "E7".into(),
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            email: "grace@navy.mil".into(),
            phone: Some("1234567890".into()),
            status: EmployeeStatus::Active,
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["status"], serde_json::Value::Bool(true));
        assert_eq!(value["employeeId"], "E7");
        assert_eq!(value["firstName"], "Grace");
    }

    #[test]
    fn test_status_toggle_and_label() {
        assert_eq!(EmployeeStatus::Active.toggled(), EmployeeStatus::Inactive);
        assert_eq!(EmployeeStatus::Inactive.toggled(), EmployeeStatus::Active);
        assert_eq!(EmployeeStatus::Inactive.label(), "Inactive");
        assert!(bool::from(EmployeeStatus::Active));
    }
}
