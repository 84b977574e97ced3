//! Internet user record as served by the `/internet` endpoints.

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Opaque record identifier. The API may send either a number or a string.
///
/// Ids compare by their text form, so `42` and `"42"` name the same record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Int(i64),
    Text(String),
}

impl UserId {
    fn canonical(&self) -> Cow<'_, str> {
        match self {
            UserId::Int(n) => Cow::Owned(n.to_string()),
            UserId::Text(s) => Cow::Borrowed(s.as_str()),
        }
    }
}

impl PartialEq for UserId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (UserId::Int(a), UserId::Int(b)) => a == b,
            _ => self.canonical() == other.canonical(),
        }
    }
}

impl Eq for UserId {}

impl Hash for UserId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Int(n) => write!(f, "{}", n),
            UserId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl FromStr for UserId {
    type Err = std::convert::Infallible;

    /// Numeric input becomes `Int`, anything else `Text`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().parse::<i64>() {
            Ok(n) => UserId::Int(n),
            Err(_) => UserId::Text(s.to_string()),
        })
    }
}

impl From<i64> for UserId {
    fn from(n: i64) -> Self {
        UserId::Int(n)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        UserId::Text(s.to_string())
    }
}

/// Account status classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserStatus {
    Active,
    Inactive,
    /// Absent or any value other than 0/1.
    Unknown,
}

/// Severity indicator driven by the violations count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationSeverity {
    None,
    /// One violation.
    Yellow,
    /// Two violations.
    Red,
}

impl fmt::Display for ViolationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationSeverity::None => write!(f, ""),
            ViolationSeverity::Yellow => write!(f, "yellow"),
            ViolationSeverity::Red => write!(f, "red"),
        }
    }
}

/// A single internet user row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub name: String,
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub username: String,
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub lastname: String,
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub email: String,
    #[serde(default, deserialize_with = "de::string_or_number")]
    pub phone: String,
    #[serde(default)]
    pub employment_type: Option<String>,
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub directorate: String,
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub deputy: String,
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub position: String,
    #[serde(default, deserialize_with = "de::string_or_number")]
    pub device_limit: String,
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub device_type: String,
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub group_type: String,
    #[serde(default, deserialize_with = "de::nullable_string")]
    pub mac_address: String,
    #[serde(
        default,
        deserialize_with = "de::status_code",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<i64>,
    #[serde(default, deserialize_with = "de::string_or_number")]
    pub violations_count: String,
    #[serde(default)]
    pub violation_type: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl UserRecord {
    /// Create a record with the given id and name; every other field empty.
    pub fn new(id: impl Into<UserId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            username: String::new(),
            lastname: String::new(),
            email: String::new(),
            phone: String::new(),
            employment_type: None,
            directorate: String::new(),
            deputy: String::new(),
            position: String::new(),
            device_limit: String::new(),
            device_type: String::new(),
            group_type: String::new(),
            mac_address: String::new(),
            status: None,
            violations_count: String::new(),
            violation_type: None,
            comment: None,
        }
    }

    pub fn status_kind(&self) -> UserStatus {
        match self.status {
            Some(1) => UserStatus::Active,
            Some(0) => UserStatus::Inactive,
            _ => UserStatus::Unknown,
        }
    }

    /// Status as shown in the table.
    pub fn status_label(&self) -> &'static str {
        match self.status_kind() {
            UserStatus::Active => "active",
            UserStatus::Inactive => "deactive",
            UserStatus::Unknown => "-",
        }
    }

    pub fn violation_severity(&self) -> ViolationSeverity {
        match self.violations_count.as_str() {
            "1" => ViolationSeverity::Yellow,
            "2" => ViolationSeverity::Red,
            _ => ViolationSeverity::None,
        }
    }
}

mod de {
    use super::*;
    use serde_json::Value;

    pub fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
    }

    /// Integer-like fields arrive as either JSON numbers or strings.
    pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(String::new()),
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            other => Err(serde::de::Error::custom(format!(
                "expected string or number, got {}",
                other
            ))),
        }
    }

    /// Status is `0`/`1` on the wire; the labels written by the edit form are
    /// accepted too. Anything unrecognised is kept as unknown.
    pub fn status_code<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => match s.trim() {
                "active" => Some(1),
                "deactive" => Some(0),
                other => other.parse::<i64>().ok(),
            },
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_full_record() {
        let record: UserRecord = serde_json::from_value(json!({
            "id": 7,
            "name": "Ana",
            "username": "ana.k",
            "lastname": "Karimi",
            "email": "ana@example.com",
            "phone": "0700123456",
            "employment_type": "Permanent",
            "directorate": "IT",
            "deputy": "Finance",
            "position": "Engineer",
            "device_limit": 3,
            "device_type": "Laptop",
            "group_type": "Staff",
            "mac_address": "AA:BB:CC:DD:EE:FF",
            "status": 1,
            "violations_count": "1",
            "violation_type": "Streaming",
            "comment": null
        }))
        .unwrap();

        assert_eq!(record.id, UserId::Int(7));
        assert_eq!(record.device_limit, "3");
        assert_eq!(record.status_kind(), UserStatus::Active);
        assert_eq!(record.violation_severity(), ViolationSeverity::Yellow);
        assert!(record.comment.is_none());
    }

    #[test]
    fn test_deserialize_sparse_record() {
        let record: UserRecord =
            serde_json::from_value(json!({ "id": "u-1", "name": null })).unwrap();
        assert_eq!(record.id, UserId::Text("u-1".into()));
        assert_eq!(record.name, "");
        assert_eq!(record.status, None);
        assert_eq!(record.status_kind(), UserStatus::Unknown);
        assert_eq!(record.status_label(), "-");
    }

    #[test]
    fn test_status_labels_from_form_values() {
        let active: UserRecord =
            serde_json::from_value(json!({ "id": 1, "status": "active" })).unwrap();
        let inactive: UserRecord =
            serde_json::from_value(json!({ "id": 2, "status": "deactive" })).unwrap();
        let odd: UserRecord = serde_json::from_value(json!({ "id": 3, "status": 2 })).unwrap();

        assert_eq!(active.status, Some(1));
        assert_eq!(inactive.status_label(), "deactive");
        assert_eq!(odd.status, Some(2));
        assert_eq!(odd.status_kind(), UserStatus::Unknown);
    }

    #[test]
    fn test_violations_count_number_on_wire() {
        let record: UserRecord =
            serde_json::from_value(json!({ "id": 1, "violations_count": 2 })).unwrap();
        assert_eq!(record.violations_count, "2");
        assert_eq!(record.violation_severity(), ViolationSeverity::Red);
    }

    #[test]
    fn test_user_id_from_str() {
        assert_eq!("42".parse::<UserId>().unwrap(), UserId::Int(42));
        assert_eq!(
            "abc".parse::<UserId>().unwrap(),
            UserId::Text("abc".to_string())
        );
        assert_eq!(UserId::Int(42).to_string(), "42");
    }

    #[test]
    fn test_numeric_text_id_matches_parsed_id() {
        let record: UserRecord =
            serde_json::from_value(json!({ "id": "42", "name": "Ana" })).unwrap();
        let parsed: UserId = "42".parse().unwrap();

        assert_eq!(record.id, parsed);
        assert_eq!(UserId::Text("42".into()), UserId::Int(42));
        assert_ne!(UserId::Text("042".into()), UserId::Int(42));

        let mut seen = std::collections::HashSet::new();
        seen.insert(UserId::Int(42));
        assert!(!seen.insert(UserId::Text("42".into())));
    }

    #[test]
    fn test_serialize_omits_unknown_status() {
        let record = UserRecord::new(1, "Ana");
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("status").is_none());
        assert_eq!(json["id"], 1);
    }
}
