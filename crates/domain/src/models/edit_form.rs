//! Edit form model.
//!
//! The set of editable fields is declared statically together with the kind
//! of input each one takes. The form converts to a [`UserPatch`], which is the
//! body of the partial update call.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;
use validator::Validate;

use super::internet_user::UserRecord;
use super::reference::{ReferenceEntry, ReferenceKind};

/// Comment written when the record has none.
pub const DEFAULT_COMMENT: &str = "No comment";

/// Input kind of an editable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    LongText,
    /// Integer stored as text.
    NumericText,
    /// One of a fixed set of values.
    Choice(&'static [&'static str]),
    /// Select among the names of a reference list.
    ReferenceChoice(ReferenceKind),
    /// Searchable lookup over a reference list; set through a selection,
    /// never typed directly.
    ReferenceLookup(ReferenceKind),
}

const STATUS_CHOICES: &[&str] = &["active", "deactive"];
const VIOLATION_CHOICES: &[&str] = &["0", "1", "2"];

/// Fields that can be edited, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditableField {
    Name,
    Username,
    LastName,
    Email,
    Phone,
    Position,
    DeviceLimit,
    DeviceType,
    GroupType,
    MacAddress,
    ViolationType,
    Directorate,
    Deputy,
    EmploymentType,
    Status,
    ViolationsCount,
    Comment,
}

impl EditableField {
    pub const ALL: [EditableField; 17] = [
        EditableField::Name,
        EditableField::Username,
        EditableField::LastName,
        EditableField::Email,
        EditableField::Phone,
        EditableField::Position,
        EditableField::DeviceLimit,
        EditableField::DeviceType,
        EditableField::GroupType,
        EditableField::MacAddress,
        EditableField::ViolationType,
        EditableField::Directorate,
        EditableField::Deputy,
        EditableField::EmploymentType,
        EditableField::Status,
        EditableField::ViolationsCount,
        EditableField::Comment,
    ];

    /// Wire key of the field.
    pub fn key(&self) -> &'static str {
        match self {
            EditableField::Name => "name",
            EditableField::Username => "username",
            EditableField::LastName => "lastname",
            EditableField::Email => "email",
            EditableField::Phone => "phone",
            EditableField::Position => "position",
            EditableField::DeviceLimit => "device_limit",
            EditableField::DeviceType => "device_type",
            EditableField::GroupType => "group_type",
            EditableField::MacAddress => "mac_address",
            EditableField::ViolationType => "violation_type",
            EditableField::Directorate => "directorate",
            EditableField::Deputy => "deputy",
            EditableField::EmploymentType => "employment_type",
            EditableField::Status => "status",
            EditableField::ViolationsCount => "violations_count",
            EditableField::Comment => "comment",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EditableField::Name => "Name",
            EditableField::Username => "Username",
            EditableField::LastName => "Last Name",
            EditableField::Email => "Email",
            EditableField::Phone => "Phone",
            EditableField::Position => "Position",
            EditableField::DeviceLimit => "Device Limit",
            EditableField::DeviceType => "Device Type",
            EditableField::GroupType => "Group Type",
            EditableField::MacAddress => "MAC Address",
            EditableField::ViolationType => "Violation Type",
            EditableField::Directorate => "Directorate",
            EditableField::Deputy => "Deputy Ministry",
            EditableField::EmploymentType => "Employment Type",
            EditableField::Status => "Status",
            EditableField::ViolationsCount => "Violations Count",
            EditableField::Comment => "Comment",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            EditableField::DeviceLimit => FieldKind::NumericText,
            EditableField::Directorate => FieldKind::ReferenceLookup(ReferenceKind::Directorate),
            EditableField::Deputy => FieldKind::ReferenceLookup(ReferenceKind::DeputyMinistry),
            EditableField::EmploymentType => {
                FieldKind::ReferenceChoice(ReferenceKind::EmploymentType)
            }
            EditableField::Status => FieldKind::Choice(STATUS_CHOICES),
            EditableField::ViolationsCount => FieldKind::Choice(VIOLATION_CHOICES),
            EditableField::Comment => FieldKind::LongText,
            _ => FieldKind::Text,
        }
    }
}

impl fmt::Display for EditableField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for EditableField {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EditableField::ALL
            .iter()
            .copied()
            .find(|f| f.key() == s)
            .ok_or_else(|| FormError::UnknownField(s.to_string()))
    }
}

/// Errors raised while editing the form.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Invalid value '{value}' for {field}, expected one of: {allowed}")]
    InvalidChoice {
        field: EditableField,
        value: String,
        allowed: String,
    },

    #[error("Invalid value for {field}: {message}")]
    InvalidValue {
        field: EditableField,
        message: String,
    },

    #[error("{0} is selected through its lookup")]
    LookupOnly(EditableField),
}

/// Status selection in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusChoice {
    #[default]
    Active,
    Deactive,
    /// A server code outside the choice set, written back unchanged.
    Other(i64),
}

impl StatusChoice {
    /// Defaults to active only when the record status is absent.
    pub fn from_code(code: Option<i64>) -> Self {
        match code {
            None | Some(1) => StatusChoice::Active,
            Some(0) => StatusChoice::Deactive,
            Some(n) => StatusChoice::Other(n),
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            StatusChoice::Active => 1,
            StatusChoice::Deactive => 0,
            StatusChoice::Other(n) => *n,
        }
    }

    pub fn as_str(&self) -> Cow<'static, str> {
        match self {
            StatusChoice::Active => Cow::Borrowed("active"),
            StatusChoice::Deactive => Cow::Borrowed("deactive"),
            StatusChoice::Other(n) => Cow::Owned(n.to_string()),
        }
    }
}

impl FromStr for StatusChoice {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(StatusChoice::Active),
            "deactive" => Ok(StatusChoice::Deactive),
            _ => Err(()),
        }
    }
}

/// Violations count selection in the form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViolationsChoice {
    #[default]
    Zero,
    One,
    Two,
    /// Server text outside the choice set, written back unchanged.
    Other(String),
}

impl ViolationsChoice {
    /// Defaults to zero only when the record value is empty.
    pub fn from_record_value(value: &str) -> Self {
        if value.trim().is_empty() {
            return ViolationsChoice::Zero;
        }
        value
            .parse()
            .unwrap_or_else(|_| ViolationsChoice::Other(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        match self {
            ViolationsChoice::Zero => "0",
            ViolationsChoice::One => "1",
            ViolationsChoice::Two => "2",
            ViolationsChoice::Other(raw) => raw,
        }
    }
}

impl FromStr for ViolationsChoice {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0" => Ok(ViolationsChoice::Zero),
            "1" => Ok(ViolationsChoice::One),
            "2" => Ok(ViolationsChoice::Two),
            _ => Err(()),
        }
    }
}

/// Working values of the edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditForm {
    pub name: String,
    pub username: String,
    pub lastname: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub device_limit: String,
    pub device_type: String,
    pub group_type: String,
    pub mac_address: String,
    pub violation_type: String,
    pub directorate: String,
    pub deputy: String,
    pub employment_type: String,
    pub status: StatusChoice,
    pub violations_count: ViolationsChoice,
    pub comment: String,
}

impl EditForm {
    /// Pre-populate the form from a record, applying defaults for absent
    /// status, violations count and comment.
    pub fn from_record(record: &UserRecord) -> Self {
        let comment = record
            .comment
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_COMMENT)
            .to_string();

        Self {
            name: record.name.clone(),
            username: record.username.clone(),
            lastname: record.lastname.clone(),
            email: record.email.clone(),
            phone: record.phone.clone(),
            position: record.position.clone(),
            device_limit: record.device_limit.clone(),
            device_type: record.device_type.clone(),
            group_type: record.group_type.clone(),
            mac_address: record.mac_address.clone(),
            violation_type: record.violation_type.clone().unwrap_or_default(),
            directorate: record.directorate.clone(),
            deputy: record.deputy.clone(),
            employment_type: record.employment_type.clone().unwrap_or_default(),
            status: StatusChoice::from_code(record.status),
            violations_count: ViolationsChoice::from_record_value(&record.violations_count),
            comment,
        }
    }

    /// Current value of a field as text.
    pub fn get(&self, field: EditableField) -> Cow<'_, str> {
        let text: &str = match field {
            EditableField::Name => &self.name,
            EditableField::Username => &self.username,
            EditableField::LastName => &self.lastname,
            EditableField::Email => &self.email,
            EditableField::Phone => &self.phone,
            EditableField::Position => &self.position,
            EditableField::DeviceLimit => &self.device_limit,
            EditableField::DeviceType => &self.device_type,
            EditableField::GroupType => &self.group_type,
            EditableField::MacAddress => &self.mac_address,
            EditableField::ViolationType => &self.violation_type,
            EditableField::Directorate => &self.directorate,
            EditableField::Deputy => &self.deputy,
            EditableField::EmploymentType => &self.employment_type,
            EditableField::Status => return self.status.as_str(),
            EditableField::ViolationsCount => self.violations_count.as_str(),
            EditableField::Comment => &self.comment,
        };
        Cow::Borrowed(text)
    }

    /// Set a field from raw text, checked against the field's kind.
    pub fn set(&mut self, field: EditableField, raw: &str) -> Result<(), FormError> {
        let value = raw.to_string();
        match field {
            EditableField::Directorate | EditableField::Deputy => {
                return Err(FormError::LookupOnly(field))
            }
            EditableField::Status => {
                self.status = raw.parse().map_err(|_| invalid_choice(field, raw))?
            }
            EditableField::ViolationsCount => {
                self.violations_count = raw.parse().map_err(|_| invalid_choice(field, raw))?
            }
            EditableField::DeviceLimit => {
                shared::validation::validate_numeric_text(raw).map_err(|e| {
                    FormError::InvalidValue {
                        field,
                        message: e
                            .message
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string()),
                    }
                })?;
                self.device_limit = raw.trim().to_string();
            }
            EditableField::Name => self.name = value,
            EditableField::Username => self.username = value,
            EditableField::LastName => self.lastname = value,
            EditableField::Email => self.email = value,
            EditableField::Phone => self.phone = value,
            EditableField::Position => self.position = value,
            EditableField::DeviceType => self.device_type = value,
            EditableField::GroupType => self.group_type = value,
            EditableField::MacAddress => self.mac_address = value,
            EditableField::ViolationType => self.violation_type = value,
            EditableField::EmploymentType => self.employment_type = value,
            EditableField::Comment => self.comment = value,
        }
        Ok(())
    }

    /// Write a lookup selection into its field; `None` clears it.
    pub(crate) fn set_reference(&mut self, kind: ReferenceKind, entry: Option<&ReferenceEntry>) {
        let name = entry.map(|e| e.name.clone()).unwrap_or_default();
        match kind {
            ReferenceKind::Directorate => self.directorate = name,
            ReferenceKind::DeputyMinistry => self.deputy = name,
            ReferenceKind::EmploymentType => self.employment_type = name,
        }
    }

    /// Body of the partial update call.
    pub fn to_patch(&self) -> UserPatch {
        fn optional(value: &str) -> Option<String> {
            if value.is_empty() {
                None
            } else {
                Some(value.to_string())
            }
        }

        UserPatch {
            name: self.name.clone(),
            username: self.username.clone(),
            lastname: self.lastname.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            position: self.position.clone(),
            device_limit: self.device_limit.clone(),
            device_type: self.device_type.clone(),
            group_type: self.group_type.clone(),
            mac_address: self.mac_address.clone(),
            violation_type: optional(&self.violation_type),
            directorate: self.directorate.clone(),
            deputy: self.deputy.clone(),
            employment_type: optional(&self.employment_type),
            status: self.status.code(),
            violations_count: self.violations_count.as_str().to_string(),
            comment: self.comment.clone(),
        }
    }
}

fn invalid_choice(field: EditableField, raw: &str) -> FormError {
    let allowed = match field.kind() {
        FieldKind::Choice(allowed) => allowed.join(", "),
        _ => String::new(),
    };
    FormError::InvalidChoice {
        field,
        value: raw.to_string(),
        allowed,
    }
}

/// Partial user update sent to `PUT /internet/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub struct UserPatch {
    #[validate(custom(function = "shared::validation::validate_present"))]
    pub name: String,
    #[validate(custom(function = "shared::validation::validate_present"))]
    pub username: String,
    pub lastname: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub device_limit: String,
    pub device_type: String,
    pub group_type: String,
    pub mac_address: String,
    pub violation_type: Option<String>,
    pub directorate: String,
    pub deputy: String,
    pub employment_type: Option<String>,
    pub status: i64,
    pub violations_count: String,
    pub comment: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> UserRecord {
        let mut r = UserRecord::new(1, "Ana");
        r.username = "ana.k".into();
        r.deputy = "Finance".into();
        r.directorate = "IT".into();
        r.device_limit = "2".into();
        r
    }

    #[test]
    fn test_defaults_applied_from_record() {
        let form = EditForm::from_record(&record());
        assert_eq!(form.status, StatusChoice::Active);
        assert_eq!(form.violations_count, ViolationsChoice::Zero);
        assert_eq!(form.comment, DEFAULT_COMMENT);
    }

    #[test]
    fn test_existing_values_kept() {
        let mut r = record();
        r.status = Some(0);
        r.violations_count = "2".into();
        r.comment = Some("Shared laptop".into());
        let form = EditForm::from_record(&r);
        assert_eq!(form.status, StatusChoice::Deactive);
        assert_eq!(form.violations_count, ViolationsChoice::Two);
        assert_eq!(form.comment, "Shared laptop");
    }

    #[test]
    fn test_unmapped_server_values_kept() {
        let mut r = record();
        r.status = Some(5);
        r.violations_count = "3".into();
        let mut form = EditForm::from_record(&r);
        assert_eq!(form.status, StatusChoice::Other(5));
        assert_eq!(form.violations_count, ViolationsChoice::Other("3".into()));
        assert_eq!(form.get(EditableField::Status), "5");

        form.set(EditableField::Phone, "0799").unwrap();
        let patch = form.to_patch();
        assert_eq!(patch.status, 5);
        assert_eq!(patch.violations_count, "3");
        assert_eq!(patch.phone, "0799");
    }

    #[test]
    fn test_unmapped_values_replaced_when_set() {
        let mut r = record();
        r.status = Some(5);
        r.violations_count = "3".into();
        let mut form = EditForm::from_record(&r);
        form.set(EditableField::Status, "deactive").unwrap();
        form.set(EditableField::ViolationsCount, "1").unwrap();
        assert_eq!(form.to_patch().status, 0);
        assert_eq!(form.to_patch().violations_count, "1");
    }

    #[test]
    fn test_server_device_limit_not_checked_on_save() {
        let mut r = record();
        r.device_limit = "unlimited".into();
        let patch = EditForm::from_record(&r).to_patch();
        assert!(patch.validate().is_ok());
        assert_eq!(patch.device_limit, "unlimited");
    }

    #[test]
    fn test_field_keys_round_trip() {
        for field in EditableField::ALL {
            assert_eq!(field.key().parse::<EditableField>().unwrap(), field);
        }
        assert!(matches!(
            "id".parse::<EditableField>(),
            Err(FormError::UnknownField(_))
        ));
    }

    #[test]
    fn test_set_text_and_choice() {
        let mut form = EditForm::from_record(&record());
        form.set(EditableField::Phone, "0799").unwrap();
        form.set(EditableField::Status, "deactive").unwrap();
        form.set(EditableField::ViolationsCount, "1").unwrap();
        assert_eq!(form.get(EditableField::Phone), "0799");
        assert_eq!(form.get(EditableField::Status), "deactive");
        assert_eq!(form.get(EditableField::ViolationsCount), "1");
    }

    #[test]
    fn test_set_invalid_choice() {
        let mut form = EditForm::from_record(&record());
        let err = form.set(EditableField::ViolationsCount, "3").unwrap_err();
        assert!(matches!(err, FormError::InvalidChoice { .. }));
        assert!(err.to_string().contains("0, 1, 2"));
        assert_eq!(form.violations_count, ViolationsChoice::Zero);
    }

    #[test]
    fn test_set_numeric_text() {
        let mut form = EditForm::from_record(&record());
        form.set(EditableField::DeviceLimit, " 4 ").unwrap();
        assert_eq!(form.device_limit, "4");
        assert!(matches!(
            form.set(EditableField::DeviceLimit, "four"),
            Err(FormError::InvalidValue { .. })
        ));
        assert_eq!(form.device_limit, "4");
    }

    #[test]
    fn test_lookup_fields_rejected_by_set() {
        let mut form = EditForm::from_record(&record());
        assert_eq!(
            form.set(EditableField::Directorate, "HR"),
            Err(FormError::LookupOnly(EditableField::Directorate))
        );
        assert_eq!(form.directorate, "IT");
    }

    #[test]
    fn test_patch_serialization() {
        let mut form = EditForm::from_record(&record());
        form.set(EditableField::Status, "deactive").unwrap();
        let patch = form.to_patch();
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json["status"], 0);
        assert_eq!(json["violations_count"], "0");
        assert_eq!(json["deputy"], "Finance");
        assert_eq!(json["comment"], DEFAULT_COMMENT);
        assert!(json["employment_type"].is_null());
        assert!(json.get("id").is_none());
    }

    #[test]
    fn test_patch_presence_checks() {
        let mut form = EditForm::from_record(&record());
        assert!(form.to_patch().validate().is_ok());
        form.set(EditableField::Name, "  ").unwrap();
        let errors = form.to_patch().validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }
}
