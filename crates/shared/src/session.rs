//! Locally persisted session object.
//!
//! The logged-in user is stored as a JSON object on disk; only the `token`
//! field is interpreted here, everything else is carried through untouched.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for reading the persisted session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to read session file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The persisted logged-in user object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl PersistedSession {
    /// Parse a session object from its JSON text.
    pub fn from_json(raw: &str) -> Result<Self, SessionError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Read the session from `path`.
    ///
    /// A missing file is an empty session, not an error.
    pub fn read_from(path: &Path) -> Result<Self, SessionError> {
        match std::fs::read_to_string(path) {
            Ok(raw) => Self::from_json(&raw),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// The bearer token, if one is stored and non-blank.
    pub fn bearer_token(&self) -> Option<&str> {
        self.token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_session_with_token() {
        let session =
            PersistedSession::from_json(r#"{"token":"abc123","username":"admin"}"#).unwrap();
        assert_eq!(session.bearer_token(), Some("abc123"));
        assert_eq!(session.extra["username"], "admin");
    }

    #[test]
    fn test_blank_token_is_none() {
        let session = PersistedSession::from_json(r#"{"token":"  "}"#).unwrap();
        assert_eq!(session.bearer_token(), None);
    }

    #[test]
    fn test_empty_object_has_no_token() {
        let session = PersistedSession::from_json("{}").unwrap();
        assert_eq!(session.bearer_token(), None);
    }

    #[test]
    fn test_invalid_json_is_error() {
        let result = PersistedSession::from_json("not json");
        assert!(matches!(result, Err(SessionError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_empty_session() {
        let dir = tempfile::tempdir().unwrap();
        let session = PersistedSession::read_from(&dir.path().join("missing.json")).unwrap();
        assert_eq!(session, PersistedSession::default());
    }

    #[test]
    fn test_read_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"token":"from-disk"}}"#).unwrap();
        let session = PersistedSession::read_from(file.path()).unwrap();
        assert_eq!(session.bearer_token(), Some("from-disk"));
    }
}
