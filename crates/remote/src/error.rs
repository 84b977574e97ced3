//! Error type for remote calls.

use domain::services::StoreError;
use thiserror::Error;

/// Errors raised while talking to the internet users API.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response from {endpoint}: {message}")]
    InvalidResponse { endpoint: String, message: String },
}

impl From<RemoteError> for StoreError {
    fn from(err: RemoteError) -> Self {
        match err {
            RemoteError::Status { status, body } => StoreError::Status {
                status,
                message: body,
            },
            RemoteError::InvalidResponse { .. } => StoreError::Decode(err.to_string()),
            RemoteError::Http(e) if e.is_decode() => StoreError::Decode(e.to_string()),
            RemoteError::Http(e) => StoreError::Transport(e.to_string()),
            RemoteError::InvalidBaseUrl(_) => StoreError::Transport(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_maps_to_store_status() {
        let err: StoreError = RemoteError::Status {
            status: 503,
            body: "down".into(),
        }
        .into();
        assert!(matches!(err, StoreError::Status { status: 503, ref message } if message == "down"));
    }

    #[test]
    fn test_invalid_response_maps_to_decode() {
        let err: StoreError = RemoteError::InvalidResponse {
            endpoint: "/internet".into(),
            message: "expected array".into(),
        }
        .into();
        match err {
            StoreError::Decode(msg) => assert!(msg.contains("/internet")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_invalid_base_url_maps_to_transport() {
        let err: StoreError = RemoteError::InvalidBaseUrl("ftp://x".into()).into();
        assert!(matches!(err, StoreError::Transport(_)));
    }
}
