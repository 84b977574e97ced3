//! Token source backed by the persisted session file.

use std::path::PathBuf;

use domain::services::AuthProvider;
use shared::session::PersistedSession;
use tracing::warn;

/// Reads the bearer token from the session file at call time.
#[derive(Debug, Clone)]
pub struct SessionFileAuth {
    path: PathBuf,
}

impl SessionFileAuth {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AuthProvider for SessionFileAuth {
    fn token(&self) -> Option<String> {
        match PersistedSession::read_from(&self.path) {
            Ok(session) => session.bearer_token().map(str::to_string),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Could not read session file");
                None
            }
        }
    }
}
