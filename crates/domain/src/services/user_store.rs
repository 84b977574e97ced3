//! Remote user store abstraction.
//!
//! The REST API serving user records and reference lists is an external
//! collaborator; the screen talks to it through [`RemoteUserStore`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use thiserror::Error;

use crate::models::{ReferenceEntry, UserId, UserPatch, UserRecord};

/// Errors returned by a remote store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Server responded with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("No session token available")]
    MissingToken,
}

/// CRUD access to internet users and their reference lists.
#[async_trait::async_trait]
pub trait RemoteUserStore: Send + Sync {
    /// `GET /internet`
    async fn list_users(&self) -> Result<Vec<UserRecord>, StoreError>;

    /// `GET /directorate`
    async fn list_directorates(&self) -> Result<Vec<ReferenceEntry>, StoreError>;

    /// Deputy ministries are served by the directorate endpoint.
    async fn list_deputy_ministries(&self) -> Result<Vec<ReferenceEntry>, StoreError> {
        self.list_directorates().await
    }

    /// `GET /employment-type`
    async fn list_employment_types(&self) -> Result<Vec<ReferenceEntry>, StoreError>;

    /// `PUT /internet/{id}`; returns the updated record.
    async fn update_user(
        &self,
        id: &UserId,
        patch: &UserPatch,
        token: Option<&str>,
    ) -> Result<UserRecord, StoreError>;

    /// `DELETE /internet/{id}`
    async fn delete_user(&self, id: &UserId, token: &str) -> Result<(), StoreError>;
}

/// In-memory store for development and testing.
///
/// Serves fixed data and can be switched into a failing mode per operation.
#[derive(Debug, Default)]
pub struct MockUserStore {
    users: Mutex<Vec<UserRecord>>,
    directorates: Vec<ReferenceEntry>,
    employment_types: Vec<ReferenceEntry>,
    fail_users: AtomicBool,
    fail_references: AtomicBool,
    fail_writes: AtomicBool,
    last_token: Mutex<Option<String>>,
}

impl MockUserStore {
    pub fn new(
        users: Vec<UserRecord>,
        directorates: Vec<ReferenceEntry>,
        employment_types: Vec<ReferenceEntry>,
    ) -> Self {
        Self {
            users: Mutex::new(users),
            directorates,
            employment_types,
            ..Default::default()
        }
    }

    pub fn fail_user_fetch(&self, fail: bool) {
        self.fail_users.store(fail, Ordering::SeqCst);
    }

    pub fn fail_reference_fetch(&self, fail: bool) {
        self.fail_references.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Token seen by the most recent write.
    pub fn last_token(&self) -> Option<String> {
        self.last_token.lock().ok().and_then(|t| t.clone())
    }

    fn simulated(flag: &AtomicBool) -> Result<(), StoreError> {
        if flag.load(Ordering::SeqCst) {
            tracing::warn!("Mock user store simulating failure");
            return Err(StoreError::Status {
                status: 500,
                message: "Simulated failure".to_string(),
            });
        }
        Ok(())
    }

    fn lock_users(&self) -> Result<std::sync::MutexGuard<'_, Vec<UserRecord>>, StoreError> {
        self.users
            .lock()
            .map_err(|_| StoreError::Transport("mock store poisoned".to_string()))
    }

    fn remember_token(&self, token: Option<&str>) {
        if let Ok(mut last) = self.last_token.lock() {
            *last = token.map(str::to_string);
        }
    }
}

#[async_trait::async_trait]
impl RemoteUserStore for MockUserStore {
    async fn list_users(&self) -> Result<Vec<UserRecord>, StoreError> {
        Self::simulated(&self.fail_users)?;
        Ok(self.lock_users()?.clone())
    }

    async fn list_directorates(&self) -> Result<Vec<ReferenceEntry>, StoreError> {
        Self::simulated(&self.fail_references)?;
        Ok(self.directorates.clone())
    }

    async fn list_employment_types(&self) -> Result<Vec<ReferenceEntry>, StoreError> {
        Self::simulated(&self.fail_references)?;
        Ok(self.employment_types.clone())
    }

    async fn update_user(
        &self,
        id: &UserId,
        patch: &UserPatch,
        token: Option<&str>,
    ) -> Result<UserRecord, StoreError> {
        self.remember_token(token);
        Self::simulated(&self.fail_writes)?;

        let mut users = self.lock_users()?;
        let record = users
            .iter_mut()
            .find(|u| &u.id == id)
            .ok_or_else(|| StoreError::Status {
                status: 404,
                message: format!("User {} not found", id),
            })?;

        record.name = patch.name.clone();
        record.username = patch.username.clone();
        record.lastname = patch.lastname.clone();
        record.email = patch.email.clone();
        record.phone = patch.phone.clone();
        record.position = patch.position.clone();
        record.device_limit = patch.device_limit.clone();
        record.device_type = patch.device_type.clone();
        record.group_type = patch.group_type.clone();
        record.mac_address = patch.mac_address.clone();
        record.violation_type = patch.violation_type.clone();
        record.directorate = patch.directorate.clone();
        record.deputy = patch.deputy.clone();
        record.employment_type = patch.employment_type.clone();
        record.status = Some(patch.status);
        record.violations_count = patch.violations_count.clone();
        record.comment = Some(patch.comment.clone());

        Ok(record.clone())
    }

    async fn delete_user(&self, id: &UserId, token: &str) -> Result<(), StoreError> {
        self.remember_token(Some(token));
        Self::simulated(&self.fail_writes)?;

        let mut users = self.lock_users()?;
        let before = users.len();
        users.retain(|u| &u.id != id);
        if users.len() == before {
            return Err(StoreError::Status {
                status: 404,
                message: format!("User {} not found", id),
            });
        }
        Ok(())
    }
}
