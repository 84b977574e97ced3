//! `RemoteUserStore` backed by the HTTP API.

use async_trait::async_trait;
use domain::models::{ReferenceEntry, UserId, UserPatch, UserRecord};
use domain::services::{RemoteUserStore, StoreError};
use tracing::warn;

use crate::client::{ApiClient, HttpConfig};
use crate::error::RemoteError;
use crate::repositories::{InternetUserRepository, ReferenceRepository};

/// Store that talks to the internet users API over HTTP.
#[derive(Debug, Clone)]
pub struct HttpUserStore {
    users: InternetUserRepository,
    references: ReferenceRepository,
}

impl HttpUserStore {
    pub fn new(config: &HttpConfig) -> Result<Self, RemoteError> {
        let client = ApiClient::new(config)?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: ApiClient) -> Self {
        Self {
            users: InternetUserRepository::new(client.clone()),
            references: ReferenceRepository::new(client),
        }
    }
}

fn store_error(operation: &'static str, err: RemoteError) -> StoreError {
    warn!(operation, error = %err, "Remote request failed");
    err.into()
}

#[async_trait]
impl RemoteUserStore for HttpUserStore {
    async fn list_users(&self) -> Result<Vec<UserRecord>, StoreError> {
        self.users
            .list()
            .await
            .map_err(|e| store_error("list_users", e))
    }

    async fn list_directorates(&self) -> Result<Vec<ReferenceEntry>, StoreError> {
        self.references
            .directorates()
            .await
            .map_err(|e| store_error("list_directorates", e))
    }

    async fn list_employment_types(&self) -> Result<Vec<ReferenceEntry>, StoreError> {
        self.references
            .employment_types()
            .await
            .map_err(|e| store_error("list_employment_types", e))
    }

    async fn update_user(
        &self,
        id: &UserId,
        patch: &UserPatch,
        token: Option<&str>,
    ) -> Result<UserRecord, StoreError> {
        self.users
            .update(id, patch, token)
            .await
            .map_err(|e| store_error("update_user", e))
    }

    async fn delete_user(&self, id: &UserId, token: &str) -> Result<(), StoreError> {
        self.users
            .delete(id, token)
            .await
            .map_err(|e| store_error("delete_user", e))
    }
}
