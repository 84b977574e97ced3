//! Repository for the `/internet` endpoints.

use domain::models::{UserId, UserPatch, UserRecord};
use tracing::debug;

use crate::client::ApiClient;
use crate::error::RemoteError;
use crate::metrics::RequestTimer;

const COLLECTION: &str = "internet";

/// Reads and writes internet user records.
#[derive(Debug, Clone)]
pub struct InternetUserRepository {
    client: ApiClient,
}

impl InternetUserRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// `GET /internet`
    pub async fn list(&self) -> Result<Vec<UserRecord>, RemoteError> {
        debug!("Fetching internet users");
        let timer = RequestTimer::new("list_users");
        let result = self.fetch_all().await;
        timer.finish(result.is_ok());
        result
    }

    async fn fetch_all(&self) -> Result<Vec<UserRecord>, RemoteError> {
        let response = self
            .client
            .http()
            .get(self.client.url(COLLECTION))
            .send()
            .await?;
        ApiClient::decode(response, "/internet").await
    }

    /// `PUT /internet/{id}`; the bearer header is sent only when a token is
    /// available.
    pub async fn update(
        &self,
        id: &UserId,
        patch: &UserPatch,
        token: Option<&str>,
    ) -> Result<UserRecord, RemoteError> {
        debug!(user_id = %id, authenticated = token.is_some(), "Updating internet user");
        let timer = RequestTimer::new("update_user");
        let result = self.put(id, patch, token).await;
        timer.finish(result.is_ok());
        result
    }

    async fn put(
        &self,
        id: &UserId,
        patch: &UserPatch,
        token: Option<&str>,
    ) -> Result<UserRecord, RemoteError> {
        let url = self.client.resource_url(COLLECTION, &id.to_string())?;
        let mut request = self.client.http().put(url).json(patch);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        ApiClient::decode(response, "/internet/{id}").await
    }

    /// `DELETE /internet/{id}`. Any response body is ignored.
    pub async fn delete(&self, id: &UserId, token: &str) -> Result<(), RemoteError> {
        debug!(user_id = %id, "Deleting internet user");
        let timer = RequestTimer::new("delete_user");
        let result = self.remove(id, token).await;
        timer.finish(result.is_ok());
        result
    }

    async fn remove(&self, id: &UserId, token: &str) -> Result<(), RemoteError> {
        let url = self.client.resource_url(COLLECTION, &id.to_string())?;
        let response = self
            .client
            .http()
            .delete(url)
            .bearer_auth(token)
            .send()
            .await?;
        ApiClient::check(response).await?;
        Ok(())
    }
}
