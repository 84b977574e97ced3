//! Repository for the reference list endpoints.

use domain::models::ReferenceEntry;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::RemoteError;
use crate::metrics::RequestTimer;

/// Reads directorates and employment types.
#[derive(Debug, Clone)]
pub struct ReferenceRepository {
    client: ApiClient,
}

impl ReferenceRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// `GET /directorate`. Deputy ministries are served from the same list.
    pub async fn directorates(&self) -> Result<Vec<ReferenceEntry>, RemoteError> {
        self.list("directorate", "list_directorates").await
    }

    /// `GET /employment-type`
    pub async fn employment_types(&self) -> Result<Vec<ReferenceEntry>, RemoteError> {
        self.list("employment-type", "list_employment_types").await
    }

    async fn list(
        &self,
        path: &str,
        metric: &'static str,
    ) -> Result<Vec<ReferenceEntry>, RemoteError> {
        debug!(endpoint = path, "Fetching reference list");
        let timer = RequestTimer::new(metric);
        let result = match self.client.http().get(self.client.url(path)).send().await {
            Ok(response) => ApiClient::decode(response, path).await,
            Err(e) => Err(e.into()),
        };
        timer.finish(result.is_ok());
        result
    }
}
