//! Remote Parlor API seam.
//!
//! The [`ParlorApi`] trait is the only place the pipeline touches the
//! network; [`HttpParlorApi`] is the production client and the mockall mock
//! stands in for it in tests.

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};
use serde_json::json;
use tracing::{error, info};

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

use crate::assets::AssetKind;
use crate::config::Config;
use crate::error::SyncError;
use crate::snapshot::ProjectSnapshot;

/// Chunked binary body of a bundle download.
pub type ByteStream = BoxStream<'static, Result<Bytes, std::io::Error>>;

/// Authenticated access to one remote project.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait ParlorApi: Send + Sync {
    /// Fetches the project's current design-token snapshot.
    async fn fetch_snapshot(&self) -> Result<ProjectSnapshot, SyncError>;

    /// Opens a streaming download of the zip bundle for one asset kind.
    async fn fetch_bundle(&self, kind: AssetKind) -> Result<ByteStream, SyncError>;
}

/// Production client speaking the Parlor HTTP API.
pub struct HttpParlorApi {
    client: reqwest::Client,
    host: String,
    username: String,
    password: String,
    project_id: String,
}

impl HttpParlorApi {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            host: config.host.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
            project_id: config.project_id.clone(),
        }
    }

    fn credential_body(&self) -> serde_json::Value {
        json!({
            "username": self.username,
            "password": self.password,
            "projectId": self.project_id,
        })
    }

    async fn post(&self, url: &str) -> Result<reqwest::Response, SyncError> {
        let response = self
            .client
            .post(url)
            .json(&self.credential_body())
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, url = %url, "Request to Parlor API failed");
                SyncError::Network(e.to_string())
            })?;
        let status = response.status();
        if !status.is_success() {
            error!(status = %status, url = %url, "Parlor API returned error status");
            return Err(SyncError::Network(format!("{url} returned {status}")));
        }
        Ok(response)
    }
}

#[async_trait]
impl ParlorApi for HttpParlorApi {
    async fn fetch_snapshot(&self) -> Result<ProjectSnapshot, SyncError> {
        let url = format!("{}/parlor-cli", self.host);
        info!(url = %url, "Fetching project snapshot");
        let response = self.post(&url).await?;
        let snapshot = response.json::<ProjectSnapshot>().await.map_err(|e| {
            error!(error = %e, url = %url, "Failed to decode snapshot body");
            SyncError::Network(format!("invalid snapshot body: {e}"))
        })?;
        info!(
            colors = snapshot.colors.len(),
            typographies = snapshot.typographies.len(),
            grids = snapshot.grids.len(),
            "Fetched project snapshot"
        );
        Ok(snapshot)
    }

    async fn fetch_bundle(&self, kind: AssetKind) -> Result<ByteStream, SyncError> {
        let url = match kind {
            AssetKind::Fonts => format!("{}/parlor-cli/fonts", self.host),
            AssetKind::Images => {
                format!("{}/project/{}/images/download", self.host, self.project_id)
            }
        };
        info!(url = %url, kind = %kind, "Opening bundle download");
        let response = self.post(&url).await?;
        let stream = response
            .bytes_stream()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
            .boxed();
        Ok(stream)
    }
}
