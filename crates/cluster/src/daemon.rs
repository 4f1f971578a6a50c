//! HTTP client for the node daemon API.

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::{ClusterStatus, NodeApi, NodeStatus, StatusError};

/// Request timeout for daemon queries.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Blocking client for the node daemon's read-only status API.
#[derive(Debug, Clone)]
pub struct DaemonClient {
    base: String,
    client: reqwest::blocking::Client,
}

impl DaemonClient {
    /// Create a client against a daemon base address such as
    /// `http://127.0.0.1:8180`.
    pub fn new(base: impl Into<String>) -> Result<Self, StatusError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { base: base.into(), client })
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, StatusError> {
        let url = format!("{}/{path}", self.base.trim_end_matches('/'));
        let response = self.client.get(&url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(StatusError::Daemon {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }
        Ok(response.json()?)
    }
}

impl NodeApi for DaemonClient {
    fn node_status(&self) -> Result<NodeStatus, StatusError> {
        self.get_json("api/v1/node/status")
    }

    fn cluster_status(&self) -> Result<ClusterStatus, StatusError> {
        self.get_json("api/v1/cluster/status")
    }
}
