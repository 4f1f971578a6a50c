//! Diagnostic status collection.

use tracing::warn;

use crate::{ClusterStatus, NodeStatus, StatusError};

/// Read-only access to the node daemon.
pub trait NodeApi {
    /// The node's own status.
    fn node_status(&self) -> Result<NodeStatus, StatusError>;

    /// Status of the staking deployment, as a free-form document.
    fn cluster_status(&self) -> Result<ClusterStatus, StatusError>;
}

/// Both status documents, each independently fetched.
#[derive(Debug)]
pub struct StatusReport {
    /// The node status, or why it could not be fetched.
    pub node: Result<NodeStatus, StatusError>,
    /// The cluster status, or why it could not be fetched.
    pub cluster: Result<ClusterStatus, StatusError>,
}

/// Fetch node and cluster status for display.
///
/// The two fetches are independent: a failure on one side is logged and
/// reported in place, and never prevents the other side from being
/// collected.
pub fn collect(api: &impl NodeApi) -> StatusReport {
    let node = api.node_status();
    if let Err(err) = &node {
        warn!(error = %err, "node status unavailable");
    }
    let cluster = api.cluster_status();
    if let Err(err) = &cluster {
        warn!(error = %err, "cluster status unavailable");
    }
    StatusReport { node, cluster }
}
