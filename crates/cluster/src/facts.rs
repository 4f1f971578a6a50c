//! Read-only facts about the local node, supplied by the node daemon.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// Reward routing information for this node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeRecipientInfo {
    /// Whether the node is enrolled in the smoothing pool.
    pub in_smoothing_pool: bool,
    /// The smoothing pool contract address.
    pub smoothing_pool_address: Address,
    /// The node's fee distributor contract address.
    pub fee_distributor_address: Address,
}

/// Which reward destination was selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeRecipientSource {
    /// The shared smoothing pool contract.
    SmoothingPool,
    /// The node's own fee distributor contract.
    FeeDistributor,
}

impl std::fmt::Display for FeeRecipientSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SmoothingPool => f.write_str("smoothing pool"),
            Self::FeeDistributor => f.write_str("fee distributor"),
        }
    }
}

impl FeeRecipientInfo {
    /// The reward destination in effect. Smoothing pool enrollment always
    /// wins over the fee distributor; the precedence is fixed, not
    /// configurable.
    pub const fn active(&self) -> (FeeRecipientSource, Address) {
        if self.in_smoothing_pool {
            (FeeRecipientSource::SmoothingPool, self.smoothing_pool_address)
        } else {
            (FeeRecipientSource::FeeDistributor, self.fee_distributor_address)
        }
    }
}

/// Node state as reported by the daemon.
///
/// Only the fields this toolkit consumes are modeled; everything else the
/// daemon reports is carried through for diagnostic display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStatus {
    /// Address of the node's deployment contract, if deployed. The cluster
    /// definition uses it as the withdrawal address.
    #[serde(default)]
    pub deployment_address: Option<Address>,

    /// Reward routing information.
    #[serde(default)]
    pub fee_recipient: FeeRecipientInfo,

    /// Unmodeled daemon fields, passed through verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Cluster-side status is a free-form document; the toolkit only displays
/// it.
pub type ClusterStatus = serde_json::Value;

/// The externally supplied facts a definition build consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeFacts {
    /// The deployment contract address, if the node is deployed.
    pub deployment_address: Option<Address>,
    /// Reward routing information.
    pub fee_recipient: FeeRecipientInfo,
}

impl NodeStatus {
    /// Extract the facts a definition build consumes.
    pub const fn facts(&self) -> NodeFacts {
        NodeFacts {
            deployment_address: self.deployment_address,
            fee_recipient: self.fee_recipient,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoothing_pool_enrollment_wins() {
        let info = FeeRecipientInfo {
            in_smoothing_pool: true,
            smoothing_pool_address: Address::repeat_byte(0xaa),
            fee_distributor_address: Address::repeat_byte(0xbb),
        };
        let (source, address) = info.active();
        assert_eq!(source, FeeRecipientSource::SmoothingPool);
        assert_eq!(address, Address::repeat_byte(0xaa));
    }

    #[test]
    fn fee_distributor_when_not_enrolled() {
        let info = FeeRecipientInfo {
            in_smoothing_pool: false,
            smoothing_pool_address: Address::repeat_byte(0xaa),
            fee_distributor_address: Address::repeat_byte(0xbb),
        };
        let (source, address) = info.active();
        assert_eq!(source, FeeRecipientSource::FeeDistributor);
        assert_eq!(address, Address::repeat_byte(0xbb));
    }

    #[test]
    fn unmodeled_daemon_fields_are_preserved() {
        let status: NodeStatus = serde_json::from_value(serde_json::json!({
            "deploymentAddress": "0x1111111111111111111111111111111111111111",
            "feeRecipient": {
                "inSmoothingPool": false,
                "smoothingPoolAddress": "0x2222222222222222222222222222222222222222",
                "feeDistributorAddress": "0x3333333333333333333333333333333333333333",
            },
            "registered": true,
            "timezone": "Etc/UTC",
        }))
        .expect("status parses");
        assert_eq!(status.deployment_address, Some(Address::repeat_byte(0x11)));
        assert_eq!(status.extra.get("registered"), Some(&serde_json::Value::Bool(true)));
    }

    #[test]
    fn missing_deployment_maps_to_none() {
        let status: NodeStatus = serde_json::from_value(serde_json::json!({
            "feeRecipient": {
                "inSmoothingPool": false,
                "smoothingPoolAddress": "0x2222222222222222222222222222222222222222",
                "feeDistributorAddress": "0x3333333333333333333333333333333333333333",
            },
        }))
        .expect("status parses");
        assert_eq!(status.facts().deployment_address, None);
    }
}
