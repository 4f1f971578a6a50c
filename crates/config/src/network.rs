//! Deployment network selection.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The deployment network the node runs against.
///
/// Parsing is total: names this build does not recognize are preserved as
/// [`Network::Unknown`] so that downstream mapping can warn and fall back
/// instead of refusing to load the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Network {
    /// The production network.
    Mainnet,
    /// The long-lived public test network.
    Testnet,
    /// An ephemeral development network.
    Devnet,
    /// A network name this build does not recognize, preserved verbatim.
    Unknown(String),
}

impl Default for Network {
    fn default() -> Self {
        Self::Mainnet
    }
}

impl Network {
    /// The configured network name.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
            Self::Devnet => "devnet",
            Self::Unknown(name) => name,
        }
    }
}

impl From<String> for Network {
    fn from(s: String) -> Self {
        match s.as_str() {
            "mainnet" => Self::Mainnet,
            "testnet" => Self::Testnet,
            "devnet" => Self::Devnet,
            _ => Self::Unknown(s),
        }
    }
}

impl From<Network> for String {
    fn from(network: Network) -> Self {
        network.as_str().to_owned()
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
