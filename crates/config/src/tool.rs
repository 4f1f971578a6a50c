//! Top-level tool configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{CharonConfig, ConfigError, Network, CHARON_CONTAINER_NAME};

/// Default data directory.
pub const DEFAULT_DATA_DIR: &str = "/var/lib/dvn";

/// Default compose project name, used as the container name prefix.
pub const DEFAULT_PROJECT_NAME: &str = "dvn";

/// Default node daemon API address.
pub const DEFAULT_DAEMON_ADDR: &str = "http://127.0.0.1:8180";

/// Addon state directory, relative to the data directory.
pub const ADDON_SUBDIR: &str = "addons/charon";

/// File holding the local identity private key, written by `create enr`.
pub const ENR_PRIVATE_KEY_FILE: &str = "charon-enr-private-key";

/// Cluster definition artifact written by the create step.
pub const CLUSTER_DEFINITION_FILE: &str = "cluster-definition.json";

/// Validator key shares directory written by the DKG run.
pub const VALIDATOR_KEYS_DIR: &str = "validator_keys";

/// Complete tool configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DvnConfig {
    /// Data directory for persistent state.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Compose project name; containers are named `<project>_<name>`.
    #[serde(default = "default_project_name")]
    pub project_name: String,

    /// Deployment network.
    #[serde(default)]
    pub network: Network,

    /// Node daemon API base address.
    #[serde(default = "default_daemon_addr")]
    pub daemon_addr: String,

    /// Charon addon settings.
    #[serde(default)]
    pub charon: CharonConfig,
}

impl Default for DvnConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            project_name: DEFAULT_PROJECT_NAME.to_owned(),
            network: Network::default(),
            daemon_addr: DEFAULT_DAEMON_ADDR.to_owned(),
            charon: CharonConfig::default(),
        }
    }
}

impl DvnConfig {
    /// Load configuration from a file path, auto-detecting format by
    /// extension.
    ///
    /// If the path is `None`, returns the default configuration.
    /// Supported extensions: `.json` for JSON, all others default to TOML.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        path.map_or_else(
            || Ok(Self::default()),
            |p| {
                let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("toml");
                match ext {
                    "json" => Self::from_json_file(p),
                    _ => Self::from_toml_file(p),
                }
            },
        )
    }

    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read { path: path.into(), source: e })?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read { path: path.into(), source: e })?;
        Self::from_json(&contents)
    }

    /// Parse configuration from a JSON string.
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Serialize configuration to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Persist configuration as TOML.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml()?;
        std::fs::write(path, contents)
            .map_err(|e| ConfigError::Write { path: path.into(), source: e })
    }

    /// The addon state directory.
    pub fn addon_dir(&self) -> PathBuf {
        self.data_dir.join(ADDON_SUBDIR)
    }

    /// Path of the local identity private key.
    pub fn enr_private_key_path(&self) -> PathBuf {
        self.addon_dir().join(ENR_PRIVATE_KEY_FILE)
    }

    /// Path of the cluster definition artifact.
    pub fn cluster_definition_path(&self) -> PathBuf {
        self.addon_dir().join(CLUSTER_DEFINITION_FILE)
    }

    /// Path of the validator key shares directory.
    pub fn validator_keys_dir(&self) -> PathBuf {
        self.addon_dir().join(VALIDATOR_KEYS_DIR)
    }

    /// Full name of the charon container for this project.
    pub fn charon_container(&self) -> String {
        format!("{}_{}", self.project_name, CHARON_CONTAINER_NAME)
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_project_name() -> String {
    DEFAULT_PROJECT_NAME.to_owned()
}

fn default_daemon_addr() -> String {
    DEFAULT_DAEMON_ADDR.to_owned()
}
