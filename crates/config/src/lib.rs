//! Configuration model for the dvn toolkit.
#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/dvn-labs/dvn/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod addon;
pub use addon::{Addon, CharonAddon};

mod charon;
pub use charon::{
    CharonConfig, ClusterRole, CHARON_CONTAINER_NAME, DEFAULT_CONTAINER_TAG,
    DEFAULT_NUM_VALIDATORS, DEFAULT_P2P_PORT, MAX_CLUSTER_NAME_LEN, MAX_OPERATORS,
    MIN_OPERATORS, OPERATOR_RECORD_SLOTS,
};

mod error;
pub use error::ConfigError;

mod network;
pub use network::Network;

mod param;
pub use param::{
    ContainerId, NetworkDefault, ParamId, Parameter, ParameterKind, ParameterOption,
    ParameterValue,
};

mod tool;
pub use tool::{
    DvnConfig, ADDON_SUBDIR, CLUSTER_DEFINITION_FILE, DEFAULT_DAEMON_ADDR,
    DEFAULT_DATA_DIR, DEFAULT_PROJECT_NAME, ENR_PRIVATE_KEY_FILE, VALIDATOR_KEYS_DIR,
};

mod visibility;
pub use visibility::visible_params;
