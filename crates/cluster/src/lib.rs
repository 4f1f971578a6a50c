//! Cluster definition building and identity resolution for the dvn toolkit.
#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/dvn-labs/dvn/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod builder;
pub use builder::{
    build, charon_network, member_command, validate_config, ClusterDefinitionRequest,
};

mod daemon;
pub use daemon::DaemonClient;

mod error;
pub use error::{BuildError, ResolveError, StatusError};

mod facts;
pub use facts::{ClusterStatus, FeeRecipientInfo, FeeRecipientSource, NodeFacts, NodeStatus};

mod resolver;
pub use resolver::{resolve_local_enr, EnrSource};

mod status;
pub use status::{collect, NodeApi, StatusReport};
