//! Error types for cluster operations.

use dvn_docker::DockerError;
use dvn_enr::EnrError;

/// Errors produced while validating configuration and building a cluster
/// definition request.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The addon feature flag is off.
    #[error("the charon addon is not enabled; enable it in the dvn configuration first")]
    Disabled,

    /// A required configuration field is blank.
    #[error("required setting {0} is not configured")]
    MissingField(&'static str),

    /// A configuration field holds an out-of-range or unparseable value.
    #[error("setting {0} has an invalid value")]
    InvalidValue(&'static str),

    /// A required member identity record is blank or failed validation.
    #[error("member ENR {index} is missing or invalid")]
    MissingOrInvalidEnr {
        /// The 1-based record slot.
        index: u8,
        /// The validation failure, when a value was present.
        #[source]
        source: Option<EnrError>,
    },

    /// The node has no deployment to attach the cluster to.
    #[error("this node has no deployment; deploy it before creating a cluster definition")]
    PreconditionFailed,
}

/// Errors produced while resolving the local identity record.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The resolver was given no sources to try.
    #[error("no identity sources to try")]
    NoSources,

    /// Every source failed; the identity likely was never created.
    #[error("could not read the local ENR; run `dvn create-enr` to create an identity first")]
    NotFound {
        /// The failure from the last source tried.
        #[source]
        source: DockerError,
    },
}

/// Errors produced while querying the node daemon.
#[derive(Debug, thiserror::Error)]
pub enum StatusError {
    /// The request could not be sent or the response body not read.
    #[error("request to the node daemon failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The daemon answered with a non-success status.
    #[error("node daemon returned HTTP {status}: {body}")]
    Daemon {
        /// The HTTP status code.
        status: u16,
        /// The response body, if readable.
        body: String,
    },
}
