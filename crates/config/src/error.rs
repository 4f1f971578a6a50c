//! Configuration error types.

use std::path::PathBuf;

use crate::ParamId;

/// Errors that can occur when loading, parsing, or mutating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read a configuration file.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to write a configuration file.
    #[error("failed to write config file {path}: {source}")]
    Write {
        /// The path that failed to write.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse TOML configuration.
    #[error("failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to parse JSON configuration.
    #[error("failed to parse JSON config: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Failed to serialize configuration to TOML.
    #[error("failed to serialize config to TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// A value of the wrong type was written to a parameter.
    #[error("parameter {id} expects a {expected} value")]
    ValueType {
        /// The parameter that rejected the write.
        id: ParamId,
        /// The kind the parameter requires.
        expected: crate::ParameterKind,
    },

    /// A choice value was not one of the parameter's options.
    #[error("'{value}' is not a valid option for parameter {id}")]
    InvalidOption {
        /// The parameter that rejected the write.
        id: ParamId,
        /// The rejected value.
        value: String,
    },

    /// A string value exceeded the parameter's maximum length.
    #[error("parameter {id} is limited to {max} characters")]
    ValueTooLong {
        /// The parameter that rejected the write.
        id: ParamId,
        /// The maximum accepted length.
        max: usize,
    },

    /// A parameter id that does not exist in this configuration.
    #[error("unknown parameter {0}")]
    UnknownParameter(ParamId),
}
