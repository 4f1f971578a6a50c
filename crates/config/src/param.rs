//! Typed configuration parameters.
//!
//! Every configurable field is described by a [`Parameter`]: a stable id, a
//! value kind, per-network defaults, and form metadata. Values are carried
//! as a closed tagged variant ([`ParameterValue`]) resolved once at
//! load/write time rather than re-asserted at every read site.

use std::fmt;

use crate::{ConfigError, Network};

/// Identifies a configurable field.
///
/// The nine operator identity-record slots are one indexed variant rather
/// than nine named fields; the index is the 1-based slot number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ParamId {
    /// Whether the addon is enabled at all.
    Enabled,
    /// Creator or member role in the cluster.
    ClusterRole,
    /// The charon container image tag.
    ContainerTag,
    /// The charon peer-to-peer TCP port.
    P2pPort,
    /// The friendly cluster name (creator only).
    ClusterName,
    /// Number of distributed validators to create (creator only).
    NumValidators,
    /// Total number of operators in the cluster (creator only).
    NumOperators,
    /// One member operator's identity record, slot 1..=9 (creator only).
    OperatorRecord(u8),
    /// The cluster definition invite URL (member join path).
    ClusterDefinitionUrl,
}

impl fmt::Display for ParamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enabled => f.write_str("enabled"),
            Self::ClusterRole => f.write_str("clusterRole"),
            Self::ContainerTag => f.write_str("containerTag"),
            Self::P2pPort => f.write_str("p2pPort"),
            Self::ClusterName => f.write_str("clusterName"),
            Self::NumValidators => f.write_str("numValidators"),
            Self::NumOperators => f.write_str("numOperators"),
            Self::OperatorRecord(n) => write!(f, "operatorEnr{n}"),
            Self::ClusterDefinitionUrl => f.write_str("clusterDefinitionURL"),
        }
    }
}

/// The kind of value a parameter holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    /// A boolean toggle.
    Bool,
    /// Free-form text.
    String,
    /// An unsigned integer.
    Uint,
    /// One of a fixed set of options.
    Choice,
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.write_str("boolean"),
            Self::String => f.write_str("string"),
            Self::Uint => f.write_str("unsigned integer"),
            Self::Choice => f.write_str("choice"),
        }
    }
}

/// A typed parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterValue {
    /// A boolean toggle.
    Bool(bool),
    /// Free-form text.
    String(String),
    /// An unsigned integer.
    Uint(u64),
    /// A selected option, stored by its option value.
    Choice(String),
}

impl ParameterValue {
    /// The kind of this value.
    pub const fn kind(&self) -> ParameterKind {
        match self {
            Self::Bool(_) => ParameterKind::Bool,
            Self::String(_) => ParameterKind::String,
            Self::Uint(_) => ParameterKind::Uint,
            Self::Choice(_) => ParameterKind::Choice,
        }
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::String(v) | Self::Choice(v) => f.write_str(v),
            Self::Uint(v) => write!(f, "{v}"),
        }
    }
}

/// One selectable option of a choice parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterOption {
    /// Short label shown in a selector.
    pub label: String,
    /// Longer human description.
    pub description: String,
    /// The stored value when this option is selected.
    pub value: String,
}

impl ParameterOption {
    /// Create an option.
    pub fn new(
        label: impl Into<String>,
        description: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self { label: label.into(), description: description.into(), value: value.into() }
    }
}

/// Default values keyed by deployment network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkDefault {
    all: ParameterValue,
    overrides: Vec<(Network, ParameterValue)>,
}

impl NetworkDefault {
    /// A default that applies to every network.
    pub const fn all(value: ParameterValue) -> Self {
        Self { all: value, overrides: Vec::new() }
    }

    /// Add a network-specific override.
    #[must_use]
    pub fn with_override(mut self, network: Network, value: ParameterValue) -> Self {
        self.overrides.push((network, value));
        self
    }

    /// Resolve the default for a network.
    pub fn resolve(&self, network: &Network) -> &ParameterValue {
        self.overrides
            .iter()
            .find(|(n, _)| n == network)
            .map_or(&self.all, |(_, v)| v)
    }
}

/// Subsystems whose containers a parameter change affects. Advisory only;
/// the hosting supervisor decides what to restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerId {
    /// The validator client container.
    Validator,
    /// The charon middleware container.
    Charon,
}

/// Metadata for one configurable field.
#[derive(Debug, Clone)]
pub struct Parameter {
    /// Unique field identifier.
    pub id: ParamId,
    /// Display name.
    pub name: String,
    /// Human description shown alongside the field.
    pub description: String,
    /// The kind of value this parameter holds.
    pub kind: ParameterKind,
    /// Default values per deployment network.
    pub default: NetworkDefault,
    /// Options for choice parameters; empty otherwise.
    pub options: Vec<ParameterOption>,
    /// Containers affected by a change to this parameter.
    pub affects: Vec<ContainerId>,
    /// Whether an empty value is acceptable.
    pub can_be_blank: bool,
    /// Whether upgrades overwrite a stored value with the new default.
    pub overwrite_on_upgrade: bool,
    /// Maximum accepted length for string values.
    pub max_length: Option<usize>,
}

impl Parameter {
    /// Check that a value is acceptable for this parameter: the kind must
    /// match, choice values must be one of the options, and string values
    /// must respect the length limit. Blankness is deliberately not checked
    /// here; whether a blank field is an error depends on role and operator
    /// count and is the definition builder's concern.
    pub fn validate_value(&self, value: &ParameterValue) -> Result<(), ConfigError> {
        if value.kind() != self.kind {
            return Err(ConfigError::ValueType { id: self.id, expected: self.kind });
        }
        match value {
            ParameterValue::Choice(v) => {
                if !self.options.iter().any(|o| o.value == *v) {
                    return Err(ConfigError::InvalidOption { id: self.id, value: v.clone() });
                }
            }
            ParameterValue::String(v) => {
                if let Some(max) = self.max_length {
                    if v.chars().count() > max {
                        return Err(ConfigError::ValueTooLong { id: self.id, max });
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }
}
