//! Live settings for the charon addon.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    ConfigError, ContainerId, NetworkDefault, ParamId, Parameter, ParameterKind,
    ParameterOption, ParameterValue,
};

/// Compose-level name of the charon container (prefixed with the project
/// name at runtime).
pub const CHARON_CONTAINER_NAME: &str = "addon_charon";

/// Default charon image tag.
pub const DEFAULT_CONTAINER_TAG: &str = "obolnetwork/charon:v1.7.0";

/// Default charon peer-to-peer TCP port.
pub const DEFAULT_P2P_PORT: u16 = 3610;

/// Default number of distributed validators.
pub const DEFAULT_NUM_VALIDATORS: u64 = 1;

/// Smallest supported cluster.
pub const MIN_OPERATORS: u8 = 3;

/// Largest supported cluster.
pub const MAX_OPERATORS: u8 = 10;

/// Number of member identity-record slots (`MAX_OPERATORS - 1`).
pub const OPERATOR_RECORD_SLOTS: usize = 9;

/// Maximum cluster name length.
pub const MAX_CLUSTER_NAME_LEN: usize = 64;

/// This node's role in the distributed validator cluster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClusterRole {
    /// Creates the cluster definition and coordinates the ceremony.
    #[default]
    Creator,
    /// Joins an existing cluster through an invite URL.
    Member,
}

impl ClusterRole {
    /// The stored string form.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Creator => "creator",
            Self::Member => "member",
        }
    }
}

impl fmt::Display for ClusterRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClusterRole {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "creator" => Ok(Self::Creator),
            "member" => Ok(Self::Member),
            _ => Err(ConfigError::InvalidOption {
                id: ParamId::ClusterRole,
                value: s.to_owned(),
            }),
        }
    }
}

/// Settings for the charon addon.
///
/// The operator count is stored as the selected option string and parsed on
/// use; [`CharonConfig::num_operators`] is the strict accessor,
/// [`CharonConfig::num_operators_or_default`] the lenient one used for
/// field visibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharonConfig {
    /// Whether the addon is enabled.
    #[serde(default)]
    pub enabled: bool,

    /// Creator or member role.
    #[serde(default)]
    pub cluster_role: ClusterRole,

    /// The charon container image tag.
    #[serde(default = "default_container_tag")]
    pub container_tag: String,

    /// The charon peer-to-peer TCP port.
    #[serde(default = "default_p2p_port")]
    pub p2p_port: u16,

    /// Friendly cluster name (creator only).
    #[serde(default)]
    pub cluster_name: String,

    /// Number of distributed validators to create (creator only).
    #[serde(default = "default_num_validators")]
    pub num_validators: u64,

    /// Total operator count including this node, stored as the selected
    /// option string (creator only).
    #[serde(default = "default_num_operators")]
    pub num_operators: String,

    /// Member operator identity records, slots 1..=9 (creator only).
    #[serde(default)]
    pub operator_enrs: [String; OPERATOR_RECORD_SLOTS],

    /// Cluster definition invite URL (member join path).
    #[serde(default)]
    pub cluster_definition_url: String,
}

fn default_container_tag() -> String {
    DEFAULT_CONTAINER_TAG.to_owned()
}

fn default_p2p_port() -> u16 {
    DEFAULT_P2P_PORT
}

fn default_num_validators() -> u64 {
    DEFAULT_NUM_VALIDATORS
}

fn default_num_operators() -> String {
    MIN_OPERATORS.to_string()
}

impl Default for CharonConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            cluster_role: ClusterRole::Creator,
            container_tag: default_container_tag(),
            p2p_port: DEFAULT_P2P_PORT,
            cluster_name: String::new(),
            num_validators: DEFAULT_NUM_VALIDATORS,
            num_operators: default_num_operators(),
            operator_enrs: Default::default(),
            cluster_definition_url: String::new(),
        }
    }
}

impl CharonConfig {
    /// The operator count, if it parses into the supported range.
    pub fn num_operators(&self) -> Option<u8> {
        self.num_operators
            .trim()
            .parse::<u8>()
            .ok()
            .filter(|n| (MIN_OPERATORS..=MAX_OPERATORS).contains(n))
    }

    /// The operator count for visibility purposes, falling back to the
    /// smallest supported cluster when the stored value does not parse.
    pub fn num_operators_or_default(&self) -> u8 {
        self.num_operators().unwrap_or(MIN_OPERATORS)
    }

    /// The identity record in a 1-based slot, if the slot exists.
    pub fn operator_enr(&self, slot: u8) -> Option<&str> {
        (1..=OPERATOR_RECORD_SLOTS as u8)
            .contains(&slot)
            .then(|| self.operator_enrs[usize::from(slot) - 1].as_str())
    }

    /// Read a parameter value by id.
    pub fn value(&self, id: ParamId) -> Result<ParameterValue, ConfigError> {
        Ok(match id {
            ParamId::Enabled => ParameterValue::Bool(self.enabled),
            ParamId::ClusterRole => {
                ParameterValue::Choice(self.cluster_role.as_str().to_owned())
            }
            ParamId::ContainerTag => ParameterValue::String(self.container_tag.clone()),
            ParamId::P2pPort => ParameterValue::Uint(u64::from(self.p2p_port)),
            ParamId::ClusterName => ParameterValue::String(self.cluster_name.clone()),
            ParamId::NumValidators => ParameterValue::Uint(self.num_validators),
            ParamId::NumOperators => ParameterValue::Choice(self.num_operators.clone()),
            ParamId::OperatorRecord(slot) => ParameterValue::String(
                self.operator_enr(slot)
                    .ok_or(ConfigError::UnknownParameter(id))?
                    .to_owned(),
            ),
            ParamId::ClusterDefinitionUrl => {
                ParameterValue::String(self.cluster_definition_url.clone())
            }
        })
    }

    /// Write a parameter value by id, rejecting type-mismatched writes.
    ///
    /// Values are resolved into their typed fields here, once, so read
    /// sites never re-assert types.
    pub fn set_value(&mut self, id: ParamId, value: ParameterValue) -> Result<(), ConfigError> {
        let meta = Self::parameter(id)?;
        meta.validate_value(&value)?;
        match (id, value) {
            (ParamId::Enabled, ParameterValue::Bool(v)) => self.enabled = v,
            (ParamId::ClusterRole, ParameterValue::Choice(v)) => {
                self.cluster_role = v.parse()?;
            }
            (ParamId::ContainerTag, ParameterValue::String(v)) => self.container_tag = v,
            (ParamId::P2pPort, ParameterValue::Uint(v)) => {
                self.p2p_port = u16::try_from(v)
                    .map_err(|_| ConfigError::ValueType { id, expected: ParameterKind::Uint })?;
            }
            (ParamId::ClusterName, ParameterValue::String(v)) => self.cluster_name = v,
            (ParamId::NumValidators, ParameterValue::Uint(v)) => self.num_validators = v,
            (ParamId::NumOperators, ParameterValue::Choice(v)) => self.num_operators = v,
            (ParamId::OperatorRecord(slot), ParameterValue::String(v)) => {
                if !(1..=OPERATOR_RECORD_SLOTS as u8).contains(&slot) {
                    return Err(ConfigError::UnknownParameter(id));
                }
                self.operator_enrs[usize::from(slot) - 1] = v;
            }
            (ParamId::ClusterDefinitionUrl, ParameterValue::String(v)) => {
                self.cluster_definition_url = v;
            }
            // Unreachable once validate_value has established kind
            // agreement; kept for exhaustiveness.
            (id, _) => {
                return Err(ConfigError::ValueType { id, expected: meta.kind });
            }
        }
        Ok(())
    }

    /// Metadata for a single parameter.
    pub fn parameter(id: ParamId) -> Result<Parameter, ConfigError> {
        Self::parameters()
            .into_iter()
            .find(|p| p.id == id)
            .ok_or(ConfigError::UnknownParameter(id))
    }

    /// The ordered parameter metadata for this configuration.
    pub fn parameters() -> Vec<Parameter> {
        let mut params = vec![
            Parameter {
                id: ParamId::Enabled,
                name: "Enabled".to_owned(),
                description: "Enable Obol Distributed Validator Technology (DVT).\n\n\
                    Obol allows you to run validators as a cluster with multiple \
                    operators for increased resilience and security.\n\n\
                    Visit obol.org for more information."
                    .to_owned(),
                kind: ParameterKind::Bool,
                default: NetworkDefault::all(ParameterValue::Bool(false)),
                options: Vec::new(),
                affects: vec![ContainerId::Validator, ContainerId::Charon],
                can_be_blank: false,
                overwrite_on_upgrade: false,
                max_length: None,
            },
            Parameter {
                id: ParamId::ClusterRole,
                name: "Cluster Role".to_owned(),
                description: "Select your role in the Obol cluster. Choose 'Cluster \
                    Creator' if you are creating a new cluster definition and \
                    coordinating the DKG ceremony. Choose 'Cluster Member Node' if \
                    you are joining an existing cluster."
                    .to_owned(),
                kind: ParameterKind::Choice,
                default: NetworkDefault::all(ParameterValue::Choice(
                    ClusterRole::Creator.as_str().to_owned(),
                )),
                options: vec![
                    ParameterOption::new(
                        "Cluster Creator",
                        "Create a new cluster and coordinate the DKG ceremony",
                        ClusterRole::Creator.as_str(),
                    ),
                    ParameterOption::new(
                        "Cluster Member Node",
                        "Join an existing cluster as a member operator",
                        ClusterRole::Member.as_str(),
                    ),
                ],
                affects: vec![ContainerId::Validator, ContainerId::Charon],
                can_be_blank: false,
                overwrite_on_upgrade: false,
                max_length: None,
            },
            Parameter {
                id: ParamId::ContainerTag,
                name: "Container Tag".to_owned(),
                description: "The tag name of the Obol charon container you want to \
                    use from Docker Hub."
                    .to_owned(),
                kind: ParameterKind::String,
                default: NetworkDefault::all(ParameterValue::String(
                    DEFAULT_CONTAINER_TAG.to_owned(),
                )),
                options: Vec::new(),
                affects: vec![ContainerId::Charon],
                can_be_blank: false,
                overwrite_on_upgrade: true,
                max_length: None,
            },
            Parameter {
                id: ParamId::P2pPort,
                name: "P2P Port".to_owned(),
                description: "The TCP port for charon peer-to-peer communication. \
                    Change this if you have multiple charon instances on the same \
                    machine."
                    .to_owned(),
                kind: ParameterKind::Uint,
                default: NetworkDefault::all(ParameterValue::Uint(u64::from(
                    DEFAULT_P2P_PORT,
                ))),
                options: Vec::new(),
                affects: vec![ContainerId::Charon],
                can_be_blank: false,
                overwrite_on_upgrade: false,
                max_length: None,
            },
            Parameter {
                id: ParamId::ClusterName,
                name: "Cluster Name".to_owned(),
                description: "A friendly name for your Obol cluster.".to_owned(),
                kind: ParameterKind::String,
                default: NetworkDefault::all(ParameterValue::String(String::new())),
                options: Vec::new(),
                affects: vec![ContainerId::Charon],
                can_be_blank: false,
                overwrite_on_upgrade: false,
                max_length: Some(MAX_CLUSTER_NAME_LEN),
            },
            Parameter {
                id: ParamId::NumValidators,
                name: "Number of Validators".to_owned(),
                description: "The number of distributed validators to create in this \
                    cluster."
                    .to_owned(),
                kind: ParameterKind::Uint,
                default: NetworkDefault::all(ParameterValue::Uint(DEFAULT_NUM_VALIDATORS)),
                options: Vec::new(),
                affects: vec![ContainerId::Charon],
                can_be_blank: false,
                overwrite_on_upgrade: false,
                max_length: None,
            },
            Parameter {
                id: ParamId::NumOperators,
                name: "Number of Operators".to_owned(),
                description: "The total number of operators in the cluster (including \
                    yourself)."
                    .to_owned(),
                kind: ParameterKind::Choice,
                default: NetworkDefault::all(ParameterValue::Choice(
                    MIN_OPERATORS.to_string(),
                )),
                options: (MIN_OPERATORS..=MAX_OPERATORS)
                    .map(|n| {
                        ParameterOption::new(
                            n.to_string(),
                            format!("{n} operators"),
                            n.to_string(),
                        )
                    })
                    .collect(),
                affects: vec![ContainerId::Charon],
                can_be_blank: false,
                overwrite_on_upgrade: false,
                max_length: None,
            },
        ];
        for slot in 1..=OPERATOR_RECORD_SLOTS as u8 {
            params.push(Parameter {
                id: ParamId::OperatorRecord(slot),
                name: format!("Member ENR {slot}"),
                description: format!(
                    "The Ethereum Node Record (ENR) for member operator {slot}."
                ),
                kind: ParameterKind::String,
                default: NetworkDefault::all(ParameterValue::String(String::new())),
                options: Vec::new(),
                affects: vec![ContainerId::Charon],
                // Slots beyond the smallest cluster are optional by
                // construction; visibility decides which are required.
                can_be_blank: slot > MIN_OPERATORS - 1,
                overwrite_on_upgrade: false,
                max_length: None,
            });
        }
        params.push(Parameter {
            id: ParamId::ClusterDefinitionUrl,
            name: "Cluster Definition URL".to_owned(),
            description: "The URL to download the cluster definition file. This \
                should be the invite URL provided by the cluster creator."
                .to_owned(),
            kind: ParameterKind::String,
            default: NetworkDefault::all(ParameterValue::String(String::new())),
            options: Vec::new(),
            affects: vec![ContainerId::Charon],
            can_be_blank: false,
            overwrite_on_upgrade: false,
            max_length: None,
        });
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Network;

    #[test]
    fn defaults_agree_with_parameter_metadata() {
        let cfg = CharonConfig::default();
        for param in CharonConfig::parameters() {
            let stored = cfg.value(param.id).expect("every listed parameter is readable");
            assert_eq!(
                &stored,
                param.default.resolve(&Network::Mainnet),
                "default mismatch for {}",
                param.id
            );
        }
    }

    #[test]
    fn parameter_ids_are_unique_and_ordered() {
        let params = CharonConfig::parameters();
        let ids: std::collections::BTreeSet<_> = params.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), params.len());
        assert_eq!(params.len(), 8 + OPERATOR_RECORD_SLOTS);
    }

    #[test]
    fn strict_operator_count_enforces_range() {
        let mut cfg = CharonConfig::default();
        cfg.num_operators = "7".to_owned();
        assert_eq!(cfg.num_operators(), Some(7));
        for bad in ["2", "11", "abc", ""] {
            cfg.num_operators = bad.to_owned();
            assert_eq!(cfg.num_operators(), None, "{bad:?} should not parse");
            assert_eq!(cfg.num_operators_or_default(), MIN_OPERATORS);
        }
    }

    #[test]
    fn set_value_rejects_type_mismatches() {
        let mut cfg = CharonConfig::default();
        let err = cfg
            .set_value(ParamId::Enabled, ParameterValue::String("yes".to_owned()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::ValueType { .. }));

        let err = cfg
            .set_value(ParamId::NumOperators, ParameterValue::Choice("11".to_owned()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOption { .. }));

        cfg.set_value(ParamId::NumOperators, ParameterValue::Choice("5".to_owned()))
            .expect("5 is a listed option");
        assert_eq!(cfg.num_operators(), Some(5));
    }

    #[test]
    fn record_slots_are_indexed_one_based() {
        let mut cfg = CharonConfig::default();
        cfg.set_value(
            ParamId::OperatorRecord(2),
            ParameterValue::String("enr:-abc".to_owned()),
        )
        .expect("slot 2 exists");
        assert_eq!(cfg.operator_enr(2), Some("enr:-abc"));
        assert_eq!(cfg.operator_enr(1), Some(""));
        assert_eq!(cfg.operator_enr(0), None);
        assert_eq!(cfg.operator_enr(10), None);
        assert!(matches!(
            cfg.set_value(ParamId::OperatorRecord(10), ParameterValue::String(String::new())),
            Err(ConfigError::UnknownParameter(_))
        ));
    }

    #[test]
    fn cluster_name_length_limit_is_enforced() {
        let mut cfg = CharonConfig::default();
        let long = "x".repeat(MAX_CLUSTER_NAME_LEN + 1);
        let err = cfg
            .set_value(ParamId::ClusterName, ParameterValue::String(long))
            .unwrap_err();
        assert!(matches!(err, ConfigError::ValueTooLong { .. }));
    }

    #[test]
    fn toml_round_trip() {
        let mut cfg = CharonConfig::default();
        cfg.enabled = true;
        cfg.cluster_role = ClusterRole::Member;
        cfg.cluster_definition_url = "https://example.org/cluster".to_owned();
        let text = toml::to_string(&cfg).expect("serializes");
        let back: CharonConfig = toml::from_str(&text).expect("parses");
        assert_eq!(back, cfg);
    }
}
