//! Cluster definition construction.

use alloy_primitives::Address;
use dvn_config::{CharonConfig, Network};
use dvn_enr::NodeRecord;
use tracing::{info, warn};

use crate::{BuildError, NodeFacts};

/// The network name charon expects for a deployment network.
///
/// Pre-production networks map to the long-lived public testnet. An
/// unrecognized name falls back to "mainnet"; the fallback is logged so it
/// is observably distinct from an explicit mainnet selection.
pub fn charon_network(network: &Network) -> &'static str {
    match network {
        Network::Mainnet => "mainnet",
        Network::Testnet | Network::Devnet => "hoodi",
        Network::Unknown(name) => {
            warn!(network = %name, "unrecognized network, defaulting charon to mainnet");
            "mainnet"
        }
    }
}

/// The resolved inputs of one `create dkg` invocation.
///
/// Constructed by [`build`] from a validated configuration plus externally
/// fetched node facts; never persisted or cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterDefinitionRequest {
    /// Friendly cluster name.
    pub cluster_name: String,
    /// Number of distributed validators to create.
    pub num_validators: u64,
    /// Withdrawal address for all validators (the deployment contract).
    pub withdrawal_address: Address,
    /// Fee recipient address for all validators.
    pub fee_recipient_address: Address,
    /// Operator identity records, local node first, then configured slots
    /// in ascending order. Positional: the ceremony assigns shares by
    /// index.
    pub operator_enrs: Vec<String>,
    /// The charon network name.
    pub network: &'static str,
}

impl ClusterDefinitionRequest {
    /// The configured records joined for the `--operator-enrs` flag.
    pub fn operator_enrs_csv(&self) -> String {
        self.operator_enrs.join(",")
    }

    /// The charon argument vector for creating and publishing the cluster
    /// definition. Every value is one argv token; nothing here passes
    /// through a shell.
    pub fn create_command(&self) -> Vec<String> {
        vec![
            "create".to_owned(),
            "dkg".to_owned(),
            format!("--name={}", self.cluster_name),
            format!("--num-validators={}", self.num_validators),
            format!("--withdrawal-addresses={}", self.withdrawal_address),
            format!("--fee-recipient-addresses={}", self.fee_recipient_address),
            format!("--operator-enrs={}", self.operator_enrs_csv()),
            format!("--network={}", self.network),
            "--publish".to_owned(),
        ]
    }
}

/// Validate the creator-side configuration, returning the operator count.
///
/// Checks run in a fixed order and the first failure wins: enabled flag,
/// cluster name, validator count, operator count, then each required
/// identity record slot `1..=k-1` in ascending order. Record slots hidden
/// by the current operator count are ignored even if stale values remain
/// stored.
pub fn validate_config(charon: &CharonConfig) -> Result<u8, BuildError> {
    if !charon.enabled {
        return Err(BuildError::Disabled);
    }
    if charon.cluster_name.trim().is_empty() {
        return Err(BuildError::MissingField("clusterName"));
    }
    if charon.num_validators == 0 {
        return Err(BuildError::InvalidValue("numValidators"));
    }
    let num_operators =
        charon.num_operators().ok_or(BuildError::InvalidValue("numOperators"))?;
    for slot in 1..num_operators {
        let record = charon.operator_enr(slot).unwrap_or_default().trim();
        if record.is_empty() {
            return Err(BuildError::MissingOrInvalidEnr { index: slot, source: None });
        }
        if let Err(err) = dvn_enr::validate(record) {
            return Err(BuildError::MissingOrInvalidEnr { index: slot, source: Some(err) });
        }
    }
    Ok(num_operators)
}

/// Build a cluster definition request from a validated configuration, the
/// resolved local identity record, and externally supplied node facts.
///
/// Pure beyond logging: the same inputs always produce the same request,
/// including operator order. Invoking the external tool is the caller's
/// separate step.
pub fn build(
    charon: &CharonConfig,
    network: &Network,
    local: &NodeRecord,
    facts: &NodeFacts,
) -> Result<ClusterDefinitionRequest, BuildError> {
    let num_operators = validate_config(charon)?;

    let withdrawal_address =
        facts.deployment_address.ok_or(BuildError::PreconditionFailed)?;

    let (source, fee_recipient_address) = facts.fee_recipient.active();
    info!(source = %source, address = %fee_recipient_address, "selected fee recipient");

    let mut operator_enrs = Vec::with_capacity(usize::from(num_operators));
    operator_enrs.push(local.as_str().to_owned());
    for slot in 1..num_operators {
        // Non-blank and valid per validate_config above.
        operator_enrs.push(charon.operator_enr(slot).unwrap_or_default().trim().to_owned());
    }

    Ok(ClusterDefinitionRequest {
        cluster_name: charon.cluster_name.trim().to_owned(),
        num_validators: charon.num_validators,
        withdrawal_address,
        fee_recipient_address,
        operator_enrs,
        network: charon_network(network),
    })
}

/// The charon argument vector for running the ceremony as a cluster
/// member, against the configured definition URL.
pub fn member_command(charon: &CharonConfig) -> Result<Vec<String>, BuildError> {
    if !charon.enabled {
        return Err(BuildError::Disabled);
    }
    let url = charon.cluster_definition_url.trim();
    if url.is_empty() {
        return Err(BuildError::MissingField("clusterDefinitionURL"));
    }
    Ok(vec!["dkg".to_owned(), format!("--definition-file={url}")])
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use dvn_enr::validate;
    use enr::Enr;
    use k256::ecdsa::SigningKey;

    use super::*;
    use crate::FeeRecipientInfo;

    fn record_text(seed: u8) -> String {
        let key = SigningKey::from_slice(&[seed; 32]).expect("nonzero seed");
        Enr::builder()
            .ip4(Ipv4Addr::new(10, 0, 0, seed))
            .tcp4(3610)
            .udp4(3610)
            .build(&key)
            .expect("valid record")
            .to_base64()
    }

    fn local_record() -> NodeRecord {
        validate(&record_text(100)).expect("local record validates")
    }

    fn creator_config(num_operators: &str, records: &[&str]) -> CharonConfig {
        let mut charon = CharonConfig {
            enabled: true,
            cluster_name: "test-cluster".to_owned(),
            num_validators: 2,
            num_operators: num_operators.to_owned(),
            ..CharonConfig::default()
        };
        for (i, record) in records.iter().enumerate() {
            charon.operator_enrs[i] = (*record).to_owned();
        }
        charon
    }

    fn deployed_facts() -> NodeFacts {
        NodeFacts {
            deployment_address: Some(Address::repeat_byte(0x11)),
            fee_recipient: FeeRecipientInfo {
                in_smoothing_pool: false,
                smoothing_pool_address: Address::repeat_byte(0xaa),
                fee_distributor_address: Address::repeat_byte(0xbb),
            },
        }
    }

    #[test]
    fn disabled_addon_fails_first() {
        let mut charon = creator_config("3", &[]);
        charon.enabled = false;
        charon.cluster_name.clear();
        assert!(matches!(validate_config(&charon), Err(BuildError::Disabled)));
    }

    #[test]
    fn missing_name_wins_over_missing_records() {
        let mut charon = creator_config("3", &[]);
        charon.cluster_name = "  ".to_owned();
        assert!(matches!(
            validate_config(&charon),
            Err(BuildError::MissingField("clusterName"))
        ));
    }

    #[test]
    fn zero_validators_is_invalid() {
        let mut charon = creator_config("3", &[]);
        charon.num_validators = 0;
        assert!(matches!(
            validate_config(&charon),
            Err(BuildError::InvalidValue("numValidators"))
        ));
    }

    #[test]
    fn out_of_range_operator_count_is_invalid() {
        for bad in ["2", "11", "three"] {
            let charon = creator_config(bad, &[]);
            assert!(
                matches!(
                    validate_config(&charon),
                    Err(BuildError::InvalidValue("numOperators"))
                ),
                "count {bad:?}"
            );
        }
    }

    #[test]
    fn first_blank_required_record_is_reported() {
        let r2 = record_text(2);
        let charon = creator_config("3", &["", &r2]);
        match validate_config(&charon) {
            Err(BuildError::MissingOrInvalidEnr { index: 1, source: None }) => {}
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn invalid_record_carries_its_cause() {
        let charon = creator_config("3", &["enr:garbage", &record_text(2)]);
        match validate_config(&charon) {
            Err(BuildError::MissingOrInvalidEnr { index: 1, source: Some(_) }) => {}
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn stale_hidden_records_are_ignored() {
        let r1 = record_text(1);
        let r2 = record_text(2);
        // Slot 3 holds junk left over from an earlier count of 4; with
        // three operators only slots 1 and 2 are required.
        let charon = creator_config("3", &[&r1, &r2, "stale-junk"]);
        assert_eq!(validate_config(&charon).expect("slots 1 and 2 are valid"), 3);
    }

    #[test]
    fn missing_deployment_is_a_failed_precondition() {
        let r1 = record_text(1);
        let r2 = record_text(2);
        let charon = creator_config("3", &[&r1, &r2]);
        let facts = NodeFacts { deployment_address: None, ..deployed_facts() };
        assert!(matches!(
            build(&charon, &Network::Mainnet, &local_record(), &facts),
            Err(BuildError::PreconditionFailed)
        ));
    }

    #[test]
    fn operator_order_is_local_first_then_slots_ascending() {
        let r1 = record_text(1);
        let r2 = record_text(2);
        let charon = creator_config("3", &[&r1, &r2]);
        let local = local_record();
        let request = build(&charon, &Network::Mainnet, &local, &deployed_facts())
            .expect("valid creator config builds");
        assert_eq!(
            request.operator_enrs,
            vec![local.as_str().to_owned(), r1, r2]
        );
        // Same inputs, same order.
        let again = build(&charon, &Network::Mainnet, &local, &deployed_facts())
            .expect("still builds");
        assert_eq!(again, request);
    }

    #[test]
    fn four_operator_cluster_builds_full_list() {
        let records = [record_text(1), record_text(2), record_text(3)];
        let refs: Vec<&str> = records.iter().map(String::as_str).collect();
        let charon = creator_config("4", &refs);
        let request = build(&charon, &Network::Mainnet, &local_record(), &deployed_facts())
            .expect("valid creator config builds");
        assert_eq!(request.operator_enrs.len(), 4);
        assert_eq!(request.operator_enrs[0], local_record().as_str());
    }

    #[test]
    fn smoothing_pool_wins_when_enrolled() {
        let r1 = record_text(1);
        let r2 = record_text(2);
        let charon = creator_config("3", &[&r1, &r2]);
        let mut facts = deployed_facts();
        facts.fee_recipient.in_smoothing_pool = true;
        let request = build(&charon, &Network::Mainnet, &local_record(), &facts)
            .expect("builds");
        assert_eq!(request.fee_recipient_address, Address::repeat_byte(0xaa));
    }

    #[test]
    fn network_names_map_to_charon_networks() {
        assert_eq!(charon_network(&Network::Mainnet), "mainnet");
        assert_eq!(charon_network(&Network::Testnet), "hoodi");
        assert_eq!(charon_network(&Network::Devnet), "hoodi");
        assert_eq!(charon_network(&Network::Unknown("atlantis".to_owned())), "mainnet");
    }

    #[test]
    fn create_command_carries_every_flag() {
        let r1 = record_text(1);
        let r2 = record_text(2);
        let charon = creator_config("3", &[&r1, &r2]);
        let local = local_record();
        let request = build(&charon, &Network::Devnet, &local, &deployed_facts())
            .expect("builds");
        let command = request.create_command();
        assert_eq!(command[0], "create");
        assert_eq!(command[1], "dkg");
        assert!(command.contains(&"--name=test-cluster".to_owned()));
        assert!(command.contains(&"--num-validators=2".to_owned()));
        assert!(command.contains(&"--network=hoodi".to_owned()));
        assert!(command.contains(&format!(
            "--operator-enrs={},{},{}",
            local.as_str(),
            r1,
            r2
        )));
        assert_eq!(command.last(), Some(&"--publish".to_owned()));
    }

    #[test]
    fn member_command_requires_enabled_and_url() {
        let mut charon = CharonConfig::default();
        assert!(matches!(member_command(&charon), Err(BuildError::Disabled)));
        charon.enabled = true;
        assert!(matches!(
            member_command(&charon),
            Err(BuildError::MissingField("clusterDefinitionURL"))
        ));
        charon.cluster_definition_url = "https://api.obol.tech/dv/abc".to_owned();
        assert_eq!(
            member_command(&charon).expect("configured member runs"),
            vec![
                "dkg".to_owned(),
                "--definition-file=https://api.obol.tech/dv/abc".to_owned()
            ]
        );
    }
}
