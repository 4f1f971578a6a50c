//! `create-dkg`: build and publish a cluster definition.

use dvn_cluster::{resolve_local_enr, DaemonClient, EnrSource, NodeApi as _};
use dvn_config::DvnConfig;
use dvn_docker::{run_args, CommandRunner as _, DockerCli, CHARON_DATA_MOUNT};
use eyre::{Result, WrapErr};

pub(crate) fn run(config: &DvnConfig) -> Result<()> {
    let charon = &config.charon;

    // Validate the configuration before touching anything external.
    let num_operators = dvn_cluster::validate_config(charon)?;

    let key_path = config.enr_private_key_path();
    eyre::ensure!(
        key_path.exists(),
        "local ENR not found at {}; create it first with `dvn create-enr`",
        key_path.display()
    );

    let api = DaemonClient::new(config.daemon_addr.as_str())?;
    let node_status = api.node_status().wrap_err("error getting node status")?;
    let facts = node_status.facts();

    println!("Reading local ENR...");
    let docker = DockerCli::new();
    let sources = EnrSource::standard_chain(
        config.charon_container(),
        charon.container_tag.clone(),
        config.addon_dir(),
    );
    let raw = resolve_local_enr(&docker, &sources)?;
    let local = dvn_enr::validate(&raw).wrap_err("local ENR is invalid")?;

    let request = dvn_cluster::build(charon, &config.network, &local, &facts)?;

    println!();
    println!("=== Cluster Configuration ===");
    println!("Cluster Name: {}", request.cluster_name);
    println!("Number of Validators: {}", request.num_validators);
    println!("Number of Operators: {num_operators}");
    println!("Withdrawal Address: {}", request.withdrawal_address);
    println!("Fee Recipient: {}", request.fee_recipient_address);
    println!();
    println!("Operator ENRs:");
    for (i, enr) in request.operator_enrs.iter().enumerate() {
        let local_marker = if i == 0 { " (local)" } else { "" };
        println!("  {}. {enr}{local_marker}", i + 1);
    }
    println!();
    println!("Creating the DKG cluster definition and publishing it to Obol...");
    println!();

    let command = request.create_command();
    let command_refs: Vec<&str> = command.iter().map(String::as_str).collect();
    let args = run_args(
        &config.addon_dir(),
        CHARON_DATA_MOUNT,
        &charon.container_tag,
        &command_refs,
    );
    docker.run_attached(&args).wrap_err("error creating cluster")?;

    println!();
    println!("Cluster definition created.");
    println!(
        "The definition has been saved to {}",
        config.cluster_definition_path().display()
    );
    println!();
    println!("Next steps:");
    println!("1. Share the cluster invite URL (displayed above) with all cluster members");
    println!("2. Each operator accepts the invite and runs the ceremony with `dvn run-dkg`");
    println!("3. After the ceremony completes, import the generated validator keys");

    Ok(())
}
