//! `run-dkg`: execute the ceremony against a configured definition URL.

use dvn_config::DvnConfig;
use dvn_docker::{run_args, CommandRunner as _, DockerCli, CHARON_DATA_MOUNT};
use eyre::{Result, WrapErr};

pub(crate) fn run(config: &DvnConfig) -> Result<()> {
    let charon = &config.charon;
    let command = dvn_cluster::member_command(charon)?;

    println!("=== Running DKG Ceremony (Cluster Member) ===");
    println!();
    println!("Cluster Definition URL: {}", charon.cluster_definition_url.trim());
    println!();
    println!("This will download the cluster definition and run the Distributed Key Generation ceremony.");
    println!();
    println!("Starting the DKG ceremony...");
    println!();

    let command_refs: Vec<&str> = command.iter().map(String::as_str).collect();
    let args = run_args(
        &config.addon_dir(),
        CHARON_DATA_MOUNT,
        &charon.container_tag,
        &command_refs,
    );
    DockerCli::new().run_attached(&args).wrap_err("error running the DKG ceremony")?;

    println!();
    println!("DKG ceremony completed.");
    println!(
        "Validator keys have been generated in {}",
        config.validator_keys_dir().display()
    );
    println!();
    println!("Next steps:");
    println!("1. Import the generated key shares into your validator client");
    println!("2. Coordinate with the other operators so every cluster node is attesting");

    Ok(())
}
