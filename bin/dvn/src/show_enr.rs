//! `show-enr`: print the local identity.

use dvn_cluster::{resolve_local_enr, EnrSource};
use dvn_config::DvnConfig;
use dvn_docker::DockerCli;
use eyre::Result;

pub(crate) fn run(config: &DvnConfig) -> Result<()> {
    crate::cli::ensure_enabled(config)?;

    let container = config.charon_container();
    println!("Attempting to retrieve the charon ENR from running container {container}...");
    println!();

    let sources = EnrSource::standard_chain(
        container,
        config.charon.container_tag.clone(),
        config.addon_dir(),
    );
    let enr = resolve_local_enr(&DockerCli::new(), &sources)?;

    println!("{enr}");
    println!();
    println!("Share this ENR with the other operators in your DV cluster.");

    Ok(())
}
