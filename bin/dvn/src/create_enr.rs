//! `create-enr`: generate the local identity.

use dvn_config::DvnConfig;
use dvn_docker::{run_args, CommandRunner as _, DockerCli, CHARON_DATA_MOUNT};
use eyre::{Result, WrapErr};

pub(crate) fn run(config: &DvnConfig) -> Result<()> {
    crate::cli::ensure_enabled(config)?;

    let addon_dir = config.addon_dir();
    std::fs::create_dir_all(&addon_dir).wrap_err_with(|| {
        format!("could not create the addon data directory {}", addon_dir.display())
    })?;

    println!("Creating the charon ENR (Ethereum Node Record)...");
    println!("Using charon version: {}", config.charon.container_tag);
    println!("Data directory: {}", addon_dir.display());
    println!();

    let args = run_args(
        &addon_dir,
        CHARON_DATA_MOUNT,
        &config.charon.container_tag,
        &["create", "enr"],
    );
    DockerCli::new().run_attached(&args).wrap_err("error creating ENR")?;

    println!();
    println!(
        "ENR created. The private key has been saved to {}",
        config.enr_private_key_path().display()
    );
    println!("You can view your public ENR with: dvn show-enr");

    Ok(())
}
