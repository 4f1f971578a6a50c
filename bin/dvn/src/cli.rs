//! Contains the CLI for `dvn`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dvn_config::DvnConfig;
use eyre::Result;

/// CLI arguments for the dvn toolkit.
#[derive(Parser, Debug)]
#[command(name = "dvn")]
#[command(about = "Distributed validator cluster setup for the charon DKG tool")]
pub(crate) struct Cli {
    /// Path to the configuration file (TOML or JSON).
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the data directory from config.
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands. All required values come from the persisted configuration;
/// no subcommand takes positional arguments.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Create an Ethereum Node Record (ENR) for this node
    CreateEnr,
    /// Create and publish a DKG cluster definition (cluster creator)
    CreateDkg,
    /// Run the Distributed Key Generation ceremony (cluster member)
    #[command(alias = "dkg")]
    RunDkg,
    /// Display this node's ENR
    #[command(alias = "enr")]
    ShowEnr,
    /// Show node and cluster status for debugging
    #[command(alias = "s")]
    Status,
}

impl Cli {
    /// Load the tool configuration, applying CLI overrides.
    pub(crate) fn load_config(&self) -> Result<DvnConfig> {
        let mut config = DvnConfig::load(self.config.as_deref())?;

        if let Some(ref data_dir) = self.data_dir {
            config.data_dir = data_dir.clone();
        }

        Ok(config)
    }

    /// Run the selected subcommand.
    pub(crate) fn run(self) -> Result<()> {
        let config = self.load_config()?;
        tracing::debug!(?config, "loaded configuration");

        match self.command {
            Commands::CreateEnr => crate::create_enr::run(&config),
            Commands::CreateDkg => crate::create_dkg::run(&config),
            Commands::RunDkg => crate::run_dkg::run(&config),
            Commands::ShowEnr => crate::show_enr::run(&config),
            Commands::Status => crate::status::run(&config),
        }
    }
}

/// Fail early when the addon is switched off.
pub(crate) fn ensure_enabled(config: &DvnConfig) -> Result<()> {
    eyre::ensure!(
        config.charon.enabled,
        "the charon addon is not enabled; enable it in the dvn configuration first"
    );
    Ok(())
}
