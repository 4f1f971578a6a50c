#![doc = "Distributed validator cluster setup for the charon DKG tool."]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

use clap::Parser;
use eyre::Result;
use tracing_subscriber::{fmt, EnvFilter};

mod cli;
mod create_dkg;
mod create_enr;
mod run_dkg;
mod show_enr;
mod status;

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    cli::Cli::parse().run()
}
