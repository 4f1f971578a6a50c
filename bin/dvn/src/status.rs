//! `status`: dump node and cluster status for debugging.

use dvn_cluster::DaemonClient;
use dvn_config::DvnConfig;
use eyre::Result;

pub(crate) fn run(config: &DvnConfig) -> Result<()> {
    let api = DaemonClient::new(config.daemon_addr.as_str())?;
    let report = dvn_cluster::collect(&api);

    println!("=== Node Status ===");
    match report.node {
        Ok(node) => println!("{}", serde_json::to_string_pretty(&node)?),
        Err(err) => println!("Error getting node status: {err}"),
    }

    println!();
    println!("=== Cluster Status ===");
    match report.cluster {
        Ok(cluster) => println!("{}", serde_json::to_string_pretty(&cluster)?),
        Err(err) => println!("Error getting cluster status: {err}"),
    }

    Ok(())
}
