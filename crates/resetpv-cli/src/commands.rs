use std::time::Duration;

use colored::Colorize;
use tracing::debug;

use resetpv_repair::{RepairConfig, RepairOutcome, Repairer};
use resetpv_store::{EtcdConfig, EtcdGateway};
use resetpv_types::{ResourceKind, ResourceRef};

use crate::cli::{Cli, Command, OutputFormat};

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let target = match &cli.command {
        Command::Volume(args) => {
            ResourceRef::cluster_scoped(ResourceKind::PersistentVolume, args.name.clone())?
        }
        Command::Claim(args) => ResourceRef::namespaced(
            ResourceKind::PersistentVolumeClaim,
            args.namespace.clone(),
            args.name.clone(),
        )?,
    };

    debug!(%target, "resolved repair target");

    let etcd_config = EtcdConfig {
        host: cli.etcd.etcd_host.clone(),
        port: cli.etcd.etcd_port,
        ca_path: cli.etcd.etcd_ca.clone(),
        cert_path: cli.etcd.etcd_cert.clone(),
        key_path: cli.etcd.etcd_key.clone(),
        ..Default::default()
    };
    let repair_config = RepairConfig {
        key_prefix: cli.k8s_key_prefix.clone(),
        op_timeout: Duration::from_secs(cli.timeout),
    };

    // The connection lives for exactly one repair; dropped on every path.
    let gateway = EtcdGateway::connect(&etcd_config).await?;
    let repairer = Repairer::new(&gateway, repair_config);
    let outcome = repairer.repair(&target).await?;

    match cli.format {
        OutputFormat::Text => print_text(&outcome),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
    }
    Ok(())
}

fn print_text(outcome: &RepairOutcome) {
    println!(
        "{} {} {} reset to normal (non-deleting) state",
        "✓".green().bold(),
        outcome.kind.to_string().cyan(),
        outcome.name.yellow().bold(),
    );
    if let Some(ts) = &outcome.previous_deletion_timestamp {
        println!("  Cleared deletion timestamp: {}", ts.to_rfc3339().dimmed());
    }
    if let Some(grace) = outcome.previous_grace_period_seconds {
        println!("  Cleared grace period: {}s", grace);
    }
    println!("  Key: {}", outcome.key);
    println!("  Store revision: {}", outcome.new_revision);
}
