use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "resetpv",
    about = "Reset Terminating persistent volumes and claims back to Bound by editing etcd directly",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub etcd: EtcdArgs,

    /// The etcd key prefix for kubernetes resources.
    #[arg(long, global = true, default_value = "registry")]
    pub k8s_key_prefix: String,

    /// Deadline in seconds covering the whole fetch-and-write sequence.
    #[arg(long, global = true, default_value_t = 5)]
    pub timeout: u64,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Args)]
pub struct EtcdArgs {
    /// The etcd domain name or IP.
    #[arg(long, global = true, default_value = "localhost")]
    pub etcd_host: String,

    /// The etcd port number.
    #[arg(long, global = true, default_value_t = 2379)]
    pub etcd_port: u16,

    /// CA certificate used by etcd.
    #[arg(long, global = true, default_value = "ca.crt")]
    pub etcd_ca: PathBuf,

    /// Client certificate used to authenticate to etcd.
    #[arg(long, global = true, default_value = "etcd.crt")]
    pub etcd_cert: PathBuf,

    /// Private key for the client certificate.
    #[arg(long, global = true, default_value = "etcd.key")]
    pub etcd_key: PathBuf,
}

#[derive(Subcommand)]
pub enum Command {
    /// Reset a Terminating PersistentVolume
    #[command(alias = "pv")]
    Volume(VolumeArgs),
    /// Reset a Terminating PersistentVolumeClaim
    #[command(alias = "pvc")]
    Claim(ClaimArgs),
}

#[derive(Args)]
pub struct VolumeArgs {
    /// Name of the persistent volume.
    pub name: String,
}

#[derive(Args)]
pub struct ClaimArgs {
    /// Namespace the claim lives in.
    pub namespace: String,
    /// Name of the persistent volume claim.
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_volume() {
        let cli = Cli::try_parse_from(["resetpv", "volume", "pv-1"]).unwrap();
        if let Command::Volume(args) = cli.command {
            assert_eq!(args.name, "pv-1");
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_volume_alias() {
        let cli = Cli::try_parse_from(["resetpv", "pv", "pv-1"]).unwrap();
        assert!(matches!(cli.command, Command::Volume(_)));
    }

    #[test]
    fn parse_claim() {
        let cli = Cli::try_parse_from(["resetpv", "claim", "ns-a", "claim-1"]).unwrap();
        if let Command::Claim(args) = cli.command {
            assert_eq!(args.namespace, "ns-a");
            assert_eq!(args.name, "claim-1");
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_claim_requires_namespace_and_name() {
        assert!(Cli::try_parse_from(["resetpv", "claim", "claim-1"]).is_err());
    }

    #[test]
    fn parse_volume_requires_name() {
        assert!(Cli::try_parse_from(["resetpv", "volume"]).is_err());
    }

    #[test]
    fn etcd_defaults() {
        let cli = Cli::try_parse_from(["resetpv", "volume", "pv-1"]).unwrap();
        assert_eq!(cli.etcd.etcd_host, "localhost");
        assert_eq!(cli.etcd.etcd_port, 2379);
        assert_eq!(cli.etcd.etcd_ca, PathBuf::from("ca.crt"));
        assert_eq!(cli.k8s_key_prefix, "registry");
        assert_eq!(cli.timeout, 5);
    }

    #[test]
    fn parse_etcd_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "resetpv",
            "volume",
            "pv-1",
            "--etcd-host",
            "10.0.0.5",
            "--etcd-port",
            "12379",
            "--k8s-key-prefix",
            "kubernetes.io",
        ])
        .unwrap();
        assert_eq!(cli.etcd.etcd_host, "10.0.0.5");
        assert_eq!(cli.etcd.etcd_port, 12379);
        assert_eq!(cli.k8s_key_prefix, "kubernetes.io");
    }

    #[test]
    fn parse_json_format() {
        let cli =
            Cli::try_parse_from(["resetpv", "volume", "pv-1", "--format", "json"]).unwrap();
        assert!(matches!(cli.format, OutputFormat::Json));
    }
}
