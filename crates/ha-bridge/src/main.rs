//! Hub to Home Assistant discovery bridge
//!
//! Reads hub inclusion reports, translates each device into Home Assistant
//! MQTT discovery messages and hands them to a publisher.

mod publisher;
mod sweep;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use ha_config::{BridgeConfig, DiscoveryMode};
use ha_discovery::Translator;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::publisher::JsonLinesPublisher;
use crate::sweep::{run_sweep, SweepPlan};

/// Announce hub devices to Home Assistant over MQTT discovery.
#[derive(Parser, Debug)]
#[command(name = "fimp-ha-bridge")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Bridge configuration file (YAML); defaults apply without one.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Inclusion report files (a report, a list of reports or a hub event).
    #[arg(short, long, required = true, num_args = 1..)]
    reports: Vec<PathBuf>,

    /// Discovery layout, overriding the configuration: component or device.
    #[arg(short, long)]
    mode: Option<DiscoveryMode>,

    /// Discovery prefix, overriding the configuration.
    #[arg(long)]
    prefix: Option<String>,

    /// Publish empty retained messages to remove the devices instead.
    #[arg(long)]
    remove: bool,
}

impl Args {
    fn load_config(&self) -> Result<BridgeConfig> {
        let mut config = match &self.config {
            Some(path) => BridgeConfig::load(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?,
            None => BridgeConfig::default(),
        };
        if let Some(mode) = self.mode {
            config.discovery_mode = mode;
        }
        if let Some(prefix) = &self.prefix {
            config.discovery_prefix = prefix.clone();
        }
        config.validate()?;
        Ok(config)
    }
}

fn init_logging(default_filter: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .context("Invalid log filter")?;

    // stdout carries the discovery messages
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.load_config()?;
    init_logging(&config.log_level)?;

    info!(
        "Starting discovery sweep ({} mode, prefix '{}')",
        config.discovery_mode, config.discovery_prefix
    );

    let translator = Translator::new(config.translation_settings());
    let plan = SweepPlan {
        discovery_prefix: config.discovery_prefix.clone(),
        mode: config.discovery_mode,
        origin: config.origin_info(env!("CARGO_PKG_VERSION")),
        remove: args.remove,
        availability: config.availability,
    };
    let publisher = JsonLinesPublisher::stdout();

    let summary = run_sweep(&args.reports, &translator, &plan, &publisher).await?;
    if !summary.failed_files.is_empty() {
        bail!(
            "{} of {} report file(s) could not be processed",
            summary.failed_files.len(),
            args.reports.len()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_overrides() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("bridge.yaml");
        fs::write(&config, "bridge:\n  hub_id: attic\n  discovery_prefix: ha\n").unwrap();

        let args = Args::parse_from([
            "fimp-ha-bridge",
            "--config",
            config.to_str().unwrap(),
            "--mode",
            "device",
            "--reports",
            "a.json",
            "b.json",
        ]);
        assert_eq!(args.reports.len(), 2);

        let loaded = args.load_config().unwrap();
        assert_eq!(loaded.hub_id, "attic");
        assert_eq!(loaded.discovery_prefix, "ha");
        assert_eq!(loaded.discovery_mode, DiscoveryMode::Device);
    }

    #[test]
    fn test_reports_required() {
        assert!(Args::try_parse_from(["fimp-ha-bridge"]).is_err());
        assert!(Args::try_parse_from(["fimp-ha-bridge", "-r", "a.json", "-m", "both"]).is_err());
    }

    #[test]
    fn test_invalid_prefix_override() {
        let args = Args::parse_from(["fimp-ha-bridge", "-r", "a.json", "--prefix", "ha/#"]);
        assert!(args.load_config().is_err());
    }
}
