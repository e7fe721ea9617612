use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use tracing::info;

use promprobe::{load_config, Config, PrometheusClient, ProbeMode, Prober};

#[derive(Parser)]
#[command(name = "promprobe", about = "Prometheus Prober")]
struct Cli {
    /// YAML file with host, token, pod and containers
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verify the endpoint's TLS certificate even if the config file does not ask for it
    #[arg(long, global = true)]
    verify_tls: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Working set memory per container
    Memory,
    /// Cumulative CPU seconds per container
    Cpu,
}

impl From<&Command> for ProbeMode {
    fn from(cmd: &Command) -> Self {
        match cmd {
            Command::Memory => ProbeMode::Memory,
            Command::Cpu => ProbeMode::Cpu,
        }
    }
}

impl Cli {
    // global args cannot be marked required, so the check lives here
    fn config_path(&self) -> Result<&Path, clap::Error> {
        self.config.as_deref().ok_or_else(|| {
            Cli::command().error(
                ErrorKind::MissingRequiredArgument,
                "the following required argument was not provided: --config <FILE>",
            )
        })
    }

    fn load_config(&self) -> Result<Config> {
        let path = self.config_path().unwrap_or_else(|e| e.exit());
        let mut cfg = load_config(path)?;
        cfg.verify_tls |= self.verify_tls;
        Ok(cfg)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let mode = ProbeMode::from(&cli.command);

    let cfg = cli.load_config()?;
    info!("pod = {}, containers = {:?}", cfg.pod, cfg.containers);

    let client = PrometheusClient::new(&cfg).context("Failed to build HTTP client")?;
    let prober = Prober::new(&client, &cfg);

    let mut stdout = std::io::stdout().lock();
    prober
        .run(mode, &mut stdout)
        .await
        .with_context(|| format!("{} probe failed for pod {}", mode.metric_name(), cfg.pod))?;

    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
