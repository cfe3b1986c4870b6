//! Vitals - glanceable system gauges for your terminal
//!
//! Samples CPU, memory and disk utilization plus one ping round-trip every
//! tick, and draws them as ring gauges and a short latency history chart.

mod config;
mod core;
mod integrations;
mod ui;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::Config;
use crate::core::app::App;
use crate::core::history::LatencyHistory;
use crate::core::monitor::Monitor;
use crate::integrations::ping::PingProbe;
use crate::integrations::system::SystemMonitor;

#[derive(Parser, Debug)]
#[command(name = "vitals")]
#[command(author = "Vitals Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Glanceable CPU, memory, disk and latency gauges for your terminal", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Milliseconds between samples
    #[arg(short, long, value_name = "MS")]
    interval: Option<u64>,

    /// Host to ping for latency
    #[arg(long, value_name = "HOST")]
    host: Option<String>,

    /// Ping timeout in milliseconds
    #[arg(short, long, value_name = "MS")]
    timeout: Option<u64>,

    /// Color theme (slate, tokyo-night, nord)
    #[arg(long, value_name = "NAME")]
    theme: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Take a single sample and print it as JSON
    Sample {
        /// Pretty-print the JSON
        #[arg(short, long)]
        pretty: bool,
    },

    /// Write the default configuration file
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

fn setup_logging(verbosity: u8) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    // stdout belongs to the dashboard, so logs go to a file
    let log_dir = dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vitals")
        .join("logs");

    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "vitals.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(guard)
}

fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let path = path.or_else(|| Config::default_path().filter(|p| p.exists()));
    match path {
        Some(path) => Config::load(&path),
        None => Ok(Config::default()),
    }
}

/// Command-line flags win over the config file.
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(interval) = cli.interval {
        config.general.interval_ms = interval;
    }
    if let Some(host) = &cli.host {
        config.probe.host = host.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.probe.timeout_ms = timeout;
    }
    if let Some(theme) = &cli.theme {
        config.display.theme = theme.clone();
    }
}

/// Write the default config to `--config`, or the platform default path.
fn run_init(cli: &Cli, force: bool) -> Result<()> {
    let path = cli
        .config
        .clone()
        .or_else(Config::default_path)
        .context("no configuration directory on this platform")?;
    config::init_config(&path, force)
}

async fn print_sample(config: &Config, pretty: bool) -> Result<()> {
    let mut monitor = Monitor::new(
        SystemMonitor::new(),
        PingProbe::new(config.probe.host.clone(), config.probe_timeout()),
    );

    // CPU usage is a delta between two refreshes
    tokio::time::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL).await;

    let mut history = LatencyHistory::new(1);
    let snapshot = monitor.tick(&mut history).await;

    let json = if pretty {
        serde_json::to_string_pretty(&snapshot)?
    } else {
        serde_json::to_string(&snapshot)?
    };
    println!("{}", json);
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive for the duration of the program
    let _logging_guard = setup_logging(cli.verbose)?;

    // The file `init` creates may not exist yet
    if let Some(Commands::Init { force }) = cli.command {
        return run_init(&cli, force);
    }

    let mut config = load_config(cli.config.clone())?;
    apply_overrides(&mut config, &cli);
    tracing::info!(?config, "starting");

    match cli.command {
        Some(Commands::Sample { pretty }) => {
            print_sample(&config, pretty).await?;
        }
        Some(Commands::Init { .. }) => {}
        None => {
            let mut app = App::new(&config)?;
            app.run().await?;
        }
    }

    Ok(())
}
