#![deny(unsafe_code)]

use clap::Parser;
use scanwatch::probe::{pump, XdpProbe};
use scanwatch::telemetry::init_tracing;
use scanwatch::{load_from_path, Config, Controller, LogSink, LoggingConfig};
use std::path::PathBuf;
use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(author, version, about = "Passive XDP detector for TCP port-scan probes")]
struct Cli {
    /// Path to configuration TOML file
    #[arg(short, long, value_name = "FILE", default_value = "config/scanwatch.toml")]
    config: PathBuf,

    /// Interface to watch, overrides the config file
    #[arg(short, long, value_name = "IFACE", env = "SCANWATCH_INTERFACE")]
    interface: Option<String>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let cfg = match load_from_path(&cli.config, cli.interface) {
        Ok(cfg) => cfg,
        Err(err) => {
            // Logging config is unknown at this point, fall back to defaults
            let _ = init_tracing(&LoggingConfig::default());
            error!(%err, config = %cli.config.display(), "failed to load configuration");
            std::process::exit(1);
        }
    };

    if let Err(err) = init_tracing(&cfg.logging) {
        eprintln!("failed to initialize logging: {err}");
        std::process::exit(1);
    }

    info!(interface = %cfg.interface, mode = ?cfg.xdp.mode, "configuration loaded");
    if let Err(err) = run(cfg).await {
        error!(%err, "scan detector exited with error");
        std::process::exit(1);
    }
}

async fn run(cfg: Config) -> scanwatch::Result<()> {
    let mut probe = XdpProbe::load(&cfg.interface, cfg.xdp.mode)?;
    let events = probe.take_events()?;

    let mut detector = Controller::new(probe);
    detector.start()?;

    let result = pump(events, &LogSink, shutdown_signal()).await;
    detector.stop_after(result)
}

async fn shutdown_signal() {
    let mut terminate = match signal(SignalKind::terminate()) {
        Ok(sig) => sig,
        Err(err) => {
            error!(%err, "failed to install SIGTERM handler");
            return;
        }
    };
    tokio::select! {
        res = tokio::signal::ctrl_c() => {
            if let Err(err) = res {
                error!(%err, "failed to listen for ctrl-c");
            }
        }
        _ = terminate.recv() => {}
    }
    info!("shutdown signal received");
}
