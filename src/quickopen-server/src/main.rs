//! Quick-open server binary.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use quickopen_server::{ServerConfig, run_with_shutdown};

/// Quick-open server
#[derive(Parser)]
#[command(name = "quickopen-server")]
#[command(about = "HTTP endpoint for fuzzy file finding")]
#[command(version)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<String>,

    /// Listen address
    #[arg(short, long)]
    listen: Option<String>,

    /// Directory to serve
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// List dot files and dot directories
    #[arg(long)]
    allow_hidden: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Enable JSON logging
    #[arg(long)]
    json_logs: bool,
}

fn setup_logging(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

async fn shutdown_signal(shutdown_timeout: u64) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown (timeout: {}s)...", shutdown_timeout);
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown (timeout: {}s)...", shutdown_timeout);
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    setup_logging(&args.log_level, args.json_logs);

    let loaded = match args.config.as_deref() {
        Some(path) => ServerConfig::load(path)
            .map_err(|e| anyhow::anyhow!("Failed to load config from {}: {}", path, e)),
        None => ServerConfig::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to load config from environment: {}", e)),
    };
    let mut config = match loaded {
        Ok(c) => c,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Some(listen) = args.listen {
        config.listen_addr = listen;
    }
    if let Some(root) = args.root {
        config.root_dir = root;
    }
    if args.allow_hidden {
        config.allow_hidden = true;
    }

    info!("Press Ctrl+C to stop");

    let shutdown_timeout = config.shutdown_timeout;
    let shutdown = async move {
        shutdown_signal(shutdown_timeout).await;
        // Bound the wait for in-flight scans.
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(shutdown_timeout)).await;
            error!("Graceful shutdown timed out after {}s", shutdown_timeout);
            std::process::exit(1);
        });
    };
    let server = run_with_shutdown(config, shutdown);

    if let Err(e) = server.await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    info!("Server stopped");
    ExitCode::SUCCESS
}
