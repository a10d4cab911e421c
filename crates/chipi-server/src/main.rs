//! chipi-server - REST API server binary.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use chipi_core::{ChipiConfig, JsonFileStore};
use chipi_server::{create_server, AppState};
use clap::Parser;
use tokio::signal;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Training data server for the Chipi chat responder.
#[derive(Debug, Parser)]
#[command(name = "chipi-server", version, about)]
struct Args {
    /// Config file (.toml, .json or .yaml).
    #[arg(long, env = "CHIPI_CONFIG")]
    config: Option<PathBuf>,

    /// Address to bind (overrides CHIPI_HOST).
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides CHIPI_PORT).
    #[arg(short, long)]
    port: Option<u16>,

    /// Training data document (overrides CHIPI_DATA_FILE).
    #[arg(long)]
    data_file: Option<PathBuf>,

    /// Emit logs as JSON lines.
    #[arg(long)]
    log_json: bool,
}

impl Args {
    /// Defaults, then config file, then environment, then flags.
    fn resolve_config(&self) -> anyhow::Result<ChipiConfig> {
        let mut config = match &self.config {
            Some(path) => ChipiConfig::from_file(path)
                .with_context(|| format!("failed to read config {}", path.display()))?,
            None => ChipiConfig::default(),
        };
        config = config.merge_env()?;

        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(data_file) = &self.data_file {
            config.data_file = data_file.clone();
        }
        Ok(config)
    }
}

fn init_tracing(json: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::from_default_env()
        .add_directive(Level::INFO.into())
        .add_directive("chipi_server=debug".parse()?);

    if json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init();
    }
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(args.log_json)?;

    let config = args.resolve_config()?;

    // A corrupt document aborts startup with a non-zero exit.
    let store = Arc::new(JsonFileStore::new(&config.data_file));
    let state = AppState::load(store)
        .await
        .with_context(|| format!("failed to load {}", config.data_file.display()))?;

    let app = create_server(state.clone());

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!(
        "Starting chipi-server on http://{} (data: {})",
        addr,
        state.store_location()
    );
    info!("API documentation available at http://{}/api/docs", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            info!("Shutdown signal received");
        })
        .await?;

    info!("Server stopped cleanly");
    Ok(())
}
