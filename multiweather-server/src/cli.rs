use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use multiweather_core::{Config, MultiProvider};
use tracing::{error, info};

use crate::server::{AppState, build_app};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "multiweather-server", version, about = "Averaging temperature HTTP service")]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "multiweather.toml")]
    pub config: PathBuf,

    /// Override the port from the configuration file.
    #[arg(long)]
    pub port: Option<u16>,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        init_tracing();

        let mut config = Config::load(&self.config).with_context(|| {
            format!("Failed to load configuration from {}", self.config.display())
        })?;
        config.resolve_env_keys();

        if let Some(port) = self.port {
            config.server.port = port;
        }

        let providers = MultiProvider::from_config(&config)?;
        let kinds: Vec<&str> = config.providers.iter().map(|p| p.kind.as_str()).collect();

        let addr = format!("{}:{}", config.server.host, config.server.port);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;

        info!(%addr, providers = ?kinds, "multiweather listening");

        let app = build_app(AppState {
            providers: Arc::new(providers),
        });

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP server terminated unexpectedly")?;

        Ok(())
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(%err, "Failed to listen for shutdown signal");
    }
}
