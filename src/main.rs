use anyhow::{Context, Result};
use clap::Parser;
use flipflop_engine::engine::FusionEngine;
use flipflop_engine::models::Config;
use flipflop_engine::server;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "flipflop-engine")]
#[command(about = "Fuse two nouns into one bounded descriptive paragraph")]
struct CliArgs {
    /// Optional listen address override, e.g. 127.0.0.1:8000.
    #[arg(long, value_name = "ADDR")]
    listen: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flipflop_engine=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting flipflop-engine");

    let args = CliArgs::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let engine = match FusionEngine::from_config(&config) {
        Ok(engine) => Arc::new(engine),
        Err(e) => {
            error!("Failed to initialize fusion engine: {}", e);
            std::process::exit(1);
        }
    };

    let addr = match args.listen {
        Some(addr) => addr,
        None => config
            .listen_addr
            .parse()
            .with_context(|| format!("Invalid LISTEN_ADDR '{}'", config.listen_addr))?,
    };

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on {}", addr);

    axum::serve(listener, server::router(engine))
        .await
        .context("HTTP server exited with an error")?;

    Ok(())
}
