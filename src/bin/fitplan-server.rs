// ABOUTME: Server binary for the FitPlan API
// ABOUTME: Loads configuration, builds the store and completion provider, and serves HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # FitPlan API Server Binary
//!
//! Starts the HTTP API for AI-generated workouts and meal plans.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use fitplan_server::{
    config::ServerConfig, database::create_store, llm::provider_from_config,
    logging::LoggingConfig, resources::ServerResources, routes,
};
use tokio::net::TcpListener;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "fitplan-server")]
#[command(about = "FitPlan API - AI-generated workouts and meal plans")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    LoggingConfig::from_env().init()?;

    info!("Starting FitPlan API");
    info!("{}", config.summary());
    config.validate()?;

    let store = create_store(&config.database).await?;
    let provider = provider_from_config(&config.llm)?;
    info!(
        provider = provider.name(),
        model = provider.default_model(),
        "Completion provider ready"
    );

    let addr: SocketAddr = format!("{}:{}", config.host, config.http_port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", config.host, config.http_port))?;

    let resources = Arc::new(ServerResources::new(config, store, provider));
    let app = routes::router(resources);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Listening on http://{addr}");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl-C, shutting down"),
        Err(e) => error!("Failed to listen for Ctrl-C: {}", e),
    }
}
