// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Backend-for-frontend HTTP server

use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

use swarm_core::application::HttpSwarmBackend;
use swarm_core::domain::interface_config::InterfaceConfigManifest;
use swarm_core::presentation::api;

/// Build the router for a validated configuration.
pub fn build_router(config: &InterfaceConfigManifest) -> Result<Router> {
    let backend = HttpSwarmBackend::new(config.spec.upstream.clone())
        .context("Failed to initialize upstream relay")?;
    Ok(api::app(Arc::new(backend)))
}

pub async fn start_server(
    config: InterfaceConfigManifest,
    host: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    config
        .validate()
        .context("Configuration validation failed")?;

    let upstream = &config.spec.upstream;
    info!(
        "Upstream endpoints: create={} delete={} ({}) start={} get={}",
        upstream.create_swarm_url.as_deref().unwrap_or("(unset)"),
        upstream.delete_swarm_url.as_deref().unwrap_or("(unset)"),
        upstream.delete_method,
        upstream.start_swarm_url.as_deref().unwrap_or("(unset)"),
        upstream.get_swarm_url.as_deref().unwrap_or("(unset)"),
    );

    let app = build_router(&config)?;

    let host = host.unwrap_or_else(|| config.spec.server.bind_address.clone());
    let port = port.unwrap_or(config.spec.server.port);
    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Swarm interface listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Swarm interface shutting down");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
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
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
