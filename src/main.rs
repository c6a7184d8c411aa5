// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Indoor Viewer server
//!
//! Loads one building's floors and points of interest from the Situm
//! cartography API and serves an interactive floor-by-floor viewer.

use indoor_viewer::{config::Config, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(
        port = config.port,
        building_id = ?config.building_id,
        api_url = %config.api_url,
        "Starting Indoor Viewer"
    );
    if config.building_id.is_none() {
        tracing::warn!("SITUM_BUILDING_ID not set; building and POI fetches are disabled");
    }

    // Build shared state
    let state = Arc::new(AppState::new(config.clone()));

    // Initial load runs in the background; the page shows progress meanwhile
    let loader = state.loader.clone();
    let building_id = config.building_id;
    tokio::spawn(async move {
        if let Err(e) = loader.load_all(building_id).await {
            tracing::warn!(error = %e, "Initial load failed");
        }
    });

    // Build router
    let app = indoor_viewer::routes::create_router(state.clone());

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Revoke the live floor image before exiting
    state.floor_images.release().await;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

/// Initialize structured JSON logging.
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("indoor_viewer=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
