//! Liminal Network Space server - Main entry point
//!
//! A catch-all responder that:
//! - Accepts any method on any path
//! - Holds each request for an independently sampled random delay
//! - Answers with a random status code from a static table
//! - Echoes the request back in a JSON body

mod config;
mod router;

use anyhow::Result;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use liminal_core::{DelayRange, Sampler, StatusTable};

use crate::config::AppConfig;

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    pub delay: DelayRange,
    pub table: StatusTable,
    pub sampler: Sampler,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "info,liminal_server=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::from_env();
    tracing::info!("Configuration loaded: {:?}", config);

    let delay = config.delay_range()?;
    let table = StatusTable::new(config.variant);
    tracing::info!(
        "Status table initialized: {} variant, {} entries",
        table.variant(),
        table.len()
    );

    let sampler = match config.rng_seed {
        Some(seed) => {
            tracing::info!("Sampler seeded with fixed seed {}", seed);
            Sampler::with_seed(seed)
        }
        None => Sampler::from_entropy(),
    };

    // Create shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        delay,
        table,
        sampler,
    });

    let app = router::create_router(&state)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        "Liminal Network Space server running at http://localhost:{}",
        config.port
    );
    tracing::info!("Ready to receive requests and respond with random delays and status codes");

    // Serves until terminated externally; no drain logic by design.
    axum::serve(listener, app).await?;

    Ok(())
}
