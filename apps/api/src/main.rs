mod admin;
mod appointments;
mod auth;
mod candidates;
mod config;
mod counselor;
mod courses;
mod editor;
mod errors;
mod events;
mod jobs;
mod listing;
mod models;
mod pages;
mod profile;
mod resume;
mod routes;
mod saved;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::seed::SeedData;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CareerHub API v{}", env!("CARGO_PKG_VERSION"));

    let seed = SeedData::load(config.seed_path.as_deref())?;
    info!(
        "Loaded {} users, {} jobs, {} events, {} counselors",
        seed.users.len(),
        seed.jobs.len(),
        seed.events.len(),
        seed.counselors.len()
    );

    let state = AppState::from_seed(config.clone(), seed);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
