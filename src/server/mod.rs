// src/server/mod.rs
//! CarbonTrack HTTP server
//!
//! Thin JSON layer over the calculator, record store and aggregator:
//! - `GET /categories` lists the factor table
//! - `POST /calculate` computes and records an emission
//! - `GET /history` returns recent records
//! - `GET /stats` returns the aggregate breakdown and recommendations

mod handlers;
mod routes;

pub use routes::create_router;

use crate::config::DEFAULT_HISTORY_LIMIT;
use crate::factors::FactorTable;
use anyhow::Result;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to
    pub bind_addr: SocketAddr,
    /// Path to the emissions database
    pub db_path: PathBuf,
    /// CORS allowed origins (empty = any origin)
    pub cors_allowed_origins: Vec<String>,
    /// Records returned by history when the request has no limit
    pub history_limit: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            db_path: PathBuf::from("carbon.db"),
            cors_allowed_origins: Vec::new(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

/// Shared server state; immutable after startup
pub struct ServerState {
    pub config: ServerConfig,
    pub factors: Arc<FactorTable>,
}

impl ServerState {
    pub fn new(config: ServerConfig, factors: Arc<FactorTable>) -> Self {
        Self { config, factors }
    }
}

/// Start the server
pub async fn run_server(config: ServerConfig, factors: FactorTable) -> Result<()> {
    tracing::info!("Starting CarbonTrack server on {}", config.bind_addr);
    tracing::info!("Database: {:?}", config.db_path);
    tracing::info!(
        "Factor table: {} categories ({})",
        factors.categories().len(),
        factors.category_names().join(", ")
    );

    let db_path = config.db_path.clone();
    tokio::task::spawn_blocking(move || crate::db::init(&db_path)).await??;

    let bind_addr = config.bind_addr;
    let state = Arc::new(ServerState::new(config, Arc::new(factors)));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("CarbonTrack is ready to serve");

    axum::serve(listener, app).await?;
    Ok(())
}
