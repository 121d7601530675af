// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_service::DashboardService;
use crate::application::snapshot_service::SnapshotService;
use crate::infrastructure::config::load_config;
use crate::infrastructure::csv_repository::CsvTableRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    get_dashboard, get_salesperson_funnel, health_check, list_periods, refresh,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_config()?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(CsvTableRepository::new(&config.data));

    // Create services (application layer)
    let salespeople = config.data.salespeople.iter().map(|p| p.name.clone()).collect();
    let snapshots = SnapshotService::new(repository, salespeople);
    let dashboard_service = DashboardService::new(snapshots, &config);

    // Create application state
    let state = Arc::new(AppState { dashboard_service });

    // Build router (presentation layer)
    // Responses are compressed in the handlers, so no CompressionLayer here
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/periods", get(list_periods))
        .route("/dashboard", get(get_dashboard))
        .route("/funnels/:salesperson", get(get_salesperson_funnel))
        .route("/refresh", post(refresh))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config.server.bind.parse()?;
    tracing::info!(
        "Starting sales-funnel dashboard on {} (data dir {})",
        addr,
        config.data.dir.display()
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
