// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::chart_service::ChartService;
use crate::infrastructure::chart_board::ChartBoard;
use crate::infrastructure::config::load_app_config;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{get_chart, health_check, reset_chart, upload_chart};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_app_config()?;

    // The board is the rendering collaborator; the service owns its handle
    let chart_board = Arc::new(ChartBoard::new());
    let chart_service = Arc::new(ChartService::new(chart_board.clone(), &config));

    let state = Arc::new(AppState {
        chart_service,
        chart_board,
        max_upload_bytes: config.server.max_upload_bytes,
    });

    let router = Router::new()
        .route("/healthz", get(health_check))
        .route(
            "/charts",
            get(get_chart).post(upload_chart).delete(reset_chart),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr: SocketAddr = config.server.bind.parse()?;
    tracing::info!("Starting bpm-analyzer on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
