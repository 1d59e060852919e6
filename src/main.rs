// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_service::DashboardService;
use crate::application::dataset_repository::DatasetRepository;
use crate::application::streaming_service::StreamingDashboardService;
use crate::infrastructure::config::{SourceKind, SourceSettings, load_app_config};
use crate::infrastructure::directory_repository::DirectoryRepository;
use crate::infrastructure::mongo_repository::MongoRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    dashboard_json, dashboard_page, dataset_json, health_check, stream_dashboard,
};

async fn build_repository(source: &SourceSettings) -> anyhow::Result<Arc<dyn DatasetRepository>> {
    let repository: Arc<dyn DatasetRepository> = match source.kind {
        SourceKind::MongoDb => Arc::new(MongoRepository::connect(&source.uri, &source.database).await?),
        SourceKind::Directory => Arc::new(DirectoryRepository::new(source.directory()?.clone())),
    };
    tracing::info!("Using {:?} data source", source.kind);
    Ok(repository)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_app_config()?;

    // Create repository (infrastructure layer)
    let repository = build_repository(&config.source).await?;

    // Create services (application layer)
    let dashboard_service = DashboardService::new(repository.clone(), config.dashboard.title.clone());
    let streaming_service = StreamingDashboardService::new(repository, config.dashboard.title);

    // Create application state
    let state = Arc::new(AppState {
        dashboard_service,
        streaming_service,
    });

    // Build router (presentation layer)
    // Compression is applied by the response builders, so no CompressionLayer here
    let router = Router::new()
        .route("/", get(dashboard_page))
        .route("/healthz", get(health_check))
        .route("/api/dashboard", get(dashboard_json))
        .route("/api/dashboard/stream", get(stream_dashboard))
        .route("/api/datasets/:name", get(dataset_json))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config
        .server
        .bind_addr
        .parse()
        .with_context(|| format!("Invalid server.bind_addr: {}", config.server.bind_addr))?;
    tracing::info!("Starting retail-dashboard on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
