// Define data modules
mod models;   // Data structures (Course, DayBucket, StudyPlan)
mod duration; // "2h 30m" <-> minutes
mod logic;    // Core day partitioning logic
mod catalog;  // Course data sources
mod render;   // Markdown document + HTML preview
mod store;    // Persistent storage of rendered plans
mod config;   // Environment based settings
mod error;    // HTTP error responses
mod routes_plan; // HTTP handlers for plan APIs

use std::{path::Path, sync::Arc};

// Import axum routing utilities and Router
use axum::{
    routing::{get, post}, // HTTP method helpers
    Router, // Main router type
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::catalog::{CourseSource, JsonCatalog, SampleCatalog};
use crate::config::Config;
use crate::routes_plan::AppState;
use crate::store::PlanStore;

fn app(state: AppState, static_dir: &Path) -> Router {
    let api = Router::new()
        .route("/health", get(routes_plan::health))
        // plans
        .route("/plans", post(routes_plan::generate_plan))
        .route("/plans/:id/download", get(routes_plan::download_plan))
        .route("/plans/:id/preview", get(routes_plan::preview_plan))
        .with_state(state);

    Router::new()
        .nest("/api", api)
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

fn course_source(cfg: &Config) -> anyhow::Result<Arc<dyn CourseSource>> {
    match &cfg.catalog_file {
        Some(path) => {
            let catalog = JsonCatalog::load(path)?;
            info!(path = %path.display(), "loaded course catalog");
            Ok(Arc::new(catalog))
        }
        None => Ok(Arc::new(SampleCatalog)),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let cfg = Config::from_env();
    let state = AppState::new(course_source(&cfg)?, PlanStore::new(&cfg.plans_dir));
    let app = app(state, &cfg.static_dir);

    let addr = cfg.addr()?;

    // Print the link to the server
    info!("Server running at http://{}", addr);
    info!("Static files: {}", cfg.static_dir.display());
    info!("API base:     http://{}/api", addr);
    info!("Plans dir:    {}", cfg.plans_dir.display());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
