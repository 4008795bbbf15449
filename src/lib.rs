//! Animal Images - fetch random animal pictures and keep a record of them
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      API Layer (Axum)                        │
//! │  - JSON endpoints (/fetch, /last/:animal_type)              │
//! │  - HTML form (/ui)                                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Service Layer                            │
//! │  - fetch N images, record each one                          │
//! │  - most recent image per type                               │
//! └─────────────────────────────────────────────────────────────┘
//!                 │                            │
//! ┌───────────────────────────┐ ┌───────────────────────────────┐
//! │      Provider Layer        │ │          Data Layer           │
//! │  - cat / dog / bear        │ │  - SQLite (sqlx)              │
//! │    strategies              │ │  - append-only image log      │
//! └───────────────────────────┘ └───────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - `api`: HTTP handlers
//! - `service`: Business logic layer
//! - `provider`: Upstream image providers and dispatcher
//! - `data`: Database layer
//! - `config`: Configuration management
//! - `error`: Error types
//! - `metrics`: Prometheus instruments

pub mod api;
pub mod config;
pub mod data;
pub mod error;
pub mod metrics;
pub mod provider;
pub mod service;

use std::sync::Arc;

/// Application state shared across all handlers
///
/// Cloned for each request; everything inside is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: Arc<data::Database>,

    /// Image fetch and lookup operations
    pub images: Arc<service::ImageService>,
}

impl AppState {
    /// Initialize application state
    ///
    /// # Steps
    /// 1. Connect to SQLite database
    /// 2. Build the upstream HTTP client
    /// 3. Register the image providers
    ///
    /// # Errors
    /// Returns error if any initialization step fails
    pub async fn new(config: &config::AppConfig) -> Result<Self, error::AppError> {
        tracing::info!("Initializing application state...");

        // 1. Connect to SQLite database
        let db = Arc::new(data::Database::connect(&config.database.path).await?);
        tracing::info!("Database connected");

        // 2. Initialize HTTP client
        let http_client = reqwest::Client::builder()
            .user_agent(config.providers.user_agent.clone())
            .timeout(config.providers.request_timeout())
            .build()
            .map_err(|e| error::AppError::Internal(e.into()))?;

        // 3. Register providers
        let dispatcher = Arc::new(provider::ImageDispatcher::from_config(
            &config.providers,
            http_client,
        ));
        tracing::info!(
            cat = %config.providers.cat_url,
            dog = %config.providers.dog_url,
            bear = %config.providers.bear_base_url,
            "Image providers registered"
        );

        let images = Arc::new(service::ImageService::new(db.clone(), dispatcher));

        tracing::info!("Application state initialized successfully");

        Ok(Self { db, images })
    }
}

/// Build the Axum router with all routes.
///
/// This is shared by the binary and integration tests to keep route
/// composition consistent across environments.
pub fn build_router(state: AppState) -> axum::Router {
    use axum::Router;
    use tower_http::{compression::CompressionLayer, trace::TraceLayer};

    Router::new()
        .route("/health", axum::routing::get(health_check))
        .merge(api::images_router())
        .merge(api::ui_router())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
        .merge(api::metrics_router())
}

async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}
