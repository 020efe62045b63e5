//! # Backend Module
//!
//! Contains all non-UI logic for the tour admin availability service.
//!
//! ## Architecture
//!
//! ```text
//! Admin UI
//!     ↓
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (reducers, services)
//!     ↓
//! Storage Layer (CSV files)
//! ```

pub mod storage;
pub mod domain;
pub mod io;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::backend::domain::{AvailabilityService, CalendarService};
use crate::backend::storage::{AvailabilityRepository, CsvConnection};
use crate::config::AppConfig;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub availability_service: AvailabilityService,
}

impl AppState {
    /// Wire services on top of a CSV data directory
    pub fn new(connection: CsvConnection) -> Self {
        let repository = AvailabilityRepository::new(connection);
        let availability_service = AvailabilityService::new(Arc::new(repository), CalendarService::new());
        Self { availability_service }
    }
}

/// Initialize the backend with all required services
pub fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up data directory at {}", config.data_directory.display());
    let connection = CsvConnection::new(&config.data_directory)
        .with_context(|| format!("Failed to open data directory {}", config.data_directory.display()))?;

    info!("Setting up domain model");
    Ok(AppState::new(connection))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, allowed_origin: HeaderValue) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new().nest("/availability", io::rest::availability_apis::router());

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}
