//! # Subscription Calendar Backend
//!
//! Computes the subscription renewal calendar shown on the personal-finance
//! dashboard: for each day of a displayed month, which subscriptions are
//! predicted to renew and which charges actually happened.
//!
//! ## Architecture
//!
//! ```text
//! Rendering layer (dashboard)
//!     ↓
//! IO Layer (REST API, DTO mappers)
//!     ↓
//! Domain Layer (bucketing, navigation, grid assembly)
//! ```
//!
//! Subscriptions and charge history are fetched by the rendering layer from
//! the finance API and posted here; nothing is persisted.

pub mod config;
pub mod domain;
pub mod error;
pub mod io;

use anyhow::Result;
use axum::{http::Method, Router};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::config::ServerConfig;
use crate::domain::CalendarService;
use crate::io::rest::{calendar_apis, logging_apis};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub calendar_service: CalendarService,
}

/// Initialize the backend services from configuration
pub fn initialize_backend(config: &ServerConfig) -> AppState {
    info!("Setting up calendar service (currency {})", config.currency);
    AppState {
        calendar_service: CalendarService::with_currency(&config.currency),
    }
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, config: &ServerConfig) -> Result<Router> {
    // CORS setup to allow the rendering layer to make requests
    let cors = CorsLayer::new()
        .allow_origin(config.allow_origin()?)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    let api_routes = Router::new()
        .nest("/calendar", calendar_apis::router())
        .nest("/logs", logging_apis::router());

    Ok(Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state))
}
