//! # Clinic Slots API
//!
//! The API crate provides the web server for the clinic slot availability
//! model. The booking screen posts the day it is rendering along with the
//! already booked start times, and gets back every slot of the day tagged as
//! available, occupied or past.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Resolve defaults and call into `clinicslots-core`
//! - **Middleware**: Error mapping
//! - **Config**: Environment configuration and clinic defaults
//! - **Clock**: Where "now" comes from when a request does not say

/// Source of the current time
pub mod clock;
/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Middleware for error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use eyre::{Result, WrapErr};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use crate::{
    clock::{Clock, SystemClock},
    config::ClinicDefaults,
};

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// Schedule applied when a request leaves working hours or slot length out
    pub defaults: ClinicDefaults,
    /// Clock consulted when a request does not carry its own "now"
    pub clock: Arc<dyn Clock>,
}

impl ApiState {
    pub fn new(defaults: ClinicDefaults, clock: Arc<dyn Clock>) -> Self {
        Self { defaults, clock }
    }
}

/// Builds the application router with all routes attached to `state`
pub fn app(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Slot listing and selection endpoints
        .merge(routes::slots::routes())
        .with_state(state)
}

/// Starts the API server with the provided configuration
///
/// This function initializes logging, configures routes and middleware, and
/// serves HTTP until the process is stopped.
///
/// # Example
///
/// ```no_run
/// # async fn run() -> eyre::Result<()> {
/// let config = clinicslots_api::config::ApiConfig::from_env()?;
/// clinicslots_api::start_server(config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: config::ApiConfig) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state = Arc::new(ApiState::new(config.clinic, Arc::new(SystemClock)));
    let app = app(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let origins = origins
            .iter()
            .map(|origin| origin.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .wrap_err("Invalid API_CORS_ORIGINS value")?;

        let cors = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
            .allow_origin(origins);

        app.layer(cors)
    } else {
        app
    };

    // Request tracing and timeout
    let app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("Failed to bind {addr}"))?;
    info!(
        opens_at = %config.clinic.working_hours.start,
        closes_at = %config.clinic.working_hours.end,
        slot_minutes = config.clinic.slot_duration_minutes,
        "Server listening on http://{}",
        addr
    );
    axum::serve(listener, app).await?;

    Ok(())
}
