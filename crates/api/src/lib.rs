//! Insurance Premium Prediction API Server
//!
//! Validates raw user attributes, derives the engineered features and
//! returns the premium category predicted by the loaded classifier.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod error;
mod extract;
mod routes;
mod settings;

pub use error::{ApiError, ServerError};
pub use extract::ValidatedInput;
pub use routes::health::{HealthResponse, MessageResponse};
pub use routes::predict::{ErrorResponse, PredictionResponse, ValidationResponse};
pub use settings::ServerConfig;

use data_validator::Validator;
use inference_engine::PredictionService;

/// Application state shared across handlers. Read-only after startup.
pub struct AppState {
    /// Prediction service wrapping the loaded classifier
    pub service: PredictionService,
    /// Request validator
    pub validator: Validator,
}

impl AppState {
    /// Create new application state
    pub fn new(service: PredictionService) -> Self {
        Self {
            service,
            validator: Validator::default(),
        }
    }
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::health::root))
        .route("/predict", post(routes::predict::predict))
        .route("/health", get(routes::health::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Initialize logging. `RUST_LOG` overrides the default `info` level.
pub fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if let Err(e) = result {
        eprintln!("tracing subscriber already installed: {}", e);
    }
}

/// Load the model, then serve until interrupted.
///
/// The classifier is loaded before the listener binds, so a missing or
/// corrupt artifact stops the process without serving any request.
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let service = PredictionService::load(&config.model_path, &config.manifest_path)?;
    let state = Arc::new(AppState::new(service));
    let app = create_router(state);

    info!("Starting API server on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
