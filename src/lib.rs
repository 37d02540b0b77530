//! Attrition Risk Service
//!
//! Employee attrition risk prediction for the HR analytics dashboard.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  ATTRITION RISK SERVICE                     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐   ┌──────────────────┐   ┌────────────────┐ │
//! │  │  API      │──►│ FallbackPredictor│──►│ Model Service  │ │
//! │  │  (Axum)   │   │  (timeout bound) │   │ (optional HTTP)│ │
//! │  └───────────┘   └────────┬─────────┘   └────────────────┘ │
//! │                           │ any failure                     │
//! │                           ▼                                 │
//! │                  ┌──────────────────┐                       │
//! │                  │ Rule-Based Scorer│                       │
//! │                  └──────────────────┘                       │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod predictor;
pub mod scoring;

use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, routing::{get, post}, Router};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};

pub use error::{AppError, AppResult};

use config::Config;
use predictor::{FallbackPredictor, Predictor, PredictorError, RemoteModelPredictor};

/// Maximum accepted request body
pub const BODY_LIMIT: usize = 1024 * 1024;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub predictor: Arc<FallbackPredictor>,
}

impl AppState {
    /// Wire predictors according to configuration
    pub fn from_config(config: Config) -> Result<Self, PredictorError> {
        let timeout = config.model_timeout();

        let primary: Option<Arc<dyn Predictor>> = match &config.model_service_url {
            Some(url) => {
                let remote = RemoteModelPredictor::new(url.clone(), timeout)?;
                tracing::info!("Model service: {} (timeout {:?})", remote.url(), timeout);
                let remote: Arc<dyn Predictor> = Arc::new(remote);
                Some(remote)
            }
            None => {
                tracing::info!("No model service configured, using rule-based scorer only");
                None
            }
        };

        Ok(Self {
            predictor: Arc::new(FallbackPredictor::new(primary, timeout)),
            config,
        })
    }
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(
            "/api/predict",
            post(handlers::predict::predict).fallback(handlers::predict::method_not_allowed),
        )
        // Kept for dashboard builds that call the separate model endpoint
        .route(
            "/api/predict-model",
            post(handlers::predict::predict).fallback(handlers::predict::method_not_allowed),
        );

    Router::new()
        .route("/health", get(handlers::health::check))
        .merge(api_routes)
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
