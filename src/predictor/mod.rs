//! Predictor Module
//!
//! One capability, several backends:
//! - `rule_based`: the built-in scorer, always available
//! - `remote`: an external model service reached over HTTP
//! - `fallback`: try a primary predictor, fall through to the scorer
//!
//! ```text
//! request ──► FallbackPredictor ──► primary (remote model, bounded by timeout)
//!                     │                   │ error / timeout / success=false
//!                     │                   ▼
//!                     └─────────────► RuleBasedPredictor ──► annotated result
//! ```

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{EmployeeRecord, PredictionResult};
use crate::scoring::ScoreError;

pub mod fallback;
pub mod remote;
pub mod rule_based;

pub use fallback::FallbackPredictor;
pub use remote::RemoteModelPredictor;
pub use rule_based::RuleBasedPredictor;

/// Default bound on a primary predictor call
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum PredictorError {
    #[error(transparent)]
    Score(#[from] ScoreError),

    #[error("model service request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("model service responded with {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed model response: {0}")]
    Malformed(String),

    #[error("model rejected input: {0}")]
    Rejected(String),

    #[error("model service timed out after {0:?}")]
    Timeout(Duration),
}

#[async_trait]
pub trait Predictor: Send + Sync {
    /// Short identifier used in logs and health output
    fn name(&self) -> &'static str;

    async fn predict(&self, record: &EmployeeRecord) -> Result<PredictionResult, PredictorError>;
}
