//! Fallback Predictor
//!
//! Two-stage strategy: primary predictor first (bounded by a timeout), then
//! the rule-based scorer. Primary failures are logged, never returned.

use std::sync::Arc;
use std::time::Duration;

use super::{Predictor, PredictorError, RuleBasedPredictor, DEFAULT_TIMEOUT};
use crate::models::{EmployeeRecord, PredictionResponse};

pub const NOTE_NO_MODEL: &str = "Using rule-based prediction (no model service configured)";
pub const NOTE_MODEL_ERROR: &str = "Using fallback prediction due to ML model execution error";
pub const NOTE_SERVICE_ERROR: &str = "Using fallback prediction due to internal server error";

pub struct FallbackPredictor {
    primary: Option<Arc<dyn Predictor>>,
    fallback: RuleBasedPredictor,
    timeout: Duration,
}

impl FallbackPredictor {
    pub fn new(primary: Option<Arc<dyn Predictor>>, timeout: Duration) -> Self {
        Self {
            primary,
            fallback: RuleBasedPredictor,
            timeout,
        }
    }

    /// Scorer only, no primary
    pub fn rule_based() -> Self {
        Self::new(None, DEFAULT_TIMEOUT)
    }

    pub fn has_primary(&self) -> bool {
        self.primary.is_some()
    }

    /// Name of the predictor tried first
    pub fn primary_name(&self) -> &'static str {
        match &self.primary {
            Some(primary) => primary.name(),
            None => self.fallback.name(),
        }
    }

    /// Predict, falling back to the scorer on any primary failure.
    ///
    /// Only a missing required field is returned as an error; it is checked
    /// before either stage runs.
    pub async fn predict(&self, record: &EmployeeRecord) -> Result<PredictionResponse, PredictorError> {
        record.check_required()?;

        let Some(primary) = &self.primary else {
            let result = self.fallback.predict(record).await?;
            return Ok(PredictionResponse::fallback(result, NOTE_NO_MODEL));
        };

        let outcome = match tokio::time::timeout(self.timeout, primary.predict(record)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(PredictorError::Timeout(self.timeout)),
        };

        match outcome {
            Ok(result) => {
                tracing::debug!(
                    "{} predicted {} (will_leave={:.2})",
                    primary.name(),
                    result.risk_level,
                    result.probability.will_leave
                );
                Ok(PredictionResponse::from_model(result))
            }
            Err(PredictorError::Score(e)) => Err(e.into()),
            Err(PredictorError::Rejected(message)) => {
                tracing::warn!("{} returned error, using fallback: {}", primary.name(), message);
                let result = self.fallback.predict(record).await?;
                Ok(PredictionResponse::fallback(result, NOTE_MODEL_ERROR).with_model_error(message))
            }
            Err(e) => {
                tracing::warn!("{} failed, using fallback: {}", primary.name(), e);
                let result = self.fallback.predict(record).await?;
                Ok(PredictionResponse::fallback(result, NOTE_SERVICE_ERROR).with_error_details(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PredictionResult;
    use crate::scoring::{ScoreError, RULE_BASED_MODEL_TYPE};
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    enum Behaviour {
        Succeed,
        Reject,
        Fail,
        Hang,
    }

    struct StubPredictor {
        behaviour: Behaviour,
        calls: AtomicUsize,
    }

    impl StubPredictor {
        fn new(behaviour: Behaviour) -> Arc<Self> {
            Arc::new(Self {
                behaviour,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl Predictor for StubPredictor {
        fn name(&self) -> &'static str {
            "stub"
        }

        async fn predict(&self, _record: &EmployeeRecord) -> Result<PredictionResult, PredictorError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.behaviour {
                Behaviour::Succeed => Ok(PredictionResult::from_leave_probability(
                    0.81,
                    "Stub Model",
                    BTreeMap::new(),
                )),
                Behaviour::Reject => Err(PredictorError::Rejected("feature mismatch".to_string())),
                Behaviour::Fail => Err(PredictorError::Status {
                    status: 503,
                    body: "unavailable".to_string(),
                }),
                Behaviour::Hang => {
                    tokio::time::sleep(Duration::from_secs(10)).await;
                    Err(PredictorError::Malformed("unreachable".to_string()))
                }
            }
        }
    }

    fn record() -> EmployeeRecord {
        serde_json::from_value(json!({
            "Age": 24, "DistanceFromHome": 12, "MonthlyIncome": 2600,
            "YearsAtCompany": 3, "OverTime": "Yes"
        }))
        .unwrap()
    }

    fn with_primary(stub: Arc<StubPredictor>, timeout: Duration) -> FallbackPredictor {
        FallbackPredictor::new(Some(stub), timeout)
    }

    #[tokio::test]
    async fn test_no_primary_uses_scorer() {
        let predictor = FallbackPredictor::rule_based();
        let response = predictor.predict(&record()).await.unwrap();

        assert!(response.success);
        assert!(response.used_fallback());
        assert_eq!(response.note.as_deref(), Some(NOTE_NO_MODEL));
        assert_eq!(response.result.model_type, RULE_BASED_MODEL_TYPE);
        // 0.2 (age) + 0.25 (income) + 0.2 (overtime)
        assert!((response.result.probability.will_leave - 0.65).abs() < 1e-9);
        assert_eq!(predictor.primary_name(), "rule-based");
    }

    #[tokio::test]
    async fn test_primary_success_passes_through() {
        let stub = StubPredictor::new(Behaviour::Succeed);
        let predictor = with_primary(stub.clone(), Duration::from_secs(1));

        let response = predictor.predict(&record()).await.unwrap();

        assert!(!response.used_fallback());
        assert_eq!(response.result.model_type, "Stub Model");
        assert_eq!(response.result.probability.will_leave, 0.81);
        assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
        assert_eq!(predictor.primary_name(), "stub");
    }

    #[tokio::test]
    async fn test_primary_rejection_falls_back() {
        let predictor = with_primary(StubPredictor::new(Behaviour::Reject), Duration::from_secs(1));

        let response = predictor.predict(&record()).await.unwrap();

        assert_eq!(response.note.as_deref(), Some(NOTE_MODEL_ERROR));
        assert_eq!(response.model_error.as_deref(), Some("feature mismatch"));
        assert!(response.error_details.is_none());
        assert_eq!(response.result.model_type, RULE_BASED_MODEL_TYPE);
    }

    #[tokio::test]
    async fn test_primary_failure_falls_back() {
        let predictor = with_primary(StubPredictor::new(Behaviour::Fail), Duration::from_secs(1));

        let response = predictor.predict(&record()).await.unwrap();

        assert_eq!(
            response.note.as_deref(),
            Some("Using fallback prediction due to internal server error")
        );
        assert!(response.error_details.unwrap().contains("503"));
        assert!(response.model_error.is_none());
    }

    #[tokio::test]
    async fn test_primary_timeout_falls_back() {
        let predictor = with_primary(StubPredictor::new(Behaviour::Hang), Duration::from_millis(50));

        let response = predictor.predict(&record()).await.unwrap();

        assert_eq!(response.note.as_deref(), Some(NOTE_SERVICE_ERROR));
        assert!(response.error_details.unwrap().contains("timed out"));
        assert_eq!(response.result.model_type, RULE_BASED_MODEL_TYPE);
    }

    #[tokio::test]
    async fn test_missing_field_skips_primary() {
        let stub = StubPredictor::new(Behaviour::Succeed);
        let predictor = with_primary(stub.clone(), Duration::from_secs(1));

        let incomplete: EmployeeRecord =
            serde_json::from_value(json!({ "Age": 30, "DistanceFromHome": 2, "YearsAtCompany": 4 }))
                .unwrap();
        let err = predictor.predict(&incomplete).await.unwrap_err();

        assert!(matches!(
            err,
            PredictorError::Score(ScoreError::MissingField("MonthlyIncome"))
        ));
        assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
    }
}
