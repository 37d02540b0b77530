//! Rule-based predictor

use async_trait::async_trait;

use super::{Predictor, PredictorError};
use crate::models::{EmployeeRecord, PredictionResult};
use crate::scoring;

#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedPredictor;

#[async_trait]
impl Predictor for RuleBasedPredictor {
    fn name(&self) -> &'static str {
        "rule-based"
    }

    async fn predict(&self, record: &EmployeeRecord) -> Result<PredictionResult, PredictorError> {
        Ok(scoring::score(record)?)
    }
}
