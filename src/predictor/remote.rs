//! Remote Model Predictor
//!
//! HTTP client for an external attrition model service.
//! Sends the full employee record, expects the standard prediction body back.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use super::{Predictor, PredictorError};
use crate::models::{EmployeeRecord, PredictionResult};

pub struct RemoteModelPredictor {
    url: String,
    http_client: reqwest::Client,
}

impl RemoteModelPredictor {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, PredictorError> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            url: url.into(),
            http_client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Predictor for RemoteModelPredictor {
    fn name(&self) -> &'static str {
        "remote-model"
    }

    async fn predict(&self, record: &EmployeeRecord) -> Result<PredictionResult, PredictorError> {
        tracing::debug!("Calling model service at {}", self.url);

        let response = self.http_client.post(&self.url).json(record).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PredictorError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| PredictorError::Malformed(e.to_string()))?;

        parse_model_response(body)
    }
}

/// Interpret a model service response body
fn parse_model_response(body: Value) -> Result<PredictionResult, PredictorError> {
    let success = body.get("success").and_then(Value::as_bool).unwrap_or(false);
    if !success {
        let error = body
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("Unknown error from model service");
        return Err(PredictorError::Rejected(error.to_string()));
    }

    let mut result: PredictionResult =
        serde_json::from_value(body).map_err(|e| PredictorError::Malformed(e.to_string()))?;
    // The response envelope writes its own flag
    result.extra.remove("success");
    result.check_invariants().map_err(PredictorError::Malformed)?;

    Ok(result)
}
