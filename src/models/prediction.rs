//! Prediction result model

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::scoring::rules::{HIGH_RISK_THRESHOLD, LEAVE_THRESHOLD, MEDIUM_RISK_THRESHOLD};

/// Allowed drift of `will_stay + will_leave` from 1.0 in external results
pub const PROBABILITY_TOLERANCE: f64 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_probability(will_leave: f64) -> Self {
        if will_leave > HIGH_RISK_THRESHOLD {
            RiskLevel::High
        } else if will_leave > MEDIUM_RISK_THRESHOLD {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PredictionLabel {
    #[serde(rename = "Will Stay")]
    WillStay,
    #[serde(rename = "Will Leave")]
    WillLeave,
}

impl PredictionLabel {
    pub fn from_prediction(prediction: u8) -> Self {
        if prediction == 1 {
            PredictionLabel::WillLeave
        } else {
            PredictionLabel::WillStay
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Probability {
    pub will_stay: f64,
    pub will_leave: f64,
}

/// Output of any predictor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// 0 = will stay, 1 = will leave
    pub prediction: u8,
    pub prediction_label: PredictionLabel,
    pub probability: Probability,
    pub risk_level: RiskLevel,
    pub confidence: f64,
    pub model_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_importance: Option<BTreeMap<String, f64>>,

    /// Keys an external model sent that are not modelled above; written
    /// back unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PredictionResult {
    /// Derive every field from the leave probability
    pub fn from_leave_probability(
        will_leave: f64,
        model_type: impl Into<String>,
        feature_importance: BTreeMap<String, f64>,
    ) -> Self {
        let will_stay = 1.0 - will_leave;
        let prediction = u8::from(will_leave > LEAVE_THRESHOLD);

        Self {
            prediction,
            prediction_label: PredictionLabel::from_prediction(prediction),
            probability: Probability { will_stay, will_leave },
            risk_level: RiskLevel::from_probability(will_leave),
            confidence: will_stay.max(will_leave),
            model_type: model_type.into(),
            feature_importance: Some(feature_importance),
            extra: Map::new(),
        }
    }

    pub fn will_leave(&self) -> bool {
        self.prediction == 1
    }

    /// Structural checks applied to results from external models
    pub fn check_invariants(&self) -> Result<(), String> {
        let Probability { will_stay, will_leave } = self.probability;

        if !(0.0..=1.0).contains(&will_stay) || !(0.0..=1.0).contains(&will_leave) {
            return Err(format!(
                "probability out of range: will_stay={}, will_leave={}",
                will_stay, will_leave
            ));
        }
        if (will_stay + will_leave - 1.0).abs() > PROBABILITY_TOLERANCE {
            return Err(format!(
                "probabilities sum to {}, expected 1",
                will_stay + will_leave
            ));
        }
        if self.prediction > 1 {
            return Err(format!("prediction must be 0 or 1, got {}", self.prediction));
        }
        if self.prediction_label != PredictionLabel::from_prediction(self.prediction) {
            return Err("prediction_label does not match prediction".to_string());
        }
        let negative = self
            .feature_importance
            .iter()
            .flatten()
            .find(|(_, w)| **w < 0.0);
        if let Some((name, weight)) = negative {
            return Err(format!("negative importance for {}: {}", name, weight));
        }

        Ok(())
    }
}

/// Body of a successful prediction response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub success: bool,

    #[serde(flatten)]
    pub result: PredictionResult,

    /// Set whenever the rule-based scorer produced the result
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// Error reported by the model service itself
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_error: Option<String>,

    /// Transport / protocol failure talking to the model service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_details: Option<String>,
}

impl PredictionResponse {
    pub fn from_model(result: PredictionResult) -> Self {
        Self {
            success: true,
            result,
            note: None,
            model_error: None,
            error_details: None,
        }
    }

    pub fn fallback(result: PredictionResult, note: impl Into<String>) -> Self {
        Self {
            note: Some(note.into()),
            ..Self::from_model(result)
        }
    }

    pub fn with_model_error(mut self, error: impl Into<String>) -> Self {
        self.model_error = Some(error.into());
        self
    }

    pub fn with_error_details(mut self, details: impl Into<String>) -> Self {
        self.error_details = Some(details.into());
        self
    }

    pub fn used_fallback(&self) -> bool {
        self.note.is_some()
    }
}
