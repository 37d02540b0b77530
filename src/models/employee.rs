//! Employee record model
//!
//! The record arrives straight from the prediction form, so numbers may be
//! JSON numbers or numeric strings, and blank inputs mean "not provided".

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use crate::scoring::ScoreError;

/// Required attributes, in the order they are reported when missing
pub const REQUIRED_FIELDS: [&str; 4] = ["Age", "DistanceFromHome", "MonthlyIncome", "YearsAtCompany"];

/// Raw employee attributes as submitted by a caller
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct EmployeeRecord {
    #[serde(rename = "Age", default, deserialize_with = "provided", skip_serializing_if = "Option::is_none")]
    #[validate(required(message = "Age"))]
    pub age: Option<Value>,

    #[serde(rename = "DistanceFromHome", default, deserialize_with = "provided", skip_serializing_if = "Option::is_none")]
    #[validate(required(message = "DistanceFromHome"))]
    pub distance_from_home: Option<Value>,

    #[serde(rename = "MonthlyIncome", default, deserialize_with = "provided", skip_serializing_if = "Option::is_none")]
    #[validate(required(message = "MonthlyIncome"))]
    pub monthly_income: Option<Value>,

    #[serde(rename = "YearsAtCompany", default, deserialize_with = "provided", skip_serializing_if = "Option::is_none")]
    #[validate(required(message = "YearsAtCompany"))]
    pub years_at_company: Option<Value>,

    #[serde(rename = "OverTime", default, deserialize_with = "provided", skip_serializing_if = "Option::is_none")]
    pub over_time: Option<Value>,

    #[serde(rename = "JobSatisfaction", default, deserialize_with = "provided", skip_serializing_if = "Option::is_none")]
    pub job_satisfaction: Option<Value>,

    #[serde(rename = "WorkLifeBalance", default, deserialize_with = "provided", skip_serializing_if = "Option::is_none")]
    pub work_life_balance: Option<Value>,

    /// Descriptive attributes (Department, JobRole, ...). Forwarded to the
    /// model service, ignored by the rule-based scorer.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// `null`, `""` and whitespace-only strings count as absent
fn provided<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        other => Some(other),
    })
}

impl EmployeeRecord {
    /// Reject records missing a required attribute.
    ///
    /// Reports the first missing field in `REQUIRED_FIELDS` order.
    pub fn check_required(&self) -> Result<(), ScoreError> {
        let Err(errors) = self.validate() else {
            return Ok(());
        };

        let missing: Vec<String> = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .collect();

        match REQUIRED_FIELDS.into_iter().find(|field| missing.iter().any(|m| m.as_str() == *field)) {
            Some(field) => Err(ScoreError::MissingField(field)),
            None => Ok(()),
        }
    }

    /// Coerced numeric view used by the scorer
    pub fn profile(&self) -> EmployeeProfile {
        let neutral = EmployeeProfile::default();

        EmployeeProfile {
            age: number(self.age.as_ref()).unwrap_or(neutral.age),
            distance_from_home: number(self.distance_from_home.as_ref())
                .unwrap_or(neutral.distance_from_home),
            monthly_income: number(self.monthly_income.as_ref()).unwrap_or(neutral.monthly_income),
            years_at_company: number(self.years_at_company.as_ref())
                .unwrap_or(neutral.years_at_company),
            over_time: matches!(&self.over_time, Some(Value::String(s)) if s == "Yes"),
            job_satisfaction: number(self.job_satisfaction.as_ref())
                .unwrap_or(neutral.job_satisfaction),
            work_life_balance: number(self.work_life_balance.as_ref())
                .unwrap_or(neutral.work_life_balance),
        }
    }
}

/// Numbers and numeric strings; anything else (or non-finite) is `None`
fn number(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;

    parsed.is_finite().then_some(parsed)
}

/// Employee attributes after coercion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmployeeProfile {
    pub age: f64,
    pub distance_from_home: f64,
    pub monthly_income: f64,
    pub years_at_company: f64,
    pub over_time: bool,
    pub job_satisfaction: f64,
    pub work_life_balance: f64,
}

/// Neutral values: none of them triggers a scoring rule
impl Default for EmployeeProfile {
    fn default() -> Self {
        Self {
            age: 30.0,
            distance_from_home: 5.0,
            monthly_income: 5000.0,
            years_at_company: 5.0,
            over_time: false,
            job_satisfaction: 3.0,
            work_life_balance: 3.0,
        }
    }
}
