//! Rule-Based Attrition Scorer
//!
//! Input: EmployeeRecord (or an already coerced EmployeeProfile)
//! Output: PredictionResult
//!
//! Deterministic and explainable: every point of risk maps to one rule in
//! `rules::RiskFactor`.

use std::collections::BTreeMap;

use thiserror::Error;

use super::rules::{
    RiskFactor, LONG_COMMUTE_KM, LONG_TENURE_YEARS, LOW_INCOME, LOW_JOB_SATISFACTION,
    LOW_WORK_LIFE_BALANCE, NEW_HIRE_YEARS, RISK_CAP, RULE_BASED_MODEL_TYPE, SENIOR_AGE, YOUNG_AGE,
};
use crate::models::{EmployeeProfile, EmployeeRecord, PredictionResult};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

/// Score a raw record. Fails only when a required field is missing.
pub fn score(record: &EmployeeRecord) -> Result<PredictionResult, ScoreError> {
    record.check_required()?;
    Ok(score_profile(&record.profile()))
}

/// Score an already coerced profile
pub fn score_profile(profile: &EmployeeProfile) -> PredictionResult {
    let mut risk_score = 0.0f64;
    let mut feature_importance = BTreeMap::new();

    for factor in RiskFactor::ALL {
        let contribution = if is_triggered(factor, profile) {
            tracing::trace!("Rule fired: {} (+{})", factor, factor.weight());
            factor.weight()
        } else {
            0.0
        };
        risk_score += contribution;
        feature_importance.insert(factor.label().to_string(), contribution);
    }

    let will_leave = risk_score.min(RISK_CAP);

    tracing::trace!(
        "Rule-based score: raw={:.2}, will_leave={:.2}",
        risk_score, will_leave
    );

    PredictionResult::from_leave_probability(will_leave, RULE_BASED_MODEL_TYPE, feature_importance)
}

/// Condition table
pub fn is_triggered(factor: RiskFactor, p: &EmployeeProfile) -> bool {
    match factor {
        RiskFactor::Age => p.age < YOUNG_AGE || p.age > SENIOR_AGE,
        RiskFactor::DistanceFromHome => p.distance_from_home > LONG_COMMUTE_KM,
        RiskFactor::MonthlyIncome => p.monthly_income < LOW_INCOME,
        RiskFactor::OverTime => p.over_time,
        RiskFactor::JobSatisfaction => p.job_satisfaction <= LOW_JOB_SATISFACTION,
        RiskFactor::WorkLifeBalance => p.work_life_balance <= LOW_WORK_LIFE_BALANCE,
        RiskFactor::YearsAtCompany => {
            p.years_at_company < NEW_HIRE_YEARS || p.years_at_company > LONG_TENURE_YEARS
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
