//! Attrition Scoring Rules & Thresholds
//!
//! Fixed rule table for the rule-based scorer.
//! No scoring logic here - only constants and the factor catalogue.
//!
//! These values are tuning constants shared with downstream consumers that
//! compare rule-based output against learned models. Do not re-derive them.

// ============================================================================
// PROBABILITY THRESHOLDS
// ============================================================================

/// Leave probability never exceeds this value
pub const RISK_CAP: f64 = 0.95;

/// Above this leave probability = "Will Leave"
pub const LEAVE_THRESHOLD: f64 = 0.5;

/// Above this leave probability = High risk
pub const HIGH_RISK_THRESHOLD: f64 = 0.7;

/// Above this leave probability = Medium risk
pub const MEDIUM_RISK_THRESHOLD: f64 = 0.4;

/// Label reported in `model_type` for rule-based results
pub const RULE_BASED_MODEL_TYPE: &str = "Rule-Based Fallback Model";

// ============================================================================
// FACTOR THRESHOLDS
// ============================================================================

/// Younger than this = risk
pub const YOUNG_AGE: f64 = 25.0;

/// Older than this = risk
pub const SENIOR_AGE: f64 = 55.0;

/// Commute longer than this (km) = risk
pub const LONG_COMMUTE_KM: f64 = 20.0;

/// Monthly income below this = risk
pub const LOW_INCOME: f64 = 3000.0;

/// Satisfaction at or below this (1-4 scale) = risk
pub const LOW_JOB_SATISFACTION: f64 = 2.0;

/// Work-life balance at or below this (1-4 scale) = risk
pub const LOW_WORK_LIFE_BALANCE: f64 = 2.0;

/// Tenure below this many years = risk
pub const NEW_HIRE_YEARS: f64 = 1.0;

/// Tenure above this many years = risk
pub const LONG_TENURE_YEARS: f64 = 20.0;

// ============================================================================
// FACTORS
// ============================================================================

/// One scoring rule per variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskFactor {
    Age,
    DistanceFromHome,
    MonthlyIncome,
    OverTime,
    JobSatisfaction,
    WorkLifeBalance,
    YearsAtCompany,
}

impl RiskFactor {
    /// All factors, in accumulation order
    pub const ALL: [RiskFactor; 7] = [
        RiskFactor::Age,
        RiskFactor::DistanceFromHome,
        RiskFactor::MonthlyIncome,
        RiskFactor::OverTime,
        RiskFactor::JobSatisfaction,
        RiskFactor::WorkLifeBalance,
        RiskFactor::YearsAtCompany,
    ];

    /// Key used in `feature_importance`
    pub fn label(self) -> &'static str {
        match self {
            RiskFactor::Age => "Age",
            RiskFactor::DistanceFromHome => "Distance From Home",
            RiskFactor::MonthlyIncome => "Monthly Income",
            RiskFactor::OverTime => "Over Time",
            RiskFactor::JobSatisfaction => "Job Satisfaction",
            RiskFactor::WorkLifeBalance => "Work Life Balance",
            RiskFactor::YearsAtCompany => "Years At Company",
        }
    }

    /// Score added when the factor's condition holds
    pub fn weight(self) -> f64 {
        match self {
            RiskFactor::Age => 0.2,
            RiskFactor::DistanceFromHome => 0.15,
            RiskFactor::MonthlyIncome => 0.25,
            RiskFactor::OverTime => 0.2,
            RiskFactor::JobSatisfaction => 0.3,
            RiskFactor::WorkLifeBalance => 0.25,
            RiskFactor::YearsAtCompany => 0.15,
        }
    }
}

impl std::fmt::Display for RiskFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
