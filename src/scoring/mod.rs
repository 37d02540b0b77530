//! Scoring Module
//!
//! Rule-based attrition risk scoring. Pure, synchronous and stateless;
//! safe to call from any number of tasks at once.
//!
//! ## Structure
//! - `rules`: Factor catalogue, weights and thresholds
//! - `scorer`: Scoring logic
//!
//! ## Usage
//! ```ignore
//! use attrition_risk::scoring::score;
//!
//! let result = score(&record)?;
//! println!("{} ({:.0}%)", result.risk_level, result.probability.will_leave * 100.0);
//! ```

pub mod rules;
pub mod scorer;

pub use rules::{RiskFactor, RULE_BASED_MODEL_TYPE};
pub use scorer::{is_triggered, score, score_profile, ScoreError};
