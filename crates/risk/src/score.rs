use shared::models::{OverallRisk, RiskFactor};

/// Deduction applied per positive factor when adjustment is enabled
pub const POSITIVE_FACTOR_CREDIT: f64 = 0.5;

pub const HIGH_RISK_SCORE: f64 = 5.0;
pub const MEDIUM_RISK_SCORE: f64 = 3.0;

/// Sum of severity weights. Order-independent.
pub fn total_weight(factors: &[RiskFactor]) -> u32 {
    factors.iter().map(|f| f.severity.weight()).sum()
}

/// Risk score after positive-factor credit, floored at zero
pub fn adjusted_score(risk_score: u32, positive_count: usize, apply_credit: bool) -> f64 {
    let score = risk_score as f64;
    if !apply_credit {
        return score;
    }
    (score - positive_count as f64 * POSITIVE_FACTOR_CREDIT).max(0.0)
}

/// Map a score to a label; `zero_label` covers a score of exactly zero.
pub fn classify(score: f64, zero_label: OverallRisk) -> OverallRisk {
    if score >= HIGH_RISK_SCORE {
        OverallRisk::High
    } else if score >= MEDIUM_RISK_SCORE {
        OverallRisk::Medium
    } else if score > 0.0 {
        OverallRisk::Low
    } else {
        zero_label
    }
}
