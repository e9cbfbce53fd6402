//! Rule-based token risk scoring
//!
//! Turns a normalized [`TokenData`] snapshot into an [`Analysis`]:
//! - Holder concentration of the largest holder (HIGH above 50%, MEDIUM above 20%)
//! - Transaction health (MEDIUM when failures outnumber successes)
//! - Metadata positives (description, website)
//!
//! Severity weights are summed (HIGH 3, MEDIUM 2, LOW 1), optionally reduced
//! by 0.5 per positive factor, and classified into an overall label. The
//! engine is pure: the same snapshot always yields the same assessment.

pub mod rules;
pub mod score;

use serde::Serialize;
use shared::config::RiskConfig;
use shared::models::{Analysis, TokenData};
use tracing::debug;

use rules::Finding;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub analysis: Analysis,
    /// Adjusted score; `None` when there was nothing to score
    pub risk_score: Option<f64>,
}

impl RiskAssessment {
    pub fn unknown() -> Self {
        Self {
            analysis: Analysis::unknown(),
            risk_score: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RiskEngine {
    policy: RiskConfig,
}

impl RiskEngine {
    pub fn new(policy: RiskConfig) -> Self {
        Self { policy }
    }

    pub fn assess(&self, data: &TokenData) -> RiskAssessment {
        if !data.has_activity() {
            return RiskAssessment::unknown();
        }

        let mut analysis = Analysis::unknown();
        analysis
            .positive_factors
            .extend(rules::metadata_factors(&data.token_info));

        let findings = [
            rules::holder_concentration(&data.holders),
            rules::transaction_health(&data.transactions),
        ];
        for finding in findings.into_iter().flatten() {
            match finding {
                Finding::Risk(factor) => analysis.risk_factors.push(factor),
                Finding::Positive(factor) => analysis.positive_factors.push(factor),
            }
        }

        let risk_score = score::total_weight(&analysis.risk_factors);
        let adjusted = score::adjusted_score(
            risk_score,
            analysis.positive_factors.len(),
            self.policy.positive_factor_adjustment,
        );
        analysis.overall_risk = score::classify(adjusted, self.policy.zero_score_risk);

        debug!(
            "Risk assessment: {} risk factors, {} positive factors, score {} -> {}",
            analysis.risk_factors.len(),
            analysis.positive_factors.len(),
            adjusted,
            analysis.overall_risk
        );

        RiskAssessment {
            analysis,
            risk_score: Some(adjusted),
        }
    }
}
