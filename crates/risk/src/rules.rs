//! Individual checks that turn token data into factors.

use shared::models::{
    Holder, PositiveFactor, PositiveFactorKind, RiskFactor, RiskFactorKind, Severity, TokenInfo,
    Transaction,
};

/// Top-holder share above which concentration is HIGH
pub const HIGH_CONCENTRATION_PERCENT: f64 = 50.0;
/// Top-holder share above which concentration is MEDIUM
pub const MEDIUM_CONCENTRATION_PERCENT: f64 = 20.0;

/// Outcome of a single check
#[derive(Debug, Clone, PartialEq)]
pub enum Finding {
    Risk(RiskFactor),
    Positive(PositiveFactor),
}

/// Holder concentration, judged on the largest holder share.
///
/// Order of `holders` does not matter. An empty list yields no finding at all.
pub fn holder_concentration(holders: &[Holder]) -> Option<Finding> {
    let top = holders
        .iter()
        .max_by(|a, b| a.percentage.total_cmp(&b.percentage))?;
    let description = format!("Single holder owns {:.2}% of tokens", top.percentage);

    let severity = if top.percentage > HIGH_CONCENTRATION_PERCENT {
        Severity::High
    } else if top.percentage > MEDIUM_CONCENTRATION_PERCENT {
        Severity::Medium
    } else {
        return Some(Finding::Positive(PositiveFactor {
            kind: PositiveFactorKind::HolderDistribution,
            description: "Token has good holder distribution".to_string(),
        }));
    };

    Some(Finding::Risk(RiskFactor {
        kind: RiskFactorKind::HolderConcentration,
        description,
        severity,
    }))
}

/// Successful vs. failed transactions. Anything but `SUCCESS` is failed.
pub fn transaction_health(transactions: &[Transaction]) -> Option<Finding> {
    if transactions.is_empty() {
        return None;
    }

    let successful = transactions.iter().filter(|tx| tx.is_success()).count();
    let failed = transactions.len() - successful;

    if failed > successful {
        Some(Finding::Risk(RiskFactor {
            kind: RiskFactorKind::FailedTransactions,
            description: "High rate of failed transactions".to_string(),
            severity: Severity::Medium,
        }))
    } else {
        Some(Finding::Positive(PositiveFactor {
            kind: PositiveFactorKind::TransactionHealth,
            description: "Healthy transaction success rate".to_string(),
        }))
    }
}

/// Positive signals from token metadata
pub fn metadata_factors(token_info: &TokenInfo) -> Vec<PositiveFactor> {
    let mut factors = Vec::new();

    if token_info.description().is_some() {
        factors.push(PositiveFactor {
            kind: PositiveFactorKind::Documentation,
            description: "Token has proper documentation".to_string(),
        });
    }

    if token_info.website().is_some() {
        factors.push(PositiveFactor {
            kind: PositiveFactorKind::Website,
            description: "Token has an official website".to_string(),
        });
    }

    factors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holder(percentage: f64) -> Holder {
        Holder {
            account: "top.near".to_string(),
            amount: percentage,
            percentage,
        }
    }

    fn tx(status: &str) -> Transaction {
        Transaction {
            event_index: None,
            affected_account_id: "a.near".to_string(),
            involved_account_id: "b.near".to_string(),
            delta_amount: "1".to_string(),
            cause: "TRANSFER".to_string(),
            receipt_id: None,
            block_timestamp: None,
            block_height: None,
            status: status.to_string(),
        }
    }

    fn txs(successes: usize, failures: usize) -> Vec<Transaction> {
        std::iter::repeat_with(|| tx("SUCCESS"))
            .take(successes)
            .chain(std::iter::repeat_with(|| tx("FAILURE")).take(failures))
            .collect()
    }

    fn risk_severity(finding: Option<Finding>) -> Option<Severity> {
        match finding {
            Some(Finding::Risk(factor)) => Some(factor.severity),
            _ => None,
        }
    }

    #[test]
    fn test_concentration_boundaries() {
        assert_eq!(risk_severity(holder_concentration(&[holder(50.01)])), Some(Severity::High));
        assert_eq!(risk_severity(holder_concentration(&[holder(50.0)])), Some(Severity::Medium));
        assert_eq!(risk_severity(holder_concentration(&[holder(20.01)])), Some(Severity::Medium));
        assert_eq!(risk_severity(holder_concentration(&[holder(20.0)])), None);
    }

    #[test]
    fn test_concentration_at_20_is_good_distribution() {
        match holder_concentration(&[holder(20.0)]) {
            Some(Finding::Positive(factor)) => {
                assert_eq!(factor.kind, PositiveFactorKind::HolderDistribution)
            }
            other => panic!("expected positive finding, got {:?}", other),
        }
    }

    #[test]
    fn test_concentration_uses_largest_share_regardless_of_order() {
        let unsorted = [holder(10.0), holder(70.0), holder(20.0)];
        match holder_concentration(&unsorted) {
            Some(Finding::Risk(factor)) => {
                assert_eq!(factor.severity, Severity::High);
                assert_eq!(factor.description, "Single holder owns 70.00% of tokens");
            }
            other => panic!("expected risk finding, got {:?}", other),
        }
    }

    #[test]
    fn test_concentration_empty_holders() {
        assert_eq!(holder_concentration(&[]), None);
    }

    #[test]
    fn test_concentration_description() {
        match holder_concentration(&[holder(60.0)]) {
            Some(Finding::Risk(factor)) => {
                assert_eq!(factor.kind, RiskFactorKind::HolderConcentration);
                assert_eq!(factor.description, "Single holder owns 60.00% of tokens");
            }
            other => panic!("expected risk finding, got {:?}", other),
        }
    }

    #[test]
    fn test_more_failures_than_successes() {
        match transaction_health(&txs(3, 5)) {
            Some(Finding::Risk(factor)) => {
                assert_eq!(factor.kind, RiskFactorKind::FailedTransactions);
                assert_eq!(factor.severity, Severity::Medium);
            }
            other => panic!("expected risk finding, got {:?}", other),
        }
    }

    #[test]
    fn test_more_successes_than_failures() {
        assert!(matches!(
            transaction_health(&txs(5, 3)),
            Some(Finding::Positive(_))
        ));
    }

    #[test]
    fn test_equal_counts_are_healthy() {
        assert!(matches!(
            transaction_health(&txs(4, 4)),
            Some(Finding::Positive(_))
        ));
    }

    #[test]
    fn test_unknown_status_counts_as_failed() {
        let mixed = vec![tx("SUCCESS"), tx("UNKNOWN"), tx("")];
        assert!(matches!(transaction_health(&mixed), Some(Finding::Risk(_))));
    }

    #[test]
    fn test_no_transactions() {
        assert_eq!(transaction_health(&[]), None);
    }

    #[test]
    fn test_metadata_factors() {
        let mut info = TokenInfo::default();
        assert!(metadata_factors(&info).is_empty());

        info.0.insert("description".to_string(), "Stable token".into());
        info.0.insert("website".to_string(), "https://example.org".into());
        let kinds: Vec<_> = metadata_factors(&info).into_iter().map(|f| f.kind).collect();
        assert_eq!(
            kinds,
            vec![PositiveFactorKind::Documentation, PositiveFactorKind::Website]
        );
    }
}
