use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

// Token models

/// Metadata for a fungible token as returned by the explorer.
///
/// Kept as an opaque JSON object so new upstream fields pass through to the
/// client untouched. Accessors treat missing and empty strings alike.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenInfo(pub Map<String, Value>);

impl TokenInfo {
    pub fn name(&self) -> Option<&str> {
        self.text("name")
    }

    pub fn symbol(&self) -> Option<&str> {
        self.text("symbol")
    }

    pub fn description(&self) -> Option<&str> {
        self.text("description")
    }

    pub fn website(&self) -> Option<&str> {
        self.text("website")
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn text(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holder {
    pub account: String,
    pub amount: f64,
    /// Share of the summed page balance, 0..=100
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub event_index: Option<String>,
    pub affected_account_id: String,
    pub involved_account_id: String,
    pub delta_amount: String,
    pub cause: String,
    pub receipt_id: Option<String>,
    pub block_timestamp: Option<String>,
    pub block_height: Option<u64>,
    pub status: String,
}

impl Transaction {
    pub const SUCCESS: &'static str = "SUCCESS";

    pub fn is_success(&self) -> bool {
        self.status == Self::SUCCESS
    }
}

/// Normalized token snapshot handed from ingestion to scoring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenData {
    pub token_info: TokenInfo,
    pub holders: Vec<Holder>,
    pub transactions: Vec<Transaction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TokenData {
    /// Empty but well-shaped snapshot carrying the reason ingestion failed.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn has_activity(&self) -> bool {
        !self.holders.is_empty() || !self.transactions.is_empty()
    }
}

// Analysis models

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn weight(&self) -> u32 {
        match self {
            Severity::High => 3,
            Severity::Medium => 2,
            Severity::Low => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskFactorKind {
    HolderConcentration,
    FailedTransactions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PositiveFactorKind {
    Documentation,
    Website,
    HolderDistribution,
    TransactionHealth,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    #[serde(rename = "type")]
    pub kind: RiskFactorKind,
    pub description: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositiveFactor {
    #[serde(rename = "type")]
    pub kind: PositiveFactorKind,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverallRisk {
    Unknown,
    Low,
    Medium,
    High,
    Safe,
    Error,
}

impl fmt::Display for OverallRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OverallRisk::Unknown => "UNKNOWN",
            OverallRisk::Low => "LOW",
            OverallRisk::Medium => "MEDIUM",
            OverallRisk::High => "HIGH",
            OverallRisk::Safe => "SAFE",
            OverallRisk::Error => "ERROR",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for OverallRisk {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "UNKNOWN" => Ok(OverallRisk::Unknown),
            "LOW" => Ok(OverallRisk::Low),
            "MEDIUM" => Ok(OverallRisk::Medium),
            "HIGH" => Ok(OverallRisk::High),
            "SAFE" => Ok(OverallRisk::Safe),
            "ERROR" => Ok(OverallRisk::Error),
            other => Err(crate::Error::Validation(format!(
                "unknown risk label: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub risk_factors: Vec<RiskFactor>,
    pub positive_factors: Vec<PositiveFactor>,
    pub overall_risk: OverallRisk,
    /// 0..=100, higher is safer. Only set by narrative analysis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
}

impl Analysis {
    pub fn with_risk(overall_risk: OverallRisk) -> Self {
        Self {
            risk_factors: Vec::new(),
            positive_factors: Vec::new(),
            overall_risk,
            score: None,
        }
    }

    pub fn unknown() -> Self {
        Self::with_risk(OverallRisk::Unknown)
    }

    pub fn error() -> Self {
        Self::with_risk(OverallRisk::Error)
    }
}
