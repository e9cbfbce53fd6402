//! Parse-or-default helpers for numeric fields coming from upstream JSON.
//!
//! The explorer API sends amounts as decimal strings, occasionally as plain
//! JSON numbers, and sometimes not at all. Every optional numeric field goes
//! through one of these helpers so a malformed value degrades to a documented
//! default instead of failing the whole response.

use serde_json::Value;

/// Value used when an amount is absent or cannot be parsed.
pub const DEFAULT_AMOUNT: f64 = 0.0;

/// Parse a token amount, falling back to [`DEFAULT_AMOUNT`].
///
/// Negative and non-finite results are also replaced by the default, since
/// holder balances are never negative.
pub fn parse_amount(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(Value::Number(n)) => n.as_f64(),
        _ => None,
    };

    match parsed {
        Some(amount) if amount.is_finite() && amount >= 0.0 => amount,
        _ => DEFAULT_AMOUNT,
    }
}

/// Parse an unsigned integer such as a block height. Returns `None` when the
/// field is absent or unparseable.
pub fn parse_u64(value: Option<&Value>) -> Option<u64> {
    match value {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Render a scalar JSON value as a string. Strings are returned verbatim,
/// numbers and booleans are formatted, everything else yields `None`.
pub fn as_text(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    }
}
