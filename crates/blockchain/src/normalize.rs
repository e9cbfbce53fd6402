//! Turns raw explorer payloads into the canonical [`TokenData`] shape.
//!
//! Every field the explorer may omit has a default here, so the functions in
//! this module never fail.

use serde_json::{Map, Value};
use shared::models::{Holder, TokenData, TokenInfo, Transaction};
use shared::numeric::{as_text, parse_amount, parse_u64};

const UNKNOWN: &str = "Unknown";
const UNKNOWN_STATUS: &str = "UNKNOWN";

/// Normalize the three explorer responses for one contract.
pub fn format_token_data(token_info: &Value, holders: &Value, transactions: &Value) -> TokenData {
    TokenData {
        token_info: normalize_token_info(token_info),
        holders: normalize_holders(holders),
        transactions: normalize_transactions(transactions),
        error: None,
    }
}

/// First entry of `contracts`, or an empty object.
pub fn normalize_token_info(response: &Value) -> TokenInfo {
    response
        .get("contracts")
        .and_then(Value::as_array)
        .and_then(|contracts| contracts.first())
        .and_then(Value::as_object)
        .cloned()
        .map(TokenInfo)
        .unwrap_or_default()
}

/// Holders with recomputed percentages, largest balance first.
pub fn normalize_holders(response: &Value) -> Vec<Holder> {
    let mut holders: Vec<Holder> = response
        .get("holders")
        .and_then(Value::as_array)
        .map(|items| items.iter().map(normalize_holder).collect())
        .unwrap_or_default();

    apply_holder_percentages(&mut holders);
    sort_holders(&mut holders);
    holders
}

fn normalize_holder(item: &Value) -> Holder {
    let account = text_field(item, "account_id")
        .or_else(|| text_field(item, "account"))
        .unwrap_or_else(|| UNKNOWN.to_string());

    Holder {
        account,
        amount: parse_amount(item.get("amount")),
        percentage: 0.0,
    }
}

/// Set each holder's share of the page total. A zero total leaves every
/// share at zero.
pub fn apply_holder_percentages(holders: &mut [Holder]) {
    let total_supply: f64 = holders.iter().map(|h| h.amount).sum();

    for holder in holders.iter_mut() {
        holder.percentage = if total_supply > 0.0 {
            holder.amount / total_supply * 100.0
        } else {
            0.0
        };
    }
}

/// Sort descending by amount; ties keep upstream order.
pub fn sort_holders(holders: &mut [Holder]) {
    holders.sort_by(|a, b| b.amount.total_cmp(&a.amount));
}

pub fn normalize_transactions(response: &Value) -> Vec<Transaction> {
    response
        .get("txns")
        .and_then(Value::as_array)
        .map(|items| items.iter().map(normalize_transaction).collect())
        .unwrap_or_default()
}

fn normalize_transaction(item: &Value) -> Transaction {
    let empty = Map::new();
    let tx = item.as_object().unwrap_or(&empty);

    let status = tx
        .get("outcomes")
        .and_then(|outcomes| as_text(outcomes.get("status")))
        .or_else(|| as_text(tx.get("status")))
        .unwrap_or_else(|| UNKNOWN_STATUS.to_string());

    let block_height = tx
        .get("block")
        .and_then(|block| parse_u64(block.get("block_height")))
        .or_else(|| parse_u64(tx.get("block_height")));

    Transaction {
        event_index: as_text(tx.get("event_index")),
        affected_account_id: text_field(item, "affected_account_id")
            .unwrap_or_else(|| UNKNOWN.to_string()),
        involved_account_id: text_field(item, "involved_account_id")
            .unwrap_or_else(|| UNKNOWN.to_string()),
        delta_amount: as_text(tx.get("delta_amount")).unwrap_or_else(|| "0".to_string()),
        cause: text_field(item, "cause").unwrap_or_else(|| UNKNOWN.to_string()),
        receipt_id: as_text(tx.get("receipt_id")),
        block_timestamp: as_text(tx.get("block_timestamp")),
        block_height,
        status,
    }
}

fn text_field(item: &Value, key: &str) -> Option<String> {
    item.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
