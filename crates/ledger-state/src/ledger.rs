//! Key accessors for the `ledger` root and its `info` map.

use serde_json::Value;

use crate::app_state::AppState;
use crate::types::keys::{BALANCE, INFO, LEDGER};

/// Absent and empty keys are both treated as "no key".
pub(crate) fn present(key: Option<&str>) -> Option<&str> {
    key.filter(|k| !k.is_empty())
}

/// `ledger[key] = value`. Without a key the state is handed back untouched.
pub fn set_ledger_value(state: AppState, key: Option<&str>, value: Value) -> AppState {
    match present(key) {
        Some(key) => state.set_in(&[LEDGER, key], value),
        None => state,
    }
}

/// `ledger[key]`; `None` without a key or when the entry is not set.
pub fn get_ledger_value<'a>(state: &'a AppState, key: Option<&str>) -> Option<&'a Value> {
    state.get_in(&[LEDGER, present(key)?])
}

/// `ledger.info[key] = value`; no-op without a key.
pub fn set_info_prop(state: AppState, key: Option<&str>, value: Value) -> AppState {
    match present(key) {
        Some(key) => state.set_in(&[LEDGER, INFO, key], value),
        None => state,
    }
}

pub fn get_info_prop<'a>(state: &'a AppState, key: Option<&str>) -> Option<&'a Value> {
    state.get_in(&[LEDGER, INFO, present(key)?])
}

/// Wallet balance from `ledger.info.balance`.
///
/// Absent or unparseable balances read as `0.0`. Numeric strings are
/// accepted since balances may arrive as decimal text.
pub fn wallet_balance(state: &AppState) -> f64 {
    match state.get_in(&[LEDGER, INFO, BALANCE]) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    }
}
