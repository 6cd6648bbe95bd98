//! Accessors for the slice of `stateWallet` selected by `activeState`.

use serde_json::{Map, Value};

use crate::app_state::AppState;
use crate::ledger::present;
use crate::tree;
use crate::types::keys::{
    ACTIVE_STATE, CLAIMED_TIMESTAMP, LEDGER, NOTIFICATION, PROMOTION, STATE_WALLET,
};
use crate::types::PromotionRecord;

/// Raw `activeState` label, if set to a non-empty string.
fn active_state_key(state: &AppState) -> Option<&str> {
    state
        .get_in(&[LEDGER, PROMOTION, ACTIVE_STATE])
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// `stateWallet[activeState]`, or an empty map.
pub fn get_active_promotion(state: &AppState) -> Map<String, Value> {
    let Some(active) = active_state_key(state) else {
        return Map::new();
    };
    tree::object_or_empty(state.get_in(&[LEDGER, PROMOTION, STATE_WALLET, active]))
}

/// Notification of the active slice, or an empty map.
pub fn get_promotion_notification(state: &AppState) -> Map<String, Value> {
    let Some(active) = active_state_key(state) else {
        return Map::new();
    };
    tree::object_or_empty(state.get_in(&[LEDGER, PROMOTION, STATE_WALLET, active, NOTIFICATION]))
}

/// `stateWallet[activeState].notification[key] = value`.
///
/// No-op without a key or while `activeState` is unset: there is no slice to
/// target before the classifier has run.
pub fn set_promotion_notification_prop(
    state: AppState,
    key: Option<&str>,
    value: Value,
) -> AppState {
    let Some(key) = present(key) else {
        return state;
    };
    let Some(active) = active_state_key(&state).map(str::to_string) else {
        return state;
    };
    state.set_in(
        &[LEDGER, PROMOTION, STATE_WALLET, active.as_str(), NOTIFICATION, key],
        value,
    )
}

/// About-page view: the active slice plus `claimedTimestamp` when the
/// promotion has been claimed.
///
/// Empty whenever the active slice is empty (no `activeState`, or nothing
/// stored under it), even for a claimed promotion: the claim is not shown
/// on its own.
pub fn get_about_promotion(state: &AppState) -> Map<String, Value> {
    let mut about = get_active_promotion(state);
    if about.is_empty() {
        return about;
    }
    let claimed = state
        .get_in(&[LEDGER, PROMOTION, CLAIMED_TIMESTAMP])
        .filter(|v| !v.is_null());
    if let Some(claimed) = claimed {
        about.insert(CLAIMED_TIMESTAMP.to_string(), claimed.clone());
    }
    about
}

/// `true` once a scheduled reminder has elapsed for a promotion that still
/// has a notification to show.
pub fn is_reminder_due(state: &AppState, now_millis: i64) -> bool {
    let record = PromotionRecord::from_state(state);
    let elapsed = record.has_reminder()
        && record.remind_timestamp.is_some_and(|ts| ts <= now_millis);
    elapsed && !get_promotion_notification(state).is_empty()
}
