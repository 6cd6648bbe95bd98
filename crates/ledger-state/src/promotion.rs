//! Promotion record: merge, active-state classification and prop accessors.
//!
//! # Invariants
//!
//! - **`activeState` is derived, never assigned**: `save_promotion` always
//!   finishes by running `set_active_promotion`, which is the only writer of
//!   `activeState` in this crate.
//!
//! - **Same promotion keeps user fields**: re-saving a promotion with the same
//!   `promotionId` deep-merges the payload and keeps the stored
//!   `remindTimestamp`.
//!
//!   A stored record without a `promotionId` counts as the same promotion.
//!
//! - **A new promotion starts clean**: a different `promotionId` discards the
//!   old record (including `stateWallet`), resets `remindTimestamp` to `-1`
//!   and asks the caller to hide the old active notification, if any.

use serde_json::{json, Map, Value};
use tracing::{debug, info, trace};

use crate::app_state::AppState;
use crate::env::{Clock, HideNotification, NotificationDispatcher, SettingsProvider};
use crate::ledger::{present, wallet_balance};
use crate::notification::get_promotion_notification;
use crate::tree;
use crate::types::keys::{
    ACTIVE_STATE, LEDGER, MESSAGE, PROMOTION, PROMOTION_ID, REMIND_TIMESTAMP,
};
use crate::types::{ActiveState, DEFAULT_REMIND_OFFSET_MS, NO_REMINDER, PAYMENTS_ENABLED};

// ---------------------------------------------------------------------------
// Prop accessors
// ---------------------------------------------------------------------------

/// `ledger.promotion`, or an empty map when there is none.
pub fn get_promotion(state: &AppState) -> Map<String, Value> {
    tree::object_or_empty(state.get_in(&[LEDGER, PROMOTION]))
}

pub fn get_promotion_prop<'a>(state: &'a AppState, key: Option<&str>) -> Option<&'a Value> {
    state.get_in(&[LEDGER, PROMOTION, present(key)?])
}

/// `ledger.promotion[key] = value`, creating the promotion if needed.
/// No-op without a key.
pub fn set_promotion_prop(state: AppState, key: Option<&str>, value: Value) -> AppState {
    match present(key) {
        Some(key) => state.set_in(&[LEDGER, PROMOTION, key], value),
        None => state,
    }
}

/// Reset the promotion to an empty record.
pub fn remove_promotion(state: AppState) -> AppState {
    state.set_in(&[LEDGER, PROMOTION], Value::Object(Map::new()))
}

/// Schedule the reminder at `now + offset_ms`.
///
/// Without an offset the window is 24h (`DEFAULT_REMIND_OFFSET_MS`). An
/// explicit offset is added as-is, in milliseconds.
pub fn remind_me_later(state: AppState, offset_ms: Option<i64>, clock: &dyn Clock) -> AppState {
    let offset = offset_ms.unwrap_or(DEFAULT_REMIND_OFFSET_MS);
    let remind_at = clock.now_millis().saturating_add(offset);
    debug!(remind_at, "promotion reminder scheduled");
    set_promotion_prop(state, Some(REMIND_TIMESTAMP), json!(remind_at))
}

// ---------------------------------------------------------------------------
// Active-state classifier
// ---------------------------------------------------------------------------

/// Pure classification rule.
///
/// | payments | balance      | state            |
/// |----------|--------------|------------------|
/// | off      | any          | `disabledWallet` |
/// | on       | absent / <=0 | `emptyWallet`    |
/// | on       | > 0          | `fundedWallet`   |
pub fn classify(payments_enabled: bool, balance: f64) -> ActiveState {
    if !payments_enabled {
        ActiveState::DisabledWallet
    } else if balance > 0.0 {
        ActiveState::FundedWallet
    } else {
        ActiveState::EmptyWallet
    }
}

/// Recompute `promotion.activeState`.
///
/// Without a promotion the state is returned untouched and `settings` is not
/// consulted. When `payments_enabled` is `None` the flag is read from
/// `settings` (`payments.enabled`), defaulting to `true` if unset there.
pub fn set_active_promotion(
    state: AppState,
    payments_enabled: Option<bool>,
    settings: &dyn SettingsProvider,
) -> AppState {
    if !tree::is_populated_object(state.get_in(&[LEDGER, PROMOTION])) {
        trace!("no promotion; active state untouched");
        return state;
    }

    let enabled = payments_enabled
        .or_else(|| settings.get_bool(PAYMENTS_ENABLED))
        .unwrap_or(true);
    let next = classify(enabled, wallet_balance(&state));

    let previous = get_promotion_prop(&state, Some(ACTIVE_STATE)).and_then(Value::as_str);
    if previous != Some(next.as_str()) {
        debug!(from = ?previous, to = %next, "promotion active state changed");
    }

    set_promotion_prop(state, Some(ACTIVE_STATE), json!(next.as_str()))
}

// ---------------------------------------------------------------------------
// Merger
// ---------------------------------------------------------------------------

/// Result of [`save_promotion`]: the next state plus the notification the
/// caller must hide once it commits that state.
#[must_use]
#[derive(Clone, Debug, PartialEq)]
pub struct SavedPromotion {
    pub state: AppState,
    pub hide_notification: Option<HideNotification>,
}

impl SavedPromotion {
    fn unchanged(state: AppState) -> Self {
        Self {
            state,
            hide_notification: None,
        }
    }

    /// Hand the pending hide (if any) to `dispatcher` and return the state.
    pub fn dispatch(self, dispatcher: &dyn NotificationDispatcher) -> AppState {
        if let Some(hide) = &self.hide_notification {
            hide.dispatch(dispatcher);
        }
        self.state
    }
}

/// Merge an incoming promotion payload into `ledger.promotion`.
///
/// `None` and `null` payloads leave the state untouched (no classification,
/// no hide). Non-object payloads are ignored the same way.
pub fn save_promotion(
    state: AppState,
    promotion: Option<Value>,
    settings: &dyn SettingsProvider,
) -> SavedPromotion {
    let incoming = match promotion {
        Some(Value::Object(map)) => map,
        Some(Value::Null) | None => return SavedPromotion::unchanged(state),
        Some(other) => {
            debug!(payload = %other, "ignoring non-object promotion payload");
            return SavedPromotion::unchanged(state);
        }
    };

    let existing = get_promotion(&state);
    let same_promotion = match stored_promotion_id(&existing) {
        Some(id) => incoming.get(PROMOTION_ID) == Some(id),
        None => true,
    };

    let (record, hide_notification) = if same_promotion {
        let remind = existing
            .get(REMIND_TIMESTAMP)
            .cloned()
            .unwrap_or_else(|| json!(NO_REMINDER));
        let mut merged = tree::deep_merge_maps(existing, incoming);
        merged.insert(REMIND_TIMESTAMP.to_string(), remind);
        (merged, None)
    } else {
        let hide = active_notification_message(&state).map(HideNotification::new);
        if let Some(hide) = &hide {
            info!(hidden = %hide.message, "promotion replaced; hiding previous notification");
        }
        let mut replaced = incoming;
        replaced.insert(REMIND_TIMESTAMP.to_string(), json!(NO_REMINDER));
        (replaced, hide)
    };

    let state = state.set_in(&[LEDGER, PROMOTION], Value::Object(record));
    SavedPromotion {
        state: set_active_promotion(state, None, settings),
        hide_notification,
    }
}

/// Stored `promotionId`, unless absent, null or an empty string. A record
/// without one (e.g. only a reminder written by `remind_me_later`) is merged
/// into rather than replaced.
fn stored_promotion_id(existing: &Map<String, Value>) -> Option<&Value> {
    existing
        .get(PROMOTION_ID)
        .filter(|id| !id.is_null() && id.as_str() != Some(""))
}

/// Non-empty `message` of the notification under the current active slice.
fn active_notification_message(state: &AppState) -> Option<String> {
    get_promotion_notification(state)
        .get(MESSAGE)
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}
