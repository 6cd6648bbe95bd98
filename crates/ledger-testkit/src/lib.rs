//! ledger-testkit
//!
//! Deterministic collaborators and state fixtures for scenario tests:
//! - `FixedClock`: epoch-millis clock that only moves on `tick`
//! - `FixedSettings`: payments flag stub that counts lookups
//! - `RecordingDispatcher`: records every hidden notification message
//!
//! Lookup counting stands in for call spies: a test asserts the classifier
//! ran (or did not) by how many times settings were consulted.

use std::cell::{Cell, RefCell};

use ledger_state::{
    set_info_prop, AppState, Clock, NotificationDispatcher, SettingsProvider, PAYMENTS_ENABLED,
};
use serde_json::{json, Value};

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct FixedClock {
    now: Cell<i64>,
}

impl FixedClock {
    pub fn at(now_millis: i64) -> Self {
        Self {
            now: Cell::new(now_millis),
        }
    }

    pub fn tick(&self, millis: i64) {
        self.now.set(self.now.get() + millis);
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.now.get()
    }
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct FixedSettings {
    payments_enabled: Option<bool>,
    lookups: Cell<usize>,
}

impl FixedSettings {
    /// `payments.enabled = false`
    pub fn payments_disabled() -> Self {
        Self::with_payments(Some(false))
    }

    /// `payments.enabled = true`
    pub fn payments_enabled() -> Self {
        Self::with_payments(Some(true))
    }

    /// No `payments.enabled` value at all.
    pub fn unset() -> Self {
        Self::with_payments(None)
    }

    pub fn with_payments(payments_enabled: Option<bool>) -> Self {
        Self {
            payments_enabled,
            lookups: Cell::new(0),
        }
    }

    /// Number of `get_setting` calls so far.
    pub fn lookups(&self) -> usize {
        self.lookups.get()
    }
}

impl SettingsProvider for FixedSettings {
    fn get_setting(&self, key: &str) -> Option<Value> {
        self.lookups.set(self.lookups.get() + 1);
        match key {
            PAYMENTS_ENABLED => self.payments_enabled.map(Value::Bool),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Notification dispatcher
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct RecordingDispatcher {
    hidden: RefCell<Vec<String>>,
}

impl RecordingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages hidden so far, in dispatch order.
    pub fn hidden(&self) -> Vec<String> {
        self.hidden.borrow().clone()
    }
}

impl NotificationDispatcher for RecordingDispatcher {
    fn hide_notification(&self, message: &str) {
        self.hidden.borrow_mut().push(message.to_string());
    }
}

// ---------------------------------------------------------------------------
// State fixtures
// ---------------------------------------------------------------------------

/// `{"ledger": {}}`
pub fn default_state() -> AppState {
    AppState::new()
}

/// `{"ledger": {"publisherTime": 1}}`
pub fn state_with_data() -> AppState {
    AppState::from_value(json!({ "ledger": { "publisherTime": 1 } }))
}

/// Default state with `ledger.promotion` set to `promotion`.
pub fn state_with_promotion(promotion: Value) -> AppState {
    default_state().set_in(&["ledger", "promotion"], promotion)
}

/// `state` with `ledger.info.balance` set.
pub fn with_balance(state: AppState, balance: impl Into<Value>) -> AppState {
    set_info_prop(state, Some("balance"), balance.into())
}

/// A promotion shown in `disabledWallet` with notification `message`.
pub fn promotion_with_notification(promotion_id: &str, message: &str) -> Value {
    json!({
        "promotionId": promotion_id,
        "activeState": "disabledWallet",
        "remindTimestamp": 10,
        "stateWallet": {
            "disabledWallet": {
                "notification": { "message": message }
            }
        }
    })
}
