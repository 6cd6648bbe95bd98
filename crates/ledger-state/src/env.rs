//! Collaborator contracts consumed by the promotion store.
//!
//! The store never reaches for globals: the settings lookup, the wall clock
//! and the notification-hide channel are passed in at call time.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Read access to user settings (e.g. `payments.enabled`).
pub trait SettingsProvider {
    fn get_setting(&self, key: &str) -> Option<Value>;

    /// Boolean setting; `None` when absent or not a boolean.
    fn get_bool(&self, key: &str) -> Option<bool> {
        self.get_setting(key)?.as_bool()
    }
}

/// Wall clock in epoch milliseconds.
pub trait Clock {
    fn now_millis(&self) -> i64;
}

/// Fire-and-forget channel that hides a UI notification by its message.
pub trait NotificationDispatcher {
    fn hide_notification(&self, message: &str);
}

/// Production clock backed by `chrono::Utc::now()`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// A notification the caller must hide after committing a saved promotion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HideNotification {
    pub message: String,
}

impl HideNotification {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn dispatch(&self, dispatcher: &dyn NotificationDispatcher) {
        dispatcher.hide_notification(&self.message);
    }
}
