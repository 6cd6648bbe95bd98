//! ledger-state
//!
//! Promotion state store for the `ledger` sub-tree of the application state.
//!
//! Architectural decisions:
//! - Every operation takes an `AppState` by value and hands back the next one
//! - `activeState` is derived by the classifier only, callers never write it
//! - Settings, clock and notification dispatch are injected, never global
//! - A replaced promotion reports its notification hide as data
//!
//! Pure deterministic logic. The only IO lives in the `AppState` file helpers.

mod app_state;
mod env;
mod ledger;
mod notification;
mod promotion;
pub mod tree;
mod types;

pub use app_state::AppState;
pub use env::{Clock, HideNotification, NotificationDispatcher, SettingsProvider, SystemClock};
pub use ledger::{
    get_info_prop, get_ledger_value, set_info_prop, set_ledger_value, wallet_balance,
};
pub use notification::{
    get_about_promotion, get_active_promotion, get_promotion_notification, is_reminder_due,
    set_promotion_notification_prop,
};
pub use promotion::{
    classify, get_promotion, get_promotion_prop, remind_me_later, remove_promotion,
    save_promotion, set_active_promotion, set_promotion_prop, SavedPromotion,
};
pub use types::*;
