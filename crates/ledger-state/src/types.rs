use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::app_state::AppState;
use crate::tree;

// ---------------------------------------------------------------------------
// Keys and constants
// ---------------------------------------------------------------------------

/// Object keys of the ledger sub-tree, as they appear in the state document.
pub mod keys {
    pub const LEDGER: &str = "ledger";
    pub const INFO: &str = "info";
    pub const BALANCE: &str = "balance";
    pub const PROMOTION: &str = "promotion";
    pub const PROMOTION_ID: &str = "promotionId";
    pub const ACTIVE_STATE: &str = "activeState";
    pub const REMIND_TIMESTAMP: &str = "remindTimestamp";
    pub const CLAIMED_TIMESTAMP: &str = "claimedTimestamp";
    pub const STATE_WALLET: &str = "stateWallet";
    pub const NOTIFICATION: &str = "notification";
    pub const MESSAGE: &str = "message";
}

/// Settings key consulted by the classifier when no explicit flag is given.
pub const PAYMENTS_ENABLED: &str = "payments.enabled";

/// `remindTimestamp` value meaning "no reminder set".
pub const NO_REMINDER: i64 = -1;

/// Default "remind me later" window: 24h in milliseconds.
pub const DEFAULT_REMIND_OFFSET_MS: i64 = 24 * 60 * 60 * 1000;

// ---------------------------------------------------------------------------
// ActiveState
// ---------------------------------------------------------------------------

/// Wallet-dependent state a promotion is shown in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActiveState {
    /// Payments are switched off.
    DisabledWallet,
    /// Payments on, balance absent or zero.
    EmptyWallet,
    /// Payments on, positive balance.
    FundedWallet,
}

impl ActiveState {
    pub const ALL: [ActiveState; 3] = [
        ActiveState::DisabledWallet,
        ActiveState::EmptyWallet,
        ActiveState::FundedWallet,
    ];

    /// Stable label used as the `activeState` value and `stateWallet` key.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActiveState::DisabledWallet => "disabledWallet",
            ActiveState::EmptyWallet => "emptyWallet",
            ActiveState::FundedWallet => "fundedWallet",
        }
    }
}

impl fmt::Display for ActiveState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownActiveState(pub String);

impl fmt::Display for UnknownActiveState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown active state '{}'. expected one of: disabledWallet | emptyWallet | fundedWallet",
            self.0
        )
    }
}

impl std::error::Error for UnknownActiveState {}

impl FromStr for ActiveState {
    type Err = UnknownActiveState;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActiveState::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| UnknownActiveState(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// PromotionRecord
// ---------------------------------------------------------------------------

/// Typed read-only projection of `ledger.promotion`.
///
/// Fields that are missing or carry an unexpected shape read as `None`;
/// `stateWallet` stays free-form and is reached through the accessors.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PromotionRecord {
    pub promotion_id: Option<String>,
    pub active_state: Option<ActiveState>,
    pub remind_timestamp: Option<i64>,
    pub claimed_timestamp: Option<i64>,
}

impl PromotionRecord {
    pub fn from_map(map: &Map<String, Value>) -> Self {
        Self {
            promotion_id: map
                .get(keys::PROMOTION_ID)
                .and_then(Value::as_str)
                .map(str::to_string),
            active_state: map
                .get(keys::ACTIVE_STATE)
                .and_then(Value::as_str)
                .and_then(|s| s.parse().ok()),
            remind_timestamp: map.get(keys::REMIND_TIMESTAMP).and_then(Value::as_i64),
            claimed_timestamp: map.get(keys::CLAIMED_TIMESTAMP).and_then(Value::as_i64),
        }
    }

    pub fn from_state(state: &AppState) -> Self {
        let promotion = state.get_in(&[keys::LEDGER, keys::PROMOTION]);
        Self::from_map(&tree::object_or_empty(promotion))
    }

    /// `true` when a reminder is scheduled (`remindTimestamp` set and not `-1`).
    pub fn has_reminder(&self) -> bool {
        matches!(self.remind_timestamp, Some(ts) if ts != NO_REMINDER)
    }
}
