//! `ledger promotion ...` handlers.
//!
//! Each handler loads the state file, runs one store operation and writes the
//! result back when the operation mutates.

use anyhow::Result;
use ledger_state::{
    get_about_promotion, get_active_promotion, get_promotion, get_promotion_notification,
    is_reminder_due, remind_me_later, remove_promotion, save_promotion, set_active_promotion,
    set_promotion_notification_prop, AppState, Clock, SystemClock,
};
use serde_json::Value;
use std::path::Path;
use tracing::info;

use super::{load_json, load_settings, parse_json_arg, print_json, StdoutDispatcher};

pub fn save(
    state_path: &Path,
    payload: Option<String>,
    payload_file: Option<String>,
    settings: &[String],
) -> Result<()> {
    let promotion = load_json(payload, payload_file)?;
    let settings = load_settings(settings)?;
    let state = AppState::load_from_path(state_path)?;

    let state = save_promotion(state, promotion, &settings).dispatch(&StdoutDispatcher);
    state.write_to_path(state_path)?;
    print_json(&Value::Object(get_promotion(&state)))
}

pub fn classify(state_path: &Path, payments_enabled: Option<bool>, settings: &[String]) -> Result<()> {
    let settings = load_settings(settings)?;
    let state = AppState::load_from_path(state_path)?;

    let state = set_active_promotion(state, payments_enabled, &settings);
    state.write_to_path(state_path)?;

    let active = ledger_state::get_promotion_prop(&state, Some("activeState"))
        .and_then(Value::as_str)
        .unwrap_or("none");
    println!("active_state={active}");
    Ok(())
}

pub fn show(state_path: &Path) -> Result<()> {
    let state = AppState::load_from_path(state_path)?;
    print_json(&Value::Object(get_promotion(&state)))
}

pub fn remove(state_path: &Path) -> Result<()> {
    let state = remove_promotion(AppState::load_from_path(state_path)?);
    state.write_to_path(state_path)?;
    println!("promotion_removed=true");
    Ok(())
}

pub fn remind_later(state_path: &Path, offset_ms: Option<i64>) -> Result<()> {
    let state = AppState::load_from_path(state_path)?;
    let state = remind_me_later(state, offset_ms, &SystemClock);
    state.write_to_path(state_path)?;

    let remind_at = ledger_state::PromotionRecord::from_state(&state)
        .remind_timestamp
        .unwrap_or(ledger_state::NO_REMINDER);
    info!(remind_at, "reminder stored");
    println!("remind_timestamp={remind_at}");
    Ok(())
}

pub fn about(state_path: &Path) -> Result<()> {
    let state = AppState::load_from_path(state_path)?;
    print_json(&Value::Object(get_about_promotion(&state)))
}

pub fn active(state_path: &Path) -> Result<()> {
    let state = AppState::load_from_path(state_path)?;
    print_json(&Value::Object(get_active_promotion(&state)))
}

pub fn notification(state_path: &Path) -> Result<()> {
    let state = AppState::load_from_path(state_path)?;
    print_json(&Value::Object(get_promotion_notification(&state)))
}

pub fn set_notification(state_path: &Path, key: &str, value: &str) -> Result<()> {
    let value = parse_json_arg(value)?;
    let state = AppState::load_from_path(state_path)?;
    let state = set_promotion_notification_prop(state, Some(key), value);
    state.write_to_path(state_path)?;
    print_json(&Value::Object(get_promotion_notification(&state)))
}

pub fn due(state_path: &Path, now_ms: Option<i64>) -> Result<()> {
    let state = AppState::load_from_path(state_path)?;
    let now = now_ms.unwrap_or_else(|| SystemClock.now_millis());
    println!("reminder_due={}", is_reminder_due(&state, now));
    Ok(())
}
