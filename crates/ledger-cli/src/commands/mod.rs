//! Command handler modules for the ledger CLI.
//!
//! Shared utilities used by multiple command paths live here.
//! Command-specific logic lives in the submodules.

pub mod promotion;

use anyhow::{Context, Result};
use ledger_config::LoadedSettings;
use ledger_state::NotificationDispatcher;
use serde_json::Value;
use std::fs;
use tracing::info;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Load a JSON value from either an inline string or a file path.
pub fn load_json(inline: Option<String>, file: Option<String>) -> Result<Option<Value>> {
    if let Some(p) = file {
        let bytes = fs::read(&p).with_context(|| format!("read payload-file failed: {}", p))?;
        let bytes = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(&bytes);
        let raw = String::from_utf8(bytes.to_vec()).context("payload-file must be UTF-8 text")?;
        let v: Value =
            serde_json::from_str(raw.trim()).context("payload-file must contain valid JSON")?;
        return Ok(Some(v));
    }

    inline
        .map(|s| parse_json_arg(&s))
        .transpose()
}

/// Parse a JSON CLI argument.
pub fn parse_json_arg(raw: &str) -> Result<Value> {
    serde_json::from_str(raw.trim()).with_context(|| format!("argument must be valid JSON: {raw}"))
}

/// Settings layers in merge order; no layers => empty settings.
pub fn load_settings(paths: &[String]) -> Result<LoadedSettings> {
    if paths.is_empty() {
        return Ok(LoadedSettings::empty());
    }
    let refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
    let loaded = ledger_config::load_layered_yaml(&refs)?;
    info!(settings_hash = %loaded.settings_hash, "settings loaded");
    Ok(loaded)
}

pub fn print_json(v: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(v).context("output json serialize failed")?);
    Ok(())
}

/// Dispatcher for the CLI: hides are logged and echoed on stdout for the
/// caller (the UI process) to act on.
pub struct StdoutDispatcher;

impl NotificationDispatcher for StdoutDispatcher {
    fn hide_notification(&self, message: &str) {
        info!(hidden = %message, "hide notification dispatched");
        println!("hide_notification={message}");
    }
}
