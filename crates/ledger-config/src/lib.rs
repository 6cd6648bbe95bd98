//! ledger-config
//!
//! Layered YAML settings: documents merge in order (earlier = base, later
//! overrides), get converted to JSON, canonicalized and hashed. The loaded
//! settings back the `SettingsProvider` the promotion store reads
//! `payments.enabled` from.
//!
//! Setting keys are dotted (`payments.enabled`). They resolve as nested
//! objects (`payments: { enabled: true }`) first, then as a flat top-level
//! key of the same name (`"payments.enabled": true`).

mod registry;

use anyhow::{bail, Context, Result};
use ledger_state::tree::deep_merge;
use ledger_state::{SettingsProvider, PAYMENTS_ENABLED};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;

pub use registry::{
    consumed_pointers, report_unused_keys, setting_pointer, UnusedKeyPolicy, UnusedKeyReport,
};

#[derive(Debug, Clone)]
pub struct LoadedSettings {
    pub settings_hash: String,
    pub canonical_json: String,
    pub settings_json: Value,
}

impl LoadedSettings {
    /// No layers: every lookup misses.
    pub fn empty() -> Self {
        let settings_json = serde_json::json!({});
        let canonical_json = settings_json.to_string();
        Self {
            settings_hash: sha256_hex(canonical_json.as_bytes()),
            canonical_json,
            settings_json,
        }
    }

    pub fn payments(&self) -> Result<PaymentsSettings> {
        PaymentsSettings::from_settings_json(&self.settings_json)
    }
}

impl SettingsProvider for LoadedSettings {
    fn get_setting(&self, key: &str) -> Option<Value> {
        self.settings_json
            .pointer(&setting_pointer(key))
            .or_else(|| self.settings_json.get(key))
            .cloned()
    }
}

/// Payments-related settings, validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PaymentsSettings {
    /// `None` when the settings do not say; the classifier then defaults to on.
    pub enabled: Option<bool>,
}

impl PaymentsSettings {
    /// Read `payments.enabled`. Present but non-boolean is an error.
    pub fn from_settings_json(settings: &Value) -> Result<Self> {
        let raw = settings
            .pointer(&setting_pointer(PAYMENTS_ENABLED))
            .or_else(|| settings.get(PAYMENTS_ENABLED));
        let enabled = match raw {
            None | Some(Value::Null) => None,
            Some(Value::Bool(b)) => Some(*b),
            Some(other) => bail!(
                "SETTINGS_INVALID: {} must be a boolean (got {})",
                PAYMENTS_ENABLED,
                other
            ),
        };
        Ok(Self { enabled })
    }
}

pub fn load_layered_yaml(paths: &[&str]) -> Result<LoadedSettings> {
    let mut docs: Vec<String> = Vec::new();
    for p in paths {
        let raw =
            fs::read_to_string(p).with_context(|| format!("failed to read yaml path: {p}"))?;
        docs.push(raw);
    }

    let doc_refs: Vec<&str> = docs.iter().map(|s| s.as_str()).collect();
    load_layered_yaml_from_strings(&doc_refs)
}

pub fn load_layered_yaml_from_strings(yaml_docs: &[&str]) -> Result<LoadedSettings> {
    let mut merged = serde_json::json!({});
    for raw in yaml_docs {
        let v_yaml: serde_yaml::Value = serde_yaml::from_str(raw).context("invalid yaml")?;
        let v_json = serde_json::to_value(v_yaml).context("yaml->json conversion failed")?;
        // An empty document parses as null; it contributes nothing.
        if v_json.is_null() {
            continue;
        }
        if !v_json.is_object() {
            bail!("SETTINGS_NOT_MAPPING: each settings layer must be a YAML mapping");
        }
        merged = deep_merge(merged, v_json);
    }

    // Validate typed sections up front so bad layers fail at load time.
    PaymentsSettings::from_settings_json(&merged)?;

    let canonical_json = canonicalize_json(&merged)?;
    let settings_hash = sha256_hex(canonical_json.as_bytes());
    Ok(LoadedSettings {
        settings_hash,
        canonical_json,
        settings_json: merged,
    })
}

fn canonicalize_json(v: &Value) -> Result<String> {
    // serde_json's default Map is ordered by key, so compact serialization is stable.
    serde_json::to_string(v).context("canonical json serialize failed")
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
