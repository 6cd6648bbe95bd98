use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;

use crate::tree;
use crate::types::keys::LEDGER;

/// Root application-state document.
///
/// A JSON object owning the `ledger` sub-tree. Operations in this crate take
/// it by value and return the next snapshot; the caller keeps whichever one
/// it commits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppState(Value);

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Fresh state: `{"ledger": {}}`.
    pub fn new() -> Self {
        Self(json!({ "ledger": {} }))
    }

    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// The `ledger` sub-tree, if present.
    pub fn ledger(&self) -> Option<&Value> {
        self.0.get(LEDGER)
    }

    pub fn get_in(&self, path: &[&str]) -> Option<&Value> {
        tree::get_in(&self.0, path)
    }

    pub fn set_in(self, path: &[&str], value: Value) -> Self {
        Self(tree::set_in(self.0, path, value))
    }

    /// Parse a state document. The top level must be a JSON object.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw).context("state must be valid JSON")?;
        if !value.is_object() {
            bail!("STATE_NOT_OBJECT: top-level state must be a JSON object");
        }
        Ok(Self(value))
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.0).context("state json serialize failed")
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read state file: {}", path.display()))?;
        Self::from_json_str(&raw).with_context(|| format!("invalid state file: {}", path.display()))
    }

    /// Write pretty-printed JSON to `path`, creating parent dirs.
    pub fn write_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| format!("create_dir_all {:?}", parent))?;
        }
        let json = self.to_json_pretty()?;
        fs::write(path, json).with_context(|| format!("failed to write state file: {}", path.display()))
    }
}
