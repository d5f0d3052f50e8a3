use crate::error::{Result, ToolkitError};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const ENV_ID_FIELD: &str = "JSON_TOOLKIT_ID_FIELD";
pub const ENV_SERIAL_FIELD: &str = "JSON_TOOLKIT_SERIAL_FIELD";
pub const ENV_INDENT: &str = "JSON_TOOLKIT_INDENT";

/// Engine settings shared by every operation of a session.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Field used as record identity for deduplication and search statistics
    pub id_field: String,
    /// Field written by serial numbering
    pub serial_field: String,
    /// Spaces per indentation level in written JSON artifacts
    pub indent: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            id_field: "_id".to_owned(),
            serial_field: "no".to_owned(),
            indent: 4,
        }
    }
}

impl Settings {
    /// Builds settings from defaults, an optional JSON file, then the
    /// `JSON_TOOLKIT_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ToolkitError::Config`] if the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        settings.apply_overrides(|key| std::env::var(key).ok());
        Ok(settings)
    }

    /// Reads a settings file. Missing keys fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ToolkitError::Config`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ToolkitError::Config(format!("Failed to read {}: {e}", path.display()))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            ToolkitError::Config(format!("Failed to parse {}: {e}", path.display()))
        })
    }

    /// Applies overrides looked up by environment variable name.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(id_field) = lookup(ENV_ID_FIELD).filter(|v| !v.is_empty()) {
            self.id_field = id_field;
        }
        if let Some(serial_field) = lookup(ENV_SERIAL_FIELD).filter(|v| !v.is_empty()) {
            self.serial_field = serial_field;
        }
        if let Some(raw) = lookup(ENV_INDENT) {
            match raw.trim().parse::<usize>() {
                Ok(indent) => self.indent = indent,
                Err(_) => tracing::warn!("Ignoring {ENV_INDENT}={raw:?}: not a number"),
            }
        }
    }
}
