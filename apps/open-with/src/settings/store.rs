//! Key-value storage for the settings document
//!
//! The host owns persistence; the plugin only reads and writes one opaque
//! JSON document through [`SettingsStore`].

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde_json::Value;

use crate::error::{OpenWithError, Result};
use crate::utils::fs::{read_optional, write_atomic};

const SETTINGS_FILENAME: &str = "settings.json";

/// Host-provided persistence for the plugin's settings document
pub trait SettingsStore {
    /// Read the stored document, `None` if nothing was saved yet
    fn load_data(&self) -> Result<Option<Value>>;

    /// Replace the stored document with `data`
    fn save_data(&mut self, data: &Value) -> Result<()>;
}

/// Settings document kept in a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for JsonFileStore {
    fn load_data(&self) -> Result<Option<Value>> {
        let Some(content) = read_optional(&self.path)? else {
            tracing::debug!("Settings file does not exist: {:?}", self.path);
            return Ok(None);
        };

        if content.trim().is_empty() {
            return Ok(None);
        }

        serde_json::from_str(&content).map(Some).map_err(|e| {
            OpenWithError::config(format!(
                "Failed to parse settings file {}: {e}",
                self.path.display()
            ))
        })
    }

    fn save_data(&mut self, data: &Value) -> Result<()> {
        let json = serde_json::to_string_pretty(data)?;
        write_atomic(&self.path, &json)?;
        tracing::debug!("Saved settings to {:?}", self.path);
        Ok(())
    }
}

/// Settings document kept in memory, for embedding hosts and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: Option<Value>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(data: Value) -> Self {
        Self {
            data: Some(data),
            saves: 0,
        }
    }

    /// Number of times the document was written
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl SettingsStore for MemoryStore {
    fn load_data(&self) -> Result<Option<Value>> {
        Ok(self.data.clone())
    }

    fn save_data(&mut self, data: &Value) -> Result<()> {
        self.data = Some(data.clone());
        self.saves += 1;
        Ok(())
    }
}

/// Path of the settings file in the platform config directory
///
/// - Linux: `~/.config/open-with/settings.json`
/// - macOS: `~/Library/Application Support/com.krona.open-with/settings.json`
/// - Windows: `%APPDATA%\krona\open-with\config\settings.json`
pub fn default_settings_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("com", "krona", "open-with")
        .ok_or_else(|| OpenWithError::config("Failed to determine project directories"))?;

    Ok(proj_dirs.config_dir().join(SETTINGS_FILENAME))
}
