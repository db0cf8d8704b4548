//! Application registry
//!
//! The ordered list of user-defined applications plus the global
//! "show in system explorer" flag. The registry itself is pure data; the
//! plugin persists it after each mutation.

use serde_json::{Map, Value};

use super::models::{AppEntry, AppField, NewAppForm, PluginSettings};
use super::store::SettingsStore;
use crate::error::{OpenWithError, Result};

/// In-memory copy of the persisted settings document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppRegistry {
    settings: PluginSettings,
}

impl AppRegistry {
    pub fn new(settings: PluginSettings) -> Self {
        Self { settings }
    }

    /// Load the stored document merged over the defaults
    ///
    /// The merge is shallow: every top-level field present in the stored
    /// document replaces the default wholesale. A missing or non-object
    /// document yields the defaults. A field of the wrong type is a
    /// configuration error.
    pub fn load(store: &dyn SettingsStore) -> Result<Self> {
        let mut merged = default_document();

        match store.load_data()? {
            Some(Value::Object(stored)) => {
                for (key, value) in stored {
                    merged.insert(key, value);
                }
            }
            Some(other) => {
                tracing::warn!(
                    "Ignoring settings document that is not an object: {}",
                    other
                );
            }
            None => {}
        }

        let settings: PluginSettings = serde_json::from_value(Value::Object(merged))
            .map_err(|e| OpenWithError::config(format!("Invalid settings document: {e}")))?;

        tracing::debug!(apps = settings.apps.len(), "Loaded settings");
        Ok(Self { settings })
    }

    /// Write the complete state, overwriting the stored document
    pub fn save(&self, store: &mut dyn SettingsStore) -> Result<()> {
        let value = serde_json::to_value(&self.settings)?;
        store.save_data(&value)
    }

    pub fn settings(&self) -> &PluginSettings {
        &self.settings
    }

    pub fn apps(&self) -> &[AppEntry] {
        &self.settings.apps
    }

    pub fn len(&self) -> usize {
        self.settings.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.apps.is_empty()
    }

    pub fn explorer_in_file_menu(&self) -> bool {
        self.settings.sysexp_in_file_menu
    }

    /// Entries that contribute an item to file context menus
    pub fn menu_entries(&self) -> impl Iterator<Item = &AppEntry> {
        self.settings.apps.iter().filter(|app| app.show_in_menu)
    }

    /// Append a new entry built from the form
    ///
    /// `name` and `code` must be non-empty after trimming. The new entry is
    /// hidden from context menus until toggled. Names are not required to
    /// be unique.
    pub fn add(&mut self, form: &NewAppForm) -> Result<&AppEntry> {
        let name = form.name.trim();
        let code = form.code.trim();

        if name.is_empty() {
            return Err(OpenWithError::validation("Application name cannot be empty"));
        }
        if code.is_empty() {
            return Err(OpenWithError::validation("Launch command cannot be empty"));
        }

        let lowered = name.to_lowercase();
        if self
            .settings
            .apps
            .iter()
            .any(|app| app.name.to_lowercase() == lowered)
        {
            // Duplicate ids are allowed; the later command replaces the earlier one.
            tracing::warn!(name, "An application with this name is already registered");
        }

        self.settings
            .apps
            .push(AppEntry::new(name, code).with_arguments(form.arguments.trim()));

        let index = self.settings.apps.len() - 1;
        Ok(&self.settings.apps[index])
    }

    /// Remove the first entry equal to `entry`
    ///
    /// Returns `false` (and changes nothing) if no such entry exists.
    pub fn remove(&mut self, entry: &AppEntry) -> bool {
        match self.settings.apps.iter().position(|app| app == entry) {
            Some(index) => {
                self.settings.apps.remove(index);
                true
            }
            None => false,
        }
    }

    /// Flip a boolean field of the first entry equal to `entry`
    ///
    /// Returns the updated entry, or `None` if no such entry exists.
    pub fn toggle(&mut self, entry: &AppEntry, field: AppField) -> Option<&AppEntry> {
        let app = self.settings.apps.iter_mut().find(|app| **app == *entry)?;
        match field {
            AppField::ShowInMenu => app.show_in_menu = !app.show_in_menu,
        }
        Some(app)
    }

    pub fn set_explorer_in_file_menu(&mut self, enabled: bool) {
        self.settings.sysexp_in_file_menu = enabled;
    }
}

fn default_document() -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("apps".to_string(), Value::Array(Vec::new()));
    map.insert("sysexpInFileMenu".to_string(), Value::Bool(false));
    map
}
