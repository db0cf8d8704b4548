//! Plugin settings: models, persistence, registry and the settings tab

pub mod models;
pub mod registry;
pub mod store;
pub mod tab;

pub use models::{AppEntry, AppField, NewAppForm, PluginSettings};
pub use registry::AppRegistry;
pub use store::{JsonFileStore, MemoryStore, SettingsStore};
pub use tab::{SettingsActions, SettingsEvent, SettingsTab, SettingsView};
