//! Application state initialization

use std::path::PathBuf;

use crate::error::{OpenWithError, Result};
use crate::host::StandaloneHost;
use crate::platform::{Platform, SystemPlatform};
use crate::plugin::{OpenWithPlugin, Plugin};
use crate::settings::store::default_settings_path;
use crate::settings::{JsonFileStore, SettingsStore, SettingsTab};
use crate::utils::paths::expand_tilde;

/// Everything a single invocation works with
pub struct AppState {
    pub plugin: OpenWithPlugin,
    pub host: StandaloneHost,
    pub tab: SettingsTab,
}

/// Settings file from the command line or environment, else the per-user default
pub fn settings_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(PathBuf::from(expand_tilde(&path.to_string_lossy()))),
        None => default_settings_path(),
    }
}

/// Content root given on the command line, made absolute against the
/// working directory
pub fn content_root(root: &str) -> Result<PathBuf> {
    std::path::absolute(expand_tilde(root)).map_err(OpenWithError::Io)
}

/// Create the plugin against the native platform and activate it
pub fn init_state(settings: PathBuf, root: Option<PathBuf>) -> Result<AppState> {
    let store = JsonFileStore::new(settings);
    tracing::debug!("Using settings file: {}", store.path().display());
    init_state_with(
        Box::new(store),
        Box::new(SystemPlatform::new()),
        root,
    )
}

pub fn init_state_with(
    store: Box<dyn SettingsStore>,
    platform: Box<dyn Platform>,
    root: Option<PathBuf>,
) -> Result<AppState> {
    let mut host = match root {
        Some(root) => StandaloneHost::with_root(root),
        None => StandaloneHost::new(),
    };

    let mut plugin = OpenWithPlugin::new(store, platform);
    plugin.activate(&mut host)?;

    Ok(AppState {
        plugin,
        host,
        tab: SettingsTab::new(),
    })
}
