//! The open-with plugin
//!
//! Owns the settings store, the platform and, while active, the application
//! registry. Activation loads the settings and registers every command with
//! the host; context-menu events are answered from the live registry.

pub mod types;

pub use types::{HostEvent, Plugin, PluginManifest, PluginState};

use crate::commands::{all_commands, CommandAction, Dispatcher};
use crate::error::{OpenWithError, Result};
use crate::host::{DocumentHandle, Host, Menu, MenuItem};
use crate::menu::contribute_file_menu;
use crate::platform::Platform;
use crate::settings::{
    AppEntry, AppField, AppRegistry, NewAppForm, PluginSettings, SettingsActions, SettingsStore,
};
use crate::utils::paths::PathStyle;

pub const PLUGIN_ID: &str = "open-with";

pub struct OpenWithPlugin {
    manifest: PluginManifest,
    state: PluginState,
    store: Box<dyn SettingsStore>,
    platform: Box<dyn Platform>,
    style: PathStyle,
    registry: Option<AppRegistry>,
}

impl OpenWithPlugin {
    pub fn new(store: Box<dyn SettingsStore>, platform: Box<dyn Platform>) -> Self {
        Self {
            manifest: PluginManifest {
                id: PLUGIN_ID.to_string(),
                name: "Open with".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                description: "Open the active file with external applications".to_string(),
            },
            state: PluginState::Inactive,
            store,
            platform,
            style: PathStyle::current(),
            registry: None,
        }
    }

    /// Override the separator style used when resolving paths
    pub fn with_path_style(mut self, style: PathStyle) -> Self {
        self.style = style;
        self
    }

    pub fn store(&self) -> &dyn SettingsStore {
        self.store.as_ref()
    }

    pub fn registry(&self) -> Result<&AppRegistry> {
        self.registry
            .as_ref()
            .ok_or_else(|| OpenWithError::plugin_state("call activate() first"))
    }

    fn registry_mut(&mut self) -> Result<&mut AppRegistry> {
        self.registry
            .as_mut()
            .ok_or_else(|| OpenWithError::plugin_state("call activate() first"))
    }

    /// Write the registry back to the store
    ///
    /// When the store rejects the write the registry is reset to `previous`,
    /// so memory never holds a change that was not saved.
    fn persist(&mut self, previous: AppRegistry) -> Result<()> {
        let registry = self
            .registry
            .as_ref()
            .ok_or_else(|| OpenWithError::plugin_state("call activate() first"))?;

        if let Err(e) = registry.save(self.store.as_mut()) {
            tracing::error!("Failed to save settings, reverting change: {}", e);
            self.registry = Some(previous);
            return Err(e);
        }
        Ok(())
    }

    fn dispatcher(&self) -> Dispatcher<'_> {
        Dispatcher::new(self.platform.as_ref(), self.style)
    }

    /// Check callback for commands registered by this plugin
    pub fn check_command(&self, action: &CommandAction, checking: bool, host: &dyn Host) -> bool {
        self.dispatcher().check(action, checking, host)
    }

    /// Run a context-menu item against the file the menu was opened for
    pub fn activate_menu_item(&self, item: &MenuItem, file: &DocumentHandle, host: &dyn Host) {
        tracing::debug!(title = %item.title, file = %file.path, "Menu item activated");
        self.dispatcher().perform(&item.action, file, host);
    }

    /// Append this plugin's items to a file context menu
    pub fn file_menu(&self, menu: &mut Menu) -> Result<usize> {
        Ok(contribute_file_menu(menu, self.registry()?))
    }
}

impl Plugin for OpenWithPlugin {
    fn manifest(&self) -> &PluginManifest {
        &self.manifest
    }

    fn state(&self) -> PluginState {
        self.state
    }

    fn activate(&mut self, host: &mut dyn Host) -> Result<()> {
        let registry = match AppRegistry::load(self.store.as_ref()) {
            Ok(registry) => registry,
            Err(e) => {
                tracing::error!("Failed to load settings: {}", e);
                self.state = PluginState::Error;
                return Err(e);
            }
        };

        for command in all_commands(registry.apps()) {
            host.add_command(command);
        }

        tracing::info!(
            plugin_id = %self.manifest.id,
            apps = registry.len(),
            "Plugin activated"
        );
        self.registry = Some(registry);
        self.state = PluginState::Active;
        Ok(())
    }

    fn deactivate(&mut self) -> Result<()> {
        self.registry = None;
        self.state = PluginState::Inactive;
        tracing::info!(plugin_id = %self.manifest.id, "Plugin deactivated");
        Ok(())
    }

    fn on_event(&mut self, event: HostEvent<'_>, _host: &mut dyn Host) -> Result<()> {
        tracing::trace!("Event received: {}", event.description());
        match event {
            HostEvent::FileMenu { menu, .. } => {
                self.file_menu(menu)?;
            }
        }
        Ok(())
    }
}

impl SettingsActions for OpenWithPlugin {
    fn settings(&self) -> Result<&PluginSettings> {
        Ok(self.registry()?.settings())
    }

    fn add_app(&mut self, form: &NewAppForm, host: &mut dyn Host) -> Result<bool> {
        let previous = self.registry()?.clone();
        let added = match self.registry_mut()?.add(form) {
            Ok(entry) => entry.clone(),
            Err(OpenWithError::Validation(msg)) => {
                host.notice(&msg);
                return Ok(false);
            }
            Err(e) => return Err(e),
        };

        self.persist(previous)?;
        host.add_command(CommandAction::OpenWith(added.clone()).into_command());
        tracing::info!(name = %added.name, code = %added.code, "Application added");
        Ok(true)
    }

    fn remove_app(&mut self, entry: &AppEntry, host: &mut dyn Host) -> Result<bool> {
        let previous = self.registry()?.clone();
        if !self.registry_mut()?.remove(entry) {
            return Ok(false);
        }

        self.persist(previous)?;
        tracing::info!(name = %entry.name, "Application removed");
        host.notice(&format!(
            "Removed {}. Restart the application to remove its command from the command palette.",
            entry.name
        ));
        Ok(true)
    }

    fn toggle_app(&mut self, entry: &AppEntry, field: AppField) -> Result<bool> {
        let previous = self.registry()?.clone();
        if self.registry_mut()?.toggle(entry, field).is_none() {
            return Ok(false);
        }

        self.persist(previous)?;
        Ok(true)
    }

    fn set_explorer_in_file_menu(&mut self, enabled: bool) -> Result<()> {
        let previous = self.registry()?.clone();
        self.registry_mut()?.set_explorer_in_file_menu(enabled);
        self.persist(previous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::StandaloneHost;
    use crate::platform::recording::{PlatformCall, RecordingPlatform};
    use crate::settings::MemoryStore;
    use serde_json::json;

    fn plugin_with(data: serde_json::Value, platform: &RecordingPlatform) -> OpenWithPlugin {
        OpenWithPlugin::new(
            Box::new(MemoryStore::with_data(data)),
            Box::new(platform.clone()),
        )
        .with_path_style(PathStyle::Posix)
    }

    fn stored(plugin: &OpenWithPlugin) -> serde_json::Value {
        plugin.store().load_data().unwrap().unwrap()
    }

    /// Store that loads `data` but rejects every write
    struct ReadOnlyStore {
        data: serde_json::Value,
    }

    impl SettingsStore for ReadOnlyStore {
        fn load_data(&self) -> Result<Option<serde_json::Value>> {
            Ok(Some(self.data.clone()))
        }

        fn save_data(&mut self, _data: &serde_json::Value) -> Result<()> {
            Err(OpenWithError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only settings",
            )))
        }
    }

    fn read_only_plugin(data: serde_json::Value, host: &mut StandaloneHost) -> OpenWithPlugin {
        let mut plugin = OpenWithPlugin::new(
            Box::new(ReadOnlyStore { data }),
            Box::new(RecordingPlatform::new()),
        )
        .with_path_style(PathStyle::Posix);
        plugin.activate(host).unwrap();
        plugin
    }

    #[test]
    fn test_failed_save_reverts_add() {
        let mut host = StandaloneHost::new();
        let mut plugin = read_only_plugin(json!({}), &mut host);

        let result = plugin.add_app(&NewAppForm::new("Code", "code", ""), &mut host);

        assert!(matches!(result, Err(OpenWithError::Io(_))));
        assert!(plugin.registry().unwrap().is_empty());
        assert!(!host.commands().contains("open-file-with-code"));
    }

    #[test]
    fn test_failed_save_reverts_remove_toggle_and_flag() {
        let mut host = StandaloneHost::new();
        let data = json!({ "apps": [{ "name": "Code", "code": "code" }] });
        let mut plugin = read_only_plugin(data, &mut host);
        let before = plugin.registry().unwrap().clone();
        let code = AppEntry::new("Code", "code");

        assert!(plugin.remove_app(&code, &mut host).is_err());
        assert!(plugin.toggle_app(&code, AppField::ShowInMenu).is_err());
        assert!(plugin.set_explorer_in_file_menu(true).is_err());

        assert_eq!(plugin.registry().unwrap(), &before);
        assert!(host.notices().is_empty());
    }

    #[test]
    fn test_activate_registers_builtins_and_apps() {
        let platform = RecordingPlatform::new();
        let mut plugin = plugin_with(
            json!({ "apps": [{ "name": "Code", "code": "code", "arguments": "", "showInMenu": true }] }),
            &platform,
        );
        let mut host = StandaloneHost::with_root("/vault");

        plugin.activate(&mut host).unwrap();

        assert_eq!(plugin.state(), PluginState::Active);
        assert!(host.commands().contains("copy-absolute-file-path"));
        assert!(host.commands().contains("show-file-in-explorer"));
        assert!(host.commands().contains("open-file-with-code"));
        assert_eq!(host.commands().len(), 3);
    }

    #[test]
    fn test_activate_with_invalid_settings_fails() {
        let platform = RecordingPlatform::new();
        let mut plugin = plugin_with(json!({ "apps": 7 }), &platform);
        let mut host = StandaloneHost::new();

        assert!(plugin.activate(&mut host).is_err());
        assert_eq!(plugin.state(), PluginState::Error);
        assert!(host.commands().is_empty());
    }

    #[test]
    fn test_inactive_plugin_rejects_settings_operations() {
        let platform = RecordingPlatform::new();
        let mut plugin = plugin_with(json!({}), &platform);
        let mut host = StandaloneHost::new();

        let result = plugin.add_app(&NewAppForm::new("Code", "code", ""), &mut host);
        assert!(matches!(result, Err(OpenWithError::PluginState(_))));
    }

    #[test]
    fn test_add_app_persists_and_registers_command() {
        let platform = RecordingPlatform::new();
        let mut plugin = plugin_with(json!({}), &platform);
        let mut host = StandaloneHost::with_root("/vault");
        plugin.activate(&mut host).unwrap();

        let added = plugin
            .add_app(&NewAppForm::new("Typora", "typora", ""), &mut host)
            .unwrap();

        assert!(added);
        assert!(host.commands().contains("open-file-with-typora"));
        assert_eq!(
            stored(&plugin),
            json!({
                "apps": [{ "name": "Typora", "code": "typora", "arguments": "", "showInMenu": false }],
                "sysexpInFileMenu": false
            })
        );
    }

    #[test]
    fn test_add_app_without_code_shows_notice() {
        let platform = RecordingPlatform::new();
        let mut plugin = plugin_with(json!({}), &platform);
        let mut host = StandaloneHost::new();
        plugin.activate(&mut host).unwrap();

        let added = plugin
            .add_app(&NewAppForm::new("Typora", "", ""), &mut host)
            .unwrap();

        assert!(!added);
        assert_eq!(plugin.registry().unwrap().len(), 0);
        assert_eq!(host.notices(), &["Launch command cannot be empty".to_string()]);
        assert!(plugin.store().load_data().unwrap() == Some(json!({})));
    }

    #[test]
    fn test_remove_app_keeps_command_and_asks_for_restart() {
        let platform = RecordingPlatform::new();
        let mut plugin = plugin_with(
            json!({ "apps": [{ "name": "Code", "code": "code" }] }),
            &platform,
        );
        let mut host = StandaloneHost::new();
        plugin.activate(&mut host).unwrap();

        let removed = plugin
            .remove_app(&AppEntry::new("Code", "code"), &mut host)
            .unwrap();

        assert!(removed);
        assert!(plugin.registry().unwrap().is_empty());
        assert!(host.commands().contains("open-file-with-code"));
        assert!(host.notices()[0].contains("Restart"));
        assert_eq!(stored(&plugin)["apps"], json!([]));
    }

    #[test]
    fn test_remove_missing_app_is_noop() {
        let platform = RecordingPlatform::new();
        let mut plugin = plugin_with(json!({}), &platform);
        let mut host = StandaloneHost::new();
        plugin.activate(&mut host).unwrap();

        let removed = plugin
            .remove_app(&AppEntry::new("Code", "code"), &mut host)
            .unwrap();

        assert!(!removed);
        assert!(host.notices().is_empty());
    }

    #[test]
    fn test_toggle_and_explorer_flag_persist() {
        let platform = RecordingPlatform::new();
        let mut plugin = plugin_with(
            json!({ "apps": [{ "name": "Code", "code": "code" }] }),
            &platform,
        );
        let mut host = StandaloneHost::new();
        plugin.activate(&mut host).unwrap();

        assert!(plugin
            .toggle_app(&AppEntry::new("Code", "code"), AppField::ShowInMenu)
            .unwrap());
        plugin.set_explorer_in_file_menu(true).unwrap();

        assert_eq!(
            stored(&plugin),
            json!({
                "apps": [{ "name": "Code", "code": "code", "arguments": "", "showInMenu": true }],
                "sysexpInFileMenu": true
            })
        );
    }

    #[test]
    fn test_file_menu_scenario_opens_with_code() {
        let platform = RecordingPlatform::new();
        let mut plugin = plugin_with(
            json!({ "apps": [{ "name": "Code", "code": "code", "arguments": "", "showInMenu": true }] }),
            &platform,
        );
        let mut host = StandaloneHost::with_root("/vault");
        plugin.activate(&mut host).unwrap();
        let file = DocumentHandle::new("notes/a.md");

        let menu = host.file_menu(&mut plugin, &file).unwrap();
        let item = menu.find("Open with Code").unwrap();
        plugin.activate_menu_item(item, &file, &host);

        assert_eq!(
            platform.calls(),
            vec![PlatformCall::OpenWith {
                target: "code".to_string(),
                path: "/vault/notes/a.md".to_string(),
                args: Vec::new(),
            }]
        );
    }

    #[test]
    fn test_file_menu_reflects_live_registry() {
        let platform = RecordingPlatform::new();
        let mut plugin = plugin_with(json!({}), &platform);
        let mut host = StandaloneHost::with_root("/vault");
        plugin.activate(&mut host).unwrap();
        let file = DocumentHandle::new("a.md");

        assert!(host.file_menu(&mut plugin, &file).unwrap().is_empty());

        plugin.set_explorer_in_file_menu(true).unwrap();
        let menu = host.file_menu(&mut plugin, &file).unwrap();
        assert_eq!(menu.len(), 1);
        assert!(menu.find("Show in system explorer").is_some());
    }

    #[test]
    fn test_deactivate_drops_registry() {
        let platform = RecordingPlatform::new();
        let mut plugin = plugin_with(json!({}), &platform);
        let mut host = StandaloneHost::new();
        plugin.activate(&mut host).unwrap();

        plugin.deactivate().unwrap();

        assert_eq!(plugin.state(), PluginState::Inactive);
        assert!(plugin.registry().is_err());
    }
}
