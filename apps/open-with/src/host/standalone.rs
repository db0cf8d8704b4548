//! In-process host used by the command-line front end and by tests
//!
//! Keeps a content root, at most one focused document, a command palette
//! and the list of notices shown so far.

use std::path::PathBuf;

use super::commands::CommandRegistry;
use super::types::{Command, DocumentHandle, Menu};
use super::Host;
use crate::error::Result;
use crate::plugin::{HostEvent, OpenWithPlugin, Plugin};

/// Source reported for context menus opened by this host
pub const FILE_EXPLORER_SOURCE: &str = "file-explorer";

#[derive(Debug, Default)]
pub struct StandaloneHost {
    base_path: Option<PathBuf>,
    active: Option<DocumentHandle>,
    commands: CommandRegistry,
    notices: Vec<String>,
}

impl StandaloneHost {
    /// A host without a content root on disk
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            base_path: Some(root.into()),
            ..Self::default()
        }
    }

    /// Focus a document
    pub fn open_document(&mut self, file: DocumentHandle) {
        tracing::debug!(file = %file.path, "Document focused");
        self.active = Some(file);
    }

    pub fn close_document(&mut self) {
        self.active = None;
    }

    pub fn commands(&self) -> &CommandRegistry {
        &self.commands
    }

    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    /// Drain the notices shown so far
    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }

    /// Run a palette command through the plugin's check callback
    ///
    /// Returns whether the command ran.
    pub fn execute_command(&self, id: &str, plugin: &OpenWithPlugin) -> Result<bool> {
        self.commands
            .execute(id, |action, checking| plugin.check_command(action, checking, self))
    }

    pub fn is_command_available(&self, id: &str, plugin: &OpenWithPlugin) -> Result<bool> {
        self.commands
            .is_available(id, |action, checking| plugin.check_command(action, checking, self))
    }

    /// Build the context menu for `file` by asking the plugin to contribute
    pub fn file_menu(&mut self, plugin: &mut OpenWithPlugin, file: &DocumentHandle) -> Result<Menu> {
        let mut menu = Menu::new();
        plugin.on_event(
            HostEvent::FileMenu {
                menu: &mut menu,
                file,
                source: FILE_EXPLORER_SOURCE,
            },
            self,
        )?;
        Ok(menu)
    }
}

impl Host for StandaloneHost {
    fn base_path(&self) -> Option<String> {
        self.base_path
            .as_ref()
            .map(|path| path.to_string_lossy().into_owned())
    }

    fn active_document(&self) -> Option<DocumentHandle> {
        self.active.clone()
    }

    fn add_command(&mut self, command: Command) {
        tracing::debug!(command_id = %command.id, "Command registered");
        self.commands.register(command);
    }

    fn notice(&mut self, message: &str) {
        tracing::info!("Notice: {}", message);
        self.notices.push(message.to_string());
    }
}
