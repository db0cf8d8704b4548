//! Settings surface
//!
//! Renders the registry as an editable view and turns user interaction into
//! registry mutations. The tab does not own any settings: it goes through
//! [`SettingsActions`], which the plugin implements. After every mutation the
//! view is torn down and rebuilt from the live settings.

use std::fmt;

use super::models::{AppEntry, AppField, NewAppForm, PluginSettings};
use crate::commands::open_with_command_id;
use crate::error::{OpenWithError, Result};
use crate::host::Host;
use crate::platform::is_launch_target_available;

/// Mutation operations the settings tab needs from the plugin
pub trait SettingsActions {
    /// The live settings
    fn settings(&self) -> Result<&PluginSettings>;

    /// Validate and append an entry, registering its command. Returns
    /// `false` when the form was rejected (a notice has been shown).
    fn add_app(&mut self, form: &NewAppForm, host: &mut dyn Host) -> Result<bool>;

    /// Remove an entry. Returns `false` if it was not present.
    fn remove_app(&mut self, entry: &AppEntry, host: &mut dyn Host) -> Result<bool>;

    /// Flip a boolean field of an entry. Returns `false` if it was not present.
    fn toggle_app(&mut self, entry: &AppEntry, field: AppField) -> Result<bool>;

    fn set_explorer_in_file_menu(&mut self, enabled: bool) -> Result<()>;
}

/// One registered application as shown in the settings tab
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppRow {
    pub name: String,
    pub code: String,
    pub arguments: String,
    pub show_in_menu: bool,
    pub command_id: String,
    /// Whether the launch target currently resolves to an executable
    pub available: bool,
}

impl AppRow {
    fn from_entry(entry: &AppEntry) -> Self {
        Self {
            name: entry.name.clone(),
            code: entry.code.clone(),
            arguments: entry.arguments.clone(),
            show_in_menu: entry.show_in_menu,
            command_id: open_with_command_id(&entry.name),
            available: is_launch_target_available(&entry.code),
        }
    }
}

/// Rendered state of the settings tab
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsView {
    pub explorer_in_file_menu: bool,
    pub apps: Vec<AppRow>,
    pub form: NewAppForm,
}

/// User interaction with the settings tab
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsEvent {
    SetName(String),
    SetCode(String),
    SetArguments(String),
    /// Submit the add-application form
    AddApp,
    /// Delete the application at this row
    RemoveApp(usize),
    /// Flip "show in menu" for the application at this row
    ToggleShowInMenu(usize),
    SetExplorerInFileMenu(bool),
}

#[derive(Debug, Default)]
pub struct SettingsTab {
    form: NewAppForm,
    view: SettingsView,
}

impl SettingsTab {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &NewAppForm {
        &self.form
    }

    /// The most recently rendered view
    pub fn view(&self) -> &SettingsView {
        &self.view
    }

    /// Rebuild the view from the live settings
    pub fn display(&mut self, actions: &dyn SettingsActions) -> Result<&SettingsView> {
        let settings = actions.settings()?;
        self.view = SettingsView {
            explorer_in_file_menu: settings.sysexp_in_file_menu,
            apps: settings.apps.iter().map(AppRow::from_entry).collect(),
            form: self.form.clone(),
        };
        Ok(&self.view)
    }

    /// Apply a user interaction
    ///
    /// Form edits only update the form. Every other event mutates the
    /// settings through `actions` and re-renders the whole view. A
    /// successful add clears the form; a rejected one keeps it for editing.
    pub fn handle(
        &mut self,
        event: SettingsEvent,
        actions: &mut dyn SettingsActions,
        host: &mut dyn Host,
    ) -> Result<&SettingsView> {
        match event {
            SettingsEvent::SetName(name) => {
                self.form.name = name;
                self.view.form = self.form.clone();
                return Ok(&self.view);
            }
            SettingsEvent::SetCode(code) => {
                self.form.code = code;
                self.view.form = self.form.clone();
                return Ok(&self.view);
            }
            SettingsEvent::SetArguments(arguments) => {
                self.form.arguments = arguments;
                self.view.form = self.form.clone();
                return Ok(&self.view);
            }
            SettingsEvent::AddApp => {
                if actions.add_app(&self.form, host)? {
                    self.form = NewAppForm::default();
                }
            }
            SettingsEvent::RemoveApp(row) => {
                let entry = entry_at(&*actions, row)?;
                actions.remove_app(&entry, host)?;
            }
            SettingsEvent::ToggleShowInMenu(row) => {
                let entry = entry_at(&*actions, row)?;
                actions.toggle_app(&entry, AppField::ShowInMenu)?;
            }
            SettingsEvent::SetExplorerInFileMenu(enabled) => {
                actions.set_explorer_in_file_menu(enabled)?;
            }
        }

        self.display(&*actions)
    }
}

fn entry_at(actions: &dyn SettingsActions, row: usize) -> Result<AppEntry> {
    actions
        .settings()?
        .apps
        .get(row)
        .cloned()
        .ok_or_else(|| OpenWithError::not_found("Application row", row.to_string()))
}

impl fmt::Display for SettingsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let on_off = |flag: bool| if flag { "on" } else { "off" };

        writeln!(
            f,
            "Show in system explorer (file menu): {}",
            on_off(self.explorer_in_file_menu)
        )?;

        if self.apps.is_empty() {
            return writeln!(f, "No applications registered.");
        }

        writeln!(f, "Applications:")?;
        for (index, app) in self.apps.iter().enumerate() {
            write!(f, "  {}. {} [{}]", index + 1, app.name, app.code)?;
            if !app.arguments.is_empty() {
                write!(f, " args: {}", app.arguments)?;
            }
            write!(f, " menu: {}", on_off(app.show_in_menu))?;
            write!(f, " command: {}", app.command_id)?;
            if !app.available {
                write!(f, " (launch target not found)")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
