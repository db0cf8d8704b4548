//! Settings document models

use serde::{Deserialize, Serialize};

/// An external application the active document can be opened with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppEntry {
    /// User-facing label, also the basis of the command id
    pub name: String,
    /// Launch target: a command on PATH or an absolute path
    pub code: String,
    /// Comma-joined extra arguments passed after the document path
    #[serde(default)]
    pub arguments: String,
    /// Whether the entry appears in the file context menu
    #[serde(default)]
    pub show_in_menu: bool,
}

impl AppEntry {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            arguments: String::new(),
            show_in_menu: false,
        }
    }

    pub fn with_arguments(mut self, arguments: impl Into<String>) -> Self {
        self.arguments = arguments.into();
        self
    }

    pub fn with_show_in_menu(mut self, show_in_menu: bool) -> Self {
        self.show_in_menu = show_in_menu;
        self
    }

    /// Split the comma-joined argument string into ordered tokens
    ///
    /// Tokens are trimmed and empty tokens dropped, so `""` yields no
    /// arguments at all.
    pub fn argument_list(&self) -> Vec<String> {
        self.arguments
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// The persisted plugin settings document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginSettings {
    /// Registered applications in display order
    pub apps: Vec<AppEntry>,
    /// Whether file context menus get a "Show in system explorer" item
    pub sysexp_in_file_menu: bool,
}

/// Typed state of the settings tab's "add application" form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewAppForm {
    pub name: String,
    pub code: String,
    pub arguments: String,
}

impl NewAppForm {
    pub fn new(
        name: impl Into<String>,
        code: impl Into<String>,
        arguments: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            arguments: arguments.into(),
        }
    }
}

/// Boolean fields of an [`AppEntry`] that can be toggled in place
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppField {
    ShowInMenu,
}
