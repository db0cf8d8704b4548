//! Value types exchanged with the host application

use crate::commands::CommandAction;

/// Host reference to a file inside the content root
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentHandle {
    /// Root-relative path using `/` separators
    pub path: String,
}

impl DocumentHandle {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// A command registered with the host's command palette
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Stable identifier, e.g. `copy-absolute-file-path`
    pub id: String,
    /// Display name shown in the palette
    pub name: String,
    /// What the command does once the host asks it to execute
    pub action: CommandAction,
}

/// An item contributed to a file context menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub title: String,
    pub action: CommandAction,
}

/// A file context menu under construction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Menu {
    items: Vec<MenuItem>,
}

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_item(&mut self, title: impl Into<String>, action: CommandAction) {
        self.items.push(MenuItem {
            title: title.into(),
            action,
        });
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item with the given title, if any
    pub fn find(&self, title: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.title == title)
    }
}
