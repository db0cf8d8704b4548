//! Commands contributed to the host
//!
//! Two built-in commands (copy path, reveal in file browser) plus one
//! "open with" command per registered application.

pub mod dispatcher;

pub use dispatcher::Dispatcher;

use crate::host::Command;
use crate::settings::AppEntry;

pub const COPY_PATH_COMMAND_ID: &str = "copy-absolute-file-path";
pub const REVEAL_COMMAND_ID: &str = "show-file-in-explorer";
pub const OPEN_WITH_COMMAND_PREFIX: &str = "open-file-with-";

/// The side effect a command or menu item performs on a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandAction {
    /// Write the document's absolute path to the clipboard
    CopyPath,
    /// Reveal the document in the native file browser
    Reveal,
    /// Launch an application with the document's absolute path
    OpenWith(AppEntry),
}

impl CommandAction {
    /// Stable command identifier
    pub fn id(&self) -> String {
        match self {
            Self::CopyPath => COPY_PATH_COMMAND_ID.to_string(),
            Self::Reveal => REVEAL_COMMAND_ID.to_string(),
            Self::OpenWith(app) => open_with_command_id(&app.name),
        }
    }

    /// Display name in the command palette
    pub fn name(&self) -> String {
        match self {
            Self::CopyPath => "Copy absolute file path".to_string(),
            Self::Reveal => "Show file in system explorer".to_string(),
            Self::OpenWith(app) => format!("Open with {}", app.name),
        }
    }

    pub fn into_command(self) -> Command {
        Command {
            id: self.id(),
            name: self.name(),
            action: self,
        }
    }
}

/// Command id of an application entry: `open-file-with-<lowercased name>`
pub fn open_with_command_id(name: &str) -> String {
    format!("{OPEN_WITH_COMMAND_PREFIX}{}", name.to_lowercase())
}

/// All commands for the given applications, built-ins first
pub fn all_commands(apps: &[AppEntry]) -> Vec<Command> {
    let mut commands = vec![
        CommandAction::CopyPath.into_command(),
        CommandAction::Reveal.into_command(),
    ];
    commands.extend(
        apps.iter()
            .map(|app| CommandAction::OpenWith(app.clone()).into_command()),
    );
    commands
}
