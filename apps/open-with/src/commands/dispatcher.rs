//! Check-then-execute dispatch of command actions
//!
//! A command is available exactly when the host has a focused document.
//! The host checks availability with `checking = true` on every palette
//! query; the side effect only happens when it calls back with
//! `checking = false`.

use crate::host::{DocumentHandle, Host};
use crate::platform::Platform;
use crate::utils::paths::{resolve_absolute_path, PathStyle};

use super::CommandAction;

pub struct Dispatcher<'a> {
    platform: &'a dyn Platform,
    style: PathStyle,
}

impl<'a> Dispatcher<'a> {
    pub fn new(platform: &'a dyn Platform, style: PathStyle) -> Self {
        Self { platform, style }
    }

    /// Command check callback
    ///
    /// Returns whether the command is available. Performs the action only
    /// when `checking` is false and a document is focused.
    pub fn check(&self, action: &CommandAction, checking: bool, host: &dyn Host) -> bool {
        let Some(file) = host.active_document() else {
            return false;
        };

        if !checking {
            self.perform(action, &file, host);
        }
        true
    }

    /// Absolute on-disk path of `file`, `None` if the host has no base path
    pub fn resolve(&self, file: &DocumentHandle, host: &dyn Host) -> Option<String> {
        let base = host.base_path()?;
        Some(resolve_absolute_path(&base, &file.path, self.style))
    }

    /// Run the side effect of `action` against `file`
    ///
    /// Failures are logged and otherwise ignored.
    pub fn perform(&self, action: &CommandAction, file: &DocumentHandle, host: &dyn Host) {
        let command_id = action.id();

        let Some(path) = self.resolve(file, host) else {
            tracing::warn!(
                command_id = %command_id,
                file = %file.path,
                "Content root has no base path on disk, nothing to do"
            );
            return;
        };

        let outcome = match action {
            CommandAction::CopyPath => self.platform.write_clipboard(&path),
            CommandAction::Reveal => self.platform.reveal(&path),
            CommandAction::OpenWith(app) => {
                self.platform
                    .open_with(&app.code, &path, &app.argument_list())
            }
        };

        if let Err(e) = outcome {
            tracing::warn!(command_id = %command_id, error = %e, "Command failed");
        }
    }
}
