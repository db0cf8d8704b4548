//! Host-side command registry
//!
//! Commands are stored by id. Executing a command follows the two-phase
//! contract: the check callback is first called with `checking = true` and
//! only run for real when that check reports the command as available.

use std::collections::BTreeMap;

use super::types::Command;
use crate::commands::CommandAction;
use crate::error::{OpenWithError, Result};

#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: BTreeMap<String, Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command, replacing any command with the same id
    ///
    /// Returns the replaced command.
    pub fn register(&mut self, command: Command) -> Option<Command> {
        let replaced = self.commands.insert(command.id.clone(), command);
        if let Some(previous) = &replaced {
            tracing::warn!(command_id = %previous.id, "Command id registered twice, replacing");
        }
        replaced
    }

    pub fn get(&self, id: &str) -> Option<&Command> {
        self.commands.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.commands.contains_key(id)
    }

    /// Registered commands ordered by id
    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.values()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Whether the command is currently available, without running it
    pub fn is_available<F>(&self, id: &str, mut check: F) -> Result<bool>
    where
        F: FnMut(&CommandAction, bool) -> bool,
    {
        let command = self
            .get(id)
            .ok_or_else(|| OpenWithError::not_found("Command", id))?;
        Ok(check(&command.action, true))
    }

    /// Check the command and execute it if available
    ///
    /// Returns whether the command ran.
    pub fn execute<F>(&self, id: &str, mut check: F) -> Result<bool>
    where
        F: FnMut(&CommandAction, bool) -> bool,
    {
        let command = self
            .get(id)
            .ok_or_else(|| OpenWithError::not_found("Command", id))?;

        if !check(&command.action, true) {
            tracing::debug!(command_id = id, "Command not available");
            return Ok(false);
        }

        tracing::info!(command_id = id, "Executing command");
        check(&command.action, false);
        Ok(true)
    }
}
