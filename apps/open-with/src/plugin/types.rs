//! Plugin system type definitions
//!
//! This module defines the core types of the plugin lifecycle:
//! - Plugin manifest and state
//! - Events the host delivers to plugins
//! - The `Plugin` trait

use crate::error::Result;
use crate::host::{DocumentHandle, Host, Menu};

// ============================================================================
// Plugin Metadata & State
// ============================================================================

/// Plugin metadata - describes a plugin's identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginManifest {
    /// Unique plugin identifier (e.g., "open-with")
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Plugin version (semver)
    pub version: String,
    /// Description of what the plugin does
    pub description: String,
}

/// Plugin lifecycle state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PluginState {
    /// Plugin is registered but not running
    #[default]
    Inactive,
    /// Plugin is running and ready
    Active,
    /// Plugin failed to activate
    Error,
}

// ============================================================================
// Host Events
// ============================================================================

/// Events that the host sends to plugins
#[derive(Debug)]
pub enum HostEvent<'a> {
    /// A context menu is being built for a file
    FileMenu {
        menu: &'a mut Menu,
        file: &'a DocumentHandle,
        /// Where the menu was opened, e.g. "file-explorer"
        source: &'a str,
    },
}

impl HostEvent<'_> {
    /// Get a human-readable description of the event for logging
    pub fn description(&self) -> String {
        match self {
            Self::FileMenu { file, source, .. } => {
                format!("File menu for {} from {}", file.path, source)
            }
        }
    }
}

// ============================================================================
// Plugin Trait
// ============================================================================

/// The main plugin trait - all plugins must implement this
pub trait Plugin {
    /// Get plugin metadata
    fn manifest(&self) -> &PluginManifest;

    /// Current lifecycle state
    fn state(&self) -> PluginState;

    /// Called when plugin is activated
    fn activate(&mut self, host: &mut dyn Host) -> Result<()>;

    /// Called when plugin is deactivated
    fn deactivate(&mut self) -> Result<()>;

    /// Handle events from the host
    fn on_event(&mut self, event: HostEvent<'_>, host: &mut dyn Host) -> Result<()>;
}
