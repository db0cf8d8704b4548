//! Host application interface
//!
//! The plugin never talks to a concrete application. Everything it needs
//! from its host (content root, focused document, command palette,
//! transient notices) goes through the [`Host`] trait.

pub mod commands;
pub mod standalone;
pub mod types;

pub use commands::CommandRegistry;
pub use standalone::StandaloneHost;
pub use types::{Command, DocumentHandle, Menu, MenuItem};

/// The services a host application offers to the plugin
pub trait Host {
    /// Absolute base path of the content root, if the host has one on disk
    fn base_path(&self) -> Option<String>;

    /// The currently focused document
    fn active_document(&self) -> Option<DocumentHandle>;

    /// Register a command with the command palette
    fn add_command(&mut self, command: Command);

    /// Show a transient user-visible notice
    fn notice(&mut self, message: &str);
}
