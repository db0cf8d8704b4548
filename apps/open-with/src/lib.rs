//! Open with - launch the focused document in external applications
//!
//! The plugin registers "open with" commands for user-configured
//! applications, copies absolute paths to the clipboard, reveals files in
//! the native file browser and contributes the same actions to file
//! context menus. It talks to its host application only through the
//! [`host::Host`] trait; [`host::StandaloneHost`] backs the command-line
//! front end.

pub mod app;
pub mod commands;
pub mod error;
pub mod host;
pub mod logging;
pub mod menu;
pub mod platform;
pub mod plugin;
pub mod settings;
pub mod utils;

pub use error::{OpenWithError, Result};
pub use plugin::{OpenWithPlugin, Plugin};
