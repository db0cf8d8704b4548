//! Platform-specific functionality
//!
//! The side effects commands perform (launching an application, writing the
//! clipboard, revealing a file in the native file browser) live behind the
//! [`Platform`] trait. [`SystemPlatform`] implements it for the current OS
//! using `cfg` attributes.

mod system;

pub use system::SystemPlatform;

use std::path::Path;

use crate::error::Result;

/// Fire-and-forget side effects requested by commands and menu items
pub trait Platform {
    /// Start `target` with `path` as its first argument followed by `args`
    ///
    /// Returns once the launch was requested; the process is not awaited.
    fn open_with(&self, target: &str, path: &str, args: &[String]) -> Result<()>;

    /// Show `path` in the native file browser
    fn reveal(&self, path: &str) -> Result<()>;

    /// Put `text` on the system clipboard
    fn write_clipboard(&self, text: &str) -> Result<()>;
}

/// Whether a launch target resolves to an executable
///
/// Checks PATH via `which` and falls back to the target as a literal path.
pub fn is_launch_target_available(target: &str) -> bool {
    which::which(target).is_ok() || Path::new(target).exists()
}
