//! Native implementation of the platform side effects

use std::path::Path;
use std::process::Command;

use super::Platform;
use crate::error::{OpenWithError, Result};

/// Platform backed by the operating system of the running process
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemPlatform;

impl SystemPlatform {
    pub fn new() -> Self {
        Self
    }
}

impl Platform for SystemPlatform {
    fn open_with(&self, target: &str, path: &str, args: &[String]) -> Result<()> {
        tracing::info!(app = target, path, ?args, "Launching application");

        // The child is dropped without waiting; its exit status is never observed.
        Command::new(target)
            .arg(path)
            .args(args)
            .spawn()
            .map(|_| ())
            .or_else(|e| open_with_fallback(target, path, args, &e.to_string()))
    }

    fn reveal(&self, path: &str) -> Result<()> {
        let path = Path::new(path);

        if !path.exists() {
            return Err(OpenWithError::platform(format!(
                "Path does not exist: {}",
                path.display()
            )));
        }

        tracing::info!("Revealing in file manager: {}", path.display());
        reveal_native(path)
    }

    fn write_clipboard(&self, text: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| OpenWithError::platform(format!("Failed to access clipboard: {e}")))?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| OpenWithError::platform(format!("Failed to write clipboard: {e}")))?;

        tracing::debug!("Copied {} bytes to clipboard", text.len());
        Ok(())
    }
}

/// macOS: app bundles are not on PATH, let Launch Services find them
#[cfg(target_os = "macos")]
fn open_with_fallback(target: &str, path: &str, args: &[String], error: &str) -> Result<()> {
    tracing::debug!("Direct launch of '{target}' failed ({error}), retrying with open -a");

    let mut cmd = Command::new("open");
    cmd.arg("-a").arg(target).arg(path);
    if !args.is_empty() {
        cmd.arg("--args").args(args);
    }
    cmd.spawn()
        .map(|_| ())
        .map_err(|e| OpenWithError::platform(format!("Failed to open '{target}': {e}")))
}

/// Windows: `.cmd` shims such as `code` need the shell to resolve them
#[cfg(target_os = "windows")]
fn open_with_fallback(target: &str, path: &str, args: &[String], error: &str) -> Result<()> {
    tracing::debug!("Direct launch of '{target}' failed ({error}), retrying with start");

    Command::new("cmd")
        .args(["/C", "start", ""])
        .arg(target)
        .arg(path)
        .args(args)
        .spawn()
        .map(|_| ())
        .map_err(|e| OpenWithError::platform(format!("Failed to open '{target}': {e}")))
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn open_with_fallback(target: &str, _path: &str, _args: &[String], error: &str) -> Result<()> {
    Err(OpenWithError::platform(format!(
        "Failed to open '{target}': {error}"
    )))
}

#[cfg(target_os = "macos")]
fn reveal_native(path: &Path) -> Result<()> {
    Command::new("open")
        .arg("-R")
        .arg(path)
        .spawn()
        .map(|_| ())
        .map_err(|e| OpenWithError::platform(format!("Failed to open Finder: {e}")))
}

#[cfg(target_os = "windows")]
fn reveal_native(path: &Path) -> Result<()> {
    Command::new("explorer")
        .arg("/select,")
        .arg(path)
        .spawn()
        .map(|_| ())
        .map_err(|e| OpenWithError::platform(format!("Failed to open Explorer: {e}")))
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn reveal_native(path: &Path) -> Result<()> {
    // xdg-open cannot select a file, so open its directory instead
    let parent = path.parent().unwrap_or(path);
    if Command::new("xdg-open").arg(parent).spawn().is_ok() {
        return Ok(());
    }

    Command::new("nautilus")
        .arg(path)
        .spawn()
        .map(|_| ())
        .map_err(|e| OpenWithError::platform(format!("Failed to open file manager: {e}")))
}
