//! Filesystem utilities for open-with

use std::fs;
use std::path::Path;

use crate::error::{OpenWithError, Result};

/// Read a file to string, returning `None` when it does not exist
///
/// # Arguments
/// * `path` - Path to read
pub fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(OpenWithError::Io(e)),
    }
}

/// Write a string to a file atomically
///
/// Parent directories are created if they don't exist. The contents go to a
/// temp file next to the target which is then renamed over it, so readers
/// see either the old or the new document.
///
/// # Arguments
/// * `path` - Path to write
/// * `contents` - String contents to write
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(OpenWithError::Io)?;
        }
    }

    let file_name = path
        .file_name()
        .ok_or_else(|| OpenWithError::config(format!("Not a file path: {}", path.display())))?;
    let temp = path.with_file_name(format!(
        "{}.tmp.{}",
        file_name.to_string_lossy(),
        std::process::id()
    ));

    fs::write(&temp, contents).map_err(OpenWithError::Io)?;
    fs::rename(&temp, path).map_err(|e| {
        let _ = fs::remove_file(&temp);
        OpenWithError::Io(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_optional_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(read_optional(&missing).unwrap().is_none());
    }

    #[test]
    fn test_write_atomic_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested/deeper/settings.json");

        write_atomic(&target, "{}").unwrap();

        assert_eq!(read_optional(&target).unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn test_write_atomic_overwrites_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("settings.json");

        write_atomic(&target, "first").unwrap();
        write_atomic(&target, "second").unwrap();

        assert_eq!(read_optional(&target).unwrap().as_deref(), Some("second"));
        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }
}
