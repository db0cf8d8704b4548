//! Path utilities for open-with
//!
//! Resolves root-relative document paths to absolute on-disk paths and
//! normalizes their separators for the host operating system.

use std::borrow::Cow;
use std::path::{Component, Path, PathBuf};

use crate::error::{OpenWithError, Result};

/// Separator convention applied to resolved paths
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStyle {
    /// `/` separators, no substitution
    Posix,
    /// Windows family: `\` accepted on input, every `/` replaced by `\` on output
    Windows,
}

impl PathStyle {
    /// Style of the operating system this binary was built for
    pub fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Posix
        }
    }
}

/// Resolve a document's absolute path from the content root base path
///
/// Concatenates `base`, `/` and `relative`, normalizes the result and, for
/// [`PathStyle::Windows`], replaces every `/` with `\`.
///
/// # Example
/// ```
/// use open_with_lib::utils::paths::{resolve_absolute_path, PathStyle};
///
/// assert_eq!(
///     resolve_absolute_path("/vault", "notes/a.md", PathStyle::Posix),
///     "/vault/notes/a.md"
/// );
/// assert_eq!(
///     resolve_absolute_path("/vault", "notes/a.md", PathStyle::Windows),
///     "\\vault\\notes\\a.md"
/// );
/// ```
pub fn resolve_absolute_path(base: &str, relative: &str, style: PathStyle) -> String {
    let joined = format!("{base}/{relative}");
    let normalized = normalize(&joined, style);
    match style {
        PathStyle::Windows => normalized.replace('/', "\\"),
        PathStyle::Posix => normalized,
    }
}

/// Collapse `.` and `..` segments and duplicate separators
///
/// The result always uses `/`. `..` segments that would climb above an
/// absolute root are dropped; on a relative path they are kept. An empty
/// result becomes `.`.
pub fn normalize(path: &str, style: PathStyle) -> String {
    let unified: Cow<'_, str> = match style {
        PathStyle::Windows => Cow::Owned(path.replace('\\', "/")),
        PathStyle::Posix => Cow::Borrowed(path),
    };
    let (prefix, rest) = split_prefix(&unified, style);
    let absolute = rest.starts_with('/');

    let mut segments: Vec<&str> = Vec::new();
    for segment in rest.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(last) if *last != ".." => {
                    segments.pop();
                }
                _ if absolute => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    let mut out = String::from(prefix);
    if absolute {
        out.push('/');
    }
    out.push_str(&segments.join("/"));
    if out.is_empty() {
        out.push('.');
    }
    out
}

/// Split off a Windows drive (`C:`) or the first slash of a UNC path
fn split_prefix(path: &str, style: PathStyle) -> (&str, &str) {
    if style == PathStyle::Windows {
        let bytes = path.as_bytes();
        if bytes.len() >= 2 && bytes[1] == b':' && bytes[0].is_ascii_alphabetic() {
            return path.split_at(2);
        }
        if path.starts_with("//") && !path.starts_with("///") {
            return path.split_at(1);
        }
    }
    ("", path)
}

/// Expand tilde (~) to the user's home directory
///
/// # Arguments
/// * `path` - A path string that may start with ~/
///
/// # Returns
/// The expanded path string with ~ replaced by the home directory
pub fn expand_tilde(path: &str) -> String {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = home_dir() {
            return home.join(stripped).to_string_lossy().to_string();
        }
    } else if path == "~" {
        if let Some(home) = home_dir() {
            return home.to_string_lossy().to_string();
        }
    }
    path.to_string()
}

/// Get the user's home directory
///
/// Uses the `home` crate on macOS, falls back to directories crate otherwise
fn home_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        home::home_dir()
    }
    #[cfg(not(target_os = "macos"))]
    {
        directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
    }
}

/// Turn a user-supplied file argument into a root-relative document path
///
/// Absolute paths must lie under `root` and are made relative to it;
/// anything else is taken as already relative. Components are joined
/// with `/`.
pub fn relative_to_root(root: &Path, file: &str) -> Result<String> {
    let file_path = Path::new(file);
    let relative = if file_path.is_absolute() {
        file_path.strip_prefix(root).map_err(|_| {
            OpenWithError::validation(format!("{} is not inside {}", file, root.display()))
        })?
    } else {
        file_path
    };

    Ok(relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().to_string()),
            Component::ParentDir => Some("..".to_string()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/"))
}
