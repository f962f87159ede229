//! Local target path resolution.
//!
//! Downloaded files land under `<target root>/<dataset slug>/<relative path>`.
//! This module resolves the target root from user input.

use std::path::{Component, Path, PathBuf};

use thiserror::Error;

/// Errors that can occur during path resolution.
#[derive(Debug, Error)]
pub enum PathError {
    /// Could not determine the user's home directory.
    #[error("Cannot determine home directory")]
    NoHomeDir,

    /// Failed to get the current working directory.
    #[error("Cannot determine current directory: {0}")]
    CurrentDirError(String),
}

/// Resolve the directory downloads are written under.
///
/// - `None` or an empty string resolves to the current directory
/// - A leading `~` expands to the user's home directory
/// - Relative paths are made absolute against the current directory
/// - Existing paths are canonicalized (symlinks resolved)
pub fn resolve_target_root(input: Option<&str>) -> Result<PathBuf, PathError> {
    let cwd = || std::env::current_dir().map_err(|e| PathError::CurrentDirError(e.to_string()));

    let raw = input.map(str::trim).filter(|s| !s.is_empty());
    let Some(raw) = raw else {
        return cwd();
    };

    let expanded = expand_home(raw)?;
    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        cwd()?.join(expanded)
    };

    Ok(std::fs::canonicalize(&absolute).unwrap_or_else(|_| lexical_normalize(&absolute)))
}

fn expand_home(raw: &str) -> Result<PathBuf, PathError> {
    let Some(rest) = raw.strip_prefix('~') else {
        return Ok(PathBuf::from(raw));
    };
    // `~user` forms are left alone
    if !(rest.is_empty() || rest.starts_with('/') || rest.starts_with('\\')) {
        return Ok(PathBuf::from(raw));
    }
    let home = dirs::home_dir().ok_or(PathError::NoHomeDir)?;
    Ok(home.join(rest.trim_start_matches(['/', '\\'])))
}

/// Drop `.` components and fold `..` without touching the filesystem.
fn lexical_normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
