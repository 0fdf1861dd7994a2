use super::expansion::expand_tilde;
use std::fs;
use std::path::{Path, PathBuf};

/// Checks if a file is readable
///
/// # Errors
///
/// Returns an error if the path is not a regular file or cannot be stat'ed.
pub fn check_readable_file(file: &str) -> Result<PathBuf, String> {
    let expanded_path = expand_tilde(Path::new(file))?;

    if expanded_path.is_file() && fs::metadata(&expanded_path).is_ok() {
        Ok(expanded_path)
    } else {
        Err(format!("The file '{file}' is not readable."))
    }
}

/// Checks that a file could be created at `file_path` without creating it
///
/// # Errors
///
/// Returns an error if the parent directory is missing, is not a directory,
/// or the path itself is an existing directory.
pub fn check_parent_dir_writable(file_path: &str) -> Result<PathBuf, String> {
    let expanded_path = expand_tilde(Path::new(file_path))?;

    if expanded_path.is_dir() {
        return Err(format!("'{}' is a directory.", expanded_path.display()));
    }

    let parent = match expanded_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if !parent.is_dir() {
        return Err(format!(
            "The parent directory of '{}' does not exist.",
            expanded_path.display()
        ));
    }
    let readonly = fs::metadata(parent)
        .map(|m| m.permissions().readonly())
        .map_err(|e| format!("Unable to inspect '{}': {e}", parent.display()))?;
    if readonly {
        return Err(format!("The directory '{}' is not writable.", parent.display()));
    }

    Ok(expanded_path)
}

/// Read a single value (key id, secret, ...) from a file, trimming whitespace and newlines
///
/// # Errors
///
/// Returns an error if the file cannot be read or holds only whitespace.
pub fn read_value_from_file(file_path: &Path) -> Result<String, String> {
    let value = fs::read_to_string(file_path)
        .map_err(|e| format!("Failed to read '{}': {e}", file_path.display()))?;
    let value = value.trim();
    if value.is_empty() {
        return Err(format!("'{}' is empty.", file_path.display()));
    }
    Ok(value.to_string())
}
