//! Atomic file operations for crash-safe persistence.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use crate::error::{PersistenceError, Result};

/// Creates a directory and its parents if missing.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.is_dir() {
        fs::create_dir_all(path).map_err(|source| PersistenceError::DirectoryError {
            path: path.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Writes data to a file atomically.
///
/// This function writes to a temporary file first, then renames it to the
/// target path, so readers never observe a partially written document.
///
/// # Errors
/// Returns an error if the write or rename fails.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    ensure_dir(dir)?;

    // Temp file in the same directory keeps the rename on one filesystem
    let mut temp_file =
        tempfile::NamedTempFile::new_in(dir).map_err(|source| PersistenceError::WriteError {
            path: path.to_path_buf(),
            source,
        })?;

    temp_file
        .write_all(data)
        .and_then(|_| temp_file.flush())
        .map_err(|source| PersistenceError::WriteError {
            path: path.to_path_buf(),
            source,
        })?;

    temp_file
        .persist(path)
        .map_err(|e| PersistenceError::WriteError {
            path: path.to_path_buf(),
            source: e.error,
        })?;

    Ok(())
}

/// Reads a text file, returning `None` if it doesn't exist.
pub fn read_text_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(PersistenceError::ReadError {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Writes `data` only if `path` does not exist yet.
///
/// Returns `true` if the file was created.
pub fn write_if_absent(path: &Path, data: &[u8]) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    atomic_write(path, data)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_atomic_write_creates_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("goals.md");

        atomic_write(&path, b"ship it").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "ship it");
    }

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("team/agents/milo/soul.md");

        atomic_write(&path, b"persona").unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_atomic_write_replaces_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("status.md");

        atomic_write(&path, b"first").unwrap();
        atomic_write(&path, b"second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn test_read_text_optional_missing() {
        let dir = tempdir().unwrap();
        let result = read_text_optional(&dir.path().join("missing.md")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_read_text_optional_directory_is_error() {
        let dir = tempdir().unwrap();
        let result = read_text_optional(dir.path());
        assert!(matches!(result, Err(PersistenceError::ReadError { .. })));
    }

    #[test]
    fn test_write_if_absent_keeps_existing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("decisions.md");

        assert!(write_if_absent(&path, b"default").unwrap());
        atomic_write(&path, b"edited by operator").unwrap();
        assert!(!write_if_absent(&path, b"default").unwrap());

        assert_eq!(fs::read_to_string(&path).unwrap(), "edited by operator");
    }
}
