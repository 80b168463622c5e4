//! File system helpers for the command layer.
//!
//! Validates the project root handed to the tree-walking commands and writes
//! command output to files. Uses the verbose macros from the parent `app`
//! module for logging.

use std::fs::OpenOptions;
use std::io::{BufWriter, Error as IoError, Write};
use std::path::{Path, PathBuf};

use super::error::AppError;
use super::verbose_eprintln;

/// Checks that `root` exists and is a directory.
///
/// # Errors
/// Returns `AppError::InvalidPath` if the path is missing or not a directory.
pub fn validate_project_root(root: &Path, quiet_mode: bool) -> Result<PathBuf, AppError> {
    if !root.exists() {
        let error_msg = format!("{} does not exist", root.display());
        verbose_eprintln!(quiet_mode, "Input Error: {}", error_msg);
        return Err(AppError::InvalidPath(error_msg));
    }
    if !root.is_dir() {
        let error_msg = format!("{} is not a directory", root.display());
        verbose_eprintln!(quiet_mode, "Input Error: {}", error_msg);
        return Err(AppError::InvalidPath(error_msg));
    }
    Ok(root.to_path_buf())
}

/// Writes string content to a file, creating or truncating it.
///
/// # Errors
/// Returns an `IoError` if opening, writing or flushing fails.
pub fn write_content_to_file(file_path: &Path, content: &str) -> Result<(), IoError> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(file_path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(content.as_bytes())?;
    writer.flush()?; // Callers read the file back immediately.
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn rejects_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let err = validate_project_root(&dir.path().join("nope"), true).unwrap_err();
        assert!(matches!(err, AppError::InvalidPath(_)));
    }

    #[test]
    fn rejects_file_as_root() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("setup.cfg");
        fs::write(&file, "").unwrap();
        let err = validate_project_root(&file, true).unwrap_err();
        assert!(err.to_string().contains("is not a directory"));
    }

    #[test]
    fn overwrites_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("requirements.txt");
        write_content_to_file(&file, "old contents that are longer\n").unwrap();
        write_content_to_file(&file, "qcli\n").unwrap();
        assert_eq!(fs::read_to_string(&file).unwrap(), "qcli\n");
    }
}
