use std::fs::File;
use std::path::{Path, PathBuf};

use super::error::IliError;

/// Locates a bundled support file below `package_dir`.
///
/// # Errors
/// Returns a `MissingSupportFile` error if the file does not exist.
pub fn locate_support_file(package_dir: &Path, relative: &str) -> Result<PathBuf, IliError> {
    let candidate = package_dir.join(relative);
    if candidate.is_file() {
        Ok(candidate)
    } else {
        Err(IliError::missing_support_file(format!(
            "{} not found",
            candidate.display()
        )))
    }
}

/// Checks that `path` names a readable regular file.
///
/// # Errors
/// Returns a `MissingInputFile` error if the path does not exist, is not a
/// file, or cannot be opened for reading.
pub fn require_input_file(path: &Path) -> Result<PathBuf, IliError> {
    if !path.exists() {
        return Err(IliError::missing_input_file(format!(
            "{} not found",
            path.display()
        )));
    }
    if !path.is_file() {
        return Err(IliError::missing_input_file(format!(
            "{} is not a file",
            path.display()
        )));
    }
    File::open(path).map_err(|e| {
        IliError::missing_input_file(format!("{} is not readable: {}", path.display(), e))
    })?;
    Ok(path.to_path_buf())
}
