use thiserror::Error;

use crate::util::IliError;

//─────────────────────────────────────────────────────────────────────────────

/// Error type for descriptor, manifest and environment operations.
#[derive(Error, Debug)]
pub enum PackageError {
    /// A domain failure (missing support/input file, unsupported computation).
    #[error(transparent)]
    Ili(#[from] IliError),

    /// A distribution glob could not be compiled.
    #[error("Invalid glob pattern '{0}': {1}")]
    Pattern(String, globset::Error),

    /// Walking the project tree failed.
    #[error("Failed to walk project tree: {0}")]
    Walk(#[from] walkdir::Error),

    /// Reading an input file failed after it was located.
    #[error("Failed to read file '{0}': {1}")]
    ReadFile(String, std::io::Error),
}
