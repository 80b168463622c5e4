use thiserror::Error;

// Custom Application Error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Ili(#[from] crate::util::IliError),
    #[error(transparent)]
    Package(#[from] crate::package::PackageError),
    #[error("Invalid project root: {0}")]
    InvalidPath(String),
    #[error("{0} requirement(s) of group '{1}' not satisfied")]
    Unsatisfied(usize, crate::package::DependencyGroup),
}
