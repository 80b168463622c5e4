use std::fmt;
use std::io;
use thiserror::Error;

//─────────────────────────────────────────────────────────────────────────────

/// The failure categories raised by the support layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A bundled support asset (e.g. a script-language library) is absent.
    MissingSupportFile,
    /// A required input file is absent or unreadable.
    MissingInputFile,
    /// The requested computation has no defined meaning for its input.
    UnsupportedComputation,
}

/// Generic category an [`ErrorKind`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Io,
    InvalidValue,
}

impl ErrorKind {
    pub fn category(self) -> ErrorCategory {
        match self {
            ErrorKind::MissingSupportFile | ErrorKind::MissingInputFile => ErrorCategory::Io,
            ErrorKind::UnsupportedComputation => ErrorCategory::InvalidValue,
        }
    }

    /// Fixed description used when an error carries no message.
    pub fn description(self) -> &'static str {
        match self {
            ErrorKind::MissingSupportFile => "missing support file",
            ErrorKind::MissingInputFile => "missing input file",
            ErrorKind::UnsupportedComputation => "computation lacks a meaning for this input",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

//─────────────────────────────────────────────────────────────────────────────

/// Error raised by the `ili` support layer.
///
/// A closed kind plus an optional message. Callers branch on [`IliError::kind`]
/// for the specific failure or on [`IliError::category`] for the generic one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", render(.kind, .message))]
pub struct IliError {
    kind: ErrorKind,
    message: Option<String>,
}

fn render<'a>(kind: &ErrorKind, message: &'a Option<String>) -> &'a str {
    message.as_deref().unwrap_or(kind.description())
}

impl IliError {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
        }
    }

    pub fn with_message(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: Some(message.into()),
        }
    }

    pub fn missing_support_file(message: impl Into<String>) -> Self {
        Self::with_message(ErrorKind::MissingSupportFile, message)
    }

    pub fn missing_input_file(message: impl Into<String>) -> Self {
        Self::with_message(ErrorKind::MissingInputFile, message)
    }

    pub fn unsupported_computation(message: impl Into<String>) -> Self {
        Self::with_message(ErrorKind::UnsupportedComputation, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl From<IliError> for io::Error {
    fn from(err: IliError) -> Self {
        let kind = match err.category() {
            ErrorCategory::Io => io::ErrorKind::NotFound,
            ErrorCategory::InvalidValue => io::ErrorKind::InvalidInput,
        };
        io::Error::new(kind, err)
    }
}

//─────────────────────────────────────────────────────────────────────────────
