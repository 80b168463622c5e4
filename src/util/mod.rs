// error module
mod error;
// project root resolution
mod project;
// support and input file lookup
mod support;

//─────────────────────────────────────────────────────────────────────────────
// Public re-exports.
//─────────────────────────────────────────────────────────────────────────────
pub use error::{ErrorCategory, ErrorKind, IliError};
pub use project::{absolutize, get_ili_project_dir, project_dir_for, PROJECT_ROOT};
pub use support::{locate_support_file, require_input_file};
