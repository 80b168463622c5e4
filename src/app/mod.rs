mod cli;
mod commands;
mod error;
mod file_handler;
mod logger;
mod orchestrator;

pub use cli::{Cli, Command};
pub use error::AppError;
pub use orchestrator::run_app;

// Macros for use by child modules of app (orchestrator, commands, file_handler).
// When expanded in a sibling module, `super` refers to `app`, so
// `super::logger` resolves to this module's logger.
macro_rules! verbose_println {
    ($quiet:expr, $($arg:tt)*) => {
        if !$quiet {
            super::logger::log_verbose_message_args(format_args!($($arg)*));
        }
    };
}

macro_rules! verbose_eprintln {
    ($quiet:expr, $($arg:tt)*) => {
        if !$quiet {
            super::logger::log_verbose_error_args(format_args!($($arg)*));
        }
    };
}

// Bring the macros into path scope so sibling modules can `use super::...` them.
use verbose_eprintln;
use verbose_println;
