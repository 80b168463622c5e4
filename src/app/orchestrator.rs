//! Main application orchestrator.
//!
//! Initializes the verbose log, resolves the project root (the `--root`
//! override or the built-in one), dispatches the subcommand and prints its
//! output. The log is flushed on every exit path.

use super::cli::{Cli, Command};
use super::commands;
use super::error::AppError;
use super::logger;
use super::{verbose_eprintln, verbose_println};
use crate::package::descriptor;
use crate::util;
use std::env;
use std::path::{Path, PathBuf};

/// Runs the command selected on the command line.
///
/// # Errors
/// Returns `AppError` if the command fails, or if `verify-env` finds
/// unsatisfied requirements (after printing its report).
pub fn run_app(cli: Cli) -> Result<(), AppError> {
    let quiet_mode = cli.quiet;

    if !quiet_mode {
        if let Some(log_file) = &cli.log_file {
            if let Err(e) = logger::init_global_logger(log_file) {
                eprintln!(
                    "Warning: Failed to initialize verbose logger ({}): {}. Verbose file logging will be unavailable.",
                    log_file.display(),
                    e
                );
            } else {
                verbose_println!(
                    quiet_mode,
                    "Verbose logging initialized to {}",
                    log_file.display()
                );
            }
        }
    }

    let result = resolve_root(cli.root, quiet_mode)
        .and_then(|root| dispatch(&cli.command, &root, quiet_mode));

    if let Err(e) = &result {
        verbose_eprintln!(quiet_mode, "{}", e);
    }
    if let Err(e) = logger::flush_global_logger() {
        eprintln!("[WARNING] Failed to flush verbose log: {}", e);
    }
    result
}

// A relative override is taken against the working directory so every
// command sees an absolute root.
fn resolve_root(override_root: Option<PathBuf>, quiet_mode: bool) -> Result<PathBuf, AppError> {
    match override_root {
        Some(root) => {
            let cwd = if root.is_absolute() {
                PathBuf::new()
            } else {
                env::current_dir()?
            };
            let root = util::absolutize(&root, &cwd);
            verbose_println!(quiet_mode, "Using project root override {}", root.display());
            Ok(root)
        }
        None => {
            let root = util::get_ili_project_dir();
            verbose_println!(quiet_mode, "Resolved project root {}", root.display());
            Ok(root)
        }
    }
}

fn dispatch(command: &Command, root: &Path, quiet_mode: bool) -> Result<(), AppError> {
    let descriptor = descriptor();
    let output = match command {
        Command::ProjectDir => commands::project_dir(root),
        Command::Info => commands::info(descriptor),
        Command::Deps { group, output } => {
            commands::deps(descriptor, *group, output.as_deref(), quiet_mode)?
        }
        Command::Manifest => commands::manifest(descriptor, root, quiet_mode)?,
        Command::Check => commands::check(descriptor, root, quiet_mode)?,
        Command::VerifyEnv { snapshot, group } => {
            let report = commands::verify_env(descriptor, snapshot, *group, quiet_mode)?;
            print!("{}", report.text);
            if report.unsatisfied > 0 {
                return Err(AppError::Unsatisfied(report.unsatisfied, *group));
            }
            return Ok(());
        }
    };
    print!("{}", output);
    Ok(())
}
