//! One function per subcommand.
//!
//! Each returns the text to print so the orchestrator owns stdout. Progress
//! goes to the verbose log.

use std::path::Path;

use super::error::AppError;
use super::file_handler;
use super::{verbose_eprintln, verbose_println};
use crate::package::{
    verify_package_data, DependencyGroup, Environment, Manifest, PackageDescriptor,
    RequirementStatus,
};

/// Result of `verify-env`: the report plus how many requirements failed.
#[derive(Debug)]
pub struct EnvReport {
    pub text: String,
    pub unsatisfied: usize,
}

/// Formats the resolved project root.
///
/// # Arguments
/// * `root` - The root chosen by the orchestrator (override or built-in).
pub fn project_dir(root: &Path) -> String {
    format!("{}\n", root.display())
}

/// Formats the descriptor's metadata, one `key: value` line per field.
///
/// # Arguments
/// * `descriptor` - The package descriptor to describe.
pub fn info(descriptor: &PackageDescriptor) -> String {
    let mut lines = vec![
        format!("name:       {}", descriptor.name),
        format!("version:    {}", descriptor.version),
        format!("summary:    {}", descriptor.long_description.trim()),
        format!(
            "maintainer: {} <{}>",
            descriptor.maintainer, descriptor.maintainer_email
        ),
        format!("url:        {}", descriptor.url),
        format!("packages:   {}", descriptor.packages.join(", ")),
        format!("scripts:    {}", descriptor.scripts.join(", ")),
    ];
    for (package, patterns) in &descriptor.package_data {
        lines.push(format!("data[{}]:  {}", package, patterns.join(", ")));
    }
    let extras: Vec<&str> = descriptor.extras_require.keys().copied().collect();
    lines.push(format!("extras:     {}", extras.join(", ")));
    join_lines(lines)
}

/// Lists a group's requirements, optionally writing them to `output`.
///
/// # Errors
/// `AppError::Ili` for an undeclared group, `AppError::Io` if `output`
/// cannot be written.
pub fn deps(
    descriptor: &PackageDescriptor,
    group: DependencyGroup,
    output: Option<&Path>,
    quiet_mode: bool,
) -> Result<String, AppError> {
    let set = descriptor.dependencies(group)?;
    verbose_println!(
        quiet_mode,
        "Group '{}' declares {} requirement(s)",
        group,
        set.len()
    );
    let out = join_lines(set.iter().map(|requirement| requirement.to_string()));
    if let Some(path) = output {
        file_handler::write_content_to_file(path, &out).map_err(|e| {
            verbose_eprintln!(quiet_mode, "Failed to write {}: {}", path.display(), e);
            AppError::Io(e)
        })?;
        verbose_println!(quiet_mode, "Requirements written to {}", path.display());
    }
    Ok(out)
}

/// Lists the files the descriptor selects under `root`, relative to it.
///
/// # Errors
/// `AppError::InvalidPath` if `root` is not a directory, `AppError::Package`
/// if a glob is invalid or the walk fails.
pub fn manifest(
    descriptor: &PackageDescriptor,
    root: &Path,
    quiet_mode: bool,
) -> Result<String, AppError> {
    let root = file_handler::validate_project_root(root, quiet_mode)?;
    let manifest = Manifest::collect(descriptor, &root)?;
    verbose_println!(
        quiet_mode,
        "Selected {} script(s) and {} data file(s) under {}",
        manifest.scripts.len(),
        manifest.package_data.len(),
        root.display()
    );
    let entries = manifest
        .scripts
        .iter()
        .map(|p| ("script", p))
        .chain(manifest.package_data.iter().map(|p| ("data", p)));
    Ok(join_lines(entries.map(|(label, path)| {
        let shown = path.strip_prefix(&root).unwrap_or(path);
        format!("{}\t{}", label, shown.display())
    })))
}

/// Verifies that every support file glob matches under `root`.
///
/// # Errors
/// `AppError::Package` wrapping a `MissingSupportFile` error for the first
/// glob that selects nothing.
pub fn check(
    descriptor: &PackageDescriptor,
    root: &Path,
    quiet_mode: bool,
) -> Result<String, AppError> {
    let root = file_handler::validate_project_root(root, quiet_mode)?;
    let found = verify_package_data(descriptor, &root).map_err(|e| {
        verbose_eprintln!(quiet_mode, "Support check failed: {}", e);
        e
    })?;
    Ok(format!(
        "{} support file(s) present under {}\n",
        found,
        root.display()
    ))
}

/// Checks a snapshot file against `group`.
///
/// # Errors
/// `MissingInputFile` if the snapshot cannot be read, `UnsupportedComputation`
/// if it is malformed or a constrained distribution's version cannot be
/// compared.
pub fn verify_env(
    descriptor: &PackageDescriptor,
    snapshot: &Path,
    group: DependencyGroup,
    quiet_mode: bool,
) -> Result<EnvReport, AppError> {
    let env = Environment::from_file(snapshot)?;
    verbose_println!(
        quiet_mode,
        "Loaded {} installed distribution(s) from {}",
        env.len(),
        snapshot.display()
    );
    let set = descriptor.dependencies(group)?;

    let mut lines = Vec::new();
    let mut unsatisfied = 0;
    for status in env.check(set)? {
        let line = match &status {
            RequirementStatus::Satisfied(req, installed) => {
                format!("ok        {} ({})", req, installed)
            }
            RequirementStatus::Missing(req) => format!("missing   {}", req),
            RequirementStatus::Conflict(req, installed) => {
                format!("conflict  {} (installed {})", req, installed)
            }
        };
        if !status.is_satisfied() {
            unsatisfied += 1;
        }
        lines.push(line);
    }
    Ok(EnvReport {
        text: join_lines(lines),
        unsatisfied,
    })
}

// Newline-terminates every line, including the last.
fn join_lines(lines: impl IntoIterator<Item = String>) -> String {
    lines.into_iter().fold(String::new(), |mut out, line| {
        out.push_str(&line);
        out.push('\n');
        out
    })
}
