//! Resolution of the top-level `ili` directory.
//!
//! The package directory sits directly below the project root, and the
//! support modules sit directly below the package directory. The root is
//! therefore two levels above a module file. Rather than asking the running
//! binary where its sources live, the location is fixed at build time.

use std::path::{Component, Path, PathBuf};

/// Project root recorded by the build.
pub const PROJECT_ROOT: &str = env!("CARGO_MANIFEST_DIR");

/// Returns the top-level ili directory.
///
/// No existence check is performed on the returned path.
pub fn get_ili_project_dir() -> PathBuf {
    PathBuf::from(PROJECT_ROOT)
}

/// Returns the project root for a module living at `module_file`.
///
/// The path is made absolute against `cwd` when relative and normalized
/// lexically, then its parent (the package directory) and that directory's
/// parent (the project root) are taken. The filesystem is never consulted.
/// Paths too short to have two ancestors collapse to the topmost one.
pub fn project_dir_for(module_file: &Path, cwd: &Path) -> PathBuf {
    let absolute = absolutize(module_file, cwd);
    let package_dir = absolute.parent().unwrap_or(&absolute);
    package_dir.parent().unwrap_or(package_dir).to_path_buf()
}

/// Makes `path` absolute against `cwd` and normalizes it lexically.
pub fn absolutize(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&cwd.join(path))
    }
}

// Drops `.` and resolves `..` against preceding components without touching
// the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}
