//! Expands the descriptor's distribution globs against a project tree.
//!
//! Matching follows the packaging tool's glob rules: `*` stays within one
//! path component, dot-entries are never matched, and a base directory that
//! does not exist simply contributes nothing.

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use super::descriptor::PackageDescriptor;
use super::error::PackageError;
use crate::util::IliError;

/// Files a descriptor selects from one project tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    pub scripts: Vec<PathBuf>,
    pub package_data: Vec<PathBuf>,
}

impl Manifest {
    /// Resolves `descriptor`'s `scripts` and `package_data` under `root`.
    ///
    /// Script globs are relative to `root`; package data globs are relative
    /// to `root/<package>`. Returned paths are absolute (rooted at `root`),
    /// sorted and unique.
    pub fn collect(descriptor: &PackageDescriptor, root: &Path) -> Result<Self, PackageError> {
        let scripts = expand_globs(root, &descriptor.scripts)?;
        let mut package_data = Vec::new();
        for (package, patterns) in &descriptor.package_data {
            package_data.extend(expand_globs(&root.join(package), patterns)?);
        }
        package_data.sort();
        package_data.dedup();
        Ok(Self {
            scripts,
            package_data,
        })
    }

    pub fn len(&self) -> usize {
        self.scripts.len() + self.package_data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Checks that each package data glob matches at least one file.
///
/// # Errors
/// Returns `PackageError::Ili` with a `MissingSupportFile` kind naming the
/// first glob (in declaration order) that selects nothing.
pub fn verify_package_data(descriptor: &PackageDescriptor, root: &Path) -> Result<usize, PackageError> {
    let mut total = 0;
    for (package, patterns) in &descriptor.package_data {
        let base = root.join(package);
        for pattern in patterns {
            let matched = expand_globs(&base, std::slice::from_ref(pattern))?;
            if matched.is_empty() {
                return Err(IliError::missing_support_file(format!(
                    "no support files match {}/{} under {}",
                    package,
                    pattern,
                    root.display()
                ))
                .into());
            }
            total += matched.len();
        }
    }
    Ok(total)
}

/// Expands `patterns` relative to `base` into sorted, unique file paths.
pub fn expand_globs(base: &Path, patterns: &[&str]) -> Result<Vec<PathBuf>, PackageError> {
    if patterns.is_empty() || !base.is_dir() {
        return Ok(Vec::new());
    }
    let set = compile_globset(patterns)?;
    let max_depth = if patterns.iter().any(|p| p.contains("**")) {
        usize::MAX
    } else {
        patterns
            .iter()
            .map(|p| p.split('/').filter(|s| !s.is_empty()).count())
            .max()
            .unwrap_or(1)
    };

    let mut found = BTreeSet::new();
    let walker = WalkDir::new(base)
        .min_depth(1)
        .max_depth(max_depth)
        .into_iter()
        .filter_entry(|e| !is_hidden(e));
    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_dir() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(base) else {
            continue;
        };
        if set.is_match(relative) {
            found.insert(entry.path().to_path_buf());
        }
    }
    Ok(found.into_iter().collect())
}

fn compile_globset(patterns: &[&str]) -> Result<GlobSet, PackageError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|e| PackageError::Pattern(pattern.to_string(), e))?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| PackageError::Pattern(patterns.join(", "), e))
}

// Depth 0 is the walk root, which may itself be a dot-directory.
fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|s| s.starts_with('.'))
            .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::descriptor;
    use crate::util::ErrorKind;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    fn populated_tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(root, "scripts/ili_server.py");
        touch(root, "scripts/README");
        touch(root, "ili/js/main.js");
        touch(root, "ili/js/volume/VolumeController.js");
        touch(root, "ili/js/lib/require.config.js");
        touch(root, "ili/js/workers/Mapper.js");
        touch(root, "ili/js/.hidden.js");
        dir
    }

    #[test]
    fn collects_scripts_and_package_data() {
        let dir = populated_tree();
        let root = dir.path();
        let manifest = Manifest::collect(descriptor(), root).unwrap();

        assert_eq!(manifest.scripts, vec![root.join("scripts/ili_server.py")]);
        assert_eq!(
            manifest.package_data,
            vec![
                root.join("ili/js/lib/require.config.js"),
                root.join("ili/js/main.js"),
                root.join("ili/js/workers/Mapper.js"),
            ]
        );
        assert_eq!(manifest.len(), 4);
    }

    #[test]
    fn star_does_not_cross_directories() {
        let dir = populated_tree();
        let found = expand_globs(&dir.path().join("ili"), &["js/*.js"]).unwrap();
        assert!(!found.iter().any(|p| p.ends_with("VolumeController.js")));
    }

    #[test]
    fn missing_base_directory_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = Manifest::collect(descriptor(), dir.path()).unwrap();
        assert!(manifest.is_empty());
    }

    #[test]
    fn verify_counts_matched_support_files() {
        let dir = populated_tree();
        assert_eq!(verify_package_data(descriptor(), dir.path()).unwrap(), 3);
    }

    #[test]
    fn verify_reports_first_unmatched_glob() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "ili/js/main.js");
        let err = verify_package_data(descriptor(), dir.path()).unwrap_err();
        match err {
            PackageError::Ili(e) => {
                assert_eq!(e.kind(), ErrorKind::MissingSupportFile);
                assert!(e.to_string().contains("ili/js/lib/*.js"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = expand_globs(dir.path(), &["js/[.js"]).unwrap_err();
        assert!(matches!(err, PackageError::Pattern(ref p, _) if p == "js/[.js"));
    }
}
