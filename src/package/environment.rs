//! Checks a snapshot of installed distributions against a dependency set.
//!
//! The snapshot is the listing produced by freezing an environment: mostly
//! `name==version` lines, plus `name @ url` lines for direct installs.
//! Blank lines, `#` comments and option lines (`-e ...`, `--hash ...`) are
//! ignored. Installed versions are kept verbatim; they are only compared
//! when a requirement actually constrains that distribution.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use super::error::PackageError;
use super::requirement::{canonicalize_name, DependencySet, Requirement, Version};
use crate::util::{self, IliError};

/// How a distribution appears in the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Installed {
    /// Pinned with `==`; the version string as written.
    Version(String),
    /// Installed from a direct reference (`name @ url`), so unversioned.
    Url(String),
}

impl fmt::Display for Installed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Installed::Version(v) => f.write_str(v),
            Installed::Url(url) => write!(f, "@ {}", url),
        }
    }
}

/// Installed distributions keyed by canonical name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    installed: BTreeMap<String, Installed>,
}

impl Environment {
    /// Parses snapshot text.
    ///
    /// # Errors
    /// Returns an `UnsupportedComputation` error naming the line number when
    /// a line is neither `name==version` nor `name @ url`.
    pub fn parse(snapshot: &str) -> Result<Self, IliError> {
        let mut installed = BTreeMap::new();
        for (index, raw) in snapshot.lines().enumerate() {
            let line = strip_comment(raw).trim();
            if line.is_empty() || line.starts_with('-') {
                continue;
            }
            let (name, entry) = if let Some((name, version)) = line.split_once("==") {
                // `===` is arbitrary equality; the version is still the tail.
                let version = version.trim_start_matches('=').trim();
                (name, Installed::Version(version.to_string()))
            } else if let Some((name, url)) = line.split_once(" @ ") {
                (name, Installed::Url(url.trim().to_string()))
            } else {
                return Err(IliError::unsupported_computation(format!(
                    "line {}: expected 'name==version' or 'name @ url', found '{}'",
                    index + 1,
                    line
                )));
            };
            installed.insert(canonicalize_name(name), entry);
        }
        Ok(Self { installed })
    }

    /// Reads and parses a snapshot file.
    ///
    /// # Errors
    /// `MissingInputFile` if the file is absent or unreadable, otherwise any
    /// error from [`Environment::parse`].
    pub fn from_file(path: &Path) -> Result<Self, PackageError> {
        let path = util::require_input_file(path)?;
        let content = fs::read_to_string(&path)
            .map_err(|e| PackageError::ReadFile(path.display().to_string(), e))?;
        Ok(Self::parse(&content)?)
    }

    pub fn installed(&self, name: &str) -> Option<&Installed> {
        self.installed.get(&canonicalize_name(name))
    }

    pub fn len(&self) -> usize {
        self.installed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.installed.is_empty()
    }

    /// Evaluates each requirement of `deps` against this environment.
    ///
    /// A requirement without specifiers is satisfied by any installed form.
    ///
    /// # Errors
    /// Returns an `UnsupportedComputation` error when a constrained
    /// distribution is installed with a version that cannot be compared
    /// (non-numeric, or a direct URL install).
    pub fn check<'a>(&self, deps: &'a DependencySet) -> Result<Vec<RequirementStatus<'a>>, IliError> {
        deps.iter()
            .map(|requirement| {
                let Some(installed) = self.installed(requirement.name()) else {
                    return Ok(RequirementStatus::Missing(requirement));
                };
                if requirement.specifiers().is_empty() {
                    return Ok(RequirementStatus::Satisfied(requirement, installed.clone()));
                }
                let version: Version = match installed {
                    Installed::Version(v) => v.parse().map_err(|e: IliError| {
                        IliError::unsupported_computation(format!(
                            "{}: {}",
                            requirement.name(),
                            e
                        ))
                    })?,
                    Installed::Url(url) => {
                        return Err(IliError::unsupported_computation(format!(
                            "{} is installed from {} and has no version to compare with '{}'",
                            requirement.name(),
                            url,
                            requirement
                        )))
                    }
                };
                if requirement.allows(&version) {
                    Ok(RequirementStatus::Satisfied(requirement, installed.clone()))
                } else {
                    Ok(RequirementStatus::Conflict(requirement, installed.clone()))
                }
            })
            .collect()
    }
}

// A `#` starts a comment only at the line start or after whitespace, so URL
// fragments such as `#egg=` survive.
fn strip_comment(line: &str) -> &str {
    let mut prev_is_space = true;
    for (i, c) in line.char_indices() {
        if c == '#' && prev_is_space {
            return &line[..i];
        }
        prev_is_space = c.is_whitespace();
    }
    line
}

/// Outcome of checking one requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequirementStatus<'a> {
    Satisfied(&'a Requirement, Installed),
    Missing(&'a Requirement),
    /// Installed, but the installed version is rejected.
    Conflict(&'a Requirement, Installed),
}

impl RequirementStatus<'_> {
    pub fn is_satisfied(&self) -> bool {
        matches!(self, RequirementStatus::Satisfied(..))
    }

    pub fn requirement(&self) -> &Requirement {
        match self {
            RequirementStatus::Satisfied(r, _)
            | RequirementStatus::Missing(r)
            | RequirementStatus::Conflict(r, _) => *r,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::{descriptor, DependencyGroup};
    use crate::util::ErrorKind;
    use pretty_assertions::assert_eq;

    const SNAPSHOT: &str = "\
# frozen on the analysis box
numpy==1.9.2
qcli==0.1.1
scikit_bio==0.3.0   # too new

Sphinx==1.2.3
";

    fn labels<'a>(statuses: &'a [RequirementStatus<'a>]) -> Vec<(&'a str, &'static str)> {
        statuses
            .iter()
            .map(|s| {
                let label = match s {
                    RequirementStatus::Satisfied(..) => "ok",
                    RequirementStatus::Missing(_) => "missing",
                    RequirementStatus::Conflict(..) => "conflict",
                };
                (s.requirement().name(), label)
            })
            .collect()
    }

    #[test]
    fn parses_snapshot_and_folds_names() {
        let env = Environment::parse(SNAPSHOT).unwrap();
        assert_eq!(env.len(), 4);
        assert_eq!(
            env.installed("scikit-bio"),
            Some(&Installed::Version("0.3.0".to_string()))
        );
        assert!(env.installed("sphinx").is_some());
    }

    #[test]
    fn reports_satisfied_conflicting_and_missing() {
        let env = Environment::parse(SNAPSHOT).unwrap();
        let base = descriptor().dependencies(DependencyGroup::Base).unwrap();
        let statuses = env.check(base).unwrap();
        assert_eq!(
            labels(&statuses),
            vec![("numpy", "ok"), ("qcli", "ok"), ("scikit-bio", "conflict")]
        );

        let test = descriptor().dependencies(DependencyGroup::Test).unwrap();
        assert!(env.check(test).unwrap().iter().all(|s| !s.is_satisfied()));
    }

    #[test]
    fn unrelated_post_release_does_not_block_check() {
        let env = Environment::parse(
            "numpy==1.9.2\nqcli==0.1.1\nscikit-bio==0.2.6\npytz==2023.3.post1\n",
        )
        .unwrap();
        assert_eq!(
            env.installed("pytz"),
            Some(&Installed::Version("2023.3.post1".to_string()))
        );
        let base = descriptor().dependencies(DependencyGroup::Base).unwrap();
        assert!(env.check(base).unwrap().iter().all(|s| s.is_satisfied()));
    }

    #[test]
    fn direct_url_and_editable_lines_are_accepted() {
        let env = Environment::parse(
            "numpy==1.9.2\n\
             qcli @ file:///home/me/qcli\n\
             scikit-bio==0.2.6\n\
             ili @ file:///home/me/ili\n\
             -e git+https://github.com/ili-toolbox/ili.git#egg=ili\n",
        )
        .unwrap();
        assert_eq!(env.len(), 4);
        assert_eq!(
            env.installed("ili"),
            Some(&Installed::Url("file:///home/me/ili".to_string()))
        );
        // qcli carries no specifier, so a URL install satisfies it.
        let base = descriptor().dependencies(DependencyGroup::Base).unwrap();
        assert!(env.check(base).unwrap().iter().all(|s| s.is_satisfied()));
    }

    #[test]
    fn uncomparable_required_version_is_unsupported() {
        let env = Environment::parse("numpy==1.9.2rc1\nqcli==0.1.1\n").unwrap();
        let base = descriptor().dependencies(DependencyGroup::Base).unwrap();
        let err = env.check(base).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedComputation);
        assert!(err.to_string().starts_with("numpy:"));
    }

    #[test]
    fn url_install_of_constrained_requirement_is_unsupported() {
        let env = Environment::parse("numpy @ file:///wheels/numpy.whl\n").unwrap();
        let base = descriptor().dependencies(DependencyGroup::Base).unwrap();
        let err = env.check(base).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedComputation);
    }

    #[test]
    fn url_fragment_is_not_a_comment() {
        assert_eq!(strip_comment("ili @ git+https://x/ili#egg=ili"), "ili @ git+https://x/ili#egg=ili");
        assert_eq!(strip_comment("qcli==0.1.1 # pinned"), "qcli==0.1.1 ");
        assert_eq!(strip_comment("# header"), "");
    }

    #[test]
    fn malformed_line_is_unsupported() {
        let err = Environment::parse("numpy>=1.7\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedComputation);
        assert!(err.to_string().starts_with("line 1:"));
    }

    #[test]
    fn missing_snapshot_file_is_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = Environment::from_file(&dir.path().join("freeze.txt")).unwrap_err();
        match err {
            PackageError::Ili(e) => assert_eq!(e.kind(), ErrorKind::MissingInputFile),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn reads_snapshot_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("freeze.txt");
        fs::write(&path, SNAPSHOT).unwrap();
        assert_eq!(Environment::from_file(&path).unwrap().len(), 4);
    }
}
