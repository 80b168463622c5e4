use once_cell::sync::Lazy;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::requirement::DependencySet;
use crate::util::IliError;

//─────────────────────────────────────────────────────────────────────────────

pub const VERSION: &str = "0.2";
pub const MAINTAINER: &str = "`ili development team";
pub const EMAIL: &str = "iprotsyuk@gmail.com";

const LONG_DESCRIPTION: &str = "`ili is a toolbox for 2D and 3D molecular mapping in Chrome\n";

const BASE: [&str; 3] = ["numpy >= 1.7", "qcli", "scikit-bio >= 0.2.1, < 0.3.0"];
const DOC: [&str; 2] = ["Sphinx >= 1.2.2", "sphinx-bootstrap-theme"];
const TEST: [&str; 3] = ["nose >= 0.10.1", "pep8", "flake8"];

// Trove classifiers, one per line. Currently none are declared.
const CLASSES: &str = "
";

//─────────────────────────────────────────────────────────────────────────────

/// Named groups of requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DependencyGroup {
    Base,
    Doc,
    Test,
    All,
}

impl DependencyGroup {
    pub const ALL_GROUPS: [DependencyGroup; 4] = [
        DependencyGroup::Base,
        DependencyGroup::Doc,
        DependencyGroup::Test,
        DependencyGroup::All,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DependencyGroup::Base => "base",
            DependencyGroup::Doc => "doc",
            DependencyGroup::Test => "test",
            DependencyGroup::All => "all",
        }
    }
}

impl FromStr for DependencyGroup {
    type Err = IliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL_GROUPS
            .into_iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                IliError::unsupported_computation(format!(
                    "no dependency group named '{}' (expected base, doc, test or all)",
                    s
                ))
            })
    }
}

impl fmt::Display for DependencyGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//─────────────────────────────────────────────────────────────────────────────

/// Static distribution metadata consumed by the build/install tooling.
#[derive(Debug, Clone)]
pub struct PackageDescriptor {
    /// Distribution name.
    pub name: &'static str,
    /// Release version, as declared (two components).
    pub version: &'static str,
    /// One-line summary.
    pub description: &'static str,
    pub long_description: &'static str,
    /// Author name; empty, the maintainer fields carry the contact.
    pub author: &'static str,
    pub author_email: &'static str,
    pub maintainer: &'static str,
    pub maintainer_email: &'static str,
    /// Project home page.
    pub url: &'static str,
    /// Packages installed by this distribution; `ili` only.
    pub packages: Vec<&'static str>,
    /// Glob patterns, relative to the project root, for executable scripts.
    pub scripts: Vec<&'static str>,
    /// Glob patterns per package, relative to that package's directory.
    pub package_data: BTreeMap<&'static str, Vec<&'static str>>,
    /// Extra files installed outside any package; none are declared.
    pub data_files: BTreeMap<&'static str, Vec<&'static str>>,
    /// Trove classifiers.
    pub classifiers: Vec<String>,
    /// The `base` dependency set, required at install time.
    pub install_requires: DependencySet,
    /// Optional groups by name: `doc`, `test` and their union with base, `all`.
    pub extras_require: BTreeMap<&'static str, DependencySet>,
}

impl PackageDescriptor {
    /// Returns the requirement set for `group`.
    ///
    /// `Base` is `install_requires`; every other group is looked up in
    /// `extras_require`.
    pub fn dependencies(&self, group: DependencyGroup) -> Result<&DependencySet, IliError> {
        match group {
            DependencyGroup::Base => Ok(&self.install_requires),
            other => self.extras_require.get(other.as_str()).ok_or_else(|| {
                IliError::unsupported_computation(format!(
                    "{} declares no '{}' extra",
                    self.name, other
                ))
            }),
        }
    }
}

fn parse_classifiers(classes: &str) -> Vec<String> {
    classes
        .split('\n')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn build_descriptor() -> Result<PackageDescriptor, IliError> {
    let base = DependencySet::parse(BASE)?;
    let doc = DependencySet::parse(DOC)?;
    let test = DependencySet::parse(TEST)?;
    let all_deps = base.union(&doc).union(&test);

    let mut package_data = BTreeMap::new();
    package_data.insert("ili", vec!["js/*.js", "js/lib/*.js", "js/workers/*.js"]);

    let mut extras_require = BTreeMap::new();
    extras_require.insert("doc", doc);
    extras_require.insert("test", test);
    extras_require.insert("all", all_deps);

    Ok(PackageDescriptor {
        name: "ili",
        version: VERSION,
        description: "`ili",
        long_description: LONG_DESCRIPTION,
        author: "",
        author_email: EMAIL,
        maintainer: MAINTAINER,
        maintainer_email: EMAIL,
        url: "https://github.com/ili-toolbox/ili",
        packages: vec!["ili"],
        scripts: vec!["scripts/*py"],
        package_data,
        data_files: BTreeMap::new(),
        classifiers: parse_classifiers(CLASSES),
        install_requires: base,
        extras_require,
    })
}

static DESCRIPTOR: Lazy<PackageDescriptor> = Lazy::new(|| match build_descriptor() {
    Ok(descriptor) => descriptor,
    // The requirement tables are compile-time constants covered by tests.
    Err(e) => panic!("invalid built-in requirement table: {}", e),
});

/// Returns the `ili` package descriptor.
pub fn descriptor() -> &'static PackageDescriptor {
    &DESCRIPTOR
}
