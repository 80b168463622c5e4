//! Requirement strings of the form `name [op version (, op version)*]`.
//!
//! Only the subset the descriptor actually uses is understood: dotted
//! numeric versions and the six comparison operators. Anything else is
//! rejected as an unsupported computation instead of being guessed at.

use std::cmp::Ordering;
use std::collections::btree_set::{self, BTreeSet};
use std::fmt;
use std::str::FromStr;

use crate::util::IliError;

//─────────────────────────────────────────────────────────────────────────────

/// A dotted numeric version such as `0.2.1`.
#[derive(Debug, Clone, Eq)]
pub struct Version {
    parts: Vec<u64>,
}

impl Version {
    pub fn parts(&self) -> &[u64] {
        &self.parts
    }

    // Trailing zeros are insignificant: `1.7` and `1.7.0` compare equal.
    fn significant(&self) -> &[u64] {
        let len = self
            .parts
            .iter()
            .rposition(|&p| p != 0)
            .map_or(0, |i| i + 1);
        &self.parts[..len]
    }
}

impl FromStr for Version {
    type Err = IliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(IliError::unsupported_computation("empty version"));
        }
        let parts = trimmed
            .split('.')
            .map(|p| {
                // `u64::from_str` would also take a leading `+`.
                if p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(IliError::unsupported_computation(format!(
                        "cannot compare non-numeric version '{}'",
                        trimmed
                    )));
                }
                p.parse::<u64>().map_err(|_| {
                    IliError::unsupported_computation(format!(
                        "version component '{}' of '{}' is too large",
                        p, trimmed
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { parts })
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.significant() == other.significant()
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.significant().cmp(other.significant())
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for part in &self.parts {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{}", part)?;
            first = false;
        }
        Ok(())
    }
}

//─────────────────────────────────────────────────────────────────────────────

/// Comparison operator of a version specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Operator {
    Ge,
    Gt,
    Le,
    Lt,
    Eq,
    Ne,
}

impl Operator {
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Ge => ">=",
            Operator::Gt => ">",
            Operator::Le => "<=",
            Operator::Lt => "<",
            Operator::Eq => "==",
            Operator::Ne => "!=",
        }
    }

    fn holds(self, ord: Ordering) -> bool {
        match self {
            Operator::Ge => ord != Ordering::Less,
            Operator::Gt => ord == Ordering::Greater,
            Operator::Le => ord != Ordering::Greater,
            Operator::Lt => ord == Ordering::Less,
            Operator::Eq => ord == Ordering::Equal,
            Operator::Ne => ord != Ordering::Equal,
        }
    }
}

/// A single `op version` clause.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Specifier {
    pub op: Operator,
    pub version: Version,
}

impl Specifier {
    pub fn allows(&self, version: &Version) -> bool {
        self.op.holds(version.cmp(&self.version))
    }
}

impl FromStr for Specifier {
    type Err = IliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        // Two-character operators must be tried before their one-character prefixes.
        const OPERATORS: [(&str, Operator); 6] = [
            (">=", Operator::Ge),
            ("<=", Operator::Le),
            ("==", Operator::Eq),
            ("!=", Operator::Ne),
            (">", Operator::Gt),
            ("<", Operator::Lt),
        ];
        let (op, rest) = OPERATORS
            .iter()
            .find_map(|(token, op)| s.strip_prefix(token).map(|rest| (*op, rest)))
            .ok_or_else(|| {
                IliError::unsupported_computation(format!("unsupported version specifier '{}'", s))
            })?;
        Ok(Self {
            op,
            version: rest.parse()?,
        })
    }
}

impl fmt::Display for Specifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.op.as_str(), self.version)
    }
}

//─────────────────────────────────────────────────────────────────────────────

/// A distribution name constrained by zero or more specifiers.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Requirement {
    name: String,
    specifiers: Vec<Specifier>,
}

impl Requirement {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn specifiers(&self) -> &[Specifier] {
        &self.specifiers
    }

    /// Name folded for comparison: case-insensitive, `_` and `.` read as `-`.
    pub fn canonical_name(&self) -> String {
        canonicalize_name(&self.name)
    }

    /// Returns true if every specifier admits `version`.
    pub fn allows(&self, version: &Version) -> bool {
        self.specifiers.iter().all(|spec| spec.allows(version))
    }
}

pub fn canonicalize_name(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            '_' | '.' => '-',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

impl FromStr for Requirement {
    type Err = IliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split_at = s
            .find(|c: char| matches!(c, '<' | '>' | '=' | '!') || c.is_whitespace())
            .unwrap_or(s.len());
        let (name, rest) = s.split_at(split_at);
        if name.is_empty() {
            return Err(IliError::unsupported_computation(format!(
                "requirement '{}' has no distribution name",
                s
            )));
        }
        let specifiers = if rest.trim().is_empty() {
            Vec::new()
        } else {
            rest.split(',')
                .map(str::parse)
                .collect::<Result<Vec<Specifier>, _>>()?
        };
        Ok(Self {
            name: name.to_string(),
            specifiers,
        })
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        for (i, spec) in self.specifiers.iter().enumerate() {
            f.write_str(if i == 0 { " " } else { ", " })?;
            write!(f, "{}", spec)?;
        }
        Ok(())
    }
}

//─────────────────────────────────────────────────────────────────────────────

/// An ordered, duplicate-free set of requirements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencySet {
    requirements: BTreeSet<Requirement>,
}

impl DependencySet {
    /// Parses every entry of `entries` into a set.
    pub fn parse<'a>(entries: impl IntoIterator<Item = &'a str>) -> Result<Self, IliError> {
        entries.into_iter().map(str::parse::<Requirement>).collect()
    }

    pub fn contains(&self, requirement: &Requirement) -> bool {
        self.requirements.contains(requirement)
    }

    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }

    pub fn iter(&self) -> btree_set::Iter<'_, Requirement> {
        self.requirements.iter()
    }

    pub fn union(&self, other: &DependencySet) -> DependencySet {
        self.requirements
            .union(&other.requirements)
            .cloned()
            .collect()
    }
}

impl<'a> IntoIterator for &'a DependencySet {
    type Item = &'a Requirement;
    type IntoIter = btree_set::Iter<'a, Requirement>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Requirement> for DependencySet {
    fn from_iter<I: IntoIterator<Item = Requirement>>(iter: I) -> Self {
        Self {
            requirements: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::ErrorKind;
    use pretty_assertions::assert_eq;

    fn v(s: &str) -> Version {
        s.parse().unwrap()
    }

    #[test]
    fn parses_bare_name() {
        let req: Requirement = "qcli".parse().unwrap();
        assert_eq!(req.name(), "qcli");
        assert!(req.specifiers().is_empty());
        assert!(req.allows(&v("0.0.1")));
    }

    #[test]
    fn parses_bounded_range() {
        let req: Requirement = "scikit-bio >= 0.2.1, < 0.3.0".parse().unwrap();
        assert_eq!(req.name(), "scikit-bio");
        assert_eq!(req.specifiers().len(), 2);
        assert!(req.allows(&v("0.2.1")));
        assert!(req.allows(&v("0.2.6")));
        assert!(!req.allows(&v("0.3.0")));
        assert!(!req.allows(&v("0.2")));
    }

    #[test]
    fn display_round_trips_formatting() {
        let req: Requirement = "scikit-bio>=0.2.1,<0.3.0".parse().unwrap();
        assert_eq!(req.to_string(), "scikit-bio >= 0.2.1, < 0.3.0");
    }

    #[test]
    fn trailing_zeros_do_not_matter() {
        assert_eq!(v("1.7"), v("1.7.0"));
        assert!(v("1.10") > v("1.9"));
        let req: Requirement = "numpy == 1.7".parse().unwrap();
        assert!(req.allows(&v("1.7.0")));
    }

    #[test]
    fn unknown_operator_is_unsupported() {
        let err = "numpy ~= 1.7".parse::<Requirement>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedComputation);
    }

    #[test]
    fn non_numeric_version_is_unsupported() {
        let err = "numpy >= 1.7rc1".parse::<Requirement>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedComputation);
        assert!(err.to_string().contains("1.7rc1"));
    }

    #[test]
    fn signed_or_empty_components_are_rejected() {
        for raw in ["+1.7", "1.-7", "1..7", "1.7."] {
            let err = raw.parse::<Version>().unwrap_err();
            assert!(
                err.to_string().contains("non-numeric"),
                "{} gave {}",
                raw,
                err
            );
        }
    }

    #[test]
    fn oversized_component_is_reported_as_too_large() {
        let err = "1.99999999999999999999".parse::<Version>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedComputation);
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn missing_name_is_unsupported() {
        let err = ">= 1.0".parse::<Requirement>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedComputation);
    }

    #[test]
    fn canonical_name_folds_case_and_separators() {
        let req: Requirement = "Sphinx_Bootstrap.Theme".parse().unwrap();
        assert_eq!(req.canonical_name(), "sphinx-bootstrap-theme");
    }

    #[test]
    fn union_keeps_every_member_once() {
        let a = DependencySet::parse(["numpy >= 1.7", "qcli"]).unwrap();
        let b = DependencySet::parse(["qcli", "pep8"]).unwrap();
        let both = a.union(&b);
        assert_eq!(both.len(), 3);
        for req in a.iter().chain(b.iter()) {
            assert!(both.contains(req));
        }
    }
}
