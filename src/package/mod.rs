// descriptor module
mod descriptor;
// environment module
mod environment;
// error module
mod error;
// manifest module
mod manifest;

// requirement module
pub mod requirement;

//─────────────────────────────────────────────────────────────────────────────
// Public re-exports.
//─────────────────────────────────────────────────────────────────────────────
pub use descriptor::{descriptor, DependencyGroup, PackageDescriptor, EMAIL, MAINTAINER, VERSION};
pub use environment::{Environment, Installed, RequirementStatus};
pub use error::PackageError;
pub use manifest::{expand_globs, verify_package_data, Manifest};
pub use requirement::{DependencySet, Requirement, Specifier, Version};
