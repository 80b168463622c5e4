//! # ili
//!
//! Distribution-side utilities for the `ili toolbox for 2D and 3D molecular
//! mapping in Chrome: project root resolution, the support-layer error
//! taxonomy, and the package descriptor with its dependency sets and
//! bundled asset globs.
pub mod app;
pub mod package;
pub mod util;

// Re-export the main types for convenience
pub use package::{descriptor, DependencyGroup, DependencySet, PackageDescriptor};
pub use util::{get_ili_project_dir, ErrorCategory, ErrorKind, IliError};
