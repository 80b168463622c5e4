use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::package::DependencyGroup;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Packaging and support utilities for the `ili toolbox.", long_about = None)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Command,

    /// Suppress verbose output.
    #[clap(short, long, global = true)]
    pub quiet: bool,

    /// Write verbose output to this file.
    #[clap(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Use this directory instead of the built-in project root.
    #[clap(long, global = true, env = "ILI_PROJECT_DIR", value_name = "DIR")]
    pub root: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the top-level ili directory.
    ProjectDir,
    /// Print the package metadata.
    Info,
    /// List the requirements of a dependency group.
    Deps {
        /// One of base, doc, test, all.
        #[clap(short, long, default_value = "all")]
        group: DependencyGroup,

        /// Also write the list to this file, one requirement per line.
        #[clap(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// List the scripts and package data selected from the project root.
    Manifest,
    /// Verify that every bundled support file glob matches.
    Check,
    /// Check an environment snapshot (`name==version` lines) against a dependency group.
    VerifyEnv {
        /// Snapshot file to check.
        snapshot: PathBuf,

        /// One of base, doc, test, all.
        #[clap(short, long, default_value = "base")]
        group: DependencyGroup,
    },
}
