//! Command line interface definition using clap.
//!
//! This module defines the [`Cli`] structure and its subcommands. The binary
//! reads a project universe from a JSON file, loads it into a graph and
//! prints one view of the result.

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, Parser, Subcommand};

/// Output path sentinel meaning "write to stdout".
pub const STDOUT_PATH: &str = "-";

/// Inspect the dependency graph of a project universe.
#[derive(Debug, Parser, Clone, PartialEq, Eq)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the JSON universe describing projects and artefacts.
    #[arg(short, long, value_name = "FILE")]
    pub universe: Utf8PathBuf,

    /// Load only this project and what it references.
    ///
    /// Without it, the universe's workspace is loaded, or every project when
    /// the universe declares no workspace.
    #[arg(short, long, value_name = "PATH")]
    pub project: Option<Utf8PathBuf>,

    /// Drop targets flagged for pruning before printing.
    #[arg(long)]
    pub prune: bool,

    /// Write output to this file instead of stdout.
    #[arg(short, long, value_name = "FILE", default_value = STDOUT_PATH)]
    pub output: Utf8PathBuf,

    /// Enable verbose diagnostic logging.
    #[arg(short, long)]
    pub verbose: bool,

    /// What to print.
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Whether output goes to stdout.
    #[must_use]
    pub fn writes_to_stdout(&self) -> bool {
        is_stdout_path(&self.output)
    }
}

/// Return `true` when `path` is the stdout sentinel.
#[must_use]
pub fn is_stdout_path(path: &Utf8Path) -> bool {
    path.as_str() == STDOUT_PATH
}

/// Identifies one target of the loaded graph.
#[derive(Debug, Args, Clone, PartialEq, Eq)]
pub struct TargetArgs {
    /// Path of the project declaring the target.
    #[arg(long, value_name = "PATH")]
    pub project_path: Utf8PathBuf,

    /// Target name.
    #[arg(long, value_name = "NAME")]
    pub target: String,
}

/// Available views of the loaded graph.
#[derive(Debug, Subcommand, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print graph name and project, target and edge counts.
    Summary,
    /// Print the graph in Graphviz DOT format.
    Dot,
    /// Print the graph fingerprint.
    Fingerprint,
    /// Print the direct dependencies of a target.
    Deps(TargetArgs),
    /// Print the resource bundles a target hosts.
    Bundles(TargetArgs),
}
