//! Error types for the runner module.
//!
//! This submodule isolates derive-macro-affected code to scope lint suppressions
//! narrowly.

// Scoped suppression for version-dependent lint false positives from
// miette/thiserror derive macros. The unused_assignments lint fires in some
// Rust versions but not others, so `#[expect]` cannot be used here.
#![allow(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    unused_assignments
)]

use camino::Utf8PathBuf;
use miette::Diagnostic;
use thiserror::Error;

/// Errors raised during command execution.
#[derive(Debug, Error, Diagnostic)]
pub enum RunnerError {
    /// The requested target is not part of the loaded graph.
    #[error("target '{name}' is not part of the loaded graph at {path}")]
    #[diagnostic(
        code(projgraph::runner::unknown_target),
        help("pass --project so the target's project is loaded, or check the target name")
    )]
    UnknownTarget {
        /// Requested target name.
        name: String,
        /// Requested project path.
        path: Utf8PathBuf,
    },
}
