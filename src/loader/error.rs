//! Error types for graph loading.

// Scoped suppression for version-dependent lint false positives from
// miette/thiserror derive macros. The unused_assignments lint fires in some
// Rust versions but not others, so `#[expect]` cannot be used here.
#![allow(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    unused_assignments
)]

use camino::Utf8PathBuf;
use itertools::Itertools;
use miette::Diagnostic;
use thiserror::Error;

use super::cycle::TargetRef;
use crate::metadata::MetadataError;

/// Errors raised while loading a graph. Any error aborts the whole load.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum GraphLoadingError {
    /// A referenced project is not part of the supplied universe.
    #[error("couldn't load project at path {path}")]
    #[diagnostic(
        code(projgraph::loader::missing_project),
        help("make sure the project is included in the loaded universe")
    )]
    MissingProject {
        /// Path of the missing project.
        path: Utf8PathBuf,
    },

    /// A referenced target is not declared by a known project.
    #[error("target '{name}' could not be found in project at {path}")]
    #[diagnostic(code(projgraph::loader::target_not_found))]
    TargetNotFound {
        /// Name of the missing target.
        name: String,
        /// Project that was expected to declare it.
        path: Utf8PathBuf,
    },

    /// A target reference would close a cycle.
    #[error("found circular dependency between targets: {}", .chain.iter().join(" -> "))]
    #[diagnostic(
        code(projgraph::loader::circular_dependency),
        help("break the cycle by removing one of the listed dependencies")
    )]
    CircularDependency {
        /// The cycle, starting and ending with the same target.
        chain: Vec<TargetRef>,
    },

    /// A metadata provider failed.
    #[error("failed to resolve artefact metadata: {0}")]
    #[diagnostic(code(projgraph::loader::artifact_resolution_failed))]
    ArtifactResolutionFailed(#[from] MetadataError),
}
