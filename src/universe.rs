//! JSON description of a project universe.
//!
//! A universe bundles the pre-parsed projects, an optional workspace entry
//! point and a catalogue of precompiled artefacts:
//!
//! ```json
//! {
//!   "workspace": { "path": "/W", "name": "W", "projects": ["/App"] },
//!   "projects": [
//!     { "path": "/App", "name": "App", "targets": [
//!       { "name": "App", "platform": "ios", "product": "app" }
//!     ] }
//!   ],
//!   "catalog": { "frameworks": [], "libraries": [], "xcframeworks": [] }
//! }
//! ```

// Scoped suppression for version-dependent lint false positives from
// miette/thiserror derive macros. The unused_assignments lint fires in some
// Rust versions but not others, so `#[expect]` cannot be used here.
#![allow(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    unused_assignments
)]

use camino::{Utf8Path, Utf8PathBuf};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::loader::GraphLoader;
use crate::metadata::{ArtifactCatalog, CatalogMetadataProvider};
use crate::model::{Project, Workspace};

/// Name of the workspace synthesised when a universe declares none.
pub const IMPLICIT_WORKSPACE_NAME: &str = "Universe";

/// Errors raised while reading a universe file.
#[derive(Debug, Error, Diagnostic)]
pub enum UniverseError {
    /// The file could not be read.
    #[error("failed to read universe file {path}")]
    #[diagnostic(code(projgraph::universe::io))]
    Io {
        /// File that failed to read.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid universe document.
    #[error("failed to parse universe document: {source}")]
    #[diagnostic(
        code(projgraph::universe::parse),
        help("check the document against the universe JSON layout")
    )]
    Parse {
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// Projects, workspace and artefact catalogue loaded from one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Universe {
    /// Entry point for workspace loads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace: Option<Workspace>,
    /// Every known project.
    #[serde(default)]
    pub projects: Vec<Project>,
    /// Metadata of precompiled artefacts.
    #[serde(default)]
    pub catalog: ArtifactCatalog,
}

impl Universe {
    /// Parse a universe from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`UniverseError::Parse`] when the text is not a valid
    /// document.
    pub fn from_json(text: &str) -> Result<Self, UniverseError> {
        serde_json::from_str(text).map_err(|source| UniverseError::Parse { source })
    }

    /// Read and parse the universe stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`UniverseError::Io`] when the file cannot be read and
    /// [`UniverseError::Parse`] when its contents are invalid.
    pub fn from_path(path: &Utf8Path) -> Result<Self, UniverseError> {
        let text = std::fs::read_to_string(path).map_err(|source| UniverseError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// The workspace to load when no single project is requested.
    ///
    /// Falls back to a workspace referring to every project, rooted at the
    /// first project path, when the document declares none.
    #[must_use]
    pub fn entry_workspace(&self) -> Workspace {
        if let Some(workspace) = &self.workspace {
            return workspace.clone();
        }
        let mut paths: Vec<Utf8PathBuf> = self
            .projects
            .iter()
            .map(|project| project.path.clone())
            .collect();
        paths.sort();
        let root = paths.first().cloned().unwrap_or_default();
        Workspace::new(root, IMPLICIT_WORKSPACE_NAME, paths)
    }

    /// A loader serving artefacts from the document's catalogue.
    #[must_use]
    pub fn loader(&self) -> GraphLoader {
        GraphLoader::with_catalog(CatalogMetadataProvider::new(self.catalog.clone()))
    }
}
