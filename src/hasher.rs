//! Graph fingerprinting.
//!
//! This module provides the [`GraphHasher`] type used to compute a stable
//! SHA-256 digest for a loaded [`Graph`]. Two loads of the same universe
//! always produce the same fingerprint, so callers can detect when a graph
//! changed between runs.
//!
//! # Examples
//!
//! ```
//! use camino::Utf8Path;
//! use projgraph::hasher::GraphHasher;
//! use projgraph::loader::GraphLoader;
//! use projgraph::model::{Platform, Product, Project, Target};
//!
//! let projects = vec![Project::new(
//!     "/App",
//!     "App",
//!     vec![Target::new("App", Platform::Ios, Product::App)],
//! )];
//! let (_, graph) = GraphLoader::default()
//!     .load_project(Utf8Path::new("/App"), &projects)
//!     .expect("load");
//! let hash = GraphHasher::hash(&graph);
//! assert_eq!(hash.len(), 64);
//! ```

use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, BTreeSet};

use crate::model::{DependencyNode, Graph};

/// Computes stable digests for [`Graph`] values.
pub struct GraphHasher;

impl GraphHasher {
    /// Calculate the hex-encoded fingerprint of a [`Graph`].
    #[must_use]
    pub fn hash(graph: &Graph) -> String {
        let mut hasher = Sha256::new();
        Self::update_with_len(&mut hasher, graph.name().as_bytes());
        Self::update_with_len(&mut hasher, graph.path().as_str().as_bytes());
        Self::hash_projects(&mut hasher, graph);
        Self::hash_targets(&mut hasher, graph);
        Self::hash_dependencies(&mut hasher, graph);
        format!("{:x}", hasher.finalize())
    }

    fn hash_projects(hasher: &mut Sha256, graph: &Graph) {
        hasher.update(b"projects");
        for (path, project) in graph.projects() {
            Self::update_with_len(hasher, path.as_str().as_bytes());
            Self::update_with_len(hasher, project.name.as_bytes());
        }
    }

    fn hash_targets(hasher: &mut Sha256, graph: &Graph) {
        hasher.update(b"targets");
        for (path, targets) in graph.targets() {
            for target in targets.values() {
                Self::update_with_len(hasher, path.as_str().as_bytes());
                Self::update_with_len(hasher, target.name.as_bytes());
                Self::update_with_len(hasher, target.product.to_string().as_bytes());
                Self::update_with_len(hasher, target.platform.to_string().as_bytes());
            }
        }
    }

    // Edge sets keep insertion order, so both ends are sorted by identity.
    fn hash_dependencies(hasher: &mut Sha256, graph: &Graph) {
        hasher.update(b"dependencies");
        let edges: BTreeMap<String, BTreeSet<String>> = graph
            .dependencies()
            .iter()
            .map(|(from, to)| (from.identity(), to.iter().map(DependencyNode::identity).collect()))
            .collect();
        for (from, to) in &edges {
            Self::update_with_len(hasher, from.as_bytes());
            hasher.update(format!("{}:", to.len()).as_bytes());
            for node in to {
                Self::update_with_len(hasher, node.as_bytes());
            }
        }
    }

    fn update_with_len(hasher: &mut Sha256, bytes: &[u8]) {
        let len = bytes.len();
        hasher.update(format!("{len}:").as_bytes());
        hasher.update(bytes);
    }
}
