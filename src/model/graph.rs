//! The immutable dependency graph.

use camino::{Utf8Path, Utf8PathBuf};
use indexmap::{IndexMap, IndexSet};
use std::collections::BTreeMap;

use super::node::DependencyNode;
use super::project::{Package, Project, Workspace};
use super::target::Target;

/// Projects keyed by path.
pub type ProjectMap = BTreeMap<Utf8PathBuf, Project>;
/// Targets keyed by project path, then target name.
pub type TargetMap = BTreeMap<Utf8PathBuf, BTreeMap<String, Target>>;
/// Packages keyed by project path, then package name.
pub type PackageMap = BTreeMap<Utf8PathBuf, BTreeMap<String, Package>>;
/// Adjacency from a node to the nodes it depends on.
///
/// Sets keep the order in which edges were first inserted; equality between
/// sets ignores order.
pub type AdjacencyMap = IndexMap<DependencyNode, IndexSet<DependencyNode>>;

/// The owned pieces of a [`Graph`].
///
/// Transformations take a graph apart with [`Graph::into_parts`], replace
/// entries and reassemble it with [`Graph::from_parts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphParts {
    /// Graph name.
    pub name: String,
    /// Path of the workspace or root project.
    pub path: Utf8PathBuf,
    /// The workspace the graph was loaded for.
    pub workspace: Workspace,
    /// Loaded projects.
    pub projects: ProjectMap,
    /// Declared packages.
    pub packages: PackageMap,
    /// Loaded targets.
    pub targets: TargetMap,
    /// Dependency adjacency.
    pub dependencies: AdjacencyMap,
}

/// Snapshot of projects, targets, packages and dependency edges after
/// loading. A `Graph` exposes no mutation API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    parts: GraphParts,
}

impl Graph {
    /// Assemble a graph from its parts.
    #[must_use]
    pub const fn from_parts(parts: GraphParts) -> Self {
        Self { parts }
    }

    /// Take the graph apart.
    #[must_use]
    pub fn into_parts(self) -> GraphParts {
        self.parts
    }

    /// Graph name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.parts.name
    }

    /// Path of the workspace or root project.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.parts.path
    }

    /// The workspace the graph was loaded for.
    #[must_use]
    pub const fn workspace(&self) -> &Workspace {
        &self.parts.workspace
    }

    /// Loaded projects keyed by path.
    #[must_use]
    pub const fn projects(&self) -> &ProjectMap {
        &self.parts.projects
    }

    /// Declared packages keyed by project path and package name.
    #[must_use]
    pub const fn packages(&self) -> &PackageMap {
        &self.parts.packages
    }

    /// Loaded targets keyed by project path and target name.
    #[must_use]
    pub const fn targets(&self) -> &TargetMap {
        &self.parts.targets
    }

    /// Dependency adjacency.
    #[must_use]
    pub const fn dependencies(&self) -> &AdjacencyMap {
        &self.parts.dependencies
    }

    /// Look up a loaded target.
    #[must_use]
    pub fn target(&self, path: &Utf8Path, name: &str) -> Option<&Target> {
        self.parts.targets.get(path).and_then(|targets| targets.get(name))
    }

    /// Direct dependencies of `node`, if it has any.
    #[must_use]
    pub fn dependencies_of(&self, node: &DependencyNode) -> Option<&IndexSet<DependencyNode>> {
        self.parts.dependencies.get(node)
    }

    /// Return a copy with a different workspace.
    #[must_use]
    pub fn with_workspace(self, workspace: Workspace) -> Self {
        let mut parts = self.parts;
        parts.workspace = workspace;
        Self { parts }
    }

    /// Return a copy with different projects.
    #[must_use]
    pub fn with_projects(self, projects: ProjectMap) -> Self {
        let mut parts = self.parts;
        parts.projects = projects;
        Self { parts }
    }

    /// Return a copy with different targets.
    #[must_use]
    pub fn with_targets(self, targets: TargetMap) -> Self {
        let mut parts = self.parts;
        parts.targets = targets;
        Self { parts }
    }

    /// Return a copy with a different adjacency.
    #[must_use]
    pub fn with_dependencies(self, dependencies: AdjacencyMap) -> Self {
        let mut parts = self.parts;
        parts.dependencies = dependencies;
        Self { parts }
    }

    /// Local target nodes referenced by the adjacency that have no matching
    /// entry in the target maps.
    ///
    /// A successfully loaded graph always returns an empty list.
    #[must_use]
    pub fn dangling_targets(&self) -> Vec<&DependencyNode> {
        self.parts
            .dependencies
            .iter()
            .flat_map(|(from, to)| std::iter::once(from).chain(to.iter()))
            .filter(|node| {
                node.as_target()
                    .is_some_and(|(path, name)| self.target(path, name).is_none())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Platform, Product};

    fn graph_with_edge(to: DependencyNode) -> Graph {
        let target = Target::new("A", Platform::Ios, Product::App);
        let mut targets = TargetMap::new();
        targets
            .entry(Utf8PathBuf::from("/P"))
            .or_default()
            .insert("A".into(), target);
        let mut dependencies = AdjacencyMap::new();
        dependencies.insert(
            DependencyNode::target("A", "/P"),
            IndexSet::from([to]),
        );
        Graph::from_parts(GraphParts {
            name: "G".into(),
            path: Utf8PathBuf::from("/P"),
            workspace: Workspace::new("/P", "G", vec![Utf8PathBuf::from("/P")]),
            projects: ProjectMap::new(),
            packages: PackageMap::new(),
            targets,
            dependencies,
        })
    }

    #[test]
    fn dangling_targets_reports_unknown_edge_targets() {
        let graph = graph_with_edge(DependencyNode::target("Missing", "/P"));
        assert_eq!(
            graph.dangling_targets(),
            vec![&DependencyNode::target("Missing", "/P")]
        );
    }

    #[test]
    fn dangling_targets_ignores_artefacts() {
        let graph = graph_with_edge(DependencyNode::RawPath {
            path: Utf8PathBuf::from("/Pods"),
        });
        assert!(graph.dangling_targets().is_empty());
    }
}
