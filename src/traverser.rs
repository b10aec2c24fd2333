//! Read-only queries over a loaded [`Graph`].
//!
//! The traverser borrows a finished graph and never mutates it. Queries
//! never fail: data missing from the graph yields an empty answer.
//!
//! # Examples
//!
//! ```
//! use camino::Utf8Path;
//! use projgraph::loader::GraphLoader;
//! use projgraph::model::{Platform, Product, Project, Target, TargetDependency};
//! use projgraph::traverser::GraphTraverser;
//!
//! let app = Target::new("App", Platform::Ios, Product::App)
//!     .with_dependencies(vec![TargetDependency::Target { name: "Share".into() }]);
//! let share = Target::new("Share", Platform::Ios, Product::AppExtension);
//! let projects = vec![Project::new("/App", "App", vec![app, share])];
//! let (_, graph) = GraphLoader::default()
//!     .load_project(Utf8Path::new("/App"), &projects)
//!     .expect("load");
//!
//! let traverser = GraphTraverser::new(&graph);
//! let extensions = traverser.app_extension_dependencies(Utf8Path::new("/App"), "App");
//! assert_eq!(extensions.len(), 1);
//! ```

use camino::Utf8Path;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};

use crate::model::{DependencyNode, Graph, Product, Target};

/// A target together with the path of the project that declares it.
///
/// Equality and ordering consider the target name and project path only.
#[derive(Debug, Clone, Copy)]
pub struct GraphTarget<'g> {
    /// Owning project path.
    pub path: &'g Utf8Path,
    /// The target.
    pub target: &'g Target,
}

impl GraphTarget<'_> {
    /// Target name.
    #[must_use]
    pub const fn name(&self) -> &str {
        self.target.name.as_str()
    }
}

impl PartialEq for GraphTarget<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path && self.target.name == other.target.name
    }
}

impl Eq for GraphTarget<'_> {}

impl Ord for GraphTarget<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.target
            .name
            .cmp(&other.target.name)
            .then_with(|| self.path.cmp(other.path))
    }
}

impl PartialOrd for GraphTarget<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Queries a borrowed [`Graph`].
#[derive(Debug, Clone, Copy)]
pub struct GraphTraverser<'g> {
    graph: &'g Graph,
}

impl<'g> GraphTraverser<'g> {
    /// Create a traverser over `graph`.
    #[must_use]
    pub const fn new(graph: &'g Graph) -> Self {
        Self { graph }
    }

    /// The traversed graph.
    #[must_use]
    pub const fn graph(&self) -> &'g Graph {
        self.graph
    }

    /// Project a local target node onto its target.
    ///
    /// Any other node kind, or a target missing from the graph, yields
    /// `None`.
    #[must_use]
    pub fn target(&self, node: &DependencyNode) -> Option<GraphTarget<'g>> {
        let (path, name) = node.as_target()?;
        self.target_at(path, name)
    }

    /// Look up a target by project path and name.
    #[must_use]
    pub fn target_at(&self, path: &Utf8Path, name: &str) -> Option<GraphTarget<'g>> {
        let (project_path, targets) = self.graph.targets().get_key_value(path)?;
        targets.get(name).map(|target| GraphTarget {
            path: project_path.as_path(),
            target,
        })
    }

    /// Targets declared by the project at `path`, sorted.
    #[must_use]
    pub fn targets_at(&self, path: &Utf8Path) -> Vec<GraphTarget<'g>> {
        let Some((project_path, targets)) = self.graph.targets().get_key_value(path) else {
            return Vec::new();
        };
        let mut found: Vec<_> = targets
            .values()
            .map(|target| GraphTarget {
                path: project_path.as_path(),
                target,
            })
            .collect();
        found.sort();
        found
    }

    /// Every loaded target, sorted.
    #[must_use]
    pub fn all_targets(&self) -> Vec<GraphTarget<'g>> {
        let mut found: Vec<_> = self
            .graph
            .targets()
            .iter()
            .flat_map(|(path, targets)| {
                targets.values().map(move |target| GraphTarget {
                    path: path.as_path(),
                    target,
                })
            })
            .collect();
        found.sort();
        found
    }

    /// Every loaded target building `product`, sorted.
    #[must_use]
    pub fn targets_with_product(&self, product: Product) -> Vec<GraphTarget<'g>> {
        self.all_targets()
            .into_iter()
            .filter(|graph_target| graph_target.target.product == product)
            .collect()
    }

    /// Direct dependencies of a target that are local targets, sorted by
    /// name then path.
    #[must_use]
    pub fn direct_target_dependencies(&self, path: &Utf8Path, name: &str) -> Vec<GraphTarget<'g>> {
        let mut found: Vec<_> = self
            .direct_nodes(path, name)
            .filter_map(|node| self.target(node))
            .collect();
        found.sort();
        found
    }

    /// Every direct dependency of a target, sorted by node identity.
    #[must_use]
    pub fn direct_dependencies(&self, path: &Utf8Path, name: &str) -> Vec<&'g DependencyNode> {
        let mut found: Vec<_> = self.direct_nodes(path, name).collect();
        found.sort_by_cached_key(|node| node.identity());
        found
    }

    /// Direct target dependencies that build an extension-like product.
    #[must_use]
    pub fn app_extension_dependencies(&self, path: &Utf8Path, name: &str) -> Vec<GraphTarget<'g>> {
        self.direct_target_dependencies(path, name)
            .into_iter()
            .filter(|dependency| Product::APP_EXTENSIONS.contains(&dependency.target.product))
            .collect()
    }

    /// Resource bundles the target at `path`/`name` must host.
    ///
    /// The search stops at any intermediate dependency that hosts resources
    /// itself: bundles beneath it belong to that dependency.
    #[must_use]
    pub fn resource_bundle_dependencies(
        &self,
        path: &Utf8Path,
        name: &str,
    ) -> Vec<GraphTarget<'g>> {
        let Some(root) = self.target_at(path, name) else {
            return Vec::new();
        };
        if !root.target.can_host_resources() {
            return Vec::new();
        }
        let is_bundle = |node: &DependencyNode| {
            self.target(node)
                .is_some_and(|dependency| dependency.target.product.is_bundle())
        };
        let hosts_resources = |node: &DependencyNode| {
            self.target(node)
                .is_some_and(|dependency| dependency.target.can_host_resources())
        };
        let mut bundles: Vec<_> = self
            .reachable_nodes(&DependencyNode::target(name, path), is_bundle, hosts_resources)
            .into_iter()
            .filter_map(|node| self.target(node))
            .collect();
        bundles.sort();
        bundles
    }

    /// Every local target reachable from the target, sorted.
    #[must_use]
    pub fn transitive_target_dependencies(
        &self,
        path: &Utf8Path,
        name: &str,
    ) -> Vec<GraphTarget<'g>> {
        let mut found: Vec<_> = self
            .reachable_nodes(
                &DependencyNode::target(name, path),
                DependencyNode::is_target,
                |_| false,
            )
            .into_iter()
            .filter_map(|node| self.target(node))
            .collect();
        found.sort();
        found
    }

    /// Paths of every precompiled framework in the graph.
    #[must_use]
    pub fn precompiled_framework_paths(&self) -> BTreeSet<&'g Utf8Path> {
        self.graph
            .dependencies()
            .iter()
            .flat_map(|(from, to)| std::iter::once(from).chain(to.iter()))
            .filter(|node| matches!(node, DependencyNode::Framework { .. }))
            .map(DependencyNode::path)
            .collect()
    }

    /// Public header folders of the precompiled libraries a target links
    /// directly.
    #[must_use]
    pub fn library_public_headers_folders(
        &self,
        path: &Utf8Path,
        name: &str,
    ) -> BTreeSet<&'g Utf8Path> {
        self.direct_nodes(path, name)
            .filter_map(|node| match node {
                DependencyNode::Library { public_headers, .. } => Some(public_headers.as_path()),
                _ => None,
            })
            .collect()
    }

    /// SDK nodes a target depends on directly, sorted by name.
    #[must_use]
    pub fn sdk_dependencies(&self, path: &Utf8Path, name: &str) -> Vec<&'g DependencyNode> {
        let mut sdks: Vec<_> = self
            .direct_nodes(path, name)
            .filter(|node| matches!(node, DependencyNode::Sdk { .. }))
            .collect();
        sdks.sort_by_key(|node| node.to_string());
        sdks
    }

    /// Whether a target is a test bundle or links `XCTest` directly.
    #[must_use]
    pub fn depends_on_xctest(&self, path: &Utf8Path, name: &str) -> bool {
        let Some(graph_target) = self.target_at(path, name) else {
            return false;
        };
        if matches!(
            graph_target.target.product,
            Product::UnitTests | Product::UiTests
        ) {
            return true;
        }
        self.direct_nodes(path, name).any(|node| {
            matches!(node, DependencyNode::Sdk { name: sdk, .. } if sdk == "XCTest.framework")
        })
    }

    /// Collect the nodes reachable from `root` that satisfy `include`,
    /// without descending past nodes that satisfy `cut`.
    ///
    /// The root itself is never included and never cut. Only the resulting
    /// set is meaningful; the order of discovery among siblings is not.
    #[must_use]
    pub fn reachable_nodes(
        &self,
        root: &DependencyNode,
        include: impl Fn(&DependencyNode) -> bool,
        cut: impl Fn(&DependencyNode) -> bool,
    ) -> HashSet<&'g DependencyNode> {
        let mut found = HashSet::new();
        let Some((start, _)) = self.graph.dependencies().get_key_value(root) else {
            return found;
        };
        let mut stack = vec![start];
        let mut visited = HashSet::new();

        while let Some(node) = stack.pop() {
            if !visited.insert(node) {
                continue;
            }
            let is_root = node == start;
            if !is_root && include(node) {
                found.insert(node);
            }
            if !is_root && cut(node) {
                continue;
            }
            if let Some(dependencies) = self.graph.dependencies_of(node) {
                stack.extend(
                    dependencies
                        .iter()
                        .filter(|dependency| !visited.contains(dependency)),
                );
            }
        }
        found
    }

    fn direct_nodes(
        &self,
        path: &Utf8Path,
        name: &str,
    ) -> impl Iterator<Item = &'g DependencyNode> + use<'g> {
        self.graph
            .dependencies_of(&DependencyNode::target(name, path))
            .into_iter()
            .flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Platform;
    use rstest::rstest;

    #[rstest]
    fn graph_targets_compare_by_path_and_name() {
        let framework = Target::new("Core", Platform::Ios, Product::Framework);
        let library = Target::new("Core", Platform::MacOs, Product::StaticLibrary);
        let path = Utf8Path::new("/Core");
        let left = GraphTarget { path, target: &framework };
        let right = GraphTarget { path, target: &library };
        assert_eq!(left, right);
        assert_eq!(left.cmp(&right), Ordering::Equal);

        let elsewhere = GraphTarget {
            path: Utf8Path::new("/Other"),
            target: &framework,
        };
        assert_ne!(left, elsewhere);
        assert_eq!(left.cmp(&elsewhere), Ordering::Less);
    }
}
