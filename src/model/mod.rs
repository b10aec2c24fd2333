//! Value model of the dependency graph.
//!
//! Projects and targets arrive pre-parsed from an external collaborator. The
//! loader resolves each target's [`TargetDependency`] declarations into
//! [`DependencyNode`] vertices and assembles them into a [`Graph`].

mod graph;
mod node;
mod platform;
mod project;
mod target;

pub use graph::{AdjacencyMap, Graph, GraphParts, PackageMap, ProjectMap, TargetMap};
pub use node::{DependencyNode, XcFrameworkInfoPlist, XcFrameworkLibrary};
pub use platform::{BinaryArchitecture, BinaryLinking, Platform, Product, SdkSource, SdkStatus};
pub use project::{Package, Project, Workspace};
pub use target::{Target, TargetDependency};
