//! Shared helpers for integration tests.
//!
//! Integration tests under `tests/` compile as independent crates. This module
//! is included via `mod common;` in individual test files to share fixtures and
//! helpers while keeping test modules small and avoiding duplication.

use camino::Utf8PathBuf;
use projgraph::metadata::{ArtifactCatalog, FrameworkMetadata};
use projgraph::model::{
    BinaryArchitecture, BinaryLinking, Platform, Product, Project, Target, TargetDependency,
};
use rstest::fixture;

/// A local target reference.
pub fn local(name: &str) -> TargetDependency {
    TargetDependency::Target { name: name.into() }
}

/// A cross-project target reference.
pub fn remote(target: &str, path: &str) -> TargetDependency {
    TargetDependency::Project {
        target: target.into(),
        path: Utf8PathBuf::from(path),
    }
}

/// A precompiled framework reference.
pub fn framework_dependency(path: &str) -> TargetDependency {
    TargetDependency::Framework {
        path: Utf8PathBuf::from(path),
    }
}

/// An iOS target with the given product and dependencies.
pub fn target(name: &str, product: Product, dependencies: Vec<TargetDependency>) -> Target {
    Target::new(name, Platform::Ios, product).with_dependencies(dependencies)
}

/// Framework metadata as an inspection tool would report it.
pub fn framework_metadata(path: &str) -> FrameworkMetadata {
    let bundle = Utf8PathBuf::from(path);
    let binary_name = bundle.file_stem().unwrap_or("Binary").to_owned();
    FrameworkMetadata {
        binary_path: bundle.join(binary_name),
        path: bundle,
        dsym_path: None,
        bcsymbolmap_paths: Vec::new(),
        linking: BinaryLinking::Dynamic,
        architectures: vec![BinaryArchitecture::Arm64],
        is_carthage: false,
    }
}

/// A catalogue listing the given frameworks.
pub fn catalog_with_frameworks(paths: &[&str]) -> ArtifactCatalog {
    ArtifactCatalog {
        frameworks: paths.iter().map(|path| framework_metadata(path)).collect(),
        ..ArtifactCatalog::default()
    }
}

/// Path of the framework shared by both sides of [`diamond`].
pub const SHARED_FRAMEWORK: &str = "/Frameworks/Shared.framework";

/// Fixture: `A -> B`, `A -> C`, `B -> D`, `C -> D`, with `B` and `C` both
/// linking [`SHARED_FRAMEWORK`].
#[fixture]
pub fn diamond() -> Vec<Project> {
    vec![Project::new(
        "/App",
        "App",
        vec![
            target("A", Product::App, vec![local("B"), local("C")]),
            target(
                "B",
                Product::Framework,
                vec![local("D"), framework_dependency(SHARED_FRAMEWORK)],
            ),
            target(
                "C",
                Product::Framework,
                vec![local("D"), framework_dependency(SHARED_FRAMEWORK)],
            ),
            target("D", Product::StaticLibrary, Vec::new()),
        ],
    )]
}

/// Fixture: an app project depending on a framework in a second project,
/// plus an unreferenced third project.
#[fixture]
pub fn multi_project() -> Vec<Project> {
    vec![
        Project::new(
            "/App",
            "App",
            vec![target("App", Product::App, vec![remote("Core", "/Core")])],
        ),
        Project::new(
            "/Core",
            "Core",
            vec![target("Core", Product::Framework, Vec::new())],
        ),
        Project::new(
            "/Unused",
            "Unused",
            vec![target("Unused", Product::Framework, Vec::new())],
        ),
    ]
}
