//! Graph construction.
//!
//! [`GraphLoader`] walks the declared projects depth-first, starting from a
//! workspace or a single root project, and resolves every target's dependency
//! declarations into [`DependencyNode`] values. Projects and targets are
//! loaded at most once per call. Precompiled artefacts are inspected at most
//! once per path and kind, so every dependent shares the same node value.
//!
//! Each call owns a fresh load context holding the memoisation cache and the
//! [`CycleDetector`]. Independent loads never share state, so a single loader
//! can serve concurrent calls.
//!
//! # Examples
//!
//! ```
//! use camino::Utf8Path;
//! use projgraph::loader::GraphLoader;
//! use projgraph::model::{Platform, Product, Project, Target, TargetDependency};
//!
//! let app = Target::new("App", Platform::Ios, Product::App)
//!     .with_dependencies(vec![TargetDependency::Target { name: "Core".into() }]);
//! let core = Target::new("Core", Platform::Ios, Product::Framework);
//! let projects = vec![Project::new("/App", "App", vec![app, core])];
//!
//! let (project, graph) = GraphLoader::default()
//!     .load_project(Utf8Path::new("/App"), &projects)
//!     .expect("load project");
//! assert_eq!(project.name, "App");
//! assert_eq!(graph.dependencies().len(), 1);
//! ```

mod cache;
mod cycle;
mod error;

pub use cycle::{CycleDetector, TargetRef};
pub use error::GraphLoadingError;

use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexSet;
use std::sync::Arc;
use tracing::{debug, info};

use self::cache::LoadContext;
use crate::metadata::{
    CatalogMetadataProvider, FrameworkMetadataProvider, LibraryMetadataProvider,
    SdkMetadataProvider, SystemFrameworkMetadataProvider, XcFrameworkMetadataProvider,
};
use crate::model::{
    DependencyNode, Graph, GraphParts, Platform, Project, SdkSource, SdkStatus,
    TargetDependency, Workspace,
};

/// Builds [`Graph`] values from a universe of declared projects.
#[derive(Clone)]
pub struct GraphLoader {
    framework_metadata_provider: Arc<dyn FrameworkMetadataProvider>,
    library_metadata_provider: Arc<dyn LibraryMetadataProvider>,
    xcframework_metadata_provider: Arc<dyn XcFrameworkMetadataProvider>,
    system_framework_metadata_provider: Arc<dyn SystemFrameworkMetadataProvider>,
}

impl Default for GraphLoader {
    /// A loader backed by an empty catalogue and the standard SDK resolver.
    fn default() -> Self {
        Self::with_catalog(CatalogMetadataProvider::default())
    }
}

impl GraphLoader {
    /// Create a loader from explicit metadata providers.
    #[must_use]
    pub fn new(
        framework_metadata_provider: Arc<dyn FrameworkMetadataProvider>,
        library_metadata_provider: Arc<dyn LibraryMetadataProvider>,
        xcframework_metadata_provider: Arc<dyn XcFrameworkMetadataProvider>,
        system_framework_metadata_provider: Arc<dyn SystemFrameworkMetadataProvider>,
    ) -> Self {
        Self {
            framework_metadata_provider,
            library_metadata_provider,
            xcframework_metadata_provider,
            system_framework_metadata_provider,
        }
    }

    /// Create a loader that serves precompiled artefacts from `catalog` and
    /// resolves SDKs with [`SdkMetadataProvider`].
    #[must_use]
    pub fn with_catalog(catalog: CatalogMetadataProvider) -> Self {
        let shared = Arc::new(catalog);
        Self::new(
            shared.clone(),
            shared.clone(),
            shared,
            Arc::new(SdkMetadataProvider),
        )
    }

    /// Load the closure of projects reachable from the workspace's projects.
    ///
    /// The returned workspace lists the loaded project paths in sorted order.
    ///
    /// # Errors
    ///
    /// Returns [`GraphLoadingError`] when a project or target is missing, a
    /// dependency cycle is found, or a metadata provider fails. No partial
    /// graph is returned.
    pub fn load_workspace(
        &self,
        workspace: &Workspace,
        projects: &[Project],
    ) -> Result<Graph, GraphLoadingError> {
        let mut ctx = LoadContext::new(projects);
        for path in &workspace.projects {
            self.load_project_internal(path, &mut ctx)?;
        }

        let loaded: Vec<Utf8PathBuf> = ctx.cache.loaded_projects.keys().cloned().collect();
        let loaded_workspace = workspace.replacing_projects(loaded);
        info!(
            workspace = %loaded_workspace.name,
            projects = ctx.cache.loaded_projects.len(),
            edges = ctx.cache.dependencies.len(),
            "loaded workspace graph",
        );
        Ok(Graph::from_parts(GraphParts {
            name: loaded_workspace.name.clone(),
            path: loaded_workspace.path.clone(),
            workspace: loaded_workspace,
            projects: ctx.cache.loaded_projects,
            packages: ctx.cache.packages,
            targets: ctx.cache.loaded_targets,
            dependencies: ctx.cache.dependencies,
        }))
    }

    /// Load the project at `path` and every project it reaches.
    ///
    /// # Errors
    ///
    /// Returns [`GraphLoadingError::MissingProject`] when `path` is not among
    /// `projects`, and any other [`GraphLoadingError`] raised while loading.
    pub fn load_project(
        &self,
        path: &Utf8Path,
        projects: &[Project],
    ) -> Result<(Project, Graph), GraphLoadingError> {
        let mut ctx = LoadContext::new(projects);
        let root = ctx
            .cache
            .declared_project(path)
            .ok_or_else(|| GraphLoadingError::MissingProject {
                path: path.to_owned(),
            })?;
        self.load_project_internal(path, &mut ctx)?;

        let loaded: Vec<Utf8PathBuf> = ctx.cache.loaded_projects.keys().cloned().collect();
        let workspace = Workspace::new(path, root.name.clone(), loaded);
        info!(
            project = %root.name,
            projects = ctx.cache.loaded_projects.len(),
            edges = ctx.cache.dependencies.len(),
            "loaded project graph",
        );
        let graph = Graph::from_parts(GraphParts {
            name: root.name.clone(),
            path: path.to_owned(),
            workspace,
            projects: ctx.cache.loaded_projects,
            packages: ctx.cache.packages,
            targets: ctx.cache.loaded_targets,
            dependencies: ctx.cache.dependencies,
        });
        Ok((root.clone(), graph))
    }

    fn load_project_internal(
        &self,
        path: &Utf8Path,
        ctx: &mut LoadContext<'_>,
    ) -> Result<(), GraphLoadingError> {
        if ctx.cache.project_loaded(path) {
            return Ok(());
        }
        let project = ctx
            .cache
            .declared_project(path)
            .ok_or_else(|| GraphLoadingError::MissingProject {
                path: path.to_owned(),
            })?;
        debug!(project = %project.name, %path, "loading project");
        ctx.cache.add_project(project);

        for target in &project.targets {
            self.load_target_internal(path, &target.name, ctx)?;
        }
        Ok(())
    }

    fn load_target_internal(
        &self,
        path: &Utf8Path,
        name: &str,
        ctx: &mut LoadContext<'_>,
    ) -> Result<(), GraphLoadingError> {
        if ctx.cache.target_loaded(path, name) {
            return Ok(());
        }
        if ctx.cache.declared_project(path).is_none() {
            return Err(GraphLoadingError::MissingProject {
                path: path.to_owned(),
            });
        }
        let target = ctx.cache.declared_target(path, name).ok_or_else(|| {
            GraphLoadingError::TargetNotFound {
                name: name.to_owned(),
                path: path.to_owned(),
            }
        })?;
        debug!(target = %name, %path, "loading target");
        ctx.cache.add_target(path, target);

        let mut dependencies = IndexSet::new();
        for dependency in &target.dependencies {
            let node = self.load_dependency(path, name, target.platform, dependency, ctx)?;
            dependencies.insert(node);
        }

        if !dependencies.is_empty() {
            ctx.cache
                .dependencies
                .insert(DependencyNode::target(name, path), dependencies);
        }
        ctx.cycle_detector.complete(&TargetRef::new(path, name));
        Ok(())
    }

    fn load_dependency(
        &self,
        path: &Utf8Path,
        from_target: &str,
        from_platform: Platform,
        dependency: &TargetDependency,
        ctx: &mut LoadContext<'_>,
    ) -> Result<DependencyNode, GraphLoadingError> {
        match dependency {
            TargetDependency::Target { name } => {
                ctx.cycle_detector.start(
                    &TargetRef::new(path, from_target),
                    &TargetRef::new(path, name),
                )?;
                self.load_target_internal(path, name, ctx)?;
                Ok(DependencyNode::target(name.as_str(), path))
            }
            TargetDependency::Project {
                target,
                path: project_path,
            } => {
                ctx.cycle_detector.start(
                    &TargetRef::new(path, from_target),
                    &TargetRef::new(project_path, target),
                )?;
                self.load_project_internal(project_path, ctx)?;
                self.load_target_internal(project_path, target, ctx)?;
                Ok(DependencyNode::target(target.as_str(), project_path.as_path()))
            }
            TargetDependency::Framework { path: framework } => self.load_framework(framework, ctx),
            TargetDependency::Library {
                path: library,
                public_headers,
                swift_module_map,
            } => self.load_library(library, public_headers, swift_module_map.as_deref(), ctx),
            TargetDependency::XcFramework { path: xcframework } => {
                self.load_xcframework(xcframework, ctx)
            }
            TargetDependency::Sdk { name, status } => {
                self.load_sdk(name, from_platform, *status, SdkSource::System)
            }
            TargetDependency::XcTest => self.load_xctest_sdk(from_platform),
            TargetDependency::Package { product } => Ok(Self::load_package(path, product)),
            TargetDependency::RawPath { path: raw } => {
                Ok(DependencyNode::RawPath { path: raw.clone() })
            }
        }
    }

    fn load_framework(
        &self,
        path: &Utf8Path,
        ctx: &mut LoadContext<'_>,
    ) -> Result<DependencyNode, GraphLoadingError> {
        if let Some(loaded) = ctx.cache.frameworks.get(path) {
            return Ok(loaded.clone());
        }
        debug!(%path, "inspecting framework");
        let metadata = self.framework_metadata_provider.load_metadata(path)?;
        let framework = DependencyNode::Framework {
            path: metadata.path,
            binary_path: metadata.binary_path,
            dsym_path: metadata.dsym_path,
            bcsymbolmap_paths: metadata.bcsymbolmap_paths,
            linking: metadata.linking,
            architectures: metadata.architectures,
            is_carthage: metadata.is_carthage,
        };
        ctx.cache
            .frameworks
            .insert(path.to_owned(), framework.clone());
        Ok(framework)
    }

    fn load_library(
        &self,
        path: &Utf8Path,
        public_headers: &Utf8Path,
        swift_module_map: Option<&Utf8Path>,
        ctx: &mut LoadContext<'_>,
    ) -> Result<DependencyNode, GraphLoadingError> {
        if let Some(loaded) = ctx.cache.libraries.get(path) {
            return Ok(loaded.clone());
        }
        debug!(%path, "inspecting library");
        let metadata =
            self.library_metadata_provider
                .load_metadata(path, public_headers, swift_module_map)?;
        let library = DependencyNode::Library {
            path: metadata.path,
            public_headers: metadata.public_headers,
            linking: metadata.linking,
            architectures: metadata.architectures,
            swift_module_map: metadata.swift_module_map,
        };
        ctx.cache.libraries.insert(path.to_owned(), library.clone());
        Ok(library)
    }

    fn load_xcframework(
        &self,
        path: &Utf8Path,
        ctx: &mut LoadContext<'_>,
    ) -> Result<DependencyNode, GraphLoadingError> {
        if let Some(loaded) = ctx.cache.xcframeworks.get(path) {
            return Ok(loaded.clone());
        }
        debug!(%path, "inspecting xcframework");
        let metadata = self.xcframework_metadata_provider.load_metadata(path)?;
        let xcframework = DependencyNode::XcFramework {
            path: metadata.path,
            info_plist: metadata.info_plist,
            primary_binary_path: metadata.primary_binary_path,
            linking: metadata.linking,
        };
        ctx.cache
            .xcframeworks
            .insert(path.to_owned(), xcframework.clone());
        Ok(xcframework)
    }

    fn load_sdk(
        &self,
        name: &str,
        platform: Platform,
        status: SdkStatus,
        source: SdkSource,
    ) -> Result<DependencyNode, GraphLoadingError> {
        let metadata = self
            .system_framework_metadata_provider
            .load_metadata(name, status, platform, source)?;
        Ok(DependencyNode::Sdk {
            name: metadata.name,
            path: metadata.path,
            status: metadata.status,
            source: metadata.source,
        })
    }

    fn load_xctest_sdk(&self, platform: Platform) -> Result<DependencyNode, GraphLoadingError> {
        let metadata = self
            .system_framework_metadata_provider
            .load_xctest_metadata(platform)?;
        Ok(DependencyNode::Sdk {
            name: metadata.name,
            path: metadata.path,
            status: metadata.status,
            source: metadata.source,
        })
    }

    // The declaring project's path does not uniquely identify the package
    // that vends the product. Downstream consumers key on this value, so it
    // is kept until package resolution moves into the loader.
    fn load_package(declaring_path: &Utf8Path, product: &str) -> DependencyNode {
        DependencyNode::PackageProduct {
            path: declaring_path.to_owned(),
            product: product.to_owned(),
        }
    }
}
