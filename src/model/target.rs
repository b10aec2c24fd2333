//! Targets and their pre-resolution dependency declarations.

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

use super::platform::{Platform, Product, SdkStatus};

/// A dependency as declared by a target, before it is validated and resolved
/// into a [`DependencyNode`](super::DependencyNode).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TargetDependency {
    /// A target declared in the same project.
    Target {
        /// Name of the sibling target.
        name: String,
    },
    /// A target declared in another project.
    Project {
        /// Name of the target.
        target: String,
        /// Path of the project declaring the target.
        path: Utf8PathBuf,
    },
    /// A precompiled `.framework`.
    Framework {
        /// Path to the framework bundle.
        path: Utf8PathBuf,
    },
    /// A precompiled static or dynamic library.
    Library {
        /// Path to the library binary.
        path: Utf8PathBuf,
        /// Directory containing the library's public headers.
        public_headers: Utf8PathBuf,
        /// Optional Swift module map.
        #[serde(default)]
        swift_module_map: Option<Utf8PathBuf>,
    },
    /// A precompiled `.xcframework`.
    XcFramework {
        /// Path to the xcframework bundle.
        path: Utf8PathBuf,
    },
    /// A system SDK such as `UIKit.framework` or `libc++.tbd`.
    Sdk {
        /// File name of the SDK.
        name: String,
        /// Link status.
        status: SdkStatus,
    },
    /// The `XCTest` framework for the declaring target's platform.
    XcTest,
    /// A product vended by a package declared on the project.
    Package {
        /// Product name.
        product: String,
    },
    /// A path passed through verbatim, used for pod installations.
    RawPath {
        /// The referenced path.
        path: Utf8PathBuf,
    },
}

/// A build unit owned by exactly one [`Project`](super::Project).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// Target name, unique within its project.
    pub name: String,
    /// Platform the target builds for.
    pub platform: Platform,
    /// Product the target builds.
    pub product: Product,
    /// Name of the built product.
    #[serde(default)]
    pub product_name: String,
    /// Bundle identifier.
    #[serde(default)]
    pub bundle_id: String,
    /// Dependencies in declaration order.
    #[serde(default)]
    pub dependencies: Vec<TargetDependency>,
    /// Source files.
    #[serde(default)]
    pub sources: Vec<Utf8PathBuf>,
    /// Resource files.
    #[serde(default)]
    pub resources: Vec<Utf8PathBuf>,
    /// Marks the target for removal by the pruning mapper.
    #[serde(default)]
    pub prune: bool,
}

impl Target {
    /// Create a target with no dependencies, sources or resources.
    ///
    /// The product name defaults to the target name with dashes replaced by
    /// underscores.
    #[must_use]
    pub fn new(name: impl Into<String>, platform: Platform, product: Product) -> Self {
        let name = name.into();
        Self {
            product_name: name.replace('-', "_"),
            bundle_id: format!("io.projgraph.{name}"),
            name,
            platform,
            product,
            dependencies: Vec::new(),
            sources: Vec::new(),
            resources: Vec::new(),
            prune: false,
        }
    }

    /// Replace the dependency declarations.
    #[must_use]
    pub fn with_dependencies(mut self, dependencies: Vec<TargetDependency>) -> Self {
        self.dependencies = dependencies;
        self
    }

    /// Replace the resource list.
    #[must_use]
    pub fn with_resources(mut self, resources: Vec<Utf8PathBuf>) -> Self {
        self.resources = resources;
        self
    }

    /// Set the prune flag.
    #[must_use]
    pub const fn with_prune(mut self, prune: bool) -> Self {
        self.prune = prune;
        self
    }

    /// Returns true if the product can carry resources of its own.
    ///
    /// Static frameworks only qualify when they declare resources.
    #[must_use]
    pub fn supports_resources(&self) -> bool {
        match self.product {
            Product::App
            | Product::Framework
            | Product::UnitTests
            | Product::UiTests
            | Product::Bundle
            | Product::AppExtension
            | Product::Watch2App
            | Product::Watch2Extension
            | Product::TvTopShelfExtension
            | Product::MessagesExtension
            | Product::StickerPackExtension
            | Product::AppClip => true,
            Product::StaticFramework => !self.resources.is_empty(),
            Product::CommandLineTool
            | Product::DynamicLibrary
            | Product::StaticLibrary
            | Product::Xpc => false,
        }
    }

    /// Whether the target hosts the resource bundles of the dependencies
    /// beneath it.
    #[must_use]
    pub fn can_host_resources(&self) -> bool {
        self.supports_resources()
    }

    /// Whether the target embeds bundles into its product.
    #[must_use]
    pub const fn can_embed_bundles(&self) -> bool {
        matches!(
            self.product,
            Product::App
                | Product::AppExtension
                | Product::Watch2App
                | Product::AppClip
                | Product::UnitTests
                | Product::UiTests
                | Product::Watch2Extension
                | Product::Xpc
        )
    }
}
