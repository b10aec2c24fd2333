//! Vertices of the dependency graph.
//!
//! [`DependencyNode`] compares every field for equality but hashes only a
//! stable identity subset: the variant tag plus the path for binary artefacts,
//! the name and path for local targets, and the path and product name for
//! package products. Equal values therefore always hash equal, while hashing
//! stays cheap for artefacts that carry large metadata payloads. Memoised
//! artefacts are shared between dependents, so every edge to the same
//! artefact holds an identical value.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::hash::{Hash, Hasher};

use super::platform::{BinaryArchitecture, BinaryLinking, SdkSource, SdkStatus};

/// One library slice listed in an xcframework's `Info.plist`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XcFrameworkLibrary {
    /// Slice identifier, for example `ios-arm64`.
    pub identifier: String,
    /// Path of the binary relative to the slice directory.
    pub path: Utf8PathBuf,
    /// Architectures contained in the slice.
    pub architectures: Vec<BinaryArchitecture>,
}

/// The parsed `Info.plist` of an xcframework.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct XcFrameworkInfoPlist {
    /// Available library slices.
    pub libraries: Vec<XcFrameworkLibrary>,
}

/// A vertex in the dependency graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DependencyNode {
    /// A precompiled framework.
    Framework {
        /// Framework bundle path.
        path: Utf8PathBuf,
        /// Path of the binary inside the bundle.
        binary_path: Utf8PathBuf,
        /// Debug symbols, when shipped next to the framework.
        dsym_path: Option<Utf8PathBuf>,
        /// Bitcode symbol maps matching the binary.
        bcsymbolmap_paths: Vec<Utf8PathBuf>,
        /// How the binary is linked.
        linking: BinaryLinking,
        /// Architectures contained in the binary.
        architectures: Vec<BinaryArchitecture>,
        /// Whether the framework was built by Carthage.
        is_carthage: bool,
    },
    /// A precompiled library.
    Library {
        /// Library binary path.
        path: Utf8PathBuf,
        /// Public headers directory.
        public_headers: Utf8PathBuf,
        /// How the binary is linked.
        linking: BinaryLinking,
        /// Architectures contained in the binary.
        architectures: Vec<BinaryArchitecture>,
        /// Swift module map, if any.
        swift_module_map: Option<Utf8PathBuf>,
    },
    /// A precompiled xcframework.
    XcFramework {
        /// Bundle path.
        path: Utf8PathBuf,
        /// Parsed `Info.plist`.
        info_plist: XcFrameworkInfoPlist,
        /// Binary used for linking.
        primary_binary_path: Utf8PathBuf,
        /// How the binary is linked.
        linking: BinaryLinking,
    },
    /// A product vended by a package.
    ///
    /// `path` is the path of the project that declared the dependency, not the
    /// project owning the package.
    PackageProduct {
        /// Declaring project path.
        path: Utf8PathBuf,
        /// Product name.
        product: String,
    },
    /// A target defined in the project at `path`.
    Target {
        /// Target name.
        name: String,
        /// Owning project path.
        path: Utf8PathBuf,
    },
    /// A system or developer SDK.
    Sdk {
        /// SDK file name.
        name: String,
        /// Resolved SDK path.
        path: Utf8PathBuf,
        /// Link status.
        status: SdkStatus,
        /// SDK location.
        source: SdkSource,
    },
    /// A path carried verbatim, such as a pod installation.
    RawPath {
        /// The referenced path.
        path: Utf8PathBuf,
    },
}

impl DependencyNode {
    /// Construct a local target node.
    #[must_use]
    pub fn target(name: impl Into<String>, path: impl Into<Utf8PathBuf>) -> Self {
        Self::Target {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Returns the `(project path, target name)` pair for local targets.
    #[must_use]
    pub fn as_target(&self) -> Option<(&Utf8Path, &str)> {
        match self {
            Self::Target { name, path } => Some((path.as_path(), name.as_str())),
            _ => None,
        }
    }

    /// Whether the node is a local target.
    #[must_use]
    pub const fn is_target(&self) -> bool {
        matches!(self, Self::Target { .. })
    }

    /// Path carried by the node.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        match self {
            Self::Framework { path, .. }
            | Self::Library { path, .. }
            | Self::XcFramework { path, .. }
            | Self::PackageProduct { path, .. }
            | Self::Target { path, .. }
            | Self::Sdk { path, .. }
            | Self::RawPath { path } => path,
        }
    }

    /// Fully qualified key naming the node's identity, for example
    /// `target:/App:App` or `framework:/Frameworks/A.framework`.
    #[must_use]
    pub fn identity(&self) -> String {
        let tag = self.tag();
        match self {
            Self::Framework { path, .. }
            | Self::Library { path, .. }
            | Self::XcFramework { path, .. }
            | Self::RawPath { path } => format!("{tag}:{path}"),
            Self::PackageProduct { path, product } => format!("{tag}:{path}:{product}"),
            Self::Target { name, path } => format!("{tag}:{path}:{name}"),
            Self::Sdk {
                name,
                path,
                status,
                source,
            } => format!("{tag}:{name}:{path}:{status:?}:{source:?}"),
        }
    }

    const fn tag(&self) -> &'static str {
        match self {
            Self::Framework { .. } => "framework",
            Self::Library { .. } => "library",
            Self::XcFramework { .. } => "xcframework",
            Self::PackageProduct { .. } => "package",
            Self::Target { .. } => "target",
            Self::Sdk { .. } => "sdk",
            Self::RawPath { .. } => "raw",
        }
    }
}

impl Hash for DependencyNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tag().hash(state);
        match self {
            Self::Framework { path, .. }
            | Self::Library { path, .. }
            | Self::XcFramework { path, .. }
            | Self::RawPath { path } => path.hash(state),
            Self::PackageProduct { path, product } => {
                path.hash(state);
                product.hash(state);
            }
            Self::Target { name, path } => {
                name.hash(state);
                path.hash(state);
            }
            Self::Sdk {
                name,
                path,
                status,
                source,
            } => {
                name.hash(state);
                path.hash(state);
                status.hash(state);
                source.hash(state);
            }
        }
    }
}

fn basename(path: &Utf8Path) -> &str {
    path.file_name().unwrap_or_else(|| path.as_str())
}

impl Display for DependencyNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Framework { path, .. } => write!(f, "framework '{}'", basename(path)),
            Self::Library { path, .. } => write!(f, "library '{}'", basename(path)),
            Self::XcFramework { path, .. } => write!(f, "xcframework '{}'", basename(path)),
            Self::PackageProduct { product, .. } => write!(f, "package '{product}'"),
            Self::Target { name, .. } => write!(f, "target '{name}'"),
            Self::Sdk { name, .. } => write!(f, "sdk '{name}'"),
            Self::RawPath { path } => write!(f, "path '{path}'"),
        }
    }
}
