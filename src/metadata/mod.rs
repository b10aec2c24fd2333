//! Metadata providers for precompiled artefacts and SDKs.
//!
//! The loader never inspects binaries itself. It asks a provider for the
//! structural metadata of the artefact at a path and folds the answer into a
//! [`DependencyNode`](crate::model::DependencyNode). Provider failures abort
//! the load.

// Scoped suppression for version-dependent lint false positives from
// miette/thiserror derive macros.
#![allow(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    unused_assignments
)]

mod catalog;
mod sdk;

pub use catalog::{ArtifactCatalog, CatalogMetadataProvider, LibraryBinary};
pub use sdk::SdkMetadataProvider;

use camino::{Utf8Path, Utf8PathBuf};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{
    BinaryArchitecture, BinaryLinking, Platform, SdkSource, SdkStatus, XcFrameworkInfoPlist,
};

/// Errors raised by metadata providers.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum MetadataError {
    /// No metadata could be found for the artefact.
    #[error("couldn't find metadata for binary at path {path}")]
    #[diagnostic(code(projgraph::metadata::not_found))]
    MetadataNotFound {
        /// Path of the artefact.
        path: Utf8PathBuf,
    },
    /// The SDK name has an extension the provider does not understand.
    #[error("the SDK type of {name} is not currently supported")]
    #[diagnostic(
        code(projgraph::metadata::unsupported_sdk),
        help("only .framework and .tbd SDKs are supported")
    )]
    UnsupportedSdk {
        /// The SDK name as declared.
        name: String,
    },
}

/// Metadata describing a precompiled framework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameworkMetadata {
    /// Framework bundle path.
    pub path: Utf8PathBuf,
    /// Binary inside the bundle.
    pub binary_path: Utf8PathBuf,
    /// Debug symbols next to the bundle.
    #[serde(default)]
    pub dsym_path: Option<Utf8PathBuf>,
    /// Bitcode symbol maps matching the binary.
    #[serde(default)]
    pub bcsymbolmap_paths: Vec<Utf8PathBuf>,
    /// How the binary is linked.
    pub linking: BinaryLinking,
    /// Architectures in the binary.
    #[serde(default)]
    pub architectures: Vec<BinaryArchitecture>,
    /// Whether the framework was built by Carthage.
    #[serde(default)]
    pub is_carthage: bool,
}

/// Metadata describing a precompiled library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryMetadata {
    /// Library binary path.
    pub path: Utf8PathBuf,
    /// Public headers directory.
    pub public_headers: Utf8PathBuf,
    /// Swift module map, if any.
    pub swift_module_map: Option<Utf8PathBuf>,
    /// How the binary is linked.
    pub linking: BinaryLinking,
    /// Architectures in the binary.
    pub architectures: Vec<BinaryArchitecture>,
}

/// Metadata describing a precompiled xcframework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XcFrameworkMetadata {
    /// Bundle path.
    pub path: Utf8PathBuf,
    /// Parsed `Info.plist`.
    #[serde(default)]
    pub info_plist: XcFrameworkInfoPlist,
    /// Binary used for linking.
    pub primary_binary_path: Utf8PathBuf,
    /// How the binary is linked.
    pub linking: BinaryLinking,
}

/// Metadata describing an SDK.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemFrameworkMetadata {
    /// SDK file name.
    pub name: String,
    /// Resolved path.
    pub path: Utf8PathBuf,
    /// Link status.
    pub status: SdkStatus,
    /// SDK location.
    pub source: SdkSource,
}

/// Loads framework metadata.
pub trait FrameworkMetadataProvider: Send + Sync {
    /// Load the metadata of the framework at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError`] when the framework cannot be inspected.
    fn load_metadata(&self, path: &Utf8Path) -> Result<FrameworkMetadata, MetadataError>;
}

/// Loads library metadata.
pub trait LibraryMetadataProvider: Send + Sync {
    /// Load the metadata of the library at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError`] when the library cannot be inspected.
    fn load_metadata(
        &self,
        path: &Utf8Path,
        public_headers: &Utf8Path,
        swift_module_map: Option<&Utf8Path>,
    ) -> Result<LibraryMetadata, MetadataError>;
}

/// Loads xcframework metadata.
pub trait XcFrameworkMetadataProvider: Send + Sync {
    /// Load the metadata of the xcframework at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError`] when the xcframework cannot be inspected.
    fn load_metadata(&self, path: &Utf8Path) -> Result<XcFrameworkMetadata, MetadataError>;
}

/// Resolves SDKs for a platform.
pub trait SystemFrameworkMetadataProvider: Send + Sync {
    /// Resolve the SDK called `sdk_name` for `platform`.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::UnsupportedSdk`] for unknown SDK kinds.
    fn load_metadata(
        &self,
        sdk_name: &str,
        status: SdkStatus,
        platform: Platform,
        source: SdkSource,
    ) -> Result<SystemFrameworkMetadata, MetadataError>;

    /// Resolve the `XCTest` framework for `platform`.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError`] when the framework cannot be resolved.
    fn load_xctest_metadata(
        &self,
        platform: Platform,
    ) -> Result<SystemFrameworkMetadata, MetadataError> {
        self.load_metadata(
            "XCTest.framework",
            SdkStatus::Required,
            platform,
            SdkSource::Developer,
        )
    }
}
