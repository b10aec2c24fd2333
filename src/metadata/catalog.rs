//! A static catalogue of precompiled artefacts.
//!
//! Useful when artefact metadata has already been extracted, for example by a
//! previous run or by a separate inspection tool, and is supplied alongside
//! the project universe.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{
    FrameworkMetadata, FrameworkMetadataProvider, LibraryMetadata, LibraryMetadataProvider,
    MetadataError, XcFrameworkMetadata, XcFrameworkMetadataProvider,
};
use crate::model::{BinaryArchitecture, BinaryLinking};

/// Binary facts about a library; headers and module map come from the
/// declaring target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryBinary {
    /// Library binary path.
    pub path: Utf8PathBuf,
    /// How the binary is linked.
    pub linking: BinaryLinking,
    /// Architectures in the binary.
    #[serde(default)]
    pub architectures: Vec<BinaryArchitecture>,
}

/// Serialised form of a catalogue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArtifactCatalog {
    /// Known frameworks.
    #[serde(default)]
    pub frameworks: Vec<FrameworkMetadata>,
    /// Known libraries.
    #[serde(default)]
    pub libraries: Vec<LibraryBinary>,
    /// Known xcframeworks.
    #[serde(default)]
    pub xcframeworks: Vec<XcFrameworkMetadata>,
}

/// Serves artefact metadata from an [`ArtifactCatalog`].
#[derive(Debug, Clone, Default)]
pub struct CatalogMetadataProvider {
    frameworks: BTreeMap<Utf8PathBuf, FrameworkMetadata>,
    libraries: BTreeMap<Utf8PathBuf, LibraryBinary>,
    xcframeworks: BTreeMap<Utf8PathBuf, XcFrameworkMetadata>,
}

impl CatalogMetadataProvider {
    /// Index a catalogue by artefact path.
    #[must_use]
    pub fn new(catalog: ArtifactCatalog) -> Self {
        Self {
            frameworks: catalog
                .frameworks
                .into_iter()
                .map(|entry| (entry.path.clone(), entry))
                .collect(),
            libraries: catalog
                .libraries
                .into_iter()
                .map(|entry| (entry.path.clone(), entry))
                .collect(),
            xcframeworks: catalog
                .xcframeworks
                .into_iter()
                .map(|entry| (entry.path.clone(), entry))
                .collect(),
        }
    }
}

fn not_found(path: &Utf8Path) -> MetadataError {
    MetadataError::MetadataNotFound {
        path: path.to_owned(),
    }
}

impl FrameworkMetadataProvider for CatalogMetadataProvider {
    fn load_metadata(&self, path: &Utf8Path) -> Result<FrameworkMetadata, MetadataError> {
        self.frameworks
            .get(path)
            .cloned()
            .ok_or_else(|| not_found(path))
    }
}

impl LibraryMetadataProvider for CatalogMetadataProvider {
    fn load_metadata(
        &self,
        path: &Utf8Path,
        public_headers: &Utf8Path,
        swift_module_map: Option<&Utf8Path>,
    ) -> Result<LibraryMetadata, MetadataError> {
        let binary = self.libraries.get(path).ok_or_else(|| not_found(path))?;
        Ok(LibraryMetadata {
            path: binary.path.clone(),
            public_headers: public_headers.to_owned(),
            swift_module_map: swift_module_map.map(Utf8Path::to_owned),
            linking: binary.linking,
            architectures: binary.architectures.clone(),
        })
    }
}

impl XcFrameworkMetadataProvider for CatalogMetadataProvider {
    fn load_metadata(&self, path: &Utf8Path) -> Result<XcFrameworkMetadata, MetadataError> {
        self.xcframeworks
            .get(path)
            .cloned()
            .ok_or_else(|| not_found(path))
    }
}
