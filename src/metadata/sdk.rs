//! SDK path resolution.

use camino::{Utf8Path, Utf8PathBuf};

use super::{MetadataError, SystemFrameworkMetadata, SystemFrameworkMetadataProvider};
use crate::model::{Platform, SdkSource, SdkStatus};

/// Resolves SDK names to their canonical locations without touching the
/// filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct SdkMetadataProvider;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SdkKind {
    Framework,
    Library,
}

impl SdkKind {
    fn from_name(name: &str) -> Option<Self> {
        match Utf8Path::new(name).extension() {
            Some("framework") => Some(Self::Framework),
            Some("tbd") => Some(Self::Library),
            _ => None,
        }
    }
}

impl SystemFrameworkMetadataProvider for SdkMetadataProvider {
    fn load_metadata(
        &self,
        sdk_name: &str,
        status: SdkStatus,
        platform: Platform,
        source: SdkSource,
    ) -> Result<SystemFrameworkMetadata, MetadataError> {
        let kind = SdkKind::from_name(sdk_name).ok_or_else(|| MetadataError::UnsupportedSdk {
            name: sdk_name.to_owned(),
        })?;
        let path = match (source, kind) {
            (SdkSource::Developer, _) => Utf8PathBuf::from(format!(
                "/Platforms/{}.platform/Developer/Library/Frameworks/{sdk_name}",
                platform.xcode_platform_name()
            )),
            (SdkSource::System, SdkKind::Framework) => {
                Utf8PathBuf::from(format!("/System/Library/Frameworks/{sdk_name}"))
            }
            (SdkSource::System, SdkKind::Library) => {
                Utf8PathBuf::from(format!("/usr/lib/{sdk_name}"))
            }
        };
        Ok(SystemFrameworkMetadata {
            name: sdk_name.to_owned(),
            path,
            status,
            source,
        })
    }
}
