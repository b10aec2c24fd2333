//! Enumerations shared by targets, artefacts and metadata providers.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Operating system a target is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// iOS and iPadOS.
    #[serde(rename = "ios")]
    Ios,
    /// macOS.
    #[serde(rename = "macos")]
    MacOs,
    /// tvOS.
    #[serde(rename = "tvos")]
    TvOs,
    /// watchOS.
    #[serde(rename = "watchos")]
    WatchOs,
}

impl Platform {
    /// Name of the platform directory inside the developer tools, for example
    /// `iPhoneOS` in `iPhoneOS.platform`.
    #[must_use]
    pub const fn xcode_platform_name(self) -> &'static str {
        match self {
            Self::Ios => "iPhoneOS",
            Self::MacOs => "MacOSX",
            Self::TvOs => "AppleTVOS",
            Self::WatchOs => "WatchOS",
        }
    }
}

impl Display for Platform {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ios => "iOS",
            Self::MacOs => "macOS",
            Self::TvOs => "tvOS",
            Self::WatchOs => "watchOS",
        };
        f.write_str(name)
    }
}

/// Kind of product a target builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Product {
    /// An application bundle.
    App,
    /// A static library (`.a`).
    StaticLibrary,
    /// A dynamic library (`.dylib`).
    DynamicLibrary,
    /// A dynamic framework.
    Framework,
    /// A static framework.
    StaticFramework,
    /// A unit test bundle.
    UnitTests,
    /// A UI test bundle.
    UiTests,
    /// A resource bundle.
    Bundle,
    /// An application extension.
    AppExtension,
    /// A sticker pack extension.
    StickerPackExtension,
    /// A watchOS 2 application.
    Watch2App,
    /// A watchOS 2 extension.
    Watch2Extension,
    /// A tvOS top shelf extension.
    TvTopShelfExtension,
    /// An iMessage extension.
    MessagesExtension,
    /// An App Clip.
    AppClip,
    /// A command line tool.
    CommandLineTool,
    /// An XPC service.
    Xpc,
}

impl Product {
    /// Products that behave like application extensions when embedded.
    pub const APP_EXTENSIONS: [Self; 5] = [
        Self::AppExtension,
        Self::StickerPackExtension,
        Self::Watch2Extension,
        Self::TvTopShelfExtension,
        Self::MessagesExtension,
    ];

    /// Whether the product is a resource bundle.
    #[must_use]
    pub const fn is_bundle(self) -> bool {
        matches!(self, Self::Bundle)
    }
}

impl Display for Product {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::App => "app",
            Self::StaticLibrary => "static_library",
            Self::DynamicLibrary => "dynamic_library",
            Self::Framework => "framework",
            Self::StaticFramework => "static_framework",
            Self::UnitTests => "unit_tests",
            Self::UiTests => "ui_tests",
            Self::Bundle => "bundle",
            Self::AppExtension => "app_extension",
            Self::StickerPackExtension => "sticker_pack_extension",
            Self::Watch2App => "watch2_app",
            Self::Watch2Extension => "watch2_extension",
            Self::TvTopShelfExtension => "tv_top_shelf_extension",
            Self::MessagesExtension => "messages_extension",
            Self::AppClip => "app_clip",
            Self::CommandLineTool => "command_line_tool",
            Self::Xpc => "xpc",
        };
        f.write_str(name)
    }
}

/// How a precompiled binary is linked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinaryLinking {
    /// Linked statically into the dependent.
    Static,
    /// Loaded dynamically at runtime.
    Dynamic,
}

/// CPU architecture slice contained in a binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinaryArchitecture {
    /// 64-bit Intel.
    #[serde(rename = "x86_64")]
    X8664,
    /// 32-bit Intel.
    I386,
    /// 64-bit ARM.
    Arm64,
    /// 64-bit ARM with pointer authentication.
    Arm64e,
    /// 32-bit ARMv7.
    Armv7,
    /// 32-bit ARMv7s.
    Armv7s,
    /// 64-bit ARM with 32-bit pointers.
    #[serde(rename = "arm64_32")]
    Arm6432,
}

/// Whether an SDK dependency is required at link time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SdkStatus {
    /// The SDK must be present.
    Required,
    /// The SDK is weakly linked.
    Optional,
}

/// Where an SDK is located.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SdkSource {
    /// Part of the platform SDK.
    System,
    /// Shipped with the developer tools, such as `XCTest`.
    Developer,
}
