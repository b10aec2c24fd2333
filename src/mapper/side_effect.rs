//! Side effects requested by mappers.
//!
//! Descriptors are opaque to the core: mappers produce them, pipelines keep
//! them in order, and an external component executes them.

use camino::Utf8PathBuf;
use itertools::Itertools;
use std::fmt::{self, Display, Formatter};

/// Whether a file or directory should exist once the effect is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DescriptorState {
    /// Create or overwrite.
    #[default]
    Present,
    /// Delete if present.
    Absent,
}

/// An ordered instruction produced by a mapper.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SideEffectDescriptor {
    /// Write or remove a file.
    File {
        /// Destination path.
        path: Utf8PathBuf,
        /// Contents to write. `None` writes an empty file.
        contents: Option<Vec<u8>>,
        /// Desired state.
        state: DescriptorState,
    },
    /// Create or remove a directory.
    Directory {
        /// Directory path.
        path: Utf8PathBuf,
        /// Desired state.
        state: DescriptorState,
    },
    /// Run a command; the first element is the program.
    Command {
        /// Program and arguments.
        command: Vec<String>,
    },
}

impl SideEffectDescriptor {
    /// Write `contents` to `path`.
    #[must_use]
    pub fn file(path: impl Into<Utf8PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        Self::File {
            path: path.into(),
            contents: Some(contents.into()),
            state: DescriptorState::Present,
        }
    }

    /// Remove the file at `path`.
    #[must_use]
    pub fn remove_file(path: impl Into<Utf8PathBuf>) -> Self {
        Self::File {
            path: path.into(),
            contents: None,
            state: DescriptorState::Absent,
        }
    }

    /// Create the directory at `path`.
    #[must_use]
    pub fn directory(path: impl Into<Utf8PathBuf>) -> Self {
        Self::Directory {
            path: path.into(),
            state: DescriptorState::Present,
        }
    }

    /// Run `command`.
    #[must_use]
    pub fn command<I, S>(command: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Command {
            command: command.into_iter().map(Into::into).collect(),
        }
    }
}

impl Display for SideEffectDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::File {
                path,
                state: DescriptorState::Present,
                ..
            } => write!(f, "write file {path}"),
            Self::File {
                path,
                state: DescriptorState::Absent,
                ..
            } => write!(f, "delete file {path}"),
            Self::Directory {
                path,
                state: DescriptorState::Present,
            } => write!(f, "create directory {path}"),
            Self::Directory {
                path,
                state: DescriptorState::Absent,
            } => write!(f, "delete directory {path}"),
            Self::Command { command } => write!(f, "run {}", command.iter().join(" ")),
        }
    }
}
