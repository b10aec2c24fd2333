//! Projects, packages and workspaces.

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

use super::target::Target;

/// An external package declared by a project.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Package {
    /// A package checked out on disk.
    Local {
        /// Package directory.
        path: Utf8PathBuf,
    },
    /// A package fetched from a remote repository.
    Remote {
        /// Repository URL.
        url: String,
        /// Version requirement as written by the author.
        requirement: String,
    },
}

impl Package {
    /// Key under which the package is stored in the graph.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Local { path } => path.as_str(),
            Self::Remote { url, .. } => url,
        }
    }
}

/// A named collection of targets keyed by its filesystem path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Directory containing the project.
    pub path: Utf8PathBuf,
    /// Project name.
    pub name: String,
    /// Targets in declaration order.
    #[serde(default)]
    pub targets: Vec<Target>,
    /// Packages referenced by the project's targets.
    #[serde(default)]
    pub packages: Vec<Package>,
}

impl Project {
    /// Create a project with the given targets and no packages.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>, name: impl Into<String>, targets: Vec<Target>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            targets,
            packages: Vec::new(),
        }
    }

    /// Replace the declared packages.
    #[must_use]
    pub fn with_packages(mut self, packages: Vec<Package>) -> Self {
        self.packages = packages;
        self
    }

    /// Look up a target by name.
    #[must_use]
    pub fn target(&self, name: &str) -> Option<&Target> {
        self.targets.iter().find(|target| target.name == name)
    }
}

/// Groups the projects that are loaded together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    /// Directory containing the workspace.
    pub path: Utf8PathBuf,
    /// Workspace name.
    pub name: String,
    /// Paths of the projects the workspace refers to.
    #[serde(default)]
    pub projects: Vec<Utf8PathBuf>,
}

impl Workspace {
    /// Create a workspace referring to the given projects.
    #[must_use]
    pub fn new(
        path: impl Into<Utf8PathBuf>,
        name: impl Into<String>,
        projects: Vec<Utf8PathBuf>,
    ) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            projects,
        }
    }

    /// Return a copy referring to `projects` instead.
    #[must_use]
    pub fn replacing_projects(&self, projects: Vec<Utf8PathBuf>) -> Self {
        Self {
            path: self.path.clone(),
            name: self.name.clone(),
            projects,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_name_uses_path_or_url() {
        let local = Package::Local {
            path: Utf8PathBuf::from("/Packages/Core"),
        };
        let remote = Package::Remote {
            url: "https://example.com/lib.git".into(),
            requirement: "1.0.0".into(),
        };
        assert_eq!(local.name(), "/Packages/Core");
        assert_eq!(remote.name(), "https://example.com/lib.git");
    }
}
