//! Per-load state threaded through the recursive loader.

use camino::{Utf8Path, Utf8PathBuf};
use std::collections::HashMap;

use super::cycle::CycleDetector;
use crate::model::{
    AdjacencyMap, DependencyNode, PackageMap, Project, ProjectMap, Target, TargetMap,
};

/// Everything a single load call mutates. Created fresh for every call and
/// dropped when the call returns.
pub(super) struct LoadContext<'a> {
    pub(super) cache: Cache<'a>,
    pub(super) cycle_detector: CycleDetector,
}

impl<'a> LoadContext<'a> {
    pub(super) fn new(projects: &'a [Project]) -> Self {
        Self {
            cache: Cache::new(projects),
            cycle_detector: CycleDetector::new(),
        }
    }
}

/// Declared universe plus everything loaded so far.
pub(super) struct Cache<'a> {
    all_projects: HashMap<&'a Utf8Path, &'a Project>,
    all_targets: HashMap<&'a Utf8Path, HashMap<&'a str, &'a Target>>,

    pub(super) loaded_projects: ProjectMap,
    pub(super) loaded_targets: TargetMap,
    pub(super) packages: PackageMap,
    pub(super) dependencies: AdjacencyMap,
    pub(super) frameworks: HashMap<Utf8PathBuf, DependencyNode>,
    pub(super) libraries: HashMap<Utf8PathBuf, DependencyNode>,
    pub(super) xcframeworks: HashMap<Utf8PathBuf, DependencyNode>,
}

impl<'a> Cache<'a> {
    fn new(projects: &'a [Project]) -> Self {
        let all_projects: HashMap<&'a Utf8Path, &'a Project> = projects
            .iter()
            .map(|project| (project.path.as_path(), project))
            .collect();
        let all_targets = all_projects
            .iter()
            .map(|(&path, &project)| {
                let targets = project
                    .targets
                    .iter()
                    .map(|target| (target.name.as_str(), target))
                    .collect();
                (path, targets)
            })
            .collect();
        Self {
            all_projects,
            all_targets,
            loaded_projects: ProjectMap::new(),
            loaded_targets: TargetMap::new(),
            packages: PackageMap::new(),
            dependencies: AdjacencyMap::new(),
            frameworks: HashMap::new(),
            libraries: HashMap::new(),
            xcframeworks: HashMap::new(),
        }
    }

    pub(super) fn declared_project(&self, path: &Utf8Path) -> Option<&'a Project> {
        self.all_projects.get(path).copied()
    }

    pub(super) fn declared_target(&self, path: &Utf8Path, name: &str) -> Option<&'a Target> {
        self.all_targets
            .get(path)
            .and_then(|targets| targets.get(name))
            .copied()
    }

    pub(super) fn project_loaded(&self, path: &Utf8Path) -> bool {
        self.loaded_projects.contains_key(path)
    }

    pub(super) fn target_loaded(&self, path: &Utf8Path, name: &str) -> bool {
        self.loaded_targets
            .get(path)
            .is_some_and(|targets| targets.contains_key(name))
    }

    pub(super) fn add_project(&mut self, project: &Project) {
        self.loaded_projects
            .insert(project.path.clone(), project.clone());
        for package in &project.packages {
            self.packages
                .entry(project.path.clone())
                .or_default()
                .insert(package.name().to_owned(), package.clone());
        }
    }

    pub(super) fn add_target(&mut self, path: &Utf8Path, target: &Target) {
        self.loaded_targets
            .entry(path.to_owned())
            .or_default()
            .insert(target.name.clone(), target.clone());
    }
}
