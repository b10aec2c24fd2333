//! Adapters that lift a mapper to the next tier.

use std::collections::{BTreeMap, BTreeSet};

use super::{GraphMapper, MapResult, ProjectMapper, TargetMapper};
use crate::model::{Graph, Project};

/// Applies a [`TargetMapper`] to every target of a project in declaration
/// order.
#[derive(Debug, Clone)]
pub struct TargetProjectMapper<M> {
    mapper: M,
}

impl<M: TargetMapper> TargetProjectMapper<M> {
    /// Lift `mapper` to projects.
    #[must_use]
    pub const fn new(mapper: M) -> Self {
        Self { mapper }
    }
}

impl<M: TargetMapper> ProjectMapper for TargetProjectMapper<M> {
    fn name(&self) -> &str {
        self.mapper.name()
    }

    fn map(&self, mut project: Project) -> MapResult<Project> {
        let mut effects = Vec::new();
        let mut targets = Vec::with_capacity(project.targets.len());
        for target in std::mem::take(&mut project.targets) {
            let (mapped, produced) = self.mapper.map(target)?;
            targets.push(mapped);
            effects.extend(produced);
        }
        project.targets = targets;
        Ok((project, effects))
    }
}

/// Applies a [`ProjectMapper`] to every project of a graph in path order.
///
/// Each mapped project replaces its entry in the project map. Loaded targets
/// are replaced by their mapped counterparts, and targets the mapper added to
/// the project are loaded as well.
#[derive(Debug, Clone)]
pub struct ProjectGraphMapper<M> {
    mapper: M,
}

impl<M: ProjectMapper> ProjectGraphMapper<M> {
    /// Lift `mapper` to graphs.
    #[must_use]
    pub const fn new(mapper: M) -> Self {
        Self { mapper }
    }
}

impl<M: ProjectMapper> GraphMapper for ProjectGraphMapper<M> {
    fn name(&self) -> &str {
        self.mapper.name()
    }

    fn map(&self, graph: Graph) -> MapResult<Graph> {
        let mut parts = graph.into_parts();
        let mut effects = Vec::new();
        for (path, project) in std::mem::take(&mut parts.projects) {
            tracing::debug!(project = %path, mapper = self.mapper.name(), "mapping project");
            let declared: BTreeSet<String> =
                project.targets.iter().map(|target| target.name.clone()).collect();
            let loaded = parts.targets.remove(&path).unwrap_or_default();

            let (mapped, produced) = self.mapper.map(project)?;
            effects.extend(produced);

            let targets: BTreeMap<_, _> = mapped
                .targets
                .iter()
                .filter(|target| {
                    loaded.contains_key(&target.name) || !declared.contains(&target.name)
                })
                .map(|target| (target.name.clone(), target.clone()))
                .collect();
            if !targets.is_empty() {
                parts.targets.insert(path.clone(), targets);
            }
            parts.projects.insert(path, mapped);
        }
        Ok((Graph::from_parts(parts), effects))
    }
}
