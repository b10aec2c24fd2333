//! Removes targets flagged for pruning.

use camino::Utf8Path;
use indexmap::IndexSet;
use std::collections::HashSet;

use super::{GraphMapper, MapResult};
use crate::loader::TargetRef;
use crate::model::{AdjacencyMap, DependencyNode, Graph, GraphParts, TargetDependency};

/// Drops every target whose `prune` flag is set.
///
/// Edges to and from pruned targets go with them, as do dependency
/// declarations naming them. Projects left without targets disappear from
/// the graph and from the workspace. Produces no side effects.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrunedTargetsGraphMapper;

impl GraphMapper for PrunedTargetsGraphMapper {
    fn map(&self, graph: Graph) -> MapResult<Graph> {
        let pruned = pruned_targets(&graph);
        if pruned.is_empty() {
            return Ok((graph, Vec::new()));
        }
        tracing::debug!(graph = graph.name(), pruned = pruned.len(), "pruning targets");

        let GraphParts {
            name,
            path,
            workspace,
            mut projects,
            mut packages,
            mut targets,
            dependencies,
        } = graph.into_parts();

        for (project_path, declared) in &mut targets {
            declared.retain(|target_name, _| {
                !pruned.contains(&TargetRef::new(project_path, target_name))
            });
            for target in declared.values_mut() {
                retain_kept_declarations(&mut target.dependencies, project_path, &pruned);
            }
        }
        targets.retain(|_, declared| !declared.is_empty());

        for (project_path, project) in &mut projects {
            project
                .targets
                .retain(|target| !pruned.contains(&TargetRef::new(project_path, &target.name)));
            for target in &mut project.targets {
                retain_kept_declarations(&mut target.dependencies, project_path, &pruned);
            }
        }
        projects.retain(|_, project| !project.targets.is_empty());
        packages.retain(|project_path, _| projects.contains_key(project_path));

        let kept_projects = workspace
            .projects
            .iter()
            .filter(|project_path| projects.contains_key(*project_path))
            .cloned()
            .collect();
        let workspace = workspace.replacing_projects(kept_projects);

        Ok((
            Graph::from_parts(GraphParts {
                name,
                path,
                workspace,
                projects,
                packages,
                targets,
                dependencies: prune_edges(dependencies, &pruned),
            }),
            Vec::new(),
        ))
    }
}

fn pruned_targets(graph: &Graph) -> HashSet<TargetRef> {
    let loaded = graph.targets().iter().flat_map(|(path, targets)| {
        targets
            .values()
            .filter(|target| target.prune)
            .map(move |target| TargetRef::new(path, &target.name))
    });
    let declared = graph.projects().iter().flat_map(|(path, project)| {
        project
            .targets
            .iter()
            .filter(|target| target.prune)
            .map(move |target| TargetRef::new(path, &target.name))
    });
    loaded.chain(declared).collect()
}

fn is_pruned(node: &DependencyNode, pruned: &HashSet<TargetRef>) -> bool {
    node.as_target()
        .is_some_and(|(path, name)| pruned.contains(&TargetRef::new(path, name)))
}

fn prune_edges(dependencies: AdjacencyMap, pruned: &HashSet<TargetRef>) -> AdjacencyMap {
    dependencies
        .into_iter()
        .filter_map(|(from, to)| {
            if is_pruned(&from, pruned) {
                return None;
            }
            let kept: IndexSet<_> = to
                .into_iter()
                .filter(|node| !is_pruned(node, pruned))
                .collect();
            (!kept.is_empty()).then_some((from, kept))
        })
        .collect()
}

fn retain_kept_declarations(
    dependencies: &mut Vec<TargetDependency>,
    declaring_path: &Utf8Path,
    pruned: &HashSet<TargetRef>,
) {
    dependencies.retain(|dependency| match dependency {
        TargetDependency::Target { name } => {
            !pruned.contains(&TargetRef::new(declaring_path, name))
        }
        TargetDependency::Project { target, path } => {
            !pruned.contains(&TargetRef::new(path, target))
        }
        _ => true,
    });
}
