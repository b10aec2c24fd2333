//! CLI execution and command dispatch logic.
//!
//! This module keeps `main` minimal by providing a single entry point that
//! loads the universe named on the command line, builds the graph and
//! renders the requested view.

mod error;
mod output;

pub use error::RunnerError;

use anyhow::{Context, Result};
use indexmap::IndexSet;
use itertools::Itertools;
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::cli::{Cli, Commands, TargetArgs};
use crate::dot;
use crate::hasher::GraphHasher;
use crate::mapper::{GraphMapper, PrunedTargetsGraphMapper};
use crate::model::Graph;
use crate::traverser::GraphTraverser;
use crate::universe::Universe;

/// Execute the parsed [`Cli`] command.
///
/// # Errors
///
/// Returns an error if the universe cannot be read, the graph fails to load
/// or the output cannot be written.
pub fn run(cli: &Cli) -> Result<()> {
    let rendered = render(cli)?;
    if cli.writes_to_stdout() {
        output::write_stdout(&rendered)
    } else {
        output::write_file(&cli.output, &rendered)
    }
}

/// Produce the text the [`Cli`] command prints.
///
/// # Errors
///
/// Returns an error if the universe cannot be read, the graph fails to load
/// or a requested target is unknown.
pub fn render(cli: &Cli) -> Result<String> {
    let universe = Universe::from_path(&cli.universe)
        .with_context(|| format!("loading universe {}", cli.universe))?;
    let graph = load_graph(cli, &universe)?;
    debug!(graph = graph.name(), "graph ready");

    match &cli.command {
        Commands::Summary => Ok(summary(&graph)),
        Commands::Dot => Ok(dot::render(&graph)),
        Commands::Fingerprint => Ok(format!("{}\n", GraphHasher::hash(&graph))),
        Commands::Deps(args) => dependencies(&graph, args),
        Commands::Bundles(args) => bundles(&graph, args),
    }
}

fn load_graph(cli: &Cli, universe: &Universe) -> Result<Graph> {
    let loader = universe.loader();
    let loaded = if let Some(path) = &cli.project {
        info!(project = %path, "loading project");
        loader
            .load_project(path, &universe.projects)
            .with_context(|| format!("loading project {path}"))?
            .1
    } else {
        let workspace = universe.entry_workspace();
        info!(workspace = %workspace.name, "loading workspace");
        loader
            .load_workspace(&workspace, &universe.projects)
            .with_context(|| format!("loading workspace {}", workspace.name))?
    };
    if !cli.prune {
        return Ok(loaded);
    }
    let (pruned, _) = PrunedTargetsGraphMapper
        .map(loaded)
        .context("pruning flagged targets")?;
    Ok(pruned)
}

fn summary(graph: &Graph) -> String {
    let targets: usize = graph.targets().values().map(BTreeMap::len).sum();
    let edges: usize = graph.dependencies().values().map(IndexSet::len).sum();
    format!(
        "name: {}\npath: {}\nprojects: {}\ntargets: {targets}\nedges: {edges}\n",
        graph.name(),
        graph.path(),
        graph.projects().len()
    )
}

fn ensure_target(traverser: &GraphTraverser<'_>, args: &TargetArgs) -> Result<(), RunnerError> {
    if traverser.target_at(&args.project_path, &args.target).is_none() {
        return Err(RunnerError::UnknownTarget {
            name: args.target.clone(),
            path: args.project_path.clone(),
        });
    }
    Ok(())
}

fn dependencies(graph: &Graph, args: &TargetArgs) -> Result<String> {
    let traverser = GraphTraverser::new(graph);
    ensure_target(&traverser, args)?;
    let lines = traverser
        .direct_dependencies(&args.project_path, &args.target)
        .into_iter()
        .map(|node| {
            node.as_target().map_or_else(
                || node.to_string(),
                |(path, name)| format!("target '{name}' ({path})"),
            )
        })
        .join("\n");
    Ok(finish_lines(lines))
}

fn bundles(graph: &Graph, args: &TargetArgs) -> Result<String> {
    let traverser = GraphTraverser::new(graph);
    ensure_target(&traverser, args)?;
    let lines = traverser
        .resource_bundle_dependencies(&args.project_path, &args.target)
        .into_iter()
        .map(|bundle| format!("{} ({})", bundle.name(), bundle.path))
        .join("\n");
    Ok(finish_lines(lines))
}

fn finish_lines(mut lines: String) -> String {
    if !lines.is_empty() {
        lines.push('\n');
    }
    lines
}
