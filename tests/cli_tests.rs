//! Integration tests for CLI execution using `assert_cmd`.
//!
//! These tests run the compiled binary against `tests/data/universe.json` and
//! check the text each subcommand prints.

use anyhow::{Context, Result, ensure};
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

const UNIVERSE: &str = "tests/data/universe.json";

fn projgraph() -> Result<Command> {
    let mut cmd = Command::cargo_bin("projgraph").context("locate projgraph binary")?;
    cmd.arg("--universe").arg(UNIVERSE);
    Ok(cmd)
}

fn stdout_of(cmd: &mut Command) -> Result<String> {
    let output = cmd.output().context("run projgraph")?;
    ensure!(
        output.status.success(),
        "projgraph should succeed, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).context("stdout is UTF-8")
}

#[test]
fn summary_describes_the_workspace_graph() -> Result<()> {
    let stdout = stdout_of(projgraph()?.arg("summary"))?;
    ensure!(
        stdout == "name: Demo\npath: /W\nprojects: 3\ntargets: 6\nedges: 7\n",
        "unexpected summary: {stdout}"
    );
    Ok(())
}

#[test]
fn prune_drops_flagged_targets_and_empty_projects() -> Result<()> {
    let stdout = stdout_of(projgraph()?.arg("--prune").arg("summary"))?;
    ensure!(
        stdout == "name: Demo\npath: /W\nprojects: 2\ntargets: 4\nedges: 5\n",
        "unexpected pruned summary: {stdout}"
    );
    Ok(())
}

#[test]
fn project_option_loads_a_single_project_closure() -> Result<()> {
    let stdout = stdout_of(projgraph()?.args(["--project", "/Core", "summary"]))?;
    ensure!(
        stdout == "name: Core\npath: /Core\nprojects: 1\ntargets: 2\nedges: 1\n",
        "unexpected project summary: {stdout}"
    );
    Ok(())
}

#[test]
fn deps_lists_direct_dependencies_by_identity() -> Result<()> {
    let stdout = stdout_of(projgraph()?.args([
        "deps",
        "--project-path",
        "/App",
        "--target",
        "App",
    ]))?;
    let expected = concat!(
        "framework 'Analytics.framework'\n",
        "sdk 'UIKit.framework'\n",
        "target 'AppResources' (/App)\n",
        "target 'Core' (/Core)\n",
    );
    ensure!(stdout == expected, "unexpected deps: {stdout}");
    Ok(())
}

#[test]
fn bundles_stop_at_resource_hosting_dependencies() -> Result<()> {
    let app = stdout_of(projgraph()?.args([
        "bundles",
        "--project-path",
        "/App",
        "--target",
        "App",
    ]))?;
    ensure!(app == "AppResources (/App)\n", "unexpected app bundles: {app}");

    let core = stdout_of(projgraph()?.args([
        "bundles",
        "--project-path",
        "/Core",
        "--target",
        "Core",
    ]))?;
    ensure!(
        core == "CoreResources (/Core)\n",
        "unexpected core bundles: {core}"
    );
    Ok(())
}

#[test]
fn dot_renders_a_digraph() -> Result<()> {
    let stdout = stdout_of(projgraph()?.arg("dot"))?;
    ensure!(
        stdout.starts_with("digraph \"Demo\" {\n") && stdout.ends_with("}\n"),
        "unexpected dot output: {stdout}"
    );
    ensure!(
        stdout.contains("\"target:/App:App\" -> \"target:/Core:Core\";"),
        "dot output should contain the cross-project edge: {stdout}"
    );
    Ok(())
}

#[test]
fn fingerprint_is_stable_between_runs() -> Result<()> {
    let first = stdout_of(projgraph()?.arg("fingerprint"))?;
    let second = stdout_of(projgraph()?.arg("fingerprint"))?;
    ensure!(first == second, "fingerprints differ: {first} vs {second}");
    ensure!(first.trim_end().len() == 64, "unexpected fingerprint: {first}");
    Ok(())
}

#[test]
fn unknown_target_fails() -> Result<()> {
    projgraph()?
        .args(["deps", "--project-path", "/App", "--target", "Missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("target 'Missing'"));
    Ok(())
}

#[test]
fn missing_universe_fails() -> Result<()> {
    Command::cargo_bin("projgraph")
        .context("locate projgraph binary")?
        .args(["--universe", "tests/data/missing.json", "summary"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.json"));
    Ok(())
}

#[test]
fn output_option_writes_a_file() -> Result<()> {
    let temp = tempdir().context("create temp dir for output test")?;
    let output = temp.path().join("graph.dot");
    projgraph()?
        .arg("--output")
        .arg(&output)
        .arg("dot")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    let written = fs::read_to_string(&output)
        .with_context(|| format!("read {}", output.display()))?;
    ensure!(
        written.starts_with("digraph \"Demo\" {"),
        "unexpected file contents: {written}"
    );
    Ok(())
}
