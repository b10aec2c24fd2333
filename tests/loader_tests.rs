//! Tests for graph construction: memoisation, cycle detection and artefact
//! resolution.

mod common;

use anyhow::{Context, Result, bail, ensure};
use camino::{Utf8Path, Utf8PathBuf};
use common::{
    SHARED_FRAMEWORK, catalog_with_frameworks, diamond, framework_dependency,
    framework_metadata, local, multi_project, remote, target,
};
use indexmap::IndexSet;
use mockall::mock;
use projgraph::hasher::GraphHasher;
use projgraph::loader::{GraphLoader, GraphLoadingError, TargetRef};
use projgraph::metadata::{
    CatalogMetadataProvider, FrameworkMetadata, FrameworkMetadataProvider, MetadataError,
    SdkMetadataProvider,
};
use projgraph::model::{
    DependencyNode, Graph, Platform, Product, Project, SdkSource, SdkStatus, Target,
    TargetDependency, Workspace,
};
use rstest::rstest;
use std::sync::Arc;

mock! {
    pub Frameworks {}

    impl FrameworkMetadataProvider for Frameworks {
        fn load_metadata(&self, path: &Utf8Path) -> Result<FrameworkMetadata, MetadataError>;
    }
}

fn loader() -> GraphLoader {
    GraphLoader::with_catalog(CatalogMetadataProvider::new(catalog_with_frameworks(&[
        SHARED_FRAMEWORK,
    ])))
}

fn try_load(projects: &[Project]) -> Result<Graph, GraphLoadingError> {
    loader()
        .load_project(Utf8Path::new("/App"), projects)
        .map(|(_, graph)| graph)
}

fn load(projects: &[Project]) -> Result<Graph> {
    try_load(projects).context("load /App")
}

fn load_error(projects: &[Project]) -> Result<GraphLoadingError> {
    match try_load(projects) {
        Ok(_) => bail!("expected the load to fail"),
        Err(err) => Ok(err),
    }
}

fn edges_of(graph: &Graph, name: &str) -> IndexSet<DependencyNode> {
    graph
        .dependencies_of(&DependencyNode::target(name, "/App"))
        .cloned()
        .unwrap_or_default()
}

fn cycle_chain(err: GraphLoadingError) -> Result<Vec<TargetRef>> {
    match err {
        GraphLoadingError::CircularDependency { chain } => Ok(chain),
        other => bail!("expected circular dependency, got {other:?}"),
    }
}

fn at(path: &str, name: &str) -> TargetRef {
    TargetRef::new(Utf8Path::new(path), name)
}

#[rstest]
fn loading_twice_yields_equal_graphs(diamond: Vec<Project>) -> Result<()> {
    let first = load(&diamond)?;
    let second = load(&diamond)?;
    ensure!(first == second, "two loads of one universe differ");
    ensure!(
        GraphHasher::hash(&first) == GraphHasher::hash(&second),
        "fingerprints of equal graphs differ"
    );
    Ok(())
}

#[rstest]
fn diamond_shares_the_framework_node(diamond: Vec<Project>) -> Result<()> {
    let graph = load(&diamond)?;
    let framework_of = |name: &str| {
        edges_of(&graph, name)
            .into_iter()
            .find(|node| matches!(node, DependencyNode::Framework { .. }))
            .with_context(|| format!("{name} should link the shared framework"))
    };
    let left = framework_of("B")?;
    let right = framework_of("C")?;
    ensure!(left == right, "framework nodes differ: {left:?} vs {right:?}");
    Ok(())
}

#[rstest]
fn diamond_bottom_is_loaded_once(diamond: Vec<Project>) -> Result<()> {
    let graph = load(&diamond)?;
    let declared: usize = graph
        .targets()
        .values()
        .map(|targets| targets.keys().filter(|name| name.as_str() == "D").count())
        .sum();
    ensure!(declared == 1, "D should be loaded once, found {declared}");

    let bottom_of = |name: &str| {
        edges_of(&graph, name)
            .into_iter()
            .find(DependencyNode::is_target)
            .with_context(|| format!("{name} should depend on D"))
    };
    let left = bottom_of("B")?;
    let right = bottom_of("C")?;
    ensure!(
        left == right && left == DependencyNode::target("D", "/App"),
        "B and C should share the D node: {left:?} vs {right:?}"
    );
    Ok(())
}

#[rstest]
fn framework_provider_is_called_once_per_path(diamond: Vec<Project>) -> Result<()> {
    let mut frameworks = MockFrameworks::new();
    frameworks
        .expect_load_metadata()
        .withf(|path| path.as_str() == SHARED_FRAMEWORK)
        .times(1)
        .returning(|path| Ok(framework_metadata(path.as_str())));
    let catalog = Arc::new(CatalogMetadataProvider::default());
    let mocked = GraphLoader::new(
        Arc::new(frameworks),
        catalog.clone(),
        catalog,
        Arc::new(SdkMetadataProvider),
    );
    mocked
        .load_project(Utf8Path::new("/App"), &diamond)
        .context("load with mocked provider")?;
    Ok(())
}

#[rstest]
fn leaf_targets_have_no_adjacency_entry(diamond: Vec<Project>) -> Result<()> {
    let graph = load(&diamond)?;
    ensure!(
        graph
            .dependencies_of(&DependencyNode::target("D", "/App"))
            .is_none(),
        "D has no dependencies and should have no entry"
    );
    Ok(())
}

#[rstest]
fn successful_loads_leave_no_dangling_targets(
    diamond: Vec<Project>,
    multi_project: Vec<Project>,
) -> Result<()> {
    for projects in [diamond, multi_project] {
        let graph = load(&projects)?;
        let dangling = graph.dangling_targets();
        ensure!(dangling.is_empty(), "dangling targets: {dangling:?}");
    }
    Ok(())
}

#[rstest]
fn two_target_cycle_is_rejected() -> Result<()> {
    let projects = vec![Project::new(
        "/App",
        "App",
        vec![
            target("X", Product::Framework, vec![local("Y")]),
            target("Y", Product::Framework, vec![local("X")]),
        ],
    )];
    let chain = cycle_chain(load_error(&projects)?)?;
    let expected = vec![at("/App", "X"), at("/App", "Y"), at("/App", "X")];
    ensure!(chain == expected, "unexpected chain: {chain:?}");
    Ok(())
}

#[rstest]
fn self_dependency_is_rejected() -> Result<()> {
    let projects = vec![Project::new(
        "/App",
        "App",
        vec![target("X", Product::Framework, vec![local("X")])],
    )];
    let chain = cycle_chain(load_error(&projects)?)?;
    let expected = vec![at("/App", "X"), at("/App", "X")];
    ensure!(chain == expected, "unexpected chain: {chain:?}");
    Ok(())
}

#[rstest]
fn cross_project_cycle_is_rejected() -> Result<()> {
    let projects = vec![
        Project::new(
            "/App",
            "App",
            vec![target("App", Product::App, vec![remote("Core", "/Core")])],
        ),
        Project::new(
            "/Core",
            "Core",
            vec![target("Core", Product::Framework, vec![remote("App", "/App")])],
        ),
    ];
    let chain = cycle_chain(load_error(&projects)?)?;
    let expected = vec![at("/App", "App"), at("/Core", "Core"), at("/App", "App")];
    ensure!(chain == expected, "unexpected chain: {chain:?}");
    Ok(())
}

#[rstest]
fn cycle_closing_through_a_project_load_is_rejected() -> Result<()> {
    // /P2 declares C before B, so C resolves while /P2 is loaded for A.
    let projects = vec![
        Project::new(
            "/P1",
            "P1",
            vec![target("A", Product::App, vec![remote("B", "/P2")])],
        ),
        Project::new(
            "/P2",
            "P2",
            vec![
                target("C", Product::Framework, vec![remote("A", "/P1")]),
                target("B", Product::Framework, vec![local("C")]),
            ],
        ),
    ];
    let result = loader().load_project(Utf8Path::new("/P1"), &projects);
    let Err(err) = result else {
        bail!("A -> B -> C -> A should not load");
    };
    let chain = cycle_chain(err)?;
    let expected = vec![
        at("/P1", "A"),
        at("/P2", "B"),
        at("/P2", "C"),
        at("/P1", "A"),
    ];
    ensure!(chain == expected, "unexpected chain: {chain:?}");
    Ok(())
}

#[rstest]
fn resolved_target_can_be_reused_by_a_later_sibling() -> Result<()> {
    let projects = vec![Project::new(
        "/App",
        "App",
        vec![
            target("Y", Product::Framework, vec![local("X")]),
            target("Z", Product::Framework, vec![local("X")]),
            target("X", Product::Framework, Vec::new()),
        ],
    )];
    let graph = load(&projects)?;
    ensure!(
        edges_of(&graph, "Z").contains(&DependencyNode::target("X", "/App")),
        "Z should depend on X"
    );
    Ok(())
}

#[rstest]
fn sibling_in_referenced_project_may_point_back_at_the_referrer() -> Result<()> {
    let projects = vec![
        Project::new(
            "/App",
            "App",
            vec![target("App", Product::App, vec![remote("Core", "/Core")])],
        ),
        Project::new(
            "/Core",
            "Core",
            vec![
                target("Core", Product::Framework, Vec::new()),
                target("CoreTests", Product::UnitTests, vec![remote("App", "/App")]),
            ],
        ),
    ];
    let graph = load(&projects)?;
    let tests = graph
        .dependencies_of(&DependencyNode::target("CoreTests", "/Core"))
        .context("CoreTests should have edges")?;
    ensure!(
        tests.contains(&DependencyNode::target("App", "/App")),
        "CoreTests should depend on App"
    );
    Ok(())
}

#[rstest]
#[case(
    vec![target("App", Product::App, vec![local("Missing")])],
    GraphLoadingError::TargetNotFound {
        name: "Missing".into(),
        path: Utf8PathBuf::from("/App"),
    }
)]
#[case(
    vec![target("App", Product::App, vec![remote("Core", "/Nowhere")])],
    GraphLoadingError::MissingProject { path: Utf8PathBuf::from("/Nowhere") }
)]
fn unknown_references_are_reported(
    #[case] targets: Vec<Target>,
    #[case] expected: GraphLoadingError,
) -> Result<()> {
    let err = load_error(&[Project::new("/App", "App", targets)])?;
    ensure!(err == expected, "unexpected error: {err:?}");
    Ok(())
}

#[rstest]
fn load_project_rejects_unknown_root(diamond: Vec<Project>) -> Result<()> {
    let Err(err) = GraphLoader::default().load_project(Utf8Path::new("/Elsewhere"), &diamond)
    else {
        bail!("unknown root should not load");
    };
    ensure!(
        err == GraphLoadingError::MissingProject {
            path: Utf8PathBuf::from("/Elsewhere"),
        },
        "unexpected error: {err:?}"
    );
    Ok(())
}

#[rstest]
fn load_project_returns_the_root_and_a_synthesised_workspace(
    multi_project: Vec<Project>,
) -> Result<()> {
    let (project, graph) = GraphLoader::default()
        .load_project(Utf8Path::new("/App"), &multi_project)
        .context("load /App")?;
    ensure!(project.name == "App", "unexpected root: {}", project.name);
    ensure!(
        graph.workspace().name == "App",
        "workspace should be named after the root"
    );
    ensure!(
        graph.workspace().projects == vec![Utf8PathBuf::from("/App"), Utf8PathBuf::from("/Core")],
        "unexpected projects: {:?}",
        graph.workspace().projects
    );
    Ok(())
}

#[rstest]
fn workspace_load_follows_references_only(multi_project: Vec<Project>) -> Result<()> {
    let workspace = Workspace::new("/W", "W", vec![Utf8PathBuf::from("/App")]);
    let graph = GraphLoader::default()
        .load_workspace(&workspace, &multi_project)
        .context("load workspace")?;
    ensure!(graph.name() == "W", "unexpected name: {}", graph.name());
    ensure!(graph.path() == "/W", "unexpected path: {}", graph.path());
    ensure!(
        graph.workspace().projects == vec![Utf8PathBuf::from("/App"), Utf8PathBuf::from("/Core")],
        "unexpected projects: {:?}",
        graph.workspace().projects
    );
    ensure!(
        !graph.projects().contains_key(Utf8Path::new("/Unused")),
        "unreferenced project should not load"
    );
    Ok(())
}

#[rstest]
fn workspace_project_list_is_sorted(multi_project: Vec<Project>) -> Result<()> {
    let workspace = Workspace::new(
        "/W",
        "W",
        vec![Utf8PathBuf::from("/Unused"), Utf8PathBuf::from("/App")],
    );
    let graph = GraphLoader::default()
        .load_workspace(&workspace, &multi_project)
        .context("load workspace")?;
    let expected = vec![
        Utf8PathBuf::from("/App"),
        Utf8PathBuf::from("/Core"),
        Utf8PathBuf::from("/Unused"),
    ];
    ensure!(
        graph.workspace().projects == expected,
        "unexpected projects: {:?}",
        graph.workspace().projects
    );
    Ok(())
}

#[rstest]
fn package_product_keeps_the_declaring_path() -> Result<()> {
    let projects = vec![Project::new(
        "/App",
        "App",
        vec![target(
            "App",
            Product::App,
            vec![TargetDependency::Package {
                product: "Networking".into(),
            }],
        )],
    )];
    let graph = load(&projects)?;
    let expected = DependencyNode::PackageProduct {
        path: Utf8PathBuf::from("/App"),
        product: "Networking".into(),
    };
    ensure!(
        edges_of(&graph, "App").contains(&expected),
        "package product should carry /App"
    );
    Ok(())
}

#[rstest]
#[case(
    Platform::Ios,
    TargetDependency::Sdk { name: "UIKit.framework".into(), status: SdkStatus::Required },
    DependencyNode::Sdk {
        name: "UIKit.framework".into(),
        path: Utf8PathBuf::from("/System/Library/Frameworks/UIKit.framework"),
        status: SdkStatus::Required,
        source: SdkSource::System,
    }
)]
#[case(
    Platform::MacOs,
    TargetDependency::Sdk { name: "libc++.tbd".into(), status: SdkStatus::Optional },
    DependencyNode::Sdk {
        name: "libc++.tbd".into(),
        path: Utf8PathBuf::from("/usr/lib/libc++.tbd"),
        status: SdkStatus::Optional,
        source: SdkSource::System,
    }
)]
#[case(
    Platform::MacOs,
    TargetDependency::XcTest,
    DependencyNode::Sdk {
        name: "XCTest.framework".into(),
        path: Utf8PathBuf::from(
            "/Platforms/MacOSX.platform/Developer/Library/Frameworks/XCTest.framework"
        ),
        status: SdkStatus::Required,
        source: SdkSource::Developer,
    }
)]
fn sdks_resolve_by_declaring_platform(
    #[case] platform: Platform,
    #[case] dependency: TargetDependency,
    #[case] expected: DependencyNode,
) -> Result<()> {
    let tests = Target::new("Tests", platform, Product::UnitTests)
        .with_dependencies(vec![dependency]);
    let graph = load(&[Project::new("/App", "App", vec![tests])])?;
    let edges: Vec<_> = edges_of(&graph, "Tests").into_iter().collect();
    ensure!(edges == vec![expected], "unexpected sdk edges: {edges:?}");
    Ok(())
}

#[rstest]
#[case(
    TargetDependency::Sdk { name: "Foo.dylib".into(), status: SdkStatus::Required },
    MetadataError::UnsupportedSdk { name: "Foo.dylib".into() }
)]
#[case(
    framework_dependency("/Frameworks/Unknown.framework"),
    MetadataError::MetadataNotFound { path: Utf8PathBuf::from("/Frameworks/Unknown.framework") }
)]
fn artefact_failures_abort_the_load(
    #[case] dependency: TargetDependency,
    #[case] expected: MetadataError,
) -> Result<()> {
    let projects = vec![Project::new(
        "/App",
        "App",
        vec![target("App", Product::App, vec![dependency])],
    )];
    let err = load_error(&projects)?;
    ensure!(
        err == GraphLoadingError::ArtifactResolutionFailed(expected),
        "unexpected error: {err:?}"
    );
    Ok(())
}

#[rstest]
fn raw_paths_are_carried_verbatim() -> Result<()> {
    let raw = Utf8PathBuf::from("/Pods/Pods.xcodeproj");
    let projects = vec![Project::new(
        "/App",
        "App",
        vec![target(
            "App",
            Product::App,
            vec![TargetDependency::RawPath { path: raw.clone() }],
        )],
    )];
    let graph = load(&projects)?;
    ensure!(
        edges_of(&graph, "App").contains(&DependencyNode::RawPath { path: raw }),
        "raw path should be carried verbatim"
    );
    Ok(())
}
