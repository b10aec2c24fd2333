//! Cycle detection for target resolution.
//!
//! The detector records every resolution edge registered during a
//! depth-first load. An edge `from -> to` is registered when `from` starts
//! resolving its dependency on `to`, and it closes a cycle exactly when
//! `from` is reachable from `to` through registered edges. Edges stay
//! registered after their source completes: a cycle may close through a
//! target that finished resolving while its project was loaded. Reusing a
//! resolved target from a later sibling branch adds no path back to the
//! sibling, so diamonds never trip the check.

use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexSet;
use std::collections::{HashMap, HashSet};
use std::fmt::{self, Display, Formatter};

use super::GraphLoadingError;

/// A `(project path, target name)` pair identifying a target during loading.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TargetRef {
    /// Owning project path.
    pub path: Utf8PathBuf,
    /// Target name.
    pub name: String,
}

impl TargetRef {
    /// Create a reference.
    #[must_use]
    pub fn new(path: &Utf8Path, name: &str) -> Self {
        Self {
            path: path.to_owned(),
            name: name.to_owned(),
        }
    }
}

impl Display for TargetRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.path)
    }
}

/// Tracks resolution edges for a single load.
#[derive(Debug, Default)]
pub struct CycleDetector {
    edges: HashMap<TargetRef, IndexSet<TargetRef>>,
    resolved: HashSet<TargetRef>,
}

impl CycleDetector {
    /// Create an empty detector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register that resolving `to` began while resolving `from`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphLoadingError::CircularDependency`] when the edge closes
    /// a cycle among the registered edges.
    pub fn start(&mut self, from: &TargetRef, to: &TargetRef) -> Result<(), GraphLoadingError> {
        self.edges
            .entry(from.clone())
            .or_default()
            .insert(to.clone());
        if let Some(mut chain) = self.find_path(to, from) {
            chain.push(to.clone());
            return Err(GraphLoadingError::CircularDependency {
                chain: canonicalize_cycle(chain),
            });
        }
        Ok(())
    }

    /// Mark `node` as fully resolved. Its edges stay registered.
    pub fn complete(&mut self, node: &TargetRef) {
        let outgoing = self.edges.get(node).map_or(0, IndexSet::len);
        tracing::trace!(node = %node, outgoing, "target resolved");
        self.resolved.insert(node.clone());
    }

    /// Whether `node` finished resolving.
    #[must_use]
    pub fn is_resolved(&self, node: &TargetRef) -> bool {
        self.resolved.contains(node)
    }

    /// Depth-first search for a path of registered edges from `start` to `goal`,
    /// returned with both endpoints included.
    fn find_path(&self, start: &TargetRef, goal: &TargetRef) -> Option<Vec<TargetRef>> {
        let mut stack: Vec<Vec<&TargetRef>> = vec![vec![start]];
        let mut visited: HashSet<&TargetRef> = HashSet::new();
        while let Some(path) = stack.pop() {
            let Some(&node) = path.last() else {
                continue;
            };
            if node == goal {
                return Some(path.into_iter().cloned().collect());
            }
            if !visited.insert(node) {
                continue;
            }
            for next in self.edges.get(node).into_iter().flatten() {
                if !visited.contains(next) {
                    let mut extended = path.clone();
                    extended.push(next);
                    stack.push(extended);
                }
            }
        }
        None
    }
}

/// Rotate a closed cycle so its smallest node leads, keeping the closing
/// node equal to the first.
fn canonicalize_cycle<T: Ord + Clone>(mut cycle: Vec<T>) -> Vec<T> {
    if cycle.len() < 2 {
        return cycle;
    }
    let len = cycle.len() - 1;
    let start = cycle
        .iter()
        .take(len)
        .enumerate()
        .min_by(|(_, a), (_, b)| a.cmp(b))
        .map_or(0, |(idx, _)| idx);
    let (prefix, suffix) = cycle.split_at_mut(len);
    prefix.rotate_left(start);
    if let (Some(first), Some(slot)) = (prefix.first().cloned(), suffix.first_mut()) {
        slot.clone_from(&first);
    }
    cycle
}
