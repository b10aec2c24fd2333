//! Value-rewriting pipeline over targets, projects and graphs.
//!
//! Mappers consume a value and return its replacement together with the
//! side effects the rewrite requires. Tiers compose upwards: a
//! [`TargetProjectMapper`] lifts a target mapper to projects and a
//! [`ProjectGraphMapper`] lifts a project mapper to graphs. Side effects keep
//! the order in which mappers ran, and a failure discards every effect
//! collected by the failing call.
//!
//! # Examples
//!
//! ```
//! use projgraph::mapper::{SideEffectDescriptor, TargetMapper, TargetMapperFn};
//! use projgraph::model::{Platform, Product, Target};
//!
//! let mapper = TargetMapperFn::new("bundle-id", |mut target: Target| {
//!     target.bundle_id = format!("io.example.{}", target.name);
//!     Ok((target, vec![SideEffectDescriptor::directory("/Derived")]))
//! });
//! let (target, effects) = mapper
//!     .map(Target::new("App", Platform::Ios, Product::App))
//!     .expect("map");
//! assert_eq!(target.bundle_id, "io.example.App");
//! assert_eq!(effects.len(), 1);
//! ```

mod closure;
mod error;
mod lift;
mod prune;
mod sequential;
mod side_effect;

pub use closure::{GraphMapperFn, ProjectMapperFn, TargetMapperFn};
pub use error::MapperError;
pub use lift::{ProjectGraphMapper, TargetProjectMapper};
pub use prune::PrunedTargetsGraphMapper;
pub use sequential::{SequentialGraphMapper, SequentialProjectMapper, SequentialTargetMapper};
pub use side_effect::{DescriptorState, SideEffectDescriptor};

use crate::model::{Graph, Project, Target};

/// Result of a mapper: the rewritten value and its side effects.
pub type MapResult<T> = Result<(T, Vec<SideEffectDescriptor>), MapperError>;

/// Rewrites a single target.
pub trait TargetMapper {
    /// Name used in logs and errors.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Map `target`.
    ///
    /// # Errors
    ///
    /// Returns [`MapperError`] when the target cannot be rewritten.
    fn map(&self, target: Target) -> MapResult<Target>;
}

/// Rewrites a project together with its targets.
pub trait ProjectMapper {
    /// Name used in logs and errors.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Map `project`.
    ///
    /// # Errors
    ///
    /// Returns [`MapperError`] when the project cannot be rewritten.
    fn map(&self, project: Project) -> MapResult<Project>;
}

/// Rewrites a whole graph.
pub trait GraphMapper {
    /// Name used in logs and errors.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Map `graph`.
    ///
    /// # Errors
    ///
    /// Returns [`MapperError`] when the graph cannot be rewritten.
    fn map(&self, graph: Graph) -> MapResult<Graph>;
}
