//! Projgraph core library.
//!
//! This library models the build dependency graph of a set of projects:
//! projects and targets arrive pre-parsed, the [`loader`] resolves them into
//! an immutable [`model::Graph`], the [`traverser`] answers read-only queries
//! over it and the [`mapper`] pipeline rewrites it while collecting side
//! effects. The [`cli`] and [`runner`] modules back the `projgraph` binary.

pub mod cli;
pub mod dot;
pub mod hasher;
pub mod loader;
pub mod mapper;
pub mod metadata;
pub mod model;
pub mod runner;
pub mod traverser;
pub mod universe;
