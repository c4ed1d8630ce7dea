//! Memoized recurrences over a DAG.
//!
//! A [`DpProblem`] describes which indices a value depends on and how to
//! combine their values; [`DpCache`] resolves indices on demand and stores
//! each result once. Indices are plain values (interned ids, coordinates),
//! never object identity.
//!
//! There is no cycle detection: a cyclic dependency recurses until the
//! stack overflows.

mod backend;
mod cache;
mod problem;

pub use backend::{Backend, VecBackend};
pub use cache::DpCache;
pub use problem::DpProblem;
