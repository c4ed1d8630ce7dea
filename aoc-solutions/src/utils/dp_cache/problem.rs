//! Recurrences resolved by [`DpCache`](super::DpCache).

use std::borrow::Cow;

/// A recurrence over a DAG of indices.
///
/// `deps` names the indices a value is built from; `compute` combines their
/// already resolved values. Dependencies that live in the problem itself (an
/// adjacency list, say) can be lent out as `Cow::Borrowed`.
///
/// ```rust
/// use std::borrow::Cow;
/// use aoc_solutions::utils::dp_cache::{DpCache, DpProblem, VecBackend};
///
/// // 0 -> 1 -> 3, 0 -> 2 -> 3
/// struct Paths(Vec<Vec<usize>>);
///
/// impl DpProblem<usize, u64> for Paths {
///     fn deps(&self, node: &usize) -> Cow<'_, [usize]> {
///         Cow::Borrowed(&self.0[*node])
///     }
///     fn compute(&self, node: &usize, deps: &[u64]) -> u64 {
///         if *node == 3 { 1 } else { deps.iter().sum() }
///     }
/// }
///
/// let cache = DpCache::with_problem(VecBackend::new(), Paths(vec![vec![1, 2], vec![3], vec![3], vec![]]));
/// assert_eq!(cache.get(&0), 2);
/// ```
pub trait DpProblem<I: Clone, K> {
    /// Indices `index` depends on; empty for base cases.
    fn deps(&self, index: &I) -> Cow<'_, [I]>;

    /// Value of `index`, given the values of `deps(index)` in the same order.
    fn compute(&self, index: &I, deps: &[K]) -> K;
}
