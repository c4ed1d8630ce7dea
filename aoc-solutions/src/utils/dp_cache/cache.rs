use std::cell::RefCell;
use std::marker::PhantomData;

use super::backend::Backend;
use super::problem::DpProblem;

/// Lazily resolves a [`DpProblem`], computing each index at most once.
///
/// Resolution recurses through `deps`, so a cyclic problem overflows the
/// stack. Callers check for cycles before building the cache.
pub struct DpCache<I, K, B, P> {
    backend: RefCell<B>,
    problem: P,
    _index: PhantomData<fn(I) -> K>,
}

impl<I, K, B, P> DpCache<I, K, B, P>
where
    I: Clone,
    K: Clone,
    B: Backend<I, K>,
    P: DpProblem<I, K>,
{
    pub fn with_problem(backend: B, problem: P) -> Self {
        Self {
            backend: RefCell::new(backend),
            problem,
            _index: PhantomData,
        }
    }

    /// Value of `index`, resolving its dependencies first when not yet cached
    pub fn get(&self, index: &I) -> K {
        if let Some(value) = self.backend.borrow().get(index) {
            return value.clone();
        }

        // The backend must not stay borrowed across the recursive calls
        let resolved: Vec<K> = self
            .problem
            .deps(index)
            .iter()
            .map(|dep| self.get(dep))
            .collect();
        let value = self.problem.compute(index, &resolved);

        self.backend
            .borrow_mut()
            .insert(index.clone(), value)
            .clone()
    }

    /// Hands back the storage, e.g. to inspect what was resolved
    pub fn into_backend(self) -> B {
        self.backend.into_inner()
    }
}
