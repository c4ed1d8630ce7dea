//! Storage for memoized values.

/// Where a [`DpCache`](super::DpCache) keeps resolved values.
pub trait Backend<I, K> {
    fn get(&self, index: &I) -> Option<&K>;

    /// Stores `value`, returning the value held for `index` afterwards.
    ///
    /// An index that is already resolved keeps its first value.
    fn insert(&mut self, index: I, value: K) -> &K;
}

/// Dense storage for `usize` indices such as interned node ids.
///
/// Slots are allocated up to the highest index seen.
#[derive(Debug)]
pub struct VecBackend<K> {
    slots: Vec<Option<K>>,
}

impl<K> VecBackend<K> {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Preallocate slots for indices `0..len`
    pub fn with_capacity(len: usize) -> Self {
        let mut slots = Vec::with_capacity(len);
        slots.resize_with(len, || None);
        Self { slots }
    }

    /// Number of resolved indices
    pub fn resolved(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
}

impl<K> Default for VecBackend<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Backend<usize, K> for VecBackend<K> {
    fn get(&self, index: &usize) -> Option<&K> {
        self.slots.get(*index)?.as_ref()
    }

    fn insert(&mut self, index: usize, value: K) -> &K {
        if index >= self.slots.len() {
            self.slots.resize_with(index + 1, || None);
        }
        self.slots[index].get_or_insert(value)
    }
}
