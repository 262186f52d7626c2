//! Insertion/access-ordered associative set.
//!
//! The primitive under every resident and filter list in this crate: a keyed
//! set whose front is always the least recently inserted or touched entry.
//! Implemented as a single-chain [`SegmentedList`].
//!
//! ## Behavior
//! - `insert_end(k, v)`: appends at the back; rejects keys already present
//! - `move_to_end(k)`: refreshes recency; `false` if `k` is absent
//! - `pop_front()` / `peek_front()`: oldest entry
//! - `trim_front_to(n)`: drops oldest entries until at most `n` remain
//!
//! ## Example
//!
//! ```
//! use cachesim::ds::OrderedSet;
//!
//! let mut set = OrderedSet::new();
//! set.insert_end(1u64, "r");
//! set.insert_end(2u64, "w");
//! set.move_to_end(&1);
//! assert_eq!(set.peek_front(), Some((&2, &"w")));
//! ```

use std::hash::Hash;

use crate::ds::segmented_list::{SegmentIter, SegmentedList};

const CHAIN: usize = 0;

/// Ordered key set with O(1) lookup, delete, move-to-end and pop-front.
#[derive(Debug)]
pub struct OrderedSet<K, V> {
    inner: SegmentedList<K, V, 1>,
}

impl<K, V> OrderedSet<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            inner: SegmentedList::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: SegmentedList::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.inner.contains(key)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.inner.get(key)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.inner.get_mut(key)
    }

    /// Appends `key` at the back. Returns `false` if it was already present.
    pub fn insert_end(&mut self, key: K, value: V) -> bool {
        self.inner.push_back(CHAIN, key, value)
    }

    pub fn delete(&mut self, key: &K) -> Option<V> {
        self.inner.remove(key)
    }

    pub fn move_to_end(&mut self, key: &K) -> bool {
        self.inner.move_to_back(key)
    }

    pub fn peek_front(&self) -> Option<(&K, &V)> {
        self.inner.front(CHAIN)
    }

    pub fn pop_front(&mut self) -> Option<(K, V)> {
        self.inner.pop_front(CHAIN)
    }

    /// Drops entries from the front until `len() <= max_len`.
    pub fn trim_front_to(&mut self, max_len: usize) {
        while self.inner.len() > max_len {
            if self.inner.pop_front(CHAIN).is_none() {
                break;
            }
        }
    }

    /// Iterates from front (oldest) to back (newest).
    pub fn iter(&self) -> SegmentIter<'_, K, V, 1> {
        self.inner.iter(CHAIN)
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.inner.debug_validate_invariants();
    }
}

impl<K, V> Default for OrderedSet<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
