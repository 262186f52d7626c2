//! The four coupled ARC lists held by a single owner.
//!
//! T1 and T2 are resident lists, B1 and B2 are ghost lists. All four share
//! one [`SegmentedList`], so an address can never sit in two of them at once:
//! moving between lists is a re-link, not a delete-then-insert across maps.
//!
//! ```text
//!   ┌──────── resident ────────┐   ┌───────── ghost ──────────┐
//!   T1: front ─► [a] [b] [c]       B1: front ─► [x] [y]
//!   T2: front ─► [d] [e]           B2: front ─► [z]
//! ```

use std::hash::Hash;

use crate::ds::segmented_list::{SegmentIter, SegmentedList};

/// Identifies one of the four ARC lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArcList {
    /// Resident, seen once recently.
    T1,
    /// Resident, seen at least twice.
    T2,
    /// Ghost of T1.
    B1,
    /// Ghost of T2.
    B2,
}

impl ArcList {
    const ALL: [ArcList; 4] = [ArcList::T1, ArcList::T2, ArcList::B1, ArcList::B2];

    #[inline]
    fn slot(self) -> usize {
        match self {
            ArcList::T1 => 0,
            ArcList::T2 => 1,
            ArcList::B1 => 2,
            ArcList::B2 => 3,
        }
    }

    #[inline]
    fn from_slot(slot: usize) -> Option<Self> {
        Self::ALL.get(slot).copied()
    }

    /// `true` for T1/T2.
    pub fn is_resident(self) -> bool {
        matches!(self, ArcList::T1 | ArcList::T2)
    }
}

/// T1/T2/B1/B2 over one arena and one key index.
#[derive(Debug)]
pub struct ArcLists<K, V> {
    inner: SegmentedList<K, V, 4>,
}

impl<K, V> ArcLists<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Reserves room for `2 * capacity` entries, the steady-state bound of
    /// all four lists together.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: SegmentedList::with_capacity(capacity.saturating_mul(2)),
        }
    }

    pub fn len(&self, list: ArcList) -> usize {
        self.inner.segment_len(list.slot())
    }

    /// |T1| + |T2|.
    pub fn resident_len(&self) -> usize {
        self.len(ArcList::T1) + self.len(ArcList::T2)
    }

    /// |T1| + |T2| + |B1| + |B2|.
    pub fn total_len(&self) -> usize {
        self.inner.len()
    }

    pub fn list_of(&self, key: &K) -> Option<ArcList> {
        self.inner.segment_of(key).and_then(ArcList::from_slot)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.inner.get(key)
    }

    /// Appends an untracked key at the back of `list`; `false` if tracked.
    pub fn push_back(&mut self, list: ArcList, key: K, value: V) -> bool {
        self.inner.push_back(list.slot(), key, value)
    }

    /// Refreshes `key` within its current list.
    pub fn move_to_back(&mut self, key: &K) -> bool {
        self.inner.move_to_back(key)
    }

    /// Moves `key` with its payload to the back of `to`.
    pub fn transfer(&mut self, key: &K, to: ArcList) -> bool {
        self.inner.transfer_to_back(key, to.slot())
    }

    /// Moves `key` to the back of `to`, replacing its payload with `value`.
    pub fn relink(&mut self, key: &K, to: ArcList, value: V) -> bool {
        if !self.inner.transfer_to_back(key, to.slot()) {
            return false;
        }
        if let Some(slot) = self.inner.get_mut(key) {
            *slot = value;
        }
        true
    }

    /// Moves the front of `from` to the back of `to`; `false` if `from` is empty.
    pub fn demote_front(&mut self, from: ArcList, to: ArcList) -> bool {
        self.inner.transfer_front(from.slot(), to.slot())
    }

    /// Drops the front of `list` entirely.
    pub fn pop_front(&mut self, list: ArcList) -> Option<(K, V)> {
        self.inner.pop_front(list.slot())
    }

    pub fn front(&self, list: ArcList) -> Option<(&K, &V)> {
        self.inner.front(list.slot())
    }

    pub fn iter(&self, list: ArcList) -> SegmentIter<'_, K, V, 4> {
        self.inner.iter(list.slot())
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.inner.debug_validate_invariants();

        let mut seen = rustc_hash::FxHashSet::default();
        for list in ArcList::ALL {
            for (key, _) in self.inner.iter(list.slot()) {
                assert!(seen.insert(key), "key present in more than one ARC list");
                assert_eq!(self.list_of(key), Some(list), "list tag mismatch");
            }
        }
    }
}
