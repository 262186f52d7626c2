//! Keyed, multi-chain ordered list backed by a single [`SlotArena`].
//!
//! A `SegmentedList<K, V, N>` owns `N` doubly linked chains ("segments") whose
//! nodes all live in one arena and are all reachable from one key index. A key
//! therefore belongs to at most one segment at a time, which is what lets the
//! ARC family keep T1/T2/B1/B2 consistent without four independent maps.
//!
//! ## Architecture
//!
//! ```text
//!   index: FxHashMap<K, SlotId>        arena: SlotArena<Node<K, V>>
//!   ┌──────┬────────┐                  ┌────────┬───────────────────────────────┐
//!   │  17  │ id_0   │─────────────────►│ id_0   │ key 17, seg 0, prev ∅, next 2 │
//!   │  42  │ id_1   │─────────────────►│ id_1   │ key 42, seg 1, prev ∅, next ∅ │
//!   │   9  │ id_2   │─────────────────►│ id_2   │ key 9,  seg 0, prev 0, next ∅ │
//!   └──────┴────────┘                  └────────┴───────────────────────────────┘
//!
//!   chains[0]: head ─► [17] ◄──► [9] ◄── tail      (front = oldest)
//!   chains[1]: head ─► [42] ◄── tail
//! ```
//!
//! ## Operations
//!
//! | Operation          | Time | Notes                                       |
//! |--------------------|------|---------------------------------------------|
//! | `push_back`        | O(1) | rejects keys already present in any chain   |
//! | `move_to_back`     | O(1) | stays within the key's current chain        |
//! | `transfer_to_back` | O(1) | re-links into another chain, keeps payload  |
//! | `transfer_front`   | O(1) | front of one chain to back of another       |
//! | `pop_front`        | O(1) |                                             |
//! | `remove`           | O(1) |                                             |
//! | `iter`             | O(n) | front to back                               |
//!
//! "Front" is always the least recently inserted or moved node of a chain.
//!
//! `debug_validate_invariants()` is available in debug/test builds.

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::slot_arena::{SlotArena, SlotId};

#[derive(Debug)]
struct Node<K, V> {
    key: K,
    value: V,
    segment: usize,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

#[derive(Debug, Clone, Copy, Default)]
struct Chain {
    head: Option<SlotId>,
    tail: Option<SlotId>,
    len: usize,
}

/// `N` ordered chains sharing one arena and one key index.
#[derive(Debug)]
pub struct SegmentedList<K, V, const N: usize> {
    arena: SlotArena<Node<K, V>>,
    index: FxHashMap<K, SlotId>,
    chains: [Chain; N],
}

impl<K, V, const N: usize> SegmentedList<K, V, N>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with room for `capacity` nodes across all chains.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SlotArena::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            chains: [Chain::default(); N],
        }
    }

    /// Total number of nodes over all chains.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Number of nodes in `segment`.
    pub fn segment_len(&self, segment: usize) -> usize {
        self.chains[segment].len
    }

    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the chain that currently holds `key`.
    pub fn segment_of(&self, key: &K) -> Option<usize> {
        let id = *self.index.get(key)?;
        self.arena.get(id).map(|node| node.segment)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.arena.get(id).map(|node| &node.value)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let id = *self.index.get(key)?;
        self.arena.get_mut(id).map(|node| &mut node.value)
    }

    /// Appends `key` at the back of `segment`.
    ///
    /// Returns `false` and leaves the list untouched if `key` is already
    /// present in any chain.
    pub fn push_back(&mut self, segment: usize, key: K, value: V) -> bool {
        if self.index.contains_key(&key) {
            return false;
        }
        let id = self.arena.insert(Node {
            key: key.clone(),
            value,
            segment,
            prev: None,
            next: None,
        });
        self.index.insert(key, id);
        self.attach_back(segment, id);
        true
    }

    /// Moves `key` to the back of its own chain; `false` if absent.
    pub fn move_to_back(&mut self, key: &K) -> bool {
        let Some(&id) = self.index.get(key) else {
            return false;
        };
        let Some(segment) = self.arena.get(id).map(|node| node.segment) else {
            return false;
        };
        if self.chains[segment].tail == Some(id) {
            return true;
        }
        self.detach(id);
        self.attach_back(segment, id);
        true
    }

    /// Moves `key` (with its payload) to the back of `segment`; `false` if absent.
    pub fn transfer_to_back(&mut self, key: &K, segment: usize) -> bool {
        let Some(&id) = self.index.get(key) else {
            return false;
        };
        if self.detach(id).is_none() {
            return false;
        }
        self.attach_back(segment, id);
        true
    }

    /// Moves the front node of `from` to the back of `to`.
    ///
    /// Returns `false` when `from` is empty.
    pub fn transfer_front(&mut self, from: usize, to: usize) -> bool {
        let Some(id) = self.chains[from].head else {
            return false;
        };
        if self.detach(id).is_none() {
            return false;
        }
        self.attach_back(to, id);
        true
    }

    /// Returns the front (oldest) entry of `segment`.
    pub fn front(&self, segment: usize) -> Option<(&K, &V)> {
        let id = self.chains[segment].head?;
        self.arena.get(id).map(|node| (&node.key, &node.value))
    }

    /// Removes and returns the front (oldest) entry of `segment`.
    pub fn pop_front(&mut self, segment: usize) -> Option<(K, V)> {
        let id = self.chains[segment].head?;
        self.unlink_and_free(id)
    }

    /// Removes `key` from whichever chain holds it.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let id = *self.index.get(key)?;
        self.unlink_and_free(id).map(|(_, value)| value)
    }

    /// Iterates `segment` from front to back.
    pub fn iter(&self, segment: usize) -> SegmentIter<'_, K, V, N> {
        SegmentIter {
            list: self,
            current: self.chains[segment].head,
        }
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.index.clear();
        self.chains = [Chain::default(); N];
    }

    fn unlink_and_free(&mut self, id: SlotId) -> Option<(K, V)> {
        self.detach(id)?;
        let node = self.arena.remove(id)?;
        self.index.remove(&node.key);
        Some((node.key, node.value))
    }

    fn detach(&mut self, id: SlotId) -> Option<()> {
        let (segment, prev, next) = {
            let node = self.arena.get(id)?;
            (node.segment, node.prev, node.next)
        };

        match prev {
            Some(prev_id) => {
                if let Some(prev_node) = self.arena.get_mut(prev_id) {
                    prev_node.next = next;
                }
            },
            None => self.chains[segment].head = next,
        }
        match next {
            Some(next_id) => {
                if let Some(next_node) = self.arena.get_mut(next_id) {
                    next_node.prev = prev;
                }
            },
            None => self.chains[segment].tail = prev,
        }
        self.chains[segment].len -= 1;

        if let Some(node) = self.arena.get_mut(id) {
            node.prev = None;
            node.next = None;
        }
        Some(())
    }

    fn attach_back(&mut self, segment: usize, id: SlotId) {
        let old_tail = self.chains[segment].tail;
        if let Some(node) = self.arena.get_mut(id) {
            node.segment = segment;
            node.prev = old_tail;
            node.next = None;
        }
        match old_tail {
            Some(tail_id) => {
                if let Some(tail_node) = self.arena.get_mut(tail_id) {
                    tail_node.next = Some(id);
                }
            },
            None => self.chains[segment].head = Some(id),
        }
        self.chains[segment].tail = Some(id);
        self.chains[segment].len += 1;
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.arena.debug_validate_invariants();
        assert_eq!(self.index.len(), self.arena.len(), "index/arena size mismatch");

        let mut total = 0usize;
        for (segment, chain) in self.chains.iter().enumerate() {
            if chain.head.is_none() || chain.tail.is_none() {
                assert!(chain.head.is_none() && chain.tail.is_none());
                assert_eq!(chain.len, 0, "empty chain {segment} with nonzero len");
                continue;
            }

            let mut count = 0usize;
            let mut prev = None;
            let mut current = chain.head;
            while let Some(id) = current {
                let node = self.arena.get(id).expect("chain points at vacant slot");
                assert_eq!(node.segment, segment, "node tagged with wrong segment");
                assert_eq!(node.prev, prev, "broken back link");
                assert_eq!(
                    self.index.get(&node.key),
                    Some(&id),
                    "index does not point at chain node"
                );
                count += 1;
                assert!(count <= chain.len, "cycle in chain {segment}");
                prev = Some(id);
                current = node.next;
            }
            assert_eq!(chain.tail, prev, "tail mismatch in chain {segment}");
            assert_eq!(count, chain.len, "len mismatch in chain {segment}");
            total += count;
        }
        assert_eq!(total, self.arena.len(), "nodes outside every chain");
    }
}

impl<K, V, const N: usize> Default for SegmentedList<K, V, N>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Front-to-back iterator over one segment.
#[derive(Debug)]
pub struct SegmentIter<'a, K, V, const N: usize> {
    list: &'a SegmentedList<K, V, N>,
    current: Option<SlotId>,
}

impl<'a, K, V, const N: usize> Iterator for SegmentIter<'a, K, V, N> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.list.arena.get(id)?;
        self.current = node.next;
        Some((&node.key, &node.value))
    }
}
