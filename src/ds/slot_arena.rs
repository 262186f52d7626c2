//! Slab storage with stable `SlotId` handles.
//!
//! Vacant slots are threaded into an intrusive free list so that removal and
//! reuse are both O(1) without a side vector.
//!
//! ```text
//!   slots: [ Occupied(a) | Vacant(next=3) | Occupied(b) | Vacant(next=None) ]
//!   free_head ─► 1 ─► 3 ─► ∅
//! ```

/// Stable handle to a slot in a [`SlotArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(pub(crate) usize);

impl SlotId {
    /// Returns the raw slot index.
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
enum Slot<T> {
    Occupied(T),
    Vacant { next_free: Option<usize> },
}

/// Slab of `T` values addressed by [`SlotId`].
#[derive(Debug)]
pub struct SlotArena<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<usize>,
    len: usize,
}

impl<T> SlotArena<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: None,
            len: 0,
        }
    }

    /// Stores `value`, reusing the most recently freed slot when available.
    pub fn insert(&mut self, value: T) -> SlotId {
        self.len += 1;
        match self.free_head {
            Some(idx) => {
                if let Slot::Vacant { next_free } = self.slots[idx] {
                    self.free_head = next_free;
                }
                self.slots[idx] = Slot::Occupied(value);
                SlotId(idx)
            },
            None => {
                self.slots.push(Slot::Occupied(value));
                SlotId(self.slots.len() - 1)
            },
        }
    }

    /// Frees the slot and returns its value; `None` if already vacant.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let slot = self.slots.get_mut(id.0)?;
        if matches!(slot, Slot::Vacant { .. }) {
            return None;
        }
        let old = std::mem::replace(
            slot,
            Slot::Vacant {
                next_free: self.free_head,
            },
        );
        self.free_head = Some(id.0);
        self.len -= 1;
        match old {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        match self.slots.get(id.0)? {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        match self.slots.get_mut(id.0)? {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.len = 0;
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        let occupied = self
            .slots
            .iter()
            .filter(|slot| matches!(slot, Slot::Occupied(_)))
            .count();
        assert_eq!(occupied, self.len, "occupied slots != len");

        let mut free = 0usize;
        let mut cursor = self.free_head;
        while let Some(idx) = cursor {
            free += 1;
            assert!(free <= self.slots.len(), "free list cycle");
            cursor = match self.slots[idx] {
                Slot::Vacant { next_free } => next_free,
                Slot::Occupied(_) => panic!("free list points at occupied slot {idx}"),
            };
        }
        assert_eq!(free + occupied, self.slots.len(), "leaked vacant slot");
    }
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_arena_insert_remove_reuse() {
        let mut arena = SlotArena::new();
        let id1 = arena.insert("a");
        let id2 = arena.insert("b");
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(id1), Some(&"a"));
        assert_eq!(arena.get(id2), Some(&"b"));

        assert_eq!(arena.remove(id1), Some("a"));
        assert_eq!(arena.len(), 1);
        assert!(!arena.contains(id1));

        let id3 = arena.insert("c");
        assert_eq!(id1.index(), id3.index());
        assert_eq!(arena.get(id3), Some(&"c"));
        arena.debug_validate_invariants();
    }

    #[test]
    fn slot_arena_double_remove_is_none() {
        let mut arena = SlotArena::new();
        let id = arena.insert(7u32);
        assert_eq!(arena.remove(id), Some(7));
        assert_eq!(arena.remove(id), None);
        assert_eq!(arena.len(), 0);
        arena.debug_validate_invariants();
    }

    #[test]
    fn slot_arena_free_list_is_lifo() {
        let mut arena = SlotArena::new();
        let ids: Vec<_> = (0..4).map(|i| arena.insert(i)).collect();
        arena.remove(ids[1]);
        arena.remove(ids[3]);
        assert_eq!(arena.insert(10).index(), 3);
        assert_eq!(arena.insert(11).index(), 1);
        assert_eq!(arena.insert(12).index(), 4);
        arena.debug_validate_invariants();
    }

    #[test]
    fn slot_arena_clear_resets() {
        let mut arena = SlotArena::with_capacity(8);
        let id = arena.insert(1);
        arena.clear();
        assert!(arena.is_empty());
        assert!(arena.get(id).is_none());
        arena.debug_validate_invariants();
    }
}
