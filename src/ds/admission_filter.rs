//! Second-sighting admission filter with an adaptive window.
//!
//! Used by LARC and mARC to keep one-off (scan) addresses out of the resident
//! lists. The filter remembers addresses seen once; seeing one of them again
//! removes it from the window and admits it. Presence toggles.
//!
//! The window bound `cr` breathes with the workload: every cache hit shrinks
//! it, every cache miss grows it, always inside `[floor, ceiling]` where
//!
//! ```text
//!   floor   = max(1, ⌊0.1 · capacity⌋)
//!   ceiling = max(floor, ⌊0.9 · capacity⌋)
//!
//!   hit:  cr ← max(floor,   cr − capacity / (capacity − cr))
//!   miss: cr ← min(ceiling, cr + capacity / cr)
//! ```
//!
//! After every resize the oldest entries are trimmed so that `len() <= cr`.

use crate::ds::ordered_set::OrderedSet;

const FLOOR_FRACTION: f64 = 0.1;
const CEILING_FRACTION: f64 = 0.9;

/// Toggle-membership window of not-yet-admitted addresses.
#[derive(Debug)]
pub struct AdmissionFilter {
    window: OrderedSet<u64, ()>,
    window_cap: usize,
    floor: usize,
    ceiling: usize,
    capacity: usize,
}

impl AdmissionFilter {
    /// Creates a filter for a cache of `capacity` entries.
    ///
    /// `capacity` must be non-zero; policies validate this before building
    /// their filter.
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0, "filter capacity must be non-zero");
        let floor = ((capacity as f64 * FLOOR_FRACTION) as usize).max(1);
        let ceiling = ((capacity as f64 * CEILING_FRACTION) as usize).max(floor);
        Self {
            window: OrderedSet::with_capacity(ceiling),
            window_cap: floor,
            floor,
            ceiling,
            capacity,
        }
    }

    /// Current window bound (`cr`).
    pub fn window_capacity(&self) -> usize {
        self.window_cap
    }

    /// Addresses currently remembered.
    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    pub fn contains(&self, address: u64) -> bool {
        self.window.contains(&address)
    }

    pub fn floor(&self) -> usize {
        self.floor
    }

    pub fn ceiling(&self) -> usize {
        self.ceiling
    }

    /// Narrows the window after a cache hit.
    pub fn shrink(&mut self) {
        let headroom = self.capacity.saturating_sub(self.window_cap);
        self.window_cap = if headroom == 0 {
            self.floor
        } else {
            self.window_cap
                .saturating_sub(self.capacity / headroom)
                .max(self.floor)
        };
        self.window.trim_front_to(self.window_cap);
    }

    /// Widens the window after a cache miss.
    pub fn grow(&mut self) {
        let step = if self.window_cap == 0 {
            self.ceiling
        } else {
            self.capacity / self.window_cap
        };
        self.window_cap = self.window_cap.saturating_add(step).min(self.ceiling);
        self.window.trim_front_to(self.window_cap);
    }

    /// Toggles `address` in the window.
    ///
    /// Returns `true` (admit) if the address was already remembered, which
    /// also forgets it. Otherwise remembers it and returns `false`.
    pub fn admit(&mut self, address: u64) -> bool {
        if self.window.delete(&address).is_some() {
            return true;
        }
        self.window.insert_end(address, ());
        self.window.trim_front_to(self.window_cap);
        false
    }

    /// Forgets every address and restores the initial window bound.
    pub fn reset(&mut self) {
        self.window.clear();
        self.window_cap = self.floor;
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.window.debug_validate_invariants();
        assert!(
            (self.floor..=self.ceiling).contains(&self.window_cap),
            "cr ({}) outside [{}, {}]",
            self.window_cap,
            self.floor,
            self.ceiling
        );
        assert!(self.window.len() <= self.window_cap, "window exceeds cr");
    }
}
