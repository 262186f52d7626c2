//! Adaptive Replacement Cache (ARC) replacement policy.
//!
//! Implements ARC over address identities: the cache tracks which block
//! addresses are resident, never their data. ARC balances recency and
//! frequency by keeping four lists and steering a target size `p` for T1 from
//! where ghost hits land.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                             ArcCore Layout                              │
//! │                                                                         │
//! │   lists: ArcLists<u64, Operation>   (one arena, one index, 4 chains)    │
//! │                                                                         │
//! │   T1 (seen once)                      T2 (seen twice or more)           │
//! │   ┌───────────────────────────┐       ┌───────────────────────────┐     │
//! │   │ front              back   │       │ front              back   │     │
//! │   │ [old] ◄──► ... ◄──► [new] │       │ [cold] ◄──► ... ◄► [hot]  │     │
//! │   └────────────┬──────────────┘       └────────────┬──────────────┘     │
//! │                │ REPLACE                           │ REPLACE            │
//! │                ▼                                   ▼                    │
//! │   B1 (ghosts of T1)                   B2 (ghosts of T2)                 │
//! │   ┌───────────────────────────┐       ┌───────────────────────────┐     │
//! │   │ identities only           │       │ identities only           │     │
//! │   └───────────────────────────┘       └───────────────────────────┘     │
//! │                                                                         │
//! │   p: target |T1|.  B1 hit → p grows (recency).  B2 hit → p shrinks.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Access Flow
//!
//! ```text
//!   observe(x):
//!     x ∈ T1  →  move to back of T2                          (hit)
//!     x ∈ T2  →  move to back of T2                          (hit)
//!     x ∈ B1  →  p += δ₁; REPLACE; move x to back of T2      (miss)
//!     x ∈ B2  →  p −= δ₂; REPLACE; move x to back of T2      (miss)
//!     else    →  trim T1∪B1 / B2; maybe REPLACE; push T1     (miss)
//!
//!   δ₁ = 1 if |B1| ≥ |B2| else |B2| / |B1|
//!   δ₂ = 1 if |B2| ≥ |B1| else |B1| / |B2|
//!
//!   REPLACE(x):
//!     if |T1| > 0 and (|T1| > p or (x ∈ B2 and |T1| = p)):
//!         front of T1 → back of B1
//!     else:
//!         front of T2 → back of B2
//! ```
//!
//! The cold-miss branch compares the four-list total captured at the start
//! of the access, before its own B1/T1 trim, against `capacity` and
//! `2 · capacity`.
//!
//! ## Operations
//!
//! | Operation  | Time | Notes                                    |
//! |------------|------|------------------------------------------|
//! | `observe`  | O(1) | at most two list moves plus one eviction |
//! | `contains` | O(1) | index lookup                             |
//! | `stats`    | O(1) |                                          |
//!
//! ## Example Usage
//!
//! ```
//! use cachesim::policy::arc::ArcCache;
//! use cachesim::traits::{Operation, ReplacementPolicy};
//!
//! let mut cache = ArcCache::new(3);
//! for addr in [1, 2, 3, 1] {
//!     cache.observe(addr, Operation::Read);
//! }
//! assert_eq!(cache.stats().hits, 1);
//! assert_eq!(cache.t2_len(), 1);
//! ```
//!
//! ## References
//!
//! - Megiddo & Modha, "ARC: A Self-Tuning, Low Overhead Replacement Cache",
//!   FAST 2003

use crate::ds::{ArcList, ArcLists};
use crate::error::{ConfigError, InvariantError};
use crate::stats::PolicyStats;
use crate::traits::{Operation, ReplacementPolicy};

/// Where a missed address was found before it was (re)admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissKind {
    /// Ghost of T1; `p` grew.
    GhostB1,
    /// Ghost of T2; `p` shrank.
    GhostB2,
    /// Not tracked anywhere.
    Cold,
}

/// The ARC algorithm proper: four lists and the adaptation target `p`.
///
/// Shared by [`ArcCache`] and [`MarcCache`](crate::policy::marc::MarcCache),
/// which differ only in what they put in front of the miss path.
#[derive(Debug)]
pub struct ArcCore {
    lists: ArcLists<u64, Operation>,
    p: usize,
    capacity: usize,
}

impl ArcCore {
    /// Creates an empty core.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        ConfigError::check_capacity(capacity)?;
        Ok(Self {
            lists: ArcLists::with_capacity(capacity),
            p: 0,
            capacity,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current target size of T1.
    pub fn p(&self) -> usize {
        self.p
    }

    pub fn t1_len(&self) -> usize {
        self.lists.len(ArcList::T1)
    }

    pub fn t2_len(&self) -> usize {
        self.lists.len(ArcList::T2)
    }

    pub fn b1_len(&self) -> usize {
        self.lists.len(ArcList::B1)
    }

    pub fn b2_len(&self) -> usize {
        self.lists.len(ArcList::B2)
    }

    /// Number of resident addresses (|T1| + |T2|).
    pub fn len(&self) -> usize {
        self.lists.resident_len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, address: u64) -> bool {
        self.list_of(address).is_some_and(ArcList::is_resident)
    }

    /// Which list, if any, currently tracks `address`.
    pub fn list_of(&self, address: u64) -> Option<ArcList> {
        self.lists.list_of(&address)
    }

    /// Handles a resident hit. Returns `false` (and changes nothing) if
    /// `address` is not in T1 or T2.
    pub fn touch(&mut self, address: u64, operation: Operation) -> bool {
        match self.lists.list_of(&address) {
            Some(ArcList::T1) => self.lists.relink(&address, ArcList::T2, operation),
            Some(ArcList::T2) => self.lists.move_to_back(&address),
            _ => false,
        }
    }

    /// Handles a miss: ghost adaptation or cold admission into T1.
    ///
    /// Returns `None` without changing anything if `address` is resident;
    /// callers are expected to try [`touch`](Self::touch) first.
    pub fn admit(&mut self, address: u64, operation: Operation) -> Option<MissKind> {
        let t1 = self.t1_len();
        let t2 = self.t2_len();
        let b1 = self.b1_len();
        let b2 = self.b2_len();

        match self.lists.list_of(&address) {
            Some(ArcList::T1 | ArcList::T2) => None,
            Some(ArcList::B1) => {
                let delta = ghost_delta(b1, b2);
                self.p = (self.p + delta).min(self.capacity);
                self.replace(false);
                self.lists.relink(&address, ArcList::T2, operation);
                Some(MissKind::GhostB1)
            },
            Some(ArcList::B2) => {
                let delta = ghost_delta(b2, b1);
                self.p = self.p.saturating_sub(delta);
                self.replace(true);
                self.lists.relink(&address, ArcList::T2, operation);
                Some(MissKind::GhostB2)
            },
            None => {
                self.admit_cold(address, operation, t1 + t2 + b1 + b2);
                Some(MissKind::Cold)
            },
        }
    }

    fn admit_cold(&mut self, address: u64, operation: Operation, total_before: usize) {
        let capacity = self.capacity;

        if self.t1_len() + self.b1_len() == capacity {
            if self.t1_len() < capacity {
                self.drop_front(ArcList::B1);
            } else {
                // B1 is empty: T1 alone fills the budget.
                self.drop_front(ArcList::T1);
            }
        }

        if self.t1_len() + self.b1_len() < capacity && total_before >= capacity {
            if total_before == 2 * capacity {
                self.drop_front(ArcList::B2);
            }
            self.replace(false);
        }

        self.lists.push_back(ArcList::T1, address, operation);
    }

    /// Frees one resident slot by demoting a T1 or T2 front into its ghost list.
    ///
    /// Returns `false` when the chosen list is empty; the caller carries on
    /// as if no eviction were needed.
    fn replace(&mut self, address_in_b2: bool) -> bool {
        let t1 = self.t1_len();
        let (from, to) = if t1 > 0 && (t1 > self.p || (address_in_b2 && t1 == self.p)) {
            (ArcList::T1, ArcList::B1)
        } else {
            (ArcList::T2, ArcList::B2)
        };

        let demoted = self.lists.demote_front(from, to);
        if !demoted && tracing::enabled!(tracing::Level::TRACE) {
            tracing::trace!(from = ?from, p = self.p, "replace found no victim");
        }
        demoted
    }

    fn drop_front(&mut self, list: ArcList) {
        if self.lists.pop_front(list).is_none() && tracing::enabled!(tracing::Level::TRACE) {
            tracing::trace!(list = ?list, "expected entry missing; nothing dropped");
        }
    }

    /// Drops every list and resets `p` to zero.
    pub fn clear(&mut self) {
        self.lists.clear();
        self.p = 0;
    }

    /// Checks the size bounds ARC maintains after every access.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantError`] naming the first violated bound.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let capacity = self.capacity;
        if self.len() > capacity {
            return Err(InvariantError::new(format!(
                "|T1| + |T2| = {} exceeds capacity {}",
                self.len(),
                capacity
            )));
        }
        if self.p > capacity {
            return Err(InvariantError::new(format!(
                "p = {} exceeds capacity {}",
                self.p, capacity
            )));
        }
        if self.t1_len() + self.b1_len() > capacity {
            return Err(InvariantError::new(format!(
                "|T1| + |B1| = {} exceeds capacity {}",
                self.t1_len() + self.b1_len(),
                capacity
            )));
        }
        if self.lists.total_len() > 2 * capacity {
            return Err(InvariantError::new(format!(
                "four-list total {} exceeds 2 * capacity {}",
                self.lists.total_len(),
                2 * capacity
            )));
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    /// Validates structural and size invariants. Panics on violation.
    pub fn debug_validate_invariants(&self) {
        self.lists.debug_validate_invariants();
        if let Err(err) = self.check_invariants() {
            panic!("{err}");
        }
    }
}

/// Adaptation step for a ghost hit: 1 when the hit list is at least as long
/// as the other ghost list, otherwise their integer ratio.
#[inline]
fn ghost_delta(hit_len: usize, other_len: usize) -> usize {
    if hit_len == 0 || hit_len >= other_len {
        1
    } else {
        other_len / hit_len
    }
}

/// ARC as a standalone replacement policy.
#[derive(Debug)]
pub struct ArcCache {
    core: ArcCore,
    hits: u64,
    misses: u64,
}

impl ArcCache {
    /// Creates an ARC cache holding up to `capacity` addresses.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            core: ArcCore::try_new(capacity)?,
            hits: 0,
            misses: 0,
        })
    }

    /// Creates an ARC cache holding up to `capacity` addresses.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. See [`try_new`](Self::try_new).
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    pub fn core(&self) -> &ArcCore {
        &self.core
    }

    pub fn p(&self) -> usize {
        self.core.p()
    }

    pub fn t1_len(&self) -> usize {
        self.core.t1_len()
    }

    pub fn t2_len(&self) -> usize {
        self.core.t2_len()
    }

    pub fn b1_len(&self) -> usize {
        self.core.b1_len()
    }

    pub fn b2_len(&self) -> usize {
        self.core.b2_len()
    }

    pub fn list_of(&self, address: u64) -> Option<ArcList> {
        self.core.list_of(address)
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.core.debug_validate_invariants();
    }
}

impl ReplacementPolicy for ArcCache {
    fn name(&self) -> &'static str {
        "ARC"
    }

    fn capacity(&self) -> usize {
        self.core.capacity()
    }

    fn len(&self) -> usize {
        self.core.len()
    }

    fn contains(&self, address: u64) -> bool {
        self.core.contains(address)
    }

    fn observe(&mut self, address: u64, operation: Operation) -> bool {
        let hit = if self.core.touch(address, operation.clone()) {
            self.hits += 1;
            true
        } else {
            self.core.admit(address, operation);
            self.misses += 1;
            false
        };
        debug_assert!(self.core.check_invariants().is_ok());
        hit
    }

    fn stats(&self) -> PolicyStats {
        PolicyStats {
            policy: self.name(),
            capacity: self.core.capacity(),
            hits: self.hits,
            misses: self.misses,
            admissions: None,
        }
    }

    fn reset(&mut self) {
        self.core.clear();
        self.hits = 0;
        self.misses = 0;
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Resident budget, p range and ghost bounds hold after every access.
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_bounds_hold(
            capacity in 1usize..32,
            addrs in prop::collection::vec(0u64..96, 0..400)
        ) {
            let mut cache = ArcCache::new(capacity);
            for addr in addrs {
                cache.observe(addr, Operation::Read);
                prop_assert!(cache.len() <= capacity);
                prop_assert!(cache.p() <= capacity);
                prop_assert!(cache.core().check_invariants().is_ok());
                cache.debug_validate_invariants();
            }
        }

        /// hits + misses equals the number of observed accesses.
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_counts_partition_accesses(
            capacity in 1usize..16,
            addrs in prop::collection::vec(0u64..40, 0..300)
        ) {
            let mut cache = ArcCache::new(capacity);
            let mut hits = 0u64;
            for &addr in &addrs {
                if cache.observe(addr, Operation::Read) {
                    hits += 1;
                }
            }
            let stats = cache.stats();
            prop_assert_eq!(stats.accesses(), addrs.len() as u64);
            prop_assert_eq!(stats.hits, hits);
        }

        /// A hit always reports the address as resident beforehand.
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_hit_iff_resident(
            capacity in 1usize..16,
            addrs in prop::collection::vec(0u64..40, 0..300)
        ) {
            let mut cache = ArcCache::new(capacity);
            for addr in addrs {
                let resident = cache.contains(addr);
                prop_assert_eq!(cache.observe(addr, Operation::Read), resident);
                prop_assert!(cache.contains(addr));
            }
        }
    }
}
