//! Lazy Adaptive Replacement Cache (LARC).
//!
//! A single LRU-ordered resident list guarded by an [`AdmissionFilter`]: an
//! address is only cached the second time it misses while still remembered
//! by the filter. One-off scans therefore never displace resident entries.
//!
//! ```text
//!   observe(x):
//!     x resident  →  hit;  move x to back;       cr shrinks
//!     otherwise   →  miss; cr grows; toggle x in filter
//!                    ├─ first sighting: remember x, do not cache
//!                    └─ second sighting: forget x, admit
//!                         └─ full? evict front, then push x to back
//! ```
//!
//! `stats().admissions` reports how many misses were admitted (the number of
//! writes into the cache).
//!
//! ## Example Usage
//!
//! ```
//! use cachesim::policy::larc::LarcCache;
//! use cachesim::traits::{Operation, ReplacementPolicy};
//!
//! let mut cache = LarcCache::new(10);
//! assert!(!cache.observe(1, Operation::Read)); // remembered only
//! assert!(!cache.contains(1));
//! assert!(!cache.observe(1, Operation::Read)); // second sighting: admitted
//! assert!(cache.observe(1, Operation::Read));
//! assert_eq!(cache.stats().admissions, Some(1));
//! ```

use crate::ds::{AdmissionFilter, OrderedSet};
use crate::error::ConfigError;
use crate::stats::PolicyStats;
use crate::traits::{Operation, ReplacementPolicy};

/// LARC replacement policy over block addresses.
#[derive(Debug)]
pub struct LarcCache {
    resident: OrderedSet<u64, Operation>,
    filter: AdmissionFilter,
    capacity: usize,
    hits: u64,
    misses: u64,
    admissions: u64,
}

impl LarcCache {
    /// Creates a LARC cache holding up to `capacity` addresses.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        ConfigError::check_capacity(capacity)?;
        Ok(Self {
            resident: OrderedSet::with_capacity(capacity),
            filter: AdmissionFilter::new(capacity),
            capacity,
            hits: 0,
            misses: 0,
            admissions: 0,
        })
    }

    /// Creates a LARC cache holding up to `capacity` addresses.
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

    /// Current filter window bound (`cr`).
    pub fn window_capacity(&self) -> usize {
        self.filter.window_capacity()
    }

    /// Addresses currently remembered by the filter.
    pub fn window_len(&self) -> usize {
        self.filter.len()
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.resident.debug_validate_invariants();
        self.filter.debug_validate_invariants();
        assert!(self.resident.len() <= self.capacity);
        for (addr, _) in self.resident.iter() {
            assert!(
                !self.filter.contains(*addr),
                "address {addr} both resident and in the filter"
            );
        }
    }
}

impl ReplacementPolicy for LarcCache {
    fn name(&self) -> &'static str {
        "LARC"
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn len(&self) -> usize {
        self.resident.len()
    }

    fn contains(&self, address: u64) -> bool {
        self.resident.contains(&address)
    }

    fn observe(&mut self, address: u64, operation: Operation) -> bool {
        if self.resident.move_to_end(&address) {
            self.hits += 1;
            self.filter.shrink();
            return true;
        }

        self.misses += 1;
        self.filter.grow();
        if !self.filter.admit(address) {
            return false;
        }

        self.admissions += 1;
        if self.resident.len() >= self.capacity {
            self.resident.pop_front();
        }
        self.resident.insert_end(address, operation);
        false
    }

    fn stats(&self) -> PolicyStats {
        PolicyStats {
            policy: self.name(),
            capacity: self.capacity,
            hits: self.hits,
            misses: self.misses,
            admissions: Some(self.admissions),
        }
    }

    fn reset(&mut self) {
        self.resident.clear();
        self.filter.reset();
        self.hits = 0;
        self.misses = 0;
        self.admissions = 0;
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_admissions_bounded_by_misses(
            capacity in 1usize..32,
            addrs in prop::collection::vec(0u64..64, 0..400)
        ) {
            let mut cache = LarcCache::new(capacity);
            for &addr in &addrs {
                cache.observe(addr, Operation::Read);
                prop_assert!(cache.len() <= capacity);
                prop_assert!(cache.window_len() <= cache.window_capacity());
            }
            let stats = cache.stats();
            prop_assert_eq!(stats.accesses(), addrs.len() as u64);
            prop_assert!(stats.admissions.unwrap_or(0) <= stats.misses);
            cache.debug_validate_invariants();
        }
    }
}
