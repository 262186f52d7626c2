//! # Least Frequently Used (LFU) baseline
//!
//! Each resident address carries a hit counter starting at 1. When the cache
//! is full the address with the lowest count is evicted; among equal counts
//! the one touched longest ago (closest to the front) goes first.
//!
//! ```text
//!   front ──► [A:3] [B:1] [C:1] [D:2] ◄── back      observe(E), full
//!                    ▲
//!                    └── lowest count, earliest among ties → evicted
//!
//!   front ──► [A:3] [C:1] [D:2] [E:1] ◄── back
//! ```
//!
//! | Operation | Time | Notes                    |
//! |-----------|------|--------------------------|
//! | hit       | O(1) | count += 1, move to back |
//! | miss      | O(n) | linear scan for victim   |

use crate::ds::OrderedSet;
use crate::error::ConfigError;
use crate::stats::PolicyStats;
use crate::traits::{Operation, ReplacementPolicy};

#[derive(Debug, Clone, PartialEq, Eq)]
struct LfuEntry {
    operation: Operation,
    frequency: u64,
}

/// LFU replacement policy over block addresses.
#[derive(Debug)]
pub struct LfuCache {
    list: OrderedSet<u64, LfuEntry>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl LfuCache {
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        ConfigError::check_capacity(capacity)?;
        Ok(Self {
            list: OrderedSet::with_capacity(capacity),
            capacity,
            hits: 0,
            misses: 0,
        })
    }

    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Access count of a resident address.
    pub fn frequency(&self, address: u64) -> Option<u64> {
        self.list.get(&address).map(|entry| entry.frequency)
    }

    /// Operation recorded when the address was admitted.
    pub fn operation(&self, address: u64) -> Option<&Operation> {
        self.list.get(&address).map(|entry| &entry.operation)
    }

    /// The address that would be evicted next.
    pub fn peek_victim(&self) -> Option<u64> {
        let mut victim: Option<(u64, u64)> = None;
        for (addr, entry) in self.list.iter() {
            match victim {
                Some((_, best)) if entry.frequency >= best => {},
                _ => victim = Some((*addr, entry.frequency)),
            }
        }
        victim.map(|(addr, _)| addr)
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.list.debug_validate_invariants();
        assert!(self.list.len() <= self.capacity);
        for (_, entry) in self.list.iter() {
            assert!(entry.frequency >= 1);
        }
    }
}

impl ReplacementPolicy for LfuCache {
    fn name(&self) -> &'static str {
        "LFU"
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn len(&self) -> usize {
        self.list.len()
    }

    fn contains(&self, address: u64) -> bool {
        self.list.contains(&address)
    }

    fn observe(&mut self, address: u64, operation: Operation) -> bool {
        if let Some(entry) = self.list.get_mut(&address) {
            entry.frequency += 1;
            self.list.move_to_end(&address);
            self.hits += 1;
            return true;
        }

        self.misses += 1;
        if self.list.len() >= self.capacity {
            if let Some(victim) = self.peek_victim() {
                self.list.delete(&victim);
            }
        }
        self.list.insert_end(
            address,
            LfuEntry {
                operation,
                frequency: 1,
            },
        );
        false
    }

    fn stats(&self) -> PolicyStats {
        PolicyStats {
            policy: self.name(),
            capacity: self.capacity,
            hits: self.hits,
            misses: self.misses,
            admissions: None,
        }
    }

    fn reset(&mut self) {
        self.list.clear();
        self.hits = 0;
        self.misses = 0;
    }
}
