//! # Least Recently Used (LRU) baseline
//!
//! Plain recency ordering over one [`OrderedSet`]: the front is the least
//! recently used address, the back the most recent. Every miss is admitted.
//!
//! ```text
//!   observe(D), cache full (capacity = 3)
//!
//!   Before:   front ──► [A] ◄──► [B] ◄──► [C] ◄── back
//!                       LRU                MRU
//!   After:    front ──► [B] ◄──► [C] ◄──► [D] ◄── back
//!
//!   observe(B), hit
//!   After:    front ──► [C] ◄──► [D] ◄──► [B] ◄── back
//! ```

use crate::ds::OrderedSet;
use crate::error::ConfigError;
use crate::stats::PolicyStats;
use crate::traits::{Operation, ReplacementPolicy};

/// LRU replacement policy over block addresses.
#[derive(Debug)]
pub struct LruCache {
    list: OrderedSet<u64, Operation>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl LruCache {
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

    /// Least recently used resident address.
    pub fn peek_lru(&self) -> Option<u64> {
        self.list.peek_front().map(|(addr, _)| *addr)
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.list.debug_validate_invariants();
        assert!(self.list.len() <= self.capacity);
    }
}

impl ReplacementPolicy for LruCache {
    fn name(&self) -> &'static str {
        "LRU"
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
        if self.list.move_to_end(&address) {
            self.hits += 1;
            return true;
        }

        self.misses += 1;
        if self.list.len() >= self.capacity {
            self.list.pop_front();
        }
        self.list.insert_end(address, operation);
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lru_evicts_least_recent() {
        let mut cache = LruCache::new(3);
        for addr in [1u64, 2, 3] {
            assert!(!cache.observe(addr, Operation::Read));
        }
        assert!(cache.observe(1, Operation::Read));
        assert_eq!(cache.peek_lru(), Some(2));

        assert!(!cache.observe(4, Operation::Write));
        assert!(!cache.contains(2));
        assert!(cache.contains(1));
        assert_eq!(cache.len(), 3);
        cache.debug_validate_invariants();
    }

    #[test]
    fn lru_counts_hits_and_misses() {
        let mut cache = LruCache::new(2);
        for addr in [1u64, 2, 1, 3, 2, 1] {
            cache.observe(addr, Operation::Read);
        }
        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 5);
        assert_eq!(stats.admissions, None);
    }

    #[test]
    fn lru_capacity_one() {
        let mut cache = LruCache::new(1);
        assert!(!cache.observe(1, Operation::Read));
        assert!(cache.observe(1, Operation::Read));
        assert!(!cache.observe(2, Operation::Read));
        assert!(!cache.contains(1));
    }

    #[test]
    fn lru_reset() {
        let mut cache = LruCache::new(2);
        cache.observe(1, Operation::Read);
        cache.reset();
        assert!(cache.is_empty());
        assert_eq!(cache.stats().accesses(), 0);
        assert!(LruCache::try_new(0).is_err());
    }
}
