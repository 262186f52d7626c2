//! Unified builder for every replacement policy.
//!
//! Lets a driver pick a policy at runtime by name and get back a boxed
//! [`ReplacementPolicy`] without knowing the concrete type.
//!
//! ## Example
//!
//! ```rust
//! use cachesim::builder::{PolicyBuilder, PolicyKind};
//! use cachesim::traits::{Operation, ReplacementPolicy};
//!
//! let kind: PolicyKind = "marc".parse().unwrap();
//! let mut policy = PolicyBuilder::new(100).build(kind).unwrap();
//! policy.observe(42, Operation::Read);
//! assert_eq!(policy.name(), "mARC");
//! assert_eq!(policy.stats().misses, 1);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::policy::arc::ArcCache;
use crate::policy::larc::LarcCache;
use crate::policy::lfu::LfuCache;
use crate::policy::lru::LruCache;
use crate::policy::marc::MarcCache;
use crate::traits::ReplacementPolicy;

/// Available replacement policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    /// Least Recently Used.
    Lru,
    /// Least Frequently Used.
    Lfu,
    /// Adaptive Replacement Cache.
    Arc,
    /// Lazy ARC: LRU behind a second-sighting filter.
    Larc,
    /// ARC with a regime-gated admission filter.
    Marc,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 5] = [
        PolicyKind::Lru,
        PolicyKind::Lfu,
        PolicyKind::Arc,
        PolicyKind::Larc,
        PolicyKind::Marc,
    ];

    /// Lower-case command-line name.
    pub fn as_str(self) -> &'static str {
        match self {
            PolicyKind::Lru => "lru",
            PolicyKind::Lfu => "lfu",
            PolicyKind::Arc => "arc",
            PolicyKind::Larc => "larc",
            PolicyKind::Marc => "marc",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        PolicyKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| {
                ConfigError::new(format!(
                    "unknown algorithm {name:?}; expected one of lru, lfu, arc, larc, marc"
                ))
            })
    }
}

/// Builder producing boxed policies of a fixed capacity.
#[derive(Debug, Clone, Copy)]
pub struct PolicyBuilder {
    capacity: usize,
}

impl PolicyBuilder {
    /// Creates a builder for caches holding `capacity` addresses.
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Builds a fresh policy of the given kind.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the capacity is zero.
    pub fn build(self, kind: PolicyKind) -> Result<Box<dyn ReplacementPolicy>, ConfigError> {
        let capacity = self.capacity;
        let policy: Box<dyn ReplacementPolicy> = match kind {
            PolicyKind::Lru => Box::new(LruCache::try_new(capacity)?),
            PolicyKind::Lfu => Box::new(LfuCache::try_new(capacity)?),
            PolicyKind::Arc => Box::new(ArcCache::try_new(capacity)?),
            PolicyKind::Larc => Box::new(LarcCache::try_new(capacity)?),
            PolicyKind::Marc => Box::new(MarcCache::try_new(capacity)?),
        };
        Ok(policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Operation;

    #[test]
    fn test_all_kinds_build() {
        for kind in PolicyKind::ALL {
            let mut policy = PolicyBuilder::new(4).build(kind).unwrap();
            assert_eq!(policy.capacity(), 4);
            assert!(policy.is_empty());
            policy.observe(1, Operation::Read);
            assert_eq!(policy.stats().accesses(), 1);
        }
    }

    #[test]
    fn test_names_match_kinds() {
        let names: Vec<_> = PolicyKind::ALL
            .into_iter()
            .map(|kind| PolicyBuilder::new(2).build(kind).unwrap().name())
            .collect();
        assert_eq!(names, vec!["LRU", "LFU", "ARC", "LARC", "mARC"]);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("ARC".parse::<PolicyKind>().unwrap(), PolicyKind::Arc);
        assert_eq!(" mArc ".parse::<PolicyKind>().unwrap(), PolicyKind::Marc);
        assert_eq!(PolicyKind::Larc.to_string(), "larc");
        let err = "clock".parse::<PolicyKind>().unwrap_err();
        assert!(err.message().contains("clock"));
    }

    #[test]
    fn test_zero_capacity_fails() {
        for kind in PolicyKind::ALL {
            assert!(PolicyBuilder::new(0).build(kind).is_err());
        }
    }
}
