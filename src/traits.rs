//! # Replacement Policy Contract
//!
//! Every policy in this crate is driven the same way: the simulator feeds it
//! one [`Access`] at a time through [`ReplacementPolicy::observe`] and reads
//! the accumulated [`PolicyStats`] back at the end.
//!
//! ```text
//!   trace ──► Access { address, operation } ──► observe() ──► hit: bool
//!                                                   │
//!                                                   ▼
//!                                   hits / misses / admissions counters
//!                                                   │
//!                                                   ▼
//!                                               stats()
//! ```
//!
//! ## Policy Comparison
//!
//! | Policy | Resident lists      | Admission                      | Adaptive state        |
//! |--------|---------------------|--------------------------------|-----------------------|
//! | LRU    | one                 | every miss                     | none                  |
//! | LFU    | one (+ frequency)   | every miss                     | none                  |
//! | ARC    | T1, T2 (+ B1, B2)   | every miss                     | `p`                   |
//! | LARC   | one                 | second sighting in filter      | filter bound `cr`     |
//! | mARC   | T1, T2 (+ B1, B2)   | filter, bypassed when unstable | `p`, `filSize`, regime |
//!
//! ## Thread Safety
//!
//! Policies are plain single-owner values with no interior mutability. A
//! driver replaying several capacities builds one independent instance per
//! capacity.

use std::fmt;
use std::str::FromStr;

use crate::stats::PolicyStats;

/// Operation tag carried by a trace record.
///
/// Payload only: no policy looks at it when deciding hits, evictions or
/// admission.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Operation {
    #[default]
    Read,
    Write,
    /// Any other tag, kept verbatim.
    Other(Box<str>),
}

impl Operation {
    /// Parses a tag; `R`/`read` and `W`/`write` are recognised in any case.
    pub fn parse(tag: &str) -> Self {
        let tag = tag.trim();
        if tag.eq_ignore_ascii_case("r") || tag.eq_ignore_ascii_case("read") {
            Operation::Read
        } else if tag.eq_ignore_ascii_case("w") || tag.eq_ignore_ascii_case("write") {
            Operation::Write
        } else {
            Operation::Other(tag.into())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Operation::Read => "R",
            Operation::Write => "W",
            Operation::Other(tag) => tag,
        }
    }
}

impl FromStr for Operation {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Operation::parse(s))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One trace event: a fixed-size block address plus its operation tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Access {
    pub address: u64,
    pub operation: Operation,
}

impl Access {
    pub fn new(address: u64, operation: Operation) -> Self {
        Self { address, operation }
    }

    pub fn read(address: u64) -> Self {
        Self::new(address, Operation::Read)
    }

    pub fn write(address: u64) -> Self {
        Self::new(address, Operation::Write)
    }
}

/// Uniform per-event contract shared by every replacement policy.
///
/// # Example
///
/// ```
/// use cachesim::policy::arc::ArcCache;
/// use cachesim::traits::{Operation, ReplacementPolicy};
///
/// fn replay<P: ReplacementPolicy>(policy: &mut P, addresses: &[u64]) -> u64 {
///     addresses
///         .iter()
///         .filter(|&&addr| policy.observe(addr, Operation::Read))
///         .count() as u64
/// }
///
/// let mut arc = ArcCache::new(2);
/// let hits = replay(&mut arc, &[1, 2, 1, 2]);
/// assert_eq!(hits, 2);
/// assert_eq!(arc.stats().hits, 2);
/// ```
pub trait ReplacementPolicy {
    /// Short label used in reports.
    fn name(&self) -> &'static str;

    /// Maximum number of resident addresses.
    fn capacity(&self) -> usize;

    /// Number of resident addresses.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `true` if `address` is resident. Does not touch recency.
    fn contains(&self, address: u64) -> bool;

    /// Processes one access to completion and reports whether it hit.
    fn observe(&mut self, address: u64, operation: Operation) -> bool;

    /// [`observe`](Self::observe) for a trace record.
    fn observe_access(&mut self, access: &Access) -> bool {
        self.observe(access.address, access.operation.clone())
    }

    /// Read-only snapshot of the counters.
    fn stats(&self) -> PolicyStats;

    /// Returns to the freshly constructed state.
    fn reset(&mut self);
}

impl<P: ReplacementPolicy + ?Sized> ReplacementPolicy for Box<P> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn capacity(&self) -> usize {
        (**self).capacity()
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn contains(&self, address: u64) -> bool {
        (**self).contains(address)
    }

    fn observe(&mut self, address: u64, operation: Operation) -> bool {
        (**self).observe(address, operation)
    }

    fn stats(&self) -> PolicyStats {
        (**self).stats()
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}
