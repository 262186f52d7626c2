//! Hit/miss statistics snapshot returned by every policy.

use serde::Serialize;

/// Counters accumulated by a policy since construction (or the last reset).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PolicyStats {
    pub policy: &'static str,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
    /// Misses that actually entered the cache. Only filtered policies
    /// (LARC, mARC) report this; everyone else admits every miss.
    pub admissions: Option<u64>,
}

impl PolicyStats {
    /// Total observed accesses.
    pub fn accesses(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of accesses that hit, in `[0, 1]`; `0.0` before any access.
    pub fn hit_ratio(&self) -> f64 {
        match self.accesses() {
            0 => 0.0,
            total => self.hits as f64 / total as f64,
        }
    }

    /// Fraction of accesses that missed; `0.0` before any access.
    pub fn miss_ratio(&self) -> f64 {
        match self.accesses() {
            0 => 0.0,
            total => self.misses as f64 / total as f64,
        }
    }
}
