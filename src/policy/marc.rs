//! Modified ARC (mARC): ARC with a regime-gated admission filter.
//!
//! mARC runs the full ARC algorithm ([`ArcCore`]) but, depending on the
//! detected workload [`Regime`], may put an [`AdmissionFilter`] in front of
//! the miss path. While the workload is `Unstable` every miss goes straight
//! into ARC; in `Stable` and `UniqueAccess` a miss must be a second sighting
//! to be admitted.
//!
//! ## Access Flow
//!
//! ```text
//!   observe(x):
//!     counter += 1
//!     x ∈ T1 ∪ T2   → ARC hit; hit counters += 1; filter shrinks
//!     regime filters?
//!       yes → filter grows; consult filter (filCounter += 1)
//!             first sighting  → miss, ARC untouched
//!             second sighting → hitSampleFil += 1; fall through
//!     admissions += 1; ARC miss handling (ghost adapt or cold insert)
//!
//!   after the access, every `capacity` accesses:
//!     counter ≥ 2·capacity → Regime::next(rates); reset? counter = hitState = 0
//!     hitSample = hitSampleFil = filCounter = 0
//! ```
//!
//! The hit rates handed to the detector are
//!
//! ```text
//!   state           = hitState     / counter
//!   sample          = hitSample    / capacity
//!   sample_filtered = hitSampleFil / filCounter   (0 when filCounter = 0)
//! ```
//!
//! ## Example Usage
//!
//! ```
//! use cachesim::policy::marc::MarcCache;
//! use cachesim::policy::regime::Regime;
//! use cachesim::traits::{Operation, ReplacementPolicy};
//!
//! let mut cache = MarcCache::new(10);
//! assert_eq!(cache.regime(), Regime::Unstable);
//! for addr in 0..100u64 {
//!     cache.observe(addr, Operation::Read);
//! }
//! assert_eq!(cache.regime(), Regime::UniqueAccess);
//! assert_eq!(cache.stats().hits, 0);
//! ```

use crate::ds::{AdmissionFilter, ArcList};
use crate::error::ConfigError;
use crate::policy::arc::ArcCore;
use crate::policy::regime::{HitRates, Regime};
use crate::stats::PolicyStats;
use crate::traits::{Operation, ReplacementPolicy};

/// Counters driving the regime detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowCounters {
    /// Accesses since the last regime reset.
    pub counter: u64,
    /// Hits since the last regime reset.
    pub hit_state: u64,
    /// Hits in the current window.
    pub hit_sample: u64,
    /// Filter admissions (second sightings) in the current window.
    pub hit_sample_filtered: u64,
    /// Filter consultations in the current window.
    pub filter_consultations: u64,
}

impl WindowCounters {
    fn rates(&self, capacity: usize) -> HitRates {
        HitRates {
            state: ratio(self.hit_state, self.counter),
            sample: ratio(self.hit_sample, capacity as u64),
            sample_filtered: ratio(self.hit_sample_filtered, self.filter_consultations),
        }
    }

    fn end_window(&mut self) {
        self.hit_sample = 0;
        self.hit_sample_filtered = 0;
        self.filter_consultations = 0;
    }
}

#[inline]
fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// mARC replacement policy over block addresses.
#[derive(Debug)]
pub struct MarcCache {
    core: ArcCore,
    filter: AdmissionFilter,
    regime: Regime,
    window: WindowCounters,
    hits: u64,
    misses: u64,
    admissions: u64,
}

impl MarcCache {
    /// Creates an mARC cache holding up to `capacity` addresses.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            core: ArcCore::try_new(capacity)?,
            filter: AdmissionFilter::new(capacity),
            regime: Regime::default(),
            window: WindowCounters::default(),
            hits: 0,
            misses: 0,
            admissions: 0,
        })
    }

    /// Creates an mARC cache holding up to `capacity` addresses.
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

    pub fn regime(&self) -> Regime {
        self.regime
    }

    /// Current filter window bound (`filSize`).
    pub fn filter_capacity(&self) -> usize {
        self.filter.window_capacity()
    }

    /// Addresses currently remembered by the filter.
    pub fn filter_len(&self) -> usize {
        self.filter.len()
    }

    pub fn window_counters(&self) -> WindowCounters {
        self.window
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

    fn access(&mut self, address: u64, operation: Operation) -> bool {
        if self.core.touch(address, operation.clone()) {
            self.hits += 1;
            self.window.hit_state += 1;
            self.window.hit_sample += 1;
            self.filter.shrink();
            return true;
        }

        if self.regime.filters() {
            self.filter.grow();
            self.window.filter_consultations += 1;
            if !self.filter.admit(address) {
                self.misses += 1;
                return false;
            }
            self.window.hit_sample_filtered += 1;
        }

        self.admissions += 1;
        self.misses += 1;
        self.core.admit(address, operation);
        false
    }

    fn close_window_if_due(&mut self) {
        let capacity = self.core.capacity() as u64;
        let counter = self.window.counter;
        if counter == 0 || counter % capacity != 0 {
            return;
        }

        if counter >= 2 * capacity {
            let rates = self.window.rates(self.core.capacity());
            let transition = self.regime.next(rates);
            if transition.regime != self.regime && tracing::enabled!(tracing::Level::DEBUG) {
                tracing::debug!(
                    from = %self.regime,
                    to = %transition.regime,
                    state = rates.state,
                    sample = rates.sample,
                    sample_filtered = rates.sample_filtered,
                    reset = transition.reset,
                    "mARC regime change"
                );
            }
            self.regime = transition.regime;
            if transition.reset {
                self.window.counter = 0;
                self.window.hit_state = 0;
            }
        }

        self.window.end_window();
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.core.debug_validate_invariants();
        self.filter.debug_validate_invariants();
        let capacity = self.core.capacity() as u64;
        assert!(self.window.hit_sample <= capacity);
        assert!(self.window.filter_consultations <= capacity);
        assert!(self.window.hit_sample_filtered <= self.window.filter_consultations);
        assert!(self.window.hit_state <= self.window.counter);
    }
}

impl ReplacementPolicy for MarcCache {
    fn name(&self) -> &'static str {
        "mARC"
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
        self.window.counter += 1;
        let hit = self.access(address, operation);
        self.close_window_if_due();
        debug_assert!(self.core.check_invariants().is_ok());
        hit
    }

    fn stats(&self) -> PolicyStats {
        PolicyStats {
            policy: self.name(),
            capacity: self.core.capacity(),
            hits: self.hits,
            misses: self.misses,
            admissions: Some(self.admissions),
        }
    }

    fn reset(&mut self) {
        self.core.clear();
        self.filter.reset();
        self.regime = Regime::default();
        self.window = WindowCounters::default();
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
        /// ARC bounds and detector counter bounds hold after every access.
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_bounds_hold(
            capacity in 1usize..24,
            addrs in prop::collection::vec(0u64..80, 0..500)
        ) {
            let mut cache = MarcCache::new(capacity);
            for &addr in &addrs {
                cache.observe(addr, Operation::Read);
                prop_assert!(cache.len() <= capacity);
                prop_assert!(cache.filter_len() <= cache.filter_capacity());
                cache.debug_validate_invariants();
            }
            let stats = cache.stats();
            prop_assert_eq!(stats.accesses(), addrs.len() as u64);
            prop_assert!(stats.admissions.unwrap_or(0) <= stats.misses);
        }
    }
}
