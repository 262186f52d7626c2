//! Workload regime detector used by mARC.
//!
//! Every `capacity` accesses the detector compares the hit rate of the last
//! window (`sample`) with the hit rate accumulated since the last reset
//! (`state`) and decides whether the admission filter should be in front of
//! the cache.
//!
//! ```text
//!                 sample < 0.9·state  (reset)
//!     ┌────────┐ ─────────────────────────────► ┌──────────┐
//!     │ Stable │                                │ Unstable │ (initial)
//!     └────────┘ ◄───────────────────────────── └──────────┘
//!                 sample ∈ [0.9, 1.1]·state          │   ▲
//!                 or (sample ≥ 1.2·state             │   │ 0.1·sample > filtered
//!                     and sample > 0.2)              │   │ or sample > 0.1
//!                                                    │   │ (reset)
//!               0.5·state > sample or sample < 0.1   ▼   │
//!                                               ┌──────────────┐
//!                                               │ UniqueAccess │
//!                                               └──────────────┘
//! ```
//!
//! The filter is bypassed only while `Unstable`.

use std::fmt;

const STABLE_DROP: f64 = 0.9;
const BAND_LOW: f64 = 0.9;
const BAND_HIGH: f64 = 1.1;
const SURGE: f64 = 1.2;
const SURGE_FLOOR: f64 = 0.2;
const COLLAPSE: f64 = 0.5;
const UNIQUE_FLOOR: f64 = 0.1;
const FILTERED_SHARE: f64 = 0.1;
const RECOVERY_FLOOR: f64 = 0.1;

/// Detected workload regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Regime {
    /// Hit rate steady; filter active.
    Stable,
    /// Hit rate shifting; filter bypassed.
    #[default]
    Unstable,
    /// Mostly one-off addresses; filter active.
    UniqueAccess,
}

/// Hit rates fed to [`Regime::next`], each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HitRates {
    /// Hits since the last reset over accesses since the last reset.
    pub state: f64,
    /// Hits in the last window over the window length (`capacity`).
    pub sample: f64,
    /// Filter re-sightings in the last window over filter consultations.
    pub sample_filtered: f64,
}

/// Outcome of one window evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub regime: Regime,
    /// Whether the long-run counters (`counter`, `hitState`) restart.
    pub reset: bool,
}

impl Regime {
    /// `true` when misses must pass the admission filter.
    pub fn filters(self) -> bool {
        !matches!(self, Regime::Unstable)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Regime::Stable => "stable",
            Regime::Unstable => "unstable",
            Regime::UniqueAccess => "unique-access",
        }
    }

    /// Evaluates one window.
    pub fn next(self, rates: HitRates) -> Transition {
        let HitRates {
            state,
            sample,
            sample_filtered,
        } = rates;

        match self {
            Regime::Stable if sample < STABLE_DROP * state => Transition {
                regime: Regime::Unstable,
                reset: true,
            },
            Regime::Stable => Transition {
                regime: Regime::Stable,
                reset: false,
            },
            Regime::Unstable => {
                // A zero baseline would make the band [0, 0] swallow a
                // dead workload; only the surge and unique tests apply then.
                let in_band =
                    state > 0.0 && sample >= BAND_LOW * state && sample <= BAND_HIGH * state;
                let surged = sample >= SURGE * state && sample > SURGE_FLOOR;
                let regime = if in_band || surged {
                    Regime::Stable
                } else if COLLAPSE * state > sample || sample < UNIQUE_FLOOR {
                    Regime::UniqueAccess
                } else {
                    Regime::Unstable
                };
                Transition {
                    regime,
                    reset: false,
                }
            },
            Regime::UniqueAccess
                if FILTERED_SHARE * sample > sample_filtered || sample > RECOVERY_FLOOR =>
            {
                Transition {
                    regime: Regime::Unstable,
                    reset: true,
                }
            },
            Regime::UniqueAccess => Transition {
                regime: Regime::UniqueAccess,
                reset: false,
            },
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
