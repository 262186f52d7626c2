//! Workload generators for hit-rate benchmarks.
//!
//! Deterministic address streams driven by a seeded XorShift64, so every
//! policy sees exactly the same trace.

use cachesim::stats::PolicyStats;
use cachesim::traits::{Access, Operation, ReplacementPolicy};

#[derive(Debug, Clone, Copy)]
pub enum Workload {
    /// Uniform random addresses in `[0, universe)`.
    Uniform,
    /// Hot/cold split with a configurable hot fraction and hot access probability.
    Hotset { hot_fraction: f64, hot_prob: f64 },
    /// Sequential scan in `[0, universe)`.
    Scan,
    /// Zipfian distribution; `theta` 0.0 = uniform, 0.99 = highly skewed.
    Zipfian { theta: f64 },
    /// Hot set interrupted by one-off scans of never-repeating addresses.
    ScanPolluted {
        hot_fraction: f64,
        scan_every: u64,
        scan_length: u64,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct WorkloadSpec {
    pub universe: u64,
    pub workload: Workload,
    pub seed: u64,
}

impl WorkloadSpec {
    pub fn generator(self) -> WorkloadGenerator {
        WorkloadGenerator::new(self.universe, self.workload, self.seed)
    }

    /// Materialises `len` accesses; every eighth access is a write.
    pub fn trace(self, len: usize) -> Vec<Access> {
        let mut generator = self.generator();
        (0..len)
            .map(|i| {
                let operation = if i % 8 == 7 {
                    Operation::Write
                } else {
                    Operation::Read
                };
                Access::new(generator.next_address(), operation)
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct WorkloadGenerator {
    universe: u64,
    workload: Workload,
    rng: XorShift64,
    position: u64,
    scan_cursor: u64,
    zipfian: Option<ZipfianState>,
}

impl WorkloadGenerator {
    pub fn new(universe: u64, workload: Workload, seed: u64) -> Self {
        let universe = universe.max(1);
        let zipfian = match workload {
            Workload::Zipfian { theta } => Some(ZipfianState::new(universe, theta)),
            _ => None,
        };
        Self {
            universe,
            workload,
            rng: XorShift64::new(seed),
            position: 0,
            scan_cursor: universe,
            zipfian,
        }
    }

    pub fn next_address(&mut self) -> u64 {
        let position = self.position;
        self.position += 1;
        match self.workload {
            Workload::Uniform => self.rng.next_u64() % self.universe,
            Workload::Hotset {
                hot_fraction,
                hot_prob,
            } => self.hotset(hot_fraction, hot_prob),
            Workload::Scan => position % self.universe,
            Workload::Zipfian { .. } => match &self.zipfian {
                Some(zipf) => zipf.sample(self.rng.next_f64()),
                None => 0,
            },
            Workload::ScanPolluted {
                hot_fraction,
                scan_every,
                scan_length,
            } => {
                let period = scan_every.max(1) + scan_length;
                if position % period >= scan_every.max(1) {
                    // Fresh addresses above the universe never repeat.
                    self.scan_cursor += 1;
                    self.scan_cursor
                } else {
                    self.hotset(hot_fraction, 1.0)
                }
            },
        }
    }

    fn hotset(&mut self, hot_fraction: f64, hot_prob: f64) -> u64 {
        let hot_fraction = hot_fraction.clamp(0.0, 1.0);
        let hot_prob = hot_prob.clamp(0.0, 1.0);
        let hot_size = ((self.universe as f64) * hot_fraction).round() as u64;
        let hot_size = hot_size.max(1).min(self.universe);
        if self.rng.next_f64() < hot_prob {
            self.rng.next_u64() % hot_size
        } else if hot_size == self.universe {
            self.rng.next_u64() % self.universe
        } else {
            hot_size + (self.rng.next_u64() % (self.universe - hot_size))
        }
    }
}

/// Replays `trace` into `policy` and returns its final counters.
pub fn replay<P: ReplacementPolicy + ?Sized>(policy: &mut P, trace: &[Access]) -> PolicyStats {
    for access in trace {
        policy.observe_access(access);
    }
    policy.stats()
}

/// Zipfian distribution state for inverse CDF sampling (YCSB algorithm).
#[derive(Debug, Clone)]
struct ZipfianState {
    n: u64,
    theta: f64,
    zeta_n: f64,
    alpha: f64,
    eta: f64,
}

impl ZipfianState {
    fn new(n: u64, theta: f64) -> Self {
        let theta = theta.clamp(0.0, 0.9999);
        let zeta_2 = Self::zeta(2, theta);
        let zeta_n = Self::zeta(n, theta);
        let alpha = 1.0 / (1.0 - theta);
        let eta = (1.0 - (2.0 / n as f64).powf(1.0 - theta)) / (1.0 - zeta_2 / zeta_n);

        Self {
            n,
            theta,
            zeta_n,
            alpha,
            eta,
        }
    }

    fn zeta(n: u64, theta: f64) -> f64 {
        (1..=n).map(|i| 1.0 / (i as f64).powf(theta)).sum()
    }

    fn sample(&self, u: f64) -> u64 {
        let uz = u * self.zeta_n;
        if uz < 1.0 {
            return 0;
        }
        if uz < 1.0 + 0.5_f64.powf(self.theta) {
            return 1;
        }
        let spread = (self.n as f64) * (self.eta * u - self.eta + 1.0).powf(self.alpha);
        (spread as u64).min(self.n - 1)
    }
}

#[derive(Debug, Clone, Copy)]
struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    fn next_f64(&mut self) -> f64 {
        const SCALE: f64 = 1.0 / (u64::MAX as f64);
        (self.next_u64() as f64) * SCALE
    }
}
