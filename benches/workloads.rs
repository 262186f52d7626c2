//! Workload benchmarks: hit rate and replay time of every policy on the same
//! synthetic traces.
//!
//! Run with: `cargo bench --bench workloads`
//!
//! A hit-rate table is printed once before the timed runs so scan
//! resistance (LARC, mARC) can be compared against ARC and the baselines.

mod common;

use std::time::Instant;

use cachesim::builder::{PolicyBuilder, PolicyKind};
use cachesim::traits::Access;
use common::workload::{Workload, WorkloadSpec, replay};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

const CAPACITY: usize = 1024;
const UNIVERSE: u64 = 8_192;
const OPS: usize = 100_000;
const SEED: u64 = 42;

// ============================================================================
// Workload definitions
// ============================================================================

fn workloads() -> Vec<(&'static str, Workload)> {
    vec![
        ("uniform", Workload::Uniform),
        (
            "hotset_90_10",
            Workload::Hotset {
                hot_fraction: 0.1,
                hot_prob: 0.9,
            },
        ),
        ("scan", Workload::Scan),
        ("zipfian_0.99", Workload::Zipfian { theta: 0.99 }),
        (
            "scan_polluted",
            Workload::ScanPolluted {
                hot_fraction: 0.05,
                scan_every: 2_000,
                scan_length: 4_000,
            },
        ),
    ]
}

fn traces() -> Vec<(&'static str, Vec<Access>)> {
    workloads()
        .into_iter()
        .map(|(name, workload)| {
            let spec = WorkloadSpec {
                universe: UNIVERSE,
                workload,
                seed: SEED,
            };
            (name, spec.trace(OPS))
        })
        .collect()
}

fn print_hit_rates(traces: &[(&'static str, Vec<Access>)]) {
    println!();
    println!("{:<16} {:>8} {:>10} {:>12} {:>10}", "workload", "policy", "hit %", "admissions", "ms");
    for (name, trace) in traces {
        for kind in PolicyKind::ALL {
            let Ok(mut policy) = PolicyBuilder::new(CAPACITY).build(kind) else {
                continue;
            };
            let start = Instant::now();
            let stats = replay(&mut policy, trace);
            let elapsed = start.elapsed();
            let admissions = stats
                .admissions
                .map_or_else(|| "-".to_string(), |n| n.to_string());
            println!(
                "{:<16} {:>8} {:>9.2}% {:>12} {:>10.2}",
                name,
                stats.policy,
                stats.hit_ratio() * 100.0,
                admissions,
                elapsed.as_secs_f64() * 1e3
            );
        }
    }
    println!();
}

fn bench_workloads(c: &mut Criterion) {
    let traces = traces();
    print_hit_rates(&traces);

    for (name, trace) in &traces {
        let mut group = c.benchmark_group(format!("replay/{name}"));
        group.throughput(Throughput::Elements(trace.len() as u64));
        group.sample_size(10);
        for kind in [PolicyKind::Lru, PolicyKind::Arc, PolicyKind::Larc, PolicyKind::Marc] {
            group.bench_with_input(BenchmarkId::from_parameter(kind), trace, |b, trace| {
                b.iter(|| {
                    let mut policy = PolicyBuilder::new(CAPACITY).build(kind).unwrap();
                    std::hint::black_box(replay(&mut policy, trace))
                })
            });
        }
        group.finish();
    }
}

criterion_group!(benches, bench_workloads);
criterion_main!(benches);
