//! Trace replay driver.
//!
//! Replays one trace against one policy kind at several capacities. Every
//! capacity gets a freshly built policy so runs never share state.
//!
//! ```text
//!   trace: Vec<Access>
//!      │
//!      ├──► PolicyBuilder(size₁).build(kind) ──► replay ──► RunReport
//!      ├──► PolicyBuilder(size₂).build(kind) ──► replay ──► RunReport
//!      └──► ...
//! ```
//!
//! ## Example
//!
//! ```
//! use cachesim::builder::PolicyKind;
//! use cachesim::sim::Simulator;
//! use cachesim::traits::Access;
//!
//! let trace: Vec<Access> = [1, 2, 1, 3, 1].into_iter().map(Access::read).collect();
//! let sim = Simulator::new(PolicyKind::Lru, vec![1, 2]).unwrap();
//! let reports = sim.run(&trace).unwrap();
//! assert_eq!(reports.len(), 2);
//! assert_eq!(reports[1].stats.hits, 2);
//! ```

use std::fmt::Write as _;
use std::io::Write;
use std::str::FromStr;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::builder::{PolicyBuilder, PolicyKind};
use crate::error::{ConfigError, SimError};
use crate::stats::PolicyStats;
use crate::traits::{Access, ReplacementPolicy};

/// Outcome of replaying a trace at one capacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunReport {
    pub stats: PolicyStats,
    /// Wall-clock replay time, construction excluded.
    pub elapsed: Duration,
}

/// Flat JSON form of a [`RunReport`].
#[derive(Debug, Serialize)]
struct ReportRecord {
    policy: &'static str,
    capacity: usize,
    hits: u64,
    misses: u64,
    admissions: Option<u64>,
    hit_ratio: f64,
    elapsed_secs: f64,
}

impl From<&RunReport> for ReportRecord {
    fn from(report: &RunReport) -> Self {
        let stats = &report.stats;
        Self {
            policy: stats.policy,
            capacity: stats.capacity,
            hits: stats.hits,
            misses: stats.misses,
            admissions: stats.admissions,
            hit_ratio: stats.hit_ratio(),
            elapsed_secs: report.elapsed.as_secs_f64(),
        }
    }
}

impl RunReport {
    /// Plain-text summary, one `key: value` per line.
    ///
    /// ```text
    /// cache size: 100
    /// cache hit: 40
    /// cache miss: 60
    /// cache hit ratio: 40.0000%
    /// cache write count: 55
    /// time execution:   0.0012
    /// ```
    ///
    /// The write count line only appears for policies that report
    /// admissions; LARC labels it plain `write count`.
    pub fn render_text(&self) -> String {
        let stats = &self.stats;
        let mut out = String::new();
        let _ = writeln!(out, "cache size: {}", stats.capacity);
        let _ = writeln!(out, "cache hit: {}", stats.hits);
        let _ = writeln!(out, "cache miss: {}", stats.misses);
        let _ = writeln!(out, "cache hit ratio: {:.4}%", stats.hit_ratio() * 100.0);
        if let Some(writes) = stats.admissions {
            let _ = writeln!(out, "{}: {writes}", write_count_label(stats.policy));
        }
        let _ = writeln!(out, "time execution: {:8.4}", self.elapsed.as_secs_f64());
        out
    }
}

fn write_count_label(policy: &str) -> &'static str {
    match policy {
        "LARC" => "write count",
        _ => "cache write count",
    }
}

/// Report encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(ConfigError::new(format!(
                "unknown format {other:?}; expected text or json"
            ))),
        }
    }
}

/// Writes `reports` to `out` in the requested format.
///
/// Text reports are separated by blank lines; JSON is a single pretty-printed
/// array.
///
/// # Errors
///
/// [`SimError::Report`] on write failure, [`SimError::Encode`] if JSON
/// encoding fails.
pub fn write_reports<W: Write>(
    reports: &[RunReport],
    format: OutputFormat,
    mut out: W,
) -> Result<(), SimError> {
    match format {
        OutputFormat::Text => {
            for (i, report) in reports.iter().enumerate() {
                if i > 0 {
                    writeln!(out)?;
                }
                out.write_all(report.render_text().as_bytes())?;
            }
        },
        OutputFormat::Json => {
            let records: Vec<ReportRecord> = reports.iter().map(ReportRecord::from).collect();
            let rendered = serde_json::to_string_pretty(&records)?;
            writeln!(out, "{rendered}")?;
        },
    }
    out.flush()?;
    Ok(())
}

/// Replays a trace for one policy kind over a list of capacities.
#[derive(Debug, Clone)]
pub struct Simulator {
    kind: PolicyKind,
    sizes: Vec<usize>,
}

impl Simulator {
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `sizes` is empty or contains zero.
    pub fn new(kind: PolicyKind, sizes: Vec<usize>) -> Result<Self, ConfigError> {
        if sizes.is_empty() {
            return Err(ConfigError::new("no cache sizes given"));
        }
        if let Some(pos) = sizes.iter().position(|&size| size == 0) {
            return Err(ConfigError::new(format!(
                "cache size #{} must be greater than zero",
                pos + 1
            )));
        }
        Ok(Self { kind, sizes })
    }

    pub fn kind(&self) -> PolicyKind {
        self.kind
    }

    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Replays `trace` once per configured size, in the order given.
    ///
    /// # Errors
    ///
    /// Propagates policy construction failures.
    pub fn run(&self, trace: &[Access]) -> Result<Vec<RunReport>, SimError> {
        self.sizes
            .iter()
            .map(|&size| self.run_one(size, trace))
            .collect()
    }

    fn run_one(&self, size: usize, trace: &[Access]) -> Result<RunReport, SimError> {
        let mut policy = PolicyBuilder::new(size).build(self.kind)?;
        tracing::debug!(policy = %self.kind, size, accesses = trace.len(), "replay start");

        let start = Instant::now();
        for access in trace {
            policy.observe_access(access);
        }
        let elapsed = start.elapsed();

        let stats = policy.stats();
        tracing::debug!(
            policy = %self.kind,
            size,
            hits = stats.hits,
            misses = stats.misses,
            elapsed_ms = elapsed.as_secs_f64() * 1e3,
            "replay finished"
        );
        Ok(RunReport { stats, elapsed })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reads(addresses: &[u64]) -> Vec<Access> {
        addresses.iter().copied().map(Access::read).collect()
    }

    fn report(admissions: Option<u64>) -> RunReport {
        RunReport {
            stats: PolicyStats {
                policy: "mARC",
                capacity: 100,
                hits: 40,
                misses: 60,
                admissions,
            },
            elapsed: Duration::from_millis(1500),
        }
    }

    #[test]
    fn new_rejects_empty_and_zero_sizes() {
        assert!(Simulator::new(PolicyKind::Arc, vec![]).is_err());
        let err = Simulator::new(PolicyKind::Arc, vec![4, 0]).unwrap_err();
        assert!(err.message().contains("#2"));
    }

    #[test]
    fn run_reports_in_size_order() {
        let sim = Simulator::new(PolicyKind::Arc, vec![3, 1, 2]).unwrap();
        let reports = sim.run(&reads(&[1, 2, 3, 1, 2, 3])).unwrap();
        let caps: Vec<_> = reports.iter().map(|r| r.stats.capacity).collect();
        assert_eq!(caps, vec![3, 1, 2]);
        assert_eq!(reports[0].stats.hits, 3);
        for report in &reports {
            assert_eq!(report.stats.accesses(), 6);
            assert_eq!(report.stats.policy, "ARC");
        }
    }

    #[test]
    fn runs_do_not_share_state() {
        let sim = Simulator::new(PolicyKind::Lru, vec![2, 2]).unwrap();
        let reports = sim.run(&reads(&[1, 1, 1])).unwrap();
        assert_eq!(reports[0].stats, reports[1].stats);
    }

    #[test]
    fn render_text_matches_report_layout() {
        let text = report(Some(55)).render_text();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "cache size: 100",
                "cache hit: 40",
                "cache miss: 60",
                "cache hit ratio: 40.0000%",
                "cache write count: 55",
                "time execution:   1.5000",
            ]
        );
    }

    #[test]
    fn render_text_uses_plain_write_count_label_for_larc() {
        let mut larc = report(Some(7));
        larc.stats.policy = "LARC";
        let text = larc.render_text();
        assert!(text.lines().any(|line| line == "write count: 7"));
        assert!(!text.contains("cache write count"));
    }

    #[test]
    fn render_text_omits_write_count_without_admissions() {
        let text = report(None).render_text();
        assert!(!text.contains("write count"));
        assert_eq!(text.lines().count(), 5);
    }

    #[test]
    fn render_text_empty_trace_has_zero_ratio() {
        let sim = Simulator::new(PolicyKind::Marc, vec![4]).unwrap();
        let reports = sim.run(&[]).unwrap();
        assert!(reports[0].render_text().contains("cache hit ratio: 0.0000%"));
    }

    #[test]
    fn json_output_is_an_array_of_records() {
        let mut buf = Vec::new();
        write_reports(&[report(Some(55)), report(None)], OutputFormat::Json, &mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        let records = value.as_array().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["admissions"], 55);
        assert!(records[1]["admissions"].is_null());
        assert_eq!(records[0]["hit_ratio"], 0.4);
        assert_eq!(records[0]["elapsed_secs"], 1.5);
    }

    #[test]
    fn text_output_separates_reports() {
        let mut buf = Vec::new();
        write_reports(&[report(None), report(None)], OutputFormat::Text, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.matches("cache size: 100").count(), 2);
        assert!(text.contains("\n\ncache size"));
    }

    #[test]
    fn output_format_parses() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
