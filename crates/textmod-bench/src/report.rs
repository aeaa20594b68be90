//! Aggregate statistics over one benchmark run
//!
//! A [`Report`] keeps raw, unrounded values. Rounding happens only when the
//! report is serialized or displayed: latencies, seconds and throughput to two
//! decimals, percentages to one.

use crate::outcome::{duration_ms, Outcome};
use serde::{Serialize, Serializer};
use std::fmt;
use std::time::Duration;

/// Percentile reported as `p95_latency_ms`
pub const P95: usize = 95;

/// Immutable summary of a benchmark run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    total_requests: usize,
    successful: usize,
    failed: usize,
    #[serde(serialize_with = "one_decimal")]
    success_rate_percent: f64,
    #[serde(serialize_with = "one_decimal")]
    failed_rate_percent: f64,
    #[serde(serialize_with = "two_decimals")]
    total_time_seconds: f64,
    #[serde(serialize_with = "two_decimals")]
    requests_per_second: f64,
    #[serde(serialize_with = "two_decimals")]
    avg_latency_ms: f64,
    #[serde(serialize_with = "two_decimals")]
    min_latency_ms: f64,
    #[serde(serialize_with = "two_decimals")]
    max_latency_ms: f64,
    #[serde(serialize_with = "two_decimals")]
    p95_latency_ms: f64,
}

impl Report {
    /// Reduce the outcomes of a run into a report.
    ///
    /// `total` is the wall-clock duration of the whole run and only feeds
    /// throughput. Latency statistics cover successful outcomes only and are
    /// zero when there are none.
    pub fn from_outcomes(outcomes: &[Outcome], total: Duration) -> Self {
        let total_requests = outcomes.len();

        let mut latencies: Vec<f64> = outcomes
            .iter()
            .filter_map(Outcome::success_latency_ms)
            .collect();
        latencies.sort_by(f64::total_cmp);

        let successful = latencies.len();
        let failed = total_requests - successful;

        let (success_rate_percent, failed_rate_percent) = if total_requests == 0 {
            (0.0, 0.0)
        } else {
            (
                successful as f64 * 100.0 / total_requests as f64,
                failed as f64 * 100.0 / total_requests as f64,
            )
        };

        let total_time_seconds = total.as_secs_f64();
        let requests_per_second = if total_time_seconds > 0.0 {
            successful as f64 / total_time_seconds
        } else {
            0.0
        };

        let avg_latency_ms = if latencies.is_empty() {
            0.0
        } else {
            latencies.iter().sum::<f64>() / successful as f64
        };

        Self {
            total_requests,
            successful,
            failed,
            success_rate_percent,
            failed_rate_percent,
            total_time_seconds,
            requests_per_second,
            avg_latency_ms,
            min_latency_ms: latencies.first().copied().unwrap_or(0.0),
            max_latency_ms: latencies.last().copied().unwrap_or(0.0),
            p95_latency_ms: percentile_nearest_rank(&latencies, P95),
        }
    }

    pub fn total_requests(&self) -> usize {
        self.total_requests
    }

    pub fn successful(&self) -> usize {
        self.successful
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn success_rate_percent(&self) -> f64 {
        self.success_rate_percent
    }

    pub fn failed_rate_percent(&self) -> f64 {
        self.failed_rate_percent
    }

    pub fn total_time_seconds(&self) -> f64 {
        self.total_time_seconds
    }

    /// Successful outcomes per second of run wall-clock time
    pub fn requests_per_second(&self) -> f64 {
        self.requests_per_second
    }

    pub fn avg_latency_ms(&self) -> f64 {
        self.avg_latency_ms
    }

    pub fn min_latency_ms(&self) -> f64 {
        self.min_latency_ms
    }

    pub fn max_latency_ms(&self) -> f64 {
        self.max_latency_ms
    }

    pub fn p95_latency_ms(&self) -> f64 {
        self.p95_latency_ms
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Benchmark report")?;
        writeln!(
            f,
            "  requests:      {} total, {} successful, {} failed",
            self.total_requests, self.successful, self.failed
        )?;
        writeln!(
            f,
            "  success rate:  {:.1}% (failed {:.1}%)",
            self.success_rate_percent, self.failed_rate_percent
        )?;
        writeln!(f, "  total time:    {:.2} s", self.total_time_seconds)?;
        writeln!(f, "  throughput:    {:.2} req/s", self.requests_per_second)?;
        write!(
            f,
            "  latency (ms):  avg {:.2}, min {:.2}, max {:.2}, p95 {:.2}",
            self.avg_latency_ms, self.min_latency_ms, self.max_latency_ms, self.p95_latency_ms
        )
    }
}

/// Nearest-rank percentile over ascending `sorted` values.
///
/// Selects the value at index `floor(percent / 100 * n)`, clamped to the last
/// element, without interpolation. An empty input yields `0.0`.
///
/// For the 95th percentile: n=1 selects index 0, n=2 index 1, n=20 index 19
/// and n=100 index 95 (the 96th smallest value).
pub fn percentile_nearest_rank(sorted: &[f64], percent: usize) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }

    let index = (sorted.len() * percent / 100).min(sorted.len() - 1);
    sorted[index]
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn one_decimal<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round_to(*value, 1))
}

fn two_decimals<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round_to(*value, 2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use textmod_core::LabelScore;

    fn success_ms(ms: u64) -> Outcome {
        Outcome::success(Duration::from_millis(ms), vec![LabelScore::new("OK", 1.0)])
    }

    fn failure() -> Outcome {
        Outcome::failure(Some(Duration::from_millis(1)), "classification unavailable")
    }

    #[test]
    fn test_empty_run_is_zero_filled() {
        let report = Report::from_outcomes(&[], Duration::ZERO);

        assert_eq!(report.total_requests(), 0);
        assert_eq!(report.successful(), 0);
        assert_eq!(report.failed(), 0);
        assert_eq!(report.success_rate_percent(), 0.0);
        assert_eq!(report.failed_rate_percent(), 0.0);
        assert_eq!(report.requests_per_second(), 0.0);
        assert_eq!(report.avg_latency_ms(), 0.0);
        assert_eq!(report.p95_latency_ms(), 0.0);
    }

    #[test]
    fn test_mixed_outcomes() {
        let mut outcomes: Vec<Outcome> = (0..7).map(|_| success_ms(5)).collect();
        outcomes.insert(2, failure());
        outcomes.insert(5, failure());
        outcomes.push(failure());

        let report = Report::from_outcomes(&outcomes, Duration::from_millis(50));

        assert_eq!(report.total_requests(), 10);
        assert_eq!(report.successful(), 7);
        assert_eq!(report.failed(), 3);
        assert_eq!(report.success_rate_percent(), 70.0);
        assert_eq!(report.failed_rate_percent(), 30.0);
        assert_eq!(report.avg_latency_ms(), 5.0);
        assert_eq!(report.min_latency_ms(), 5.0);
        assert_eq!(report.max_latency_ms(), 5.0);
    }

    #[test]
    fn test_all_failures_have_zero_latency_stats() {
        let outcomes: Vec<Outcome> = (0..4).map(|_| failure()).collect();
        let report = Report::from_outcomes(&outcomes, Duration::from_millis(4));

        assert_eq!(report.successful(), 0);
        assert_eq!(report.failed(), 4);
        assert_eq!(report.failed_rate_percent(), 100.0);
        assert_eq!(report.avg_latency_ms(), 0.0);
        assert_eq!(report.min_latency_ms(), 0.0);
        assert_eq!(report.max_latency_ms(), 0.0);
        assert_eq!(report.p95_latency_ms(), 0.0);
        assert_eq!(report.requests_per_second(), 0.0);
    }

    #[test]
    fn test_throughput_counts_successes_over_run_time() {
        let mut outcomes: Vec<Outcome> = (0..10).map(|_| success_ms(100)).collect();
        outcomes.push(failure());

        let report = Report::from_outcomes(&outcomes, Duration::from_secs(2));
        assert_eq!(report.requests_per_second(), 5.0);
        assert_eq!(report.total_time_seconds(), 2.0);
    }

    #[test]
    fn test_p95_over_hundred_values() {
        // Reverse order to prove the report sorts before selecting.
        let outcomes: Vec<Outcome> = (1..=100).rev().map(|i| success_ms(i * 10)).collect();
        let report = Report::from_outcomes(&outcomes, Duration::from_secs(1));

        assert_eq!(report.p95_latency_ms(), 960.0);
        assert_eq!(report.min_latency_ms(), 10.0);
        assert_eq!(report.max_latency_ms(), 1000.0);
        assert_eq!(report.avg_latency_ms(), 505.0);
    }

    #[test]
    fn test_percentile_boundary_sizes() {
        assert_eq!(percentile_nearest_rank(&[], P95), 0.0);
        assert_eq!(percentile_nearest_rank(&[7.0], P95), 7.0);
        assert_eq!(percentile_nearest_rank(&[1.0, 2.0], P95), 2.0);

        let twenty: Vec<f64> = (1..=20).map(f64::from).collect();
        assert_eq!(percentile_nearest_rank(&twenty, P95), 20.0);

        assert_eq!(percentile_nearest_rank(&[1.0, 2.0, 3.0], 100), 3.0);
        assert_eq!(percentile_nearest_rank(&[1.0, 2.0, 3.0], 0), 1.0);
    }

    #[test]
    fn test_rounding_only_at_serialization() {
        let outcomes = vec![
            Outcome::success(Duration::from_micros(1_234), vec![]),
            Outcome::success(Duration::from_micros(1_235), vec![]),
            failure(),
        ];
        let report = Report::from_outcomes(&outcomes, Duration::from_millis(3));

        // Raw values stay exact.
        assert_eq!(report.min_latency_ms(), 1.234);
        assert!((report.success_rate_percent() - 66.666_666).abs() < 1e-3);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["min_latency_ms"], 1.23);
        assert_eq!(json["success_rate_percent"], 66.7);
        assert_eq!(json["failed_rate_percent"], 33.3);
        assert_eq!(json["total_time_seconds"], 0.0);
    }

    #[test]
    fn test_serializes_every_canonical_field() {
        let report = Report::from_outcomes(&[], Duration::ZERO);
        let json = serde_json::to_value(&report).unwrap();
        let object = json.as_object().unwrap();

        for field in [
            "total_requests",
            "successful",
            "failed",
            "success_rate_percent",
            "failed_rate_percent",
            "total_time_seconds",
            "requests_per_second",
            "avg_latency_ms",
            "min_latency_ms",
            "max_latency_ms",
            "p95_latency_ms",
        ] {
            assert!(object.contains_key(field), "missing {field}");
        }
        assert_eq!(object.len(), 11);
    }

    #[test]
    fn test_display_rounds() {
        let outcomes = vec![success_ms(5), failure()];
        let text = Report::from_outcomes(&outcomes, Duration::from_millis(8)).to_string();

        assert!(text.contains("2 total, 1 successful, 1 failed"));
        assert!(text.contains("50.0%"));
        assert!(text.contains("avg 5.00"));
    }
}
