//! textmod Bench
//!
//! Latency benchmarking harness for the `classify` contract.
//!
//! A run dispatches a fixed batch of [`Sample`](textmod_core::Sample)s through a
//! [`Dispatcher`], times every call individually, records one [`Outcome`] per
//! sample, and reduces the outcomes into an immutable [`Report`]:
//!
//! - Per-call latency feeds the average/min/max/p95 statistics (successes only)
//! - Wall-clock time of the whole run feeds throughput
//! - A failing sample is recorded as a failure and never aborts the batch
//!
//! Dispatch is either strictly sequential (the default, so total run time is
//! roughly the sum of latencies) or concurrent over a bounded worker pool.

pub mod config;
pub mod corpus;
pub mod dispatch;
pub mod outcome;
pub mod report;
pub mod runner;

pub use config::{BenchConfig, DispatchMode, StrategyKind};
pub use corpus::{BenchmarkRequest, Corpus};
pub use dispatch::{Dispatcher, HttpDispatcher, InProcessDispatcher};
pub use outcome::Outcome;
pub use report::{percentile_nearest_rank, Report};
pub use runner::{BenchmarkRun, BenchmarkRunner, DispatchStrategy};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::BenchConfig;
    pub use crate::corpus::{BenchmarkRequest, Corpus};
    pub use crate::dispatch::{Dispatcher, HttpDispatcher, InProcessDispatcher};
    pub use crate::outcome::Outcome;
    pub use crate::report::Report;
    pub use crate::runner::{BenchmarkRunner, DispatchStrategy};
}
