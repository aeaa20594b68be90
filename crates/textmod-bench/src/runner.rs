//! Benchmark runner

use crate::dispatch::Dispatcher;
use crate::outcome::{duration_ms, Outcome};
use crate::report::Report;
use futures::stream::{self, StreamExt};
use std::future::Future;
use std::num::NonZeroUsize;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::{Duration, Instant};
use textmod_core::{validate_labels, Error, Result, Sample};
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

/// How samples are dispatched within a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchStrategy {
    /// Sample `i + 1` is not dispatched before sample `i` resolves
    #[default]
    Sequential,

    /// At most `workers` samples are in flight at once
    Concurrent { workers: NonZeroUsize },
}

impl DispatchStrategy {
    /// Concurrent dispatch; zero workers is treated as one
    pub fn concurrent(workers: usize) -> Self {
        Self::Concurrent {
            workers: NonZeroUsize::new(workers).unwrap_or(NonZeroUsize::MIN),
        }
    }

    /// Number of samples allowed in flight
    pub fn workers(&self) -> usize {
        match self {
            Self::Sequential => 1,
            Self::Concurrent { workers } => workers.get(),
        }
    }
}

/// Outcomes of a run, in dispatch order, with their report
#[derive(Debug, Clone)]
pub struct BenchmarkRun {
    pub outcomes: Vec<Outcome>,
    pub report: Report,
}

/// Dispatches a batch of samples and reports latency statistics.
///
/// The runner holds a long-lived dispatcher and can be reused across runs;
/// each run is independent.
pub struct BenchmarkRunner {
    dispatcher: Arc<dyn Dispatcher>,
    strategy: DispatchStrategy,
    timeout: Option<Duration>,
}

impl BenchmarkRunner {
    pub fn new(dispatcher: Arc<dyn Dispatcher>, strategy: DispatchStrategy) -> Self {
        Self {
            dispatcher,
            strategy,
            timeout: None,
        }
    }

    /// Fail any single dispatch that takes longer than `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn strategy(&self) -> DispatchStrategy {
        self.strategy
    }

    pub fn dispatcher_name(&self) -> &str {
        self.dispatcher.name()
    }

    /// Run the batch and return its report
    pub async fn run(&self, samples: &[Sample]) -> Result<Report> {
        self.run_traced(samples).await.map(|run| run.report)
    }

    /// Run the batch and return every outcome alongside the report.
    ///
    /// Per-sample failures never surface here; the only error is an internal
    /// bookkeeping violation.
    pub async fn run_traced(&self, samples: &[Sample]) -> Result<BenchmarkRun> {
        let span = info_span!(
            "benchmark",
            run_id = %Uuid::new_v4(),
            dispatcher = self.dispatcher.name()
        );

        async move {
            info!(
                samples = samples.len(),
                workers = self.strategy.workers(),
                "Starting benchmark run"
            );

            let started = Instant::now();

            // `buffered` pulls (and spawns) the next dispatch only while fewer
            // than `workers` are in flight, and yields outcomes in input order.
            let outcomes: Vec<Outcome> = stream::iter(samples.iter().cloned())
                .map(|sample| {
                    let dispatcher = Arc::clone(&self.dispatcher);
                    DispatchTask(tokio::spawn(
                        dispatch_timed(dispatcher, sample, self.timeout).in_current_span(),
                    ))
                })
                .buffered(self.strategy.workers())
                .map(|joined| {
                    joined.unwrap_or_else(|e| {
                        warn!("Dispatch task aborted: {}", e);
                        metrics::counter!("textmod_bench_dispatch_total", "outcome" => "aborted")
                            .increment(1);
                        Outcome::failure(None, format!("dispatch task aborted: {e}"))
                    })
                })
                .collect()
                .await;

            let total = started.elapsed();

            if outcomes.len() != samples.len() {
                return Err(Error::internal(format!(
                    "recorded {} outcomes for {} samples",
                    outcomes.len(),
                    samples.len()
                )));
            }

            let report = Report::from_outcomes(&outcomes, total);
            info!(
                successful = report.successful(),
                failed = report.failed(),
                total_time_seconds = report.total_time_seconds(),
                "Benchmark run complete"
            );

            Ok(BenchmarkRun { outcomes, report })
        }
        .instrument(span)
        .await
    }
}

/// A spawned dispatch that is aborted when dropped, so abandoning a run
/// cancels its in-flight dispatches.
struct DispatchTask(JoinHandle<Outcome>);

impl Future for DispatchTask {
    type Output = std::result::Result<Outcome, JoinError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.0).poll(cx)
    }
}

impl Drop for DispatchTask {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Dispatch one sample, timing only the dispatch call itself
async fn dispatch_timed(
    dispatcher: Arc<dyn Dispatcher>,
    sample: Sample,
    timeout: Option<Duration>,
) -> Outcome {
    let start = Instant::now();

    let result = match timeout {
        Some(limit) => match tokio::time::timeout(limit, dispatcher.dispatch(&sample)).await {
            Ok(result) => result,
            Err(_) => {
                warn!("Dispatch exceeded {:?}", limit);
                metrics::counter!("textmod_bench_dispatch_total", "outcome" => "timeout")
                    .increment(1);
                return Outcome::failure(None, Error::Timeout.to_string());
            }
        },
        None => dispatcher.dispatch(&sample).await,
    };

    let latency = start.elapsed();
    let validated = result.and_then(|labels| validate_labels(&labels).map(|_| labels));

    match validated {
        Ok(labels) => {
            debug!(latency_ms = duration_ms(latency), "Dispatch succeeded");
            metrics::counter!("textmod_bench_dispatch_total", "outcome" => "success").increment(1);
            metrics::histogram!("textmod_bench_dispatch_latency_ms").record(duration_ms(latency));
            Outcome::success(latency, labels)
        }
        Err(e) => {
            warn!(latency_ms = duration_ms(latency), "Dispatch failed: {}", e);
            metrics::counter!("textmod_bench_dispatch_total", "outcome" => "failure").increment(1);
            Outcome::failure(Some(latency), e.to_string())
        }
    }
}
