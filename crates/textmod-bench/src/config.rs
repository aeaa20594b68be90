//! Benchmark configuration

use crate::dispatch::{Dispatcher, HttpDispatcher, InProcessDispatcher};
use crate::runner::{BenchmarkRunner, DispatchStrategy};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use textmod_classifiers::Classifier;
use textmod_core::{Error, Result};
use tracing::info;

/// Benchmark configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Requests issued when the caller gives neither a count nor texts
    #[serde(default = "default_requests")]
    pub default_requests: usize,

    /// Largest batch a single run accepts
    #[serde(default = "default_max_requests")]
    pub max_requests: usize,

    /// Where samples are sent
    #[serde(default)]
    pub dispatch: DispatchMode,

    /// Base URL of the service to load test (http dispatch only)
    #[serde(default)]
    pub target_url: Option<String>,

    /// Sequential or concurrent dispatch
    #[serde(default)]
    pub strategy: StrategyKind,

    /// Worker pool size for concurrent dispatch
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Per-dispatch timeout; unset means no timeout
    #[serde(default)]
    pub timeout_ms: Option<u64>,

    /// Transport timeout for each HTTP exchange
    #[serde(default = "default_http_timeout_ms")]
    pub http_timeout_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DispatchMode {
    /// Call the classifier directly (computation latency only)
    #[default]
    InProcess,
    /// Post to a running service over the network
    Http,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    #[default]
    Sequential,
    Concurrent,
}

impl BenchConfig {
    /// Check the configuration for contradictions
    pub fn validate(&self) -> Result<()> {
        if self.max_requests == 0 {
            return Err(Error::config("max_requests must be greater than zero"));
        }
        if self.default_requests > self.max_requests {
            return Err(Error::config(format!(
                "default_requests ({}) exceeds max_requests ({})",
                self.default_requests, self.max_requests
            )));
        }
        if self.strategy == StrategyKind::Concurrent && self.workers == 0 {
            return Err(Error::config("concurrent dispatch needs at least one worker"));
        }
        if self.dispatch == DispatchMode::Http && self.target_url.is_none() {
            return Err(Error::config("http dispatch requires target_url"));
        }
        if self.timeout_ms == Some(0) {
            return Err(Error::config("timeout_ms must be greater than zero"));
        }
        if self.http_timeout_ms == 0 {
            return Err(Error::config("http_timeout_ms must be greater than zero"));
        }
        Ok(())
    }

    pub fn strategy(&self) -> DispatchStrategy {
        match self.strategy {
            StrategyKind::Sequential => DispatchStrategy::Sequential,
            StrategyKind::Concurrent => DispatchStrategy::concurrent(self.workers),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Build the configured dispatcher around a shared classifier
    pub fn dispatcher(&self, classifier: Arc<dyn Classifier>) -> Result<Arc<dyn Dispatcher>> {
        match self.dispatch {
            DispatchMode::InProcess => Ok(Arc::new(InProcessDispatcher::new(classifier))),
            DispatchMode::Http => {
                let target = self
                    .target_url
                    .as_deref()
                    .ok_or_else(|| Error::config("http dispatch requires target_url"))?;
                let dispatcher = HttpDispatcher::new(
                    target,
                    Some(Duration::from_millis(self.http_timeout_ms)),
                )?;
                Ok(Arc::new(dispatcher))
            }
        }
    }

    /// Build a runner from this configuration
    pub fn build_runner(&self, classifier: Arc<dyn Classifier>) -> Result<BenchmarkRunner> {
        self.validate()?;

        let mut runner = BenchmarkRunner::new(self.dispatcher(classifier)?, self.strategy());
        if let Some(timeout) = self.timeout() {
            runner = runner.with_timeout(timeout);
        }

        info!(
            dispatcher = runner.dispatcher_name(),
            strategy = ?runner.strategy(),
            "Benchmark runner configured"
        );
        Ok(runner)
    }
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            default_requests: default_requests(),
            max_requests: default_max_requests(),
            dispatch: DispatchMode::default(),
            target_url: None,
            strategy: StrategyKind::default(),
            workers: default_workers(),
            timeout_ms: None,
            http_timeout_ms: default_http_timeout_ms(),
        }
    }
}

fn default_requests() -> usize {
    100
}

fn default_max_requests() -> usize {
    10_000
}

fn default_workers() -> usize {
    num_cpus::get()
}

fn default_http_timeout_ms() -> u64 {
    30_000
}
