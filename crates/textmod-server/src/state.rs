//! Shared application state

use crate::config::ServiceConfig;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use textmod_bench::BenchmarkRunner;
use textmod_classifiers::{Classifier, ModerationClassifier};
use tracing::info;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Service configuration
    pub config: Arc<ServiceConfig>,

    /// Classifier shared by `/classify` and in-process benchmarks
    pub classifier: Arc<dyn Classifier>,

    /// Benchmark runner built from the benchmark configuration
    pub runner: Arc<BenchmarkRunner>,

    /// Prometheus handle for `/metrics`, when a recorder is installed
    pub metrics_handle: Option<PrometheusHandle>,
}

impl AppState {
    /// Build the classifier and runner once for the lifetime of the service
    pub fn new(
        config: ServiceConfig,
        metrics_handle: Option<PrometheusHandle>,
    ) -> textmod_core::Result<Self> {
        let classifier: Arc<dyn Classifier> =
            Arc::new(ModerationClassifier::with_config(&config.classifier)?);
        info!("Loaded classifier: {}", classifier.name());

        let runner = config.benchmark.build_runner(Arc::clone(&classifier))?;

        Ok(Self {
            config: Arc::new(config),
            classifier,
            runner: Arc::new(runner),
            metrics_handle,
        })
    }
}
