//! textmod
//!
//! Text moderation service with a built-in latency benchmark.

use anyhow::Result;
use clap::Parser;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use textmod_bench::{BenchmarkRequest, Corpus, DispatchMode, StrategyKind};
use textmod_classifiers::{Classifier, ModerationClassifier};
use textmod_server::cli::{Cli, Commands};
use textmod_server::{run_server, ServiceConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            config,
            listen,
            port,
            verbose,
        } => {
            init_tracing(verbose);

            info!("Starting textmod service");
            let mut service_config = ServiceConfig::load(&config)?;
            if let Some(listen) = listen {
                service_config.listen = listen;
            }
            if let Some(port) = port {
                service_config.port = port;
            }
            info!("Configuration loaded from {}", config.display());
            info!("CORS origins: {:?}", service_config.cors_origins);

            let metrics_handle = init_metrics()?;
            run_server(service_config, Some(metrics_handle)).await?;
        }

        Commands::Bench {
            config,
            target,
            count,
            input,
            concurrency,
            timeout_ms,
            json,
            verbose,
        } => {
            init_tracing(verbose);

            let mut service_config = ServiceConfig::load(&config)?;
            let bench = &mut service_config.benchmark;
            if let Some(target) = target {
                bench.dispatch = DispatchMode::Http;
                bench.target_url = Some(target);
            }
            if let Some(workers) = concurrency {
                bench.strategy = StrategyKind::Concurrent;
                bench.workers = workers;
            }
            if timeout_ms.is_some() {
                bench.timeout_ms = timeout_ms;
            }

            let texts = match input {
                Some(path) => Some(Corpus::from_file(&path)?.texts().to_vec()),
                None => None,
            };
            let request = BenchmarkRequest { count, texts };
            let samples = request.resolve(&service_config.benchmark)?;

            let classifier: Arc<dyn Classifier> =
                Arc::new(ModerationClassifier::with_config(&service_config.classifier)?);
            let runner = service_config.benchmark.build_runner(classifier)?;

            let report = runner.run(&samples).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{report}");
            }
        }
    }

    Ok(())
}

/// Initialize tracing/logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("textmod=debug,tower_http=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("textmod=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Initialize metrics exporter and return handle for rendering
fn init_metrics() -> Result<PrometheusHandle> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    metrics::describe_counter!(
        "textmod_requests_total",
        "Total number of requests processed by route"
    );
    metrics::describe_histogram!(
        "textmod_classify_latency_ms",
        metrics::Unit::Milliseconds,
        "Classification latency in milliseconds"
    );
    metrics::describe_counter!(
        "textmod_bench_dispatch_total",
        "Benchmark dispatches by outcome"
    );
    metrics::describe_histogram!(
        "textmod_bench_dispatch_latency_ms",
        metrics::Unit::Milliseconds,
        "Latency of successful benchmark dispatches in milliseconds"
    );

    info!("Metrics exporter initialized");
    Ok(handle)
}
