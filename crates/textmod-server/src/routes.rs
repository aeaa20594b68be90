//! HTTP routes and handlers

use axum::{
    body::Bytes,
    extract::State,
    http::HeaderValue,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::json;
use std::time::Instant;
use textmod_bench::{BenchmarkRequest, Report};
use textmod_core::LabelScore;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route("/classify", post(classify))
        .route("/benchmark", post(benchmark))
        .fallback(fallback)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Credentialed CORS cannot use wildcards, so methods and headers mirror the
/// request and `*` in the origin list mirrors the request origin.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|origin| origin == "*") {
        AllowOrigin::mirror_request()
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("Ignoring invalid CORS origin: {}", origin);
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

async fn root() -> impl IntoResponse {
    Json(json!({ "message": "Hello World" }))
}

async fn health_check() -> &'static str {
    "OK"
}

async fn metrics(State(state): State<AppState>) -> String {
    state
        .metrics_handle
        .as_ref()
        .map(|handle| handle.render())
        .unwrap_or_default()
}

#[derive(Debug, Default, Deserialize)]
struct ClassifyRequest {
    #[serde(default)]
    text: String,
}

/// Classify one text. Undecodable bodies answer with the JSON error envelope.
async fn classify(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Vec<LabelScore>>, AppError> {
    metrics::counter!("textmod_requests_total", "route" => "classify").increment(1);

    let req: ClassifyRequest = parse_optional_body(&body)?;

    let start = Instant::now();
    let labels = state.classifier.classify(&req.text).await?;
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    metrics::histogram!("textmod_classify_latency_ms").record(latency_ms);

    debug!("Classified {} characters in {:.3}ms", req.text.len(), latency_ms);
    Ok(Json(labels))
}

/// Run a benchmark. The body is optional; an empty body uses the configured
/// default request count over the built-in corpus.
async fn benchmark(State(state): State<AppState>, body: Bytes) -> Result<Json<Report>, AppError> {
    metrics::counter!("textmod_requests_total", "route" => "benchmark").increment(1);

    let request: BenchmarkRequest = parse_optional_body(&body)?;

    let samples = request.resolve(&state.config.benchmark)?;
    info!(
        "Benchmark requested: {} samples via {}",
        samples.len(),
        state.runner.dispatcher_name()
    );

    let report = state.runner.run(&samples).await?;
    Ok(Json(report))
}

/// Decode a JSON body; an empty or all-whitespace body yields the default
fn parse_optional_body<T: DeserializeOwned + Default>(body: &[u8]) -> Result<T, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        Ok(T::default())
    } else {
        Ok(serde_json::from_slice(body)?)
    }
}

async fn fallback() -> AppError {
    AppError::NotFound
}
