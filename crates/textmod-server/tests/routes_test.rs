//! Route tests for the textmod service

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use textmod_server::{create_router, AppState, ServiceConfig};
use tower::ServiceExt;

fn app_with(config: ServiceConfig) -> Router {
    let state = AppState::new(config, None).expect("Failed to build app state");
    create_router(state)
}

fn app() -> Router {
    app_with(ServiceConfig::default())
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).to_string())
        })
    };
    (status, body)
}

#[tokio::test]
async fn test_root_greets() {
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Hello World" }));
}

#[tokio::test]
async fn test_classify_returns_all_labels() {
    let (status, body) = send(app(), post_json("/classify", json!({ "text": "I love you!" }))).await;

    assert_eq!(status, StatusCode::OK);
    let labels = body.as_array().unwrap();
    assert_eq!(labels.len(), 9);
    assert_eq!(labels[0]["label"], "OK");
    assert_eq!(labels[0]["score"], 1.0);
}

#[tokio::test]
async fn test_classify_missing_text_is_empty() {
    let (status, body) = send(app(), post_json("/classify", json!({}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["label"], "OK");
}

#[tokio::test]
async fn test_classify_invalid_json_uses_error_envelope() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/classify")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["type"], "invalid_request_error");
    assert!(body["error"]["message"].is_string());
}

#[tokio::test]
async fn test_classify_without_content_type() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/classify")
        .body(Body::from(r#"{"text": "You are a stupid idiot"}"#))
        .unwrap();
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["label"], "HR");
}

#[tokio::test]
async fn test_classify_oversized_text_is_bad_request() {
    let mut config = ServiceConfig::default();
    config.classifier.max_input_chars = 10;

    let (status, body) = send(
        app_with(config),
        post_json("/classify", json!({ "text": "this text is longer than ten" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["type"], "invalid_request_error");
}

#[tokio::test]
async fn test_benchmark_with_count() {
    let (status, body) = send(app(), post_json("/benchmark", json!({ "count": 5 }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_requests"], 5);
    assert_eq!(body["successful"], 5);
    assert_eq!(body["failed"], 0);
    assert_eq!(body["success_rate_percent"], 100.0);
    assert_eq!(body["failed_rate_percent"], 0.0);
    for field in [
        "total_time_seconds",
        "requests_per_second",
        "avg_latency_ms",
        "min_latency_ms",
        "max_latency_ms",
        "p95_latency_ms",
    ] {
        assert!(body[field].is_number(), "missing {field}");
    }
}

#[tokio::test]
async fn test_benchmark_without_body_uses_default_count() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/benchmark")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_requests"], 100);
}

#[tokio::test]
async fn test_benchmark_empty_run_is_zero_filled() {
    let (status, body) = send(app(), post_json("/benchmark", json!({ "count": 0 }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_requests"], 0);
    assert_eq!(body["requests_per_second"], 0.0);
    assert_eq!(body["p95_latency_ms"], 0.0);
}

#[tokio::test]
async fn test_benchmark_isolates_failing_texts() {
    let mut config = ServiceConfig::default();
    config.classifier.max_input_chars = 20;

    let texts = json!(["short one", "this text is well past twenty characters", "short two"]);
    let (status, body) = send(
        app_with(config),
        post_json("/benchmark", json!({ "texts": texts })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_requests"], 3);
    assert_eq!(body["successful"], 2);
    assert_eq!(body["failed"], 1);
    assert_eq!(body["failed_rate_percent"], 33.3);
}

#[tokio::test]
async fn test_benchmark_rejects_oversized_batch() {
    let mut config = ServiceConfig::default();
    config.benchmark.default_requests = 10;
    config.benchmark.max_requests = 10;

    let (status, body) = send(
        app_with(config),
        post_json("/benchmark", json!({ "count": 11 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"].as_str().unwrap().contains("limit"));
}

#[tokio::test]
async fn test_benchmark_rejects_invalid_json() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/benchmark")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let (status, _) = send(app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cors_allows_configured_origin() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/classify")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    let headers = response.headers();
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:3000"
    );
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
        "true"
    );
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let request = Request::builder().uri("/nope").body(Body::empty()).unwrap();
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["type"], "not_found_error");
}

#[tokio::test]
async fn test_health_and_metrics_without_recorder() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(app(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("OK".to_string()));

    let request = Request::builder().uri("/metrics").body(Body::empty()).unwrap();
    let (status, body) = send(app(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);
}
