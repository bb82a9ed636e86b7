//! HTTP surface tests: routing, validation failures, CORS, request IDs.

use serde_json::{json, Value};

use agrivision_gateway::config::{GatewayConfig, UpstreamConfig};

mod common;

#[tokio::test]
async fn health_and_banner_respond() {
    let (addr, _shutdown) = common::start_gateway(GatewayConfig::default()).await;
    let client = reqwest::Client::new();

    let health: Value = client
        .get(format!("http://{addr}/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health, json!({"status": "ok"}));

    let banner: Value = client
        .get(format!("http://{addr}/"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(banner["message"].as_str().unwrap().contains("running"));
}

#[tokio::test]
async fn unknown_model_is_not_found() {
    let (addr, _shutdown) = common::start_gateway(GatewayConfig::default()).await;

    let response = reqwest::Client::new()
        .post(format!("http://{addr}/api/soil/predict"))
        .multipart(common::image_form(b"payload"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 404);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["code"], "UNKNOWN_MODEL");
}

#[tokio::test]
async fn missing_file_field_is_invalid_input() {
    let (addr, _shutdown) = common::start_gateway(GatewayConfig::default()).await;

    let form = reqwest::multipart::Form::new().text("caption", "no image here");
    let response = reqwest::Client::new()
        .post(format!("http://{addr}/api/pest/predict"))
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["code"], "INVALID_INPUT");
    assert_eq!(body["error"], "Image file is required");
}

#[tokio::test]
async fn preflight_allows_only_configured_origins() {
    let mut config = GatewayConfig::default();
    config.cors.allowed_origins = vec!["http://localhost:5173".to_string()];
    let (addr, _shutdown) = common::start_gateway(config).await;
    let client = reqwest::Client::new();

    let allowed = client
        .request(
            reqwest::Method::OPTIONS,
            format!("http://{addr}/api/pest/predict"),
        )
        .header("origin", "http://localhost:5173")
        .header("access-control-request-method", "POST")
        .send()
        .await
        .unwrap();
    assert_eq!(
        allowed
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("http://localhost:5173")
    );

    let blocked = client
        .request(
            reqwest::Method::OPTIONS,
            format!("http://{addr}/api/pest/predict"),
        )
        .header("origin", "https://evil.example")
        .header("access-control-request-method", "POST")
        .send()
        .await
        .unwrap();
    assert!(blocked
        .headers()
        .get("access-control-allow-origin")
        .is_none());
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let (addr, _shutdown) = common::start_gateway(GatewayConfig::default()).await;

    let response = reqwest::Client::new()
        .get(format!("http://{addr}/health"))
        .send()
        .await
        .unwrap();

    let id = response
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert!(!id.is_empty());
}

#[tokio::test]
async fn inbound_request_ids_are_preserved() {
    let (addr, _shutdown) = common::start_gateway(GatewayConfig::default()).await;

    let response = reqwest::Client::new()
        .get(format!("http://{addr}/health"))
        .header("x-request-id", "test-correlation-id")
        .send()
        .await
        .unwrap();

    assert_eq!(
        response
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok()),
        Some("test-correlation-id")
    );
}

#[tokio::test]
async fn per_upstream_policy_overrides_the_global_default() {
    // Global policy would retry three times; the upstream override says one.
    let calls = std::sync::Arc::new(std::sync::atomic::AtomicU32::new(0));
    let counter = calls.clone();
    let upstream_addr = common::start_mock_upstream(move || {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            (503, "Service Unavailable".to_string())
        }
    })
    .await;

    let mut config = GatewayConfig::default();
    config.retries.max_attempts = 3;
    config.retries.base_delay_ms = 20;
    config.retries.max_delay_ms = 80;
    config.upstreams = vec![UpstreamConfig {
        name: "pest".to_string(),
        url: format!("http://{upstream_addr}/predict"),
        url_env: None,
        retry: Some(agrivision_gateway::resilience::RetryPolicy {
            max_attempts: 1,
            base_delay_ms: 20,
            max_delay_ms: 80,
            ..Default::default()
        }),
    }];
    let (addr, _shutdown) = common::start_gateway(config).await;

    let response = reqwest::Client::new()
        .post(format!("http://{addr}/api/pest/predict"))
        .multipart(common::image_form(b"payload"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 500);
    assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 1);
}
