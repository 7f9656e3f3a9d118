//! Integration tests for the HTTP entry point

use axum_test::TestServer;
use macd_alert::config::{AlertConfig, RuntimeConfig};
use macd_alert::core::http::{create_router, AppState};
use macd_alert::core::pipeline::SignalPipeline;
use macd_alert::core::runtime::SignalRuntime;
use macd_alert::core::service::SignalService;
use macd_alert::metrics::Metrics;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

use crate::test_utils::{candles_from_closes, RecordingNotifier, SilentConnector, TapeProvider};

struct TestApiServer {
    server: TestServer,
    service: Arc<SignalService>,
}

impl TestApiServer {
    fn new() -> Self {
        let provider = Arc::new(TapeProvider::new(candles_from_closes(&[10.0; 5]), Some(10.0)));
        let notifier = Arc::new(RecordingNotifier::new());
        let connector = Arc::new(SilentConnector);

        let service = Arc::new(SignalService::new(move || {
            let config = RuntimeConfig::default();
            let pipeline = SignalPipeline::new(
                &config,
                AlertConfig::default(),
                provider.clone(),
                notifier.clone(),
            );
            SignalRuntime::new(config, connector.clone(), pipeline)
        }));

        let state = AppState {
            metrics: Arc::new(Metrics::new().expect("metrics initialization")),
            start_time: Arc::new(Instant::now()),
            service: service.clone(),
        };
        let server = TestServer::new(create_router(state)).expect("start test server");

        Self { server, service }
    }
}

#[tokio::test]
async fn root_starts_the_stream_once() {
    let app = TestApiServer::new();

    let response = app.server.get("/").await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["status"], "WebSocket client started");
    assert!(app.service.is_running().await);

    let response = app.server.get("/").await;
    let body: Value = response.json();
    assert_eq!(body["status"], "WebSocket client already running");

    app.service.stop().await;
}

#[tokio::test]
async fn stream_can_be_restarted_after_stop() {
    let app = TestApiServer::new();

    app.server.get("/").await;
    app.service.stop().await;
    assert!(!app.service.is_running().await);

    let body: Value = app.server.get("/").await.json();
    assert_eq!(body["status"], "WebSocket client started");

    app.service.stop().await;
}

#[tokio::test]
async fn health_endpoint_reports_stream_state() {
    let app = TestApiServer::new();

    let body: Value = app.server.get("/health").await.json();
    assert_eq!(body["status"], "idle");
    assert_eq!(body["service"], "macd-alert");
    assert_eq!(body["stream_running"], false);
    assert!(body["uptime_seconds"].as_u64().is_some());

    app.server.get("/").await;
    let body: Value = app.server.get("/health").await.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["stream_running"], true);

    app.service.stop().await;
}

#[tokio::test]
async fn metrics_endpoint_exposes_prometheus_metrics() {
    let app = TestApiServer::new();
    app.server.get("/health").await;

    let response = app.server.get("/metrics").await;
    assert_eq!(response.status_code(), 200);

    let body = response.text();
    assert!(body.contains(r#"http_requests_total{method="GET",route="health",status="200"} 1"#));
    assert!(body.contains("candles_processed_total"));
    assert!(body.contains("feed_connected"));
}
