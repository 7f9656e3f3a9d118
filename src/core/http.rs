//! HTTP endpoint server using Axum

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Json, Response},
    routing::get,
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, warn, Level};

use crate::config::Config;
use crate::core::bootstrap::build_service;
use crate::core::service::SignalService;
use crate::metrics::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub service: Arc<SignalService>,
}

/// Start the subscription loop for the configured pair
pub async fn start_stream(State(state): State<AppState>) -> Json<Value> {
    let status = state.service.start().await;
    info!(status = ?status, "Start requested");
    Json(json!({ "status": status.message() }))
}

/// `healthy` while the subscription loop runs, `idle` before it is started
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let running = state.service.is_running().await;
    Json(json!({
        "status": if running { "healthy" } else { "idle" },
        "uptime_seconds": state.start_time.elapsed().as_secs(),
        "stream_running": running,
        "service": "macd-alert"
    }))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Route label for metrics; unknown paths share one bucket
fn route_label(path: &str) -> &'static str {
    match path {
        "/" => "start",
        "/health" => "health",
        "/metrics" => "metrics",
        _ => "unmatched",
    }
}

/// Per-route request counters and latency
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let started = Instant::now();
    let method = request.method().to_string();
    let route = route_label(request.uri().path());

    state.metrics.http_requests_in_flight.inc();
    let response = next.run(request).await;
    state.metrics.http_requests_in_flight.dec();

    let status = response.status();
    let elapsed = started.elapsed();
    state
        .metrics
        .http_requests_total
        .with_label_values(&[method.as_str(), route, status.as_str()])
        .inc();
    state
        .metrics
        .http_request_duration_seconds
        .with_label_values(&[route])
        .observe(elapsed.as_secs_f64());

    if status.is_server_error() {
        warn!(
            method = %method,
            route,
            status = status.as_u16(),
            elapsed_ms = elapsed.as_millis() as u64,
            "Request failed"
        );
    }

    response
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(start_stream))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let metrics = Arc::new(Metrics::new()?);
    let port = config.port;

    let state = AppState {
        metrics: metrics.clone(),
        start_time: Arc::new(Instant::now()),
        service: Arc::new(build_service(config, metrics)),
    };
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    axum::serve(listener, app).await?;

    Ok(())
}
