//! Prometheus metrics for the alert loop and the HTTP surface

use prometheus::{
    Encoder, Gauge, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts,
    Registry, TextEncoder,
};

pub struct Metrics {
    registry: Registry,
    pub candles_processed_total: IntCounter,
    pub signals_total: IntCounterVec,
    pub notifications_sent_total: IntCounter,
    pub notifications_failed_total: IntCounter,
    pub price_unavailable_total: IntCounter,
    pub processing_errors_total: IntCounter,
    pub feed_reconnects_total: IntCounter,
    pub feed_connected: Gauge,
    /// Labelled by `method`, `route` and `status`
    pub http_requests_total: IntCounterVec,
    pub http_requests_in_flight: IntGauge,
    /// Labelled by `route`
    pub http_request_duration_seconds: HistogramVec,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let candles_processed_total = IntCounter::new(
            "candles_processed_total",
            "Closed candles run through the indicator pipeline",
        )?;
        let signals_total = IntCounterVec::new(
            Opts::new("signals_total", "Crossover edges detected"),
            &["edge"],
        )?;
        let notifications_sent_total =
            IntCounter::new("notifications_sent_total", "Notifications delivered")?;
        let notifications_failed_total =
            IntCounter::new("notifications_failed_total", "Notification deliveries that failed")?;
        let price_unavailable_total = IntCounter::new(
            "price_unavailable_total",
            "Edges dropped because the entry price could not be fetched",
        )?;
        let processing_errors_total = IntCounter::new(
            "processing_errors_total",
            "Candles skipped because processing failed",
        )?;
        let feed_reconnects_total =
            IntCounter::new("feed_reconnects_total", "Kline stream sessions re-established")?;
        let feed_connected = Gauge::new("feed_connected", "1 while the kline stream is connected")?;
        let http_requests_total = IntCounterVec::new(
            Opts::new("http_requests_total", "HTTP requests served"),
            &["method", "route", "status"],
        )?;
        let http_requests_in_flight =
            IntGauge::new("http_requests_in_flight", "HTTP requests currently being served")?;
        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new("http_request_duration_seconds", "HTTP request latency")
                .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0]),
            &["route"],
        )?;

        registry.register(Box::new(candles_processed_total.clone()))?;
        registry.register(Box::new(signals_total.clone()))?;
        registry.register(Box::new(notifications_sent_total.clone()))?;
        registry.register(Box::new(notifications_failed_total.clone()))?;
        registry.register(Box::new(price_unavailable_total.clone()))?;
        registry.register(Box::new(processing_errors_total.clone()))?;
        registry.register(Box::new(feed_reconnects_total.clone()))?;
        registry.register(Box::new(feed_connected.clone()))?;
        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;

        Ok(Self {
            registry,
            candles_processed_total,
            signals_total,
            notifications_sent_total,
            notifications_failed_total,
            price_unavailable_total,
            processing_errors_total,
            feed_reconnects_total,
            feed_connected,
            http_requests_total,
            http_requests_in_flight,
            http_request_duration_seconds,
        })
    }

    /// Render all metrics in the Prometheus text format
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
