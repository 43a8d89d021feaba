//! Prometheus metrics for request latency and store activity.
//!
//! This module provides metrics for:
//! - HTTP request latency per route
//! - Items created, duplicate rejections, lookups that missed
//! - Store resets and current item count

use std::time::{Duration, Instant};

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::debug;

use crate::error::Result;

// === Metric Name Constants ===

/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";
/// HTTP requests counter metric name.
pub const METRIC_HTTP_REQUESTS: &str = "http_requests_total";
/// Items created counter metric name.
pub const METRIC_ITEMS_CREATED: &str = "items_created_total";
/// Duplicate-id rejections counter metric name.
pub const METRIC_ITEMS_DUPLICATE: &str = "items_duplicate_rejected_total";
/// Lookups that found nothing counter metric name.
pub const METRIC_ITEMS_NOT_FOUND: &str = "items_not_found_total";
/// Store resets counter metric name.
pub const METRIC_STORE_RESETS: &str = "store_resets_total";
/// Current item count gauge metric name.
pub const METRIC_ITEMS_STORED: &str = "items_stored";

const UPKEEP_INTERVAL: Duration = Duration::from_secs(5);

/// Install the global Prometheus recorder and return its render handle.
///
/// Spawns a background task that runs exporter upkeep, so this must be
/// called from within a tokio runtime.
pub fn install_exporter() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    let upkeep = handle.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(UPKEEP_INTERVAL);
        loop {
            interval.tick().await;
            upkeep.run_upkeep();
        }
    });

    init_metrics();
    Ok(handle)
}

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP request latency in milliseconds"
    );
    describe_counter!(METRIC_HTTP_REQUESTS, "Total number of HTTP requests");
    describe_counter!(METRIC_ITEMS_CREATED, "Total number of items created");
    describe_counter!(
        METRIC_ITEMS_DUPLICATE,
        "Total number of create requests rejected for a duplicate id"
    );
    describe_counter!(
        METRIC_ITEMS_NOT_FOUND,
        "Total number of item lookups that found nothing"
    );
    describe_counter!(METRIC_STORE_RESETS, "Total number of store resets");
    describe_gauge!(METRIC_ITEMS_STORED, "Number of items currently stored");

    debug!("Metrics initialized");
}

/// Record HTTP request latency.
pub fn record_http_latency(start: Instant, endpoint: &str, status: u16) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_HTTP_REQUEST_LATENCY, "endpoint" => endpoint.to_string()).record(latency_ms);
    counter!(
        METRIC_HTTP_REQUESTS,
        "endpoint" => endpoint.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Increment items created counter.
pub fn inc_items_created() {
    counter!(METRIC_ITEMS_CREATED).increment(1);
}

/// Increment duplicate rejections counter.
pub fn inc_items_duplicate() {
    counter!(METRIC_ITEMS_DUPLICATE).increment(1);
}

/// Increment not-found lookups counter.
pub fn inc_items_not_found() {
    counter!(METRIC_ITEMS_NOT_FOUND).increment(1);
}

/// Increment store resets counter.
pub fn inc_store_resets() {
    counter!(METRIC_STORE_RESETS).increment(1);
}

/// Set the stored items gauge.
pub fn set_items_stored(count: usize) {
    gauge!(METRIC_ITEMS_STORED).set(count as f64);
}

/// Middleware recording latency and a request count per matched route.
pub async fn track_http(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let endpoint = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());

    let response = next.run(req).await;
    record_http_latency(start, &endpoint, response.status().as_u16());
    response
}
