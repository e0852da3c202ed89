use std::net::SocketAddr;

// ── RED metrics (request-driven) ────────────────────────────────

/// Counter: total HTTP requests handled. Labels: method, route, status.
pub const HTTP_REQUESTS_TOTAL: &str = "roomd_http_requests_total";

/// Histogram: request latency in seconds. Labels: method, route.
pub const HTTP_REQUEST_DURATION_SECONDS: &str = "roomd_http_request_duration_seconds";

// ── Domain gauges ───────────────────────────────────────────────

/// Gauge: live reservations currently stored.
pub const RESERVATIONS_LIVE: &str = "roomd_reservations_live";

/// Counter: reservation attempts rejected by the conflict scan.
pub const RESERVATION_CONFLICTS_TOTAL: &str = "roomd_reservation_conflicts_total";

/// Install Prometheus metrics exporter on the given port. No-op if port is None.
pub fn init(port: Option<u16>) {
    let Some(port) = port else { return };
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .expect("failed to install Prometheus metrics exporter");
    tracing::info!("metrics endpoint: http://0.0.0.0:{port}/metrics");
}
