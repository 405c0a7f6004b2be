use prometheus::{
    register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec, IntCounterVec,
    TextEncoder,
};
use std::sync::LazyLock;

use paypal_relay::RelayError;

pub static ORDER_REQUESTS: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        "paypal_relay_orders_total",
        "Total order relay requests",
        &["op", "result"]
    )
    .unwrap()
});

pub static UPSTREAM_LATENCY: LazyLock<HistogramVec> = LazyLock::new(|| {
    register_histogram_vec!(
        "paypal_relay_upstream_duration_seconds",
        "Full two-call relay latency in seconds",
        &["op"],
        vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .unwrap()
});

pub static MAIL_REQUESTS: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        "paypal_relay_mail_total",
        "Total mail dispatch requests",
        &["result"]
    )
    .unwrap()
});

/// Result label for a failed relay operation.
pub fn relay_result_label(e: &RelayError) -> &'static str {
    match e {
        RelayError::Auth { .. } => "auth_error",
        RelayError::Upstream { .. } => "upstream_error",
        RelayError::Transport(_) => "transport_error",
        RelayError::MalformedResponse(_) => "malformed_response",
    }
}

pub fn metrics_output() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if encoder.encode(&metric_families, &mut buffer).is_err() {
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}
