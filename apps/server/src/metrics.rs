//! Prometheus counters for seller mutations and outbound events

use lazy_static::lazy_static;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};

lazy_static! {
    static ref EVENTS_PUBLISHED: IntCounterVec = register_int_counter_vec!(
        "seller_events_published_total",
        "Outbound seller events by topic and delivery outcome",
        &["topic", "outcome"]
    )
    .expect("seller_events_published_total registers once");

    static ref SELLER_MUTATIONS: IntCounterVec = register_int_counter_vec!(
        "seller_mutations_total",
        "Committed seller mutations by kind",
        &["kind"]
    )
    .expect("seller_mutations_total registers once");
}

pub fn record_event(topic: &str, delivered: bool) {
    let outcome = if delivered { "delivered" } else { "failed" };
    EVENTS_PUBLISHED.with_label_values(&[topic, outcome]).inc();
}

#[cfg(test)]
pub(crate) fn event_count(topic: &str, delivered: bool) -> u64 {
    let outcome = if delivered { "delivered" } else { "failed" };
    EVENTS_PUBLISHED.with_label_values(&[topic, outcome]).get()
}

pub fn record_mutation(kind: &str) {
    SELLER_MUTATIONS.with_label_values(&[kind]).inc();
}

/// Render the default registry in the text exposition format.
pub fn render() -> crate::Result<String> {
    let mut buffer = Vec::new();
    TextEncoder::new()
        .encode(&prometheus::gather(), &mut buffer)
        .map_err(|e| crate::Error::Internal(format!("Failed to encode metrics: {}", e)))?;
    String::from_utf8(buffer)
        .map_err(|e| crate::Error::Internal(format!("Metrics are not UTF-8: {}", e)))
}
