//! Message-sink backed `SellerEventPublisher`

use super::{DownstreamService, SellerEventPublisher};
use crate::{
    config::TopicsConfig,
    messaging::{MessageSink, OutboundMessage},
    metrics,
    models::SellerInfoDto,
};
use serde::Serialize;
use std::sync::Arc;
use tokio::runtime::Handle;

/// Publishes seller events by spawning one delivery task per message.
///
/// Nothing is awaited by the caller. A failed delivery is logged and counted,
/// and has no effect on the other messages of the same fan-out.
pub struct SellerProducer {
    sink: Arc<dyn MessageSink>,
    topics: TopicsConfig,
}

impl SellerProducer {
    pub fn new(sink: Arc<dyn MessageSink>, topics: TopicsConfig) -> Self {
        Self { sink, topics }
    }

    fn dispatch(&self, message: OutboundMessage) {
        let Ok(runtime) = Handle::try_current() else {
            tracing::warn!(
                topic = %message.topic,
                key = %message.key,
                "No async runtime available, dropping outbound message"
            );
            metrics::record_event(&message.topic, false);
            return;
        };

        let sink = self.sink.clone();
        runtime.spawn(async move {
            let message_id = message.id;
            let topic = message.topic.clone();
            let key = message.key.clone();

            match sink.send(message).await {
                Ok(()) => {
                    metrics::record_event(&topic, true);
                    tracing::debug!(%message_id, %topic, %key, "Seller event delivered");
                }
                Err(e) => {
                    metrics::record_event(&topic, false);
                    tracing::warn!(
                        %message_id,
                        %topic,
                        %key,
                        error = %e,
                        "Failed to deliver seller event"
                    );
                }
            }
        });
    }

    /// Encode a payload. A failure is logged and counted against `topic`.
    fn encode<T: Serialize>(&self, topic: &str, key: &str, value: &T) -> Option<serde_json::Value> {
        match serde_json::to_value(value) {
            Ok(payload) => Some(payload),
            Err(e) => {
                tracing::warn!(%topic, %key, error = %e, "Failed to encode seller event");
                metrics::record_event(topic, false);
                None
            }
        }
    }
}

impl SellerEventPublisher for SellerProducer {
    fn notify_seller_updated(&self, seller: SellerInfoDto) {
        let key = seller.seller_id.to_string();
        let Some(payload) = self.encode(&self.topics.seller_updated, &key, &seller) else {
            return;
        };

        self.dispatch(OutboundMessage::new(
            self.topics.seller_updated.clone(),
            key,
            payload,
        ));
    }

    fn notify_seller_deleted(&self, seller_id: i64) {
        for downstream in DownstreamService::ALL {
            let topic = self.topics.seller_deleted(downstream).to_string();
            tracing::debug!(seller_id, downstream = downstream.as_str(), %topic, "Dispatching seller deletion");
            self.dispatch(OutboundMessage::new(
                topic,
                seller_id.to_string(),
                serde_json::json!(seller_id),
            ));
        }
    }
}
