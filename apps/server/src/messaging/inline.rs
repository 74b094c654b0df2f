//! In-process message sink.
//!
//! Keeps every delivered message in memory instead of handing it to a broker.
//! Primary use-case: tests that need to observe exactly what was published,
//! and local runs without a database. Individual topics can be made to fail to
//! exercise partial-delivery behaviour.

use super::traits::{MessageSink, OutboundMessage};
use crate::{Error, Result};
use async_trait::async_trait;
use std::{
    collections::HashSet,
    sync::{Mutex, MutexGuard},
    time::Duration,
};

#[derive(Debug, Default)]
struct SinkState {
    attempts: usize,
    delivered: Vec<OutboundMessage>,
    failing_topics: HashSet<String>,
}

#[derive(Debug, Default)]
pub struct InMemoryMessageSink {
    state: Mutex<SinkState>,
}

impl InMemoryMessageSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, SinkState> {
        // A panic while holding the lock cannot leave the state half-written.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Make every future send to `topic` fail.
    pub fn fail_topic(&self, topic: impl Into<String>) {
        self.state().failing_topics.insert(topic.into());
    }

    pub fn messages(&self) -> Vec<OutboundMessage> {
        self.state().delivered.clone()
    }

    pub fn messages_for(&self, topic: &str) -> Vec<OutboundMessage> {
        self.state()
            .delivered
            .iter()
            .filter(|m| m.topic == topic)
            .cloned()
            .collect()
    }

    /// Number of sends attempted, successful or not.
    pub fn attempts(&self) -> usize {
        self.state().attempts
    }

    /// Poll until at least `count` sends were attempted or `timeout` elapses.
    /// Returns whether the count was reached.
    pub async fn wait_for_attempts(&self, count: usize, timeout: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            if self.attempts() >= count {
                return true;
            }
            if tokio::time::Instant::now() >= deadline {
                return false;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
}

#[async_trait]
impl MessageSink for InMemoryMessageSink {
    async fn send(&self, message: OutboundMessage) -> Result<()> {
        let mut state = self.state();
        state.attempts += 1;

        if state.failing_topics.contains(&message.topic) {
            return Err(Error::Messaging(format!(
                "Delivery to topic '{}' refused",
                message.topic
            )));
        }

        state.delivered.push(message);
        Ok(())
    }

    async fn health_check(&self) -> Result<serde_json::Value> {
        let state = self.state();
        Ok(serde_json::json!({
            "type": "memory",
            "messages": state.delivered.len(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_delivered_messages() {
        let sink = InMemoryMessageSink::new();
        sink.send(OutboundMessage::new("t1", "1", serde_json::json!(1)))
            .await
            .unwrap();

        assert_eq!(sink.attempts(), 1);
        assert_eq!(sink.messages_for("t1").len(), 1);
        assert!(sink.messages_for("t2").is_empty());
    }

    #[tokio::test]
    async fn failing_topic_counts_attempt_but_not_delivery() {
        let sink = InMemoryMessageSink::new();
        sink.fail_topic("broken");

        let err = sink
            .send(OutboundMessage::new("broken", "1", serde_json::json!(1)))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Messaging(_)));
        assert_eq!(sink.attempts(), 1);
        assert!(sink.messages().is_empty());
    }

    #[tokio::test]
    async fn wait_for_attempts_times_out() {
        let sink = InMemoryMessageSink::new();
        assert!(!sink.wait_for_attempts(1, Duration::from_millis(30)).await);
    }
}
