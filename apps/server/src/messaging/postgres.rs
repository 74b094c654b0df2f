//! PostgreSQL-backed message sink using an outbox table plus NOTIFY

use super::traits::{MessageSink, OutboundMessage};
use crate::Result;
use async_trait::async_trait;
use sqlx::PgPool;

/// Persists each message to `seller_outbound_messages` and wakes listeners with
/// `pg_notify` on the configured channel. Downstream relays read the table;
/// the notification only carries the message id and topic.
pub struct PostgresMessageSink {
    pool: PgPool,
    channel: String,
}

impl PostgresMessageSink {
    pub fn new(pool: PgPool, channel: impl Into<String>) -> Self {
        Self {
            pool,
            channel: channel.into(),
        }
    }
}

#[async_trait]
impl MessageSink for PostgresMessageSink {
    async fn send(&self, message: OutboundMessage) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO seller_outbound_messages (id, topic, message_key, payload, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(message.id)
        .bind(&message.topic)
        .bind(&message.key)
        .bind(&message.payload)
        .bind(message.created_at)
        .execute(&self.pool)
        .await?;

        let notification = serde_json::json!({
            "id": message.id,
            "topic": message.topic,
        });
        sqlx::query("SELECT pg_notify($1, $2)")
            .bind(&self.channel)
            .bind(notification.to_string())
            .execute(&self.pool)
            .await?;

        tracing::debug!(
            message_id = %message.id,
            topic = %message.topic,
            channel = %self.channel,
            "Outbound message stored"
        );

        Ok(())
    }

    async fn health_check(&self) -> Result<serde_json::Value> {
        let pending: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM seller_outbound_messages")
            .fetch_one(&self.pool)
            .await?;

        Ok(serde_json::json!({
            "type": "postgres",
            "channel": self.channel,
            "messages": pending,
        }))
    }
}
