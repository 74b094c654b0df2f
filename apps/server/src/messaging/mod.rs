//! Outbound messaging transport
//!
//! The event publisher hands fully-formed messages to a `MessageSink`. Which
//! sink is used is decided at startup from `messaging.backend`.

pub mod inline;
pub mod postgres;
pub mod traits;

pub use inline::InMemoryMessageSink;
pub use postgres::PostgresMessageSink;
pub use traits::{MessageSink, OutboundMessage};
