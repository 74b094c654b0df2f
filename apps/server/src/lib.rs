//! Seller service
//!
//! Manages seller records for a marketplace: profiles, administrative
//! approval, soft deletion, and the events other services consume when a
//! seller changes.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod events;
pub mod logging;
pub mod messaging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod state;

pub use error::{Error, Result};
