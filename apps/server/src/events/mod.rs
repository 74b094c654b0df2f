//! Seller lifecycle events published to downstream services

pub mod producer;

pub use producer::SellerProducer;

use crate::models::SellerInfoDto;

/// Services that keep their own copy of seller data and must hear about deletions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DownstreamService {
    Product,
    Review,
    Authentication,
}

impl DownstreamService {
    pub const ALL: [DownstreamService; 3] = [Self::Product, Self::Review, Self::Authentication];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Review => "review",
            Self::Authentication => "authentication",
        }
    }
}

/// Fire-and-forget notification of seller changes.
///
/// Implementations return immediately. Delivery happens in the background and
/// its outcome never reaches the caller.
pub trait SellerEventPublisher: Send + Sync {
    fn notify_seller_updated(&self, seller: SellerInfoDto);

    /// Notify every [`DownstreamService`] independently.
    fn notify_seller_deleted(&self, seller_id: i64);
}
