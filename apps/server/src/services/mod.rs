//! Business logic layer
//!
//! Services coordinate the seller store and the event publisher, applying
//! business rules and owning transaction boundaries.

pub mod seller;

pub use seller::SellerService;
