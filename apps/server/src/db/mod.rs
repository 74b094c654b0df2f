//! Persistence layer for seller records

pub mod memory;
pub mod store;
pub mod traits;

pub use memory::InMemorySellerStore;
pub use store::PostgresSellerStore;
pub use traits::{SellerStore, SellerUnitOfWork};
