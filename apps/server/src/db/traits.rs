//! Seller store traits

use crate::{
    models::{ApprovalState, NewSeller, Page, PageRequest, Seller},
    Result,
};
use async_trait::async_trait;

/// Persistent collection of seller records.
///
/// The store performs no business logic. Read methods run outside any unit of
/// work; every mutation goes through [`SellerStore::begin`].
#[async_trait]
pub trait SellerStore: Send + Sync {
    async fn find_by_id(&self, seller_id: i64) -> Result<Option<Seller>>;

    /// Every record, deleted ones included.
    async fn find_all(&self, page: PageRequest) -> Result<Page<Seller>>;

    /// Records with `is_deleted = false` only.
    async fn find_all_excluding_deleted(&self, page: PageRequest) -> Result<Page<Seller>>;

    /// Every record, deleted ones included, without paging.
    async fn find_all_unpaged(&self) -> Result<Vec<Seller>>;

    async fn count_by_approval_state(&self, state: ApprovalState) -> Result<i64>;

    /// Open a unit of work. The caller must finish it with `commit` or `rollback`.
    async fn begin(&self) -> Result<Box<dyn SellerUnitOfWork>>;

    async fn health_check(&self) -> Result<()>;

    fn backend_name(&self) -> &'static str;
}

/// A scoped write transaction against the store.
///
/// Changes become visible to other callers only after `commit`. Dropping an
/// unfinished unit of work discards its changes.
#[async_trait]
pub trait SellerUnitOfWork: Send {
    /// Load a record and hold it for modification until the unit of work ends.
    async fn find_by_id_for_update(&mut self, seller_id: i64) -> Result<Option<Seller>>;

    /// Insert a new record and return it with its assigned identifier.
    async fn insert(&mut self, seller: NewSeller) -> Result<Seller>;

    /// Overwrite the mutable columns of an existing record.
    async fn update(&mut self, seller: &Seller) -> Result<Seller>;

    async fn commit(self: Box<Self>) -> Result<()>;

    async fn rollback(self: Box<Self>) -> Result<()>;
}
