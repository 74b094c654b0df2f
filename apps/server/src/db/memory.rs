//! In-memory implementation of the seller store.
//!
//! Records live in a `BTreeMap` keyed by seller id behind a `tokio::sync::RwLock`.
//! Used by tests and local development; nothing survives a restart.
//!
//! A unit of work takes the owned write guard for its whole lifetime and edits a
//! staged copy of the table. `commit` swaps the copy in; `rollback` (or drop)
//! throws it away. Writers are therefore serialized, and readers never observe
//! uncommitted changes.

use super::traits::{SellerStore, SellerUnitOfWork};
use crate::{
    models::{ApprovalState, NewSeller, Page, PageRequest, Seller},
    Error, Result,
};
use async_trait::async_trait;
use std::{collections::BTreeMap, sync::Arc};
use tokio::sync::{OwnedRwLockWriteGuard, RwLock};

#[derive(Debug, Clone, Default)]
struct SellerTable {
    next_id: i64,
    rows: BTreeMap<i64, Seller>,
}

impl SellerTable {
    fn page<'a>(&'a self, page: PageRequest, rows: impl Iterator<Item = &'a Seller>) -> Page<Seller> {
        let matching: Vec<&Seller> = rows.collect();
        let total = matching.len() as i64;
        let content = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .cloned()
            .collect();
        Page::new(content, page, total)
    }
}

#[derive(Clone, Default)]
pub struct InMemorySellerStore {
    table: Arc<RwLock<SellerTable>>,
}

impl InMemorySellerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl SellerStore for InMemorySellerStore {
    async fn find_by_id(&self, seller_id: i64) -> Result<Option<Seller>> {
        Ok(self.table.read().await.rows.get(&seller_id).cloned())
    }

    async fn find_all(&self, page: PageRequest) -> Result<Page<Seller>> {
        let table = self.table.read().await;
        Ok(table.page(page, table.rows.values()))
    }

    async fn find_all_excluding_deleted(&self, page: PageRequest) -> Result<Page<Seller>> {
        let table = self.table.read().await;
        Ok(table.page(page, table.rows.values().filter(|s| !s.is_deleted)))
    }

    async fn find_all_unpaged(&self) -> Result<Vec<Seller>> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn count_by_approval_state(&self, state: ApprovalState) -> Result<i64> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .filter(|s| s.approval_state == state)
            .count() as i64)
    }

    async fn begin(&self) -> Result<Box<dyn SellerUnitOfWork>> {
        let guard = self.table.clone().write_owned().await;
        let staged = guard.clone();
        Ok(Box::new(InMemoryUnitOfWork { guard, staged }))
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

pub struct InMemoryUnitOfWork {
    guard: OwnedRwLockWriteGuard<SellerTable>,
    staged: SellerTable,
}

#[async_trait]
impl SellerUnitOfWork for InMemoryUnitOfWork {
    async fn find_by_id_for_update(&mut self, seller_id: i64) -> Result<Option<Seller>> {
        Ok(self.staged.rows.get(&seller_id).cloned())
    }

    async fn insert(&mut self, seller: NewSeller) -> Result<Seller> {
        self.staged.next_id += 1;
        let seller = seller.into_seller(self.staged.next_id);
        self.staged.rows.insert(seller.seller_id, seller.clone());
        Ok(seller)
    }

    async fn update(&mut self, seller: &Seller) -> Result<Seller> {
        let row = self
            .staged
            .rows
            .get_mut(&seller.seller_id)
            .ok_or(Error::SellerNotFound(seller.seller_id))?;

        // Same column set as the SQL backend: identity and creation data stay put.
        row.store_name = seller.store_name.clone();
        row.store_description = seller.store_description.clone();
        row.store_image_url = seller.store_image_url.clone();
        row.store_phone_number = seller.store_phone_number.clone();
        row.approval_state = seller.approval_state;
        row.is_deleted = seller.is_deleted;
        row.updated_at = seller.updated_at;
        Ok(row.clone())
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        let Self { mut guard, staged } = *self;
        *guard = staged;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        Ok(())
    }
}
