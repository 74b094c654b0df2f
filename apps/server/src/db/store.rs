//! PostgreSQL-backed `SellerStore` implementation

use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Postgres, Row, Transaction};

use crate::{
    db::traits::{SellerStore, SellerUnitOfWork},
    models::{ApprovalState, NewSeller, Page, PageRequest, Seller},
    Error, Result,
};

const SELLER_COLUMNS: &str = "seller_id, email, store_name, store_description, store_image_url,
     store_phone_number, business_name, business_owner_name, business_registration_number,
     approval_state, is_deleted, created_at, updated_at";

fn seller_from_row(r: &PgRow) -> Result<Seller> {
    let approval_state: String = r.get("approval_state");
    let approval_state = approval_state
        .parse::<ApprovalState>()
        .map_err(Error::Internal)?;

    Ok(Seller {
        seller_id: r.get("seller_id"),
        email: r.get("email"),
        store_name: r.get("store_name"),
        store_description: r.get("store_description"),
        store_image_url: r.get("store_image_url"),
        store_phone_number: r.get("store_phone_number"),
        business_name: r.get("business_name"),
        business_owner_name: r.get("business_owner_name"),
        business_registration_number: r.get("business_registration_number"),
        approval_state,
        is_deleted: r.get("is_deleted"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    })
}

fn sellers_from_rows(rows: Vec<PgRow>) -> Result<Vec<Seller>> {
    rows.iter().map(seller_from_row).collect()
}

/// PostgreSQL-backed SellerStore implementation
#[derive(Clone)]
pub struct PostgresSellerStore {
    pub(crate) pool: PgPool,
}

impl PostgresSellerStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_page(&self, page: PageRequest, only_active: bool) -> Result<Page<Seller>> {
        // `only_active` toggles a fixed predicate; nothing user-controlled is interpolated.
        let predicate = if only_active {
            "WHERE is_deleted = FALSE"
        } else {
            ""
        };

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM sellers {predicate}"))
            .fetch_one(&self.pool)
            .await?;

        let rows = sqlx::query(&format!(
            "SELECT {SELLER_COLUMNS} FROM sellers {predicate}
             ORDER BY seller_id ASC
             LIMIT $1 OFFSET $2"
        ))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(Page::new(sellers_from_rows(rows)?, page, total))
    }
}

#[async_trait]
impl SellerStore for PostgresSellerStore {
    async fn find_by_id(&self, seller_id: i64) -> Result<Option<Seller>> {
        let row = sqlx::query(&format!(
            "SELECT {SELLER_COLUMNS} FROM sellers WHERE seller_id = $1"
        ))
        .bind(seller_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(seller_from_row).transpose()
    }

    async fn find_all(&self, page: PageRequest) -> Result<Page<Seller>> {
        self.fetch_page(page, false).await
    }

    async fn find_all_excluding_deleted(&self, page: PageRequest) -> Result<Page<Seller>> {
        self.fetch_page(page, true).await
    }

    async fn find_all_unpaged(&self) -> Result<Vec<Seller>> {
        let rows = sqlx::query(&format!(
            "SELECT {SELLER_COLUMNS} FROM sellers ORDER BY seller_id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        sellers_from_rows(rows)
    }

    async fn count_by_approval_state(&self, state: ApprovalState) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sellers WHERE approval_state = $1")
            .bind(state.as_str())
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn begin(&self) -> Result<Box<dyn SellerUnitOfWork>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PostgresSellerUnitOfWork { tx }))
    }

    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}

/// Unit of work backed by a single database transaction.
pub struct PostgresSellerUnitOfWork {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl SellerUnitOfWork for PostgresSellerUnitOfWork {
    async fn find_by_id_for_update(&mut self, seller_id: i64) -> Result<Option<Seller>> {
        let row = sqlx::query(&format!(
            "SELECT {SELLER_COLUMNS} FROM sellers WHERE seller_id = $1 FOR UPDATE"
        ))
        .bind(seller_id)
        .fetch_optional(&mut *self.tx)
        .await?;

        row.as_ref().map(seller_from_row).transpose()
    }

    async fn insert(&mut self, seller: NewSeller) -> Result<Seller> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO sellers (
                email, store_name, store_description, store_image_url, store_phone_number,
                business_name, business_owner_name, business_registration_number,
                approval_state, is_deleted, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, FALSE, $10, $10)
            RETURNING {SELLER_COLUMNS}
            "#
        ))
        .bind(&seller.email)
        .bind(&seller.store_name)
        .bind(&seller.store_description)
        .bind(&seller.store_image_url)
        .bind(&seller.store_phone_number)
        .bind(&seller.business_name)
        .bind(&seller.business_owner_name)
        .bind(&seller.business_registration_number)
        .bind(seller.approval_state.as_str())
        .bind(seller.created_at)
        .fetch_one(&mut *self.tx)
        .await?;

        seller_from_row(&row)
    }

    async fn update(&mut self, seller: &Seller) -> Result<Seller> {
        // Identity and creation columns are never rewritten.
        let row = sqlx::query(&format!(
            r#"
            UPDATE sellers
            SET store_name = $2,
                store_description = $3,
                store_image_url = $4,
                store_phone_number = $5,
                approval_state = $6,
                is_deleted = $7,
                updated_at = $8
            WHERE seller_id = $1
            RETURNING {SELLER_COLUMNS}
            "#
        ))
        .bind(seller.seller_id)
        .bind(&seller.store_name)
        .bind(&seller.store_description)
        .bind(&seller.store_image_url)
        .bind(&seller.store_phone_number)
        .bind(seller.approval_state.as_str())
        .bind(seller.is_deleted)
        .bind(seller.updated_at)
        .fetch_optional(&mut *self.tx)
        .await?;

        match row {
            Some(row) => seller_from_row(&row),
            None => Err(Error::SellerNotFound(seller.seller_id)),
        }
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        self.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        self.tx.rollback().await?;
        Ok(())
    }
}
