//! Seller service - reads, profile changes, approval judgements and lifecycle events
//!
//! Reads fetch from the store and project into a response shape. Writes run in
//! one unit of work (fetch for update, mutate, persist, commit) and publish
//! events only once the commit succeeded.

use crate::{
    db::{SellerStore, SellerUnitOfWork},
    events::SellerEventPublisher,
    metrics,
    models::{
        ApprovalState, GetMySellerInfo, GetSellerByAdminDto, GetSellerForConsumerDto,
        ModifySellerInfo, Page, PageRequest, Seller, SellerInfoDetailsDto, SellerInfoDto,
        SellerInfoForAdminDto, SellerInfoForAuctionDto, SellerInfoForConsumerDto,
        SellerJudgeRequest, SellerMyInfoDto, SignUpInfo,
    },
    Error, Result,
};
use chrono::Utc;
use std::sync::Arc;

pub struct SellerService {
    store: Arc<dyn SellerStore>,
    publisher: Arc<dyn SellerEventPublisher>,
}

impl SellerService {
    pub fn new(store: Arc<dyn SellerStore>, publisher: Arc<dyn SellerEventPublisher>) -> Self {
        Self { store, publisher }
    }

    async fn find_seller(&self, seller_id: i64) -> Result<Seller> {
        self.store
            .find_by_id(seller_id)
            .await?
            .ok_or(Error::SellerNotFound(seller_id))
    }

    pub async fn get_seller_info(&self, seller_id: i64) -> Result<SellerInfoDto> {
        Ok(SellerInfoDto::from(&self.find_seller(seller_id).await?))
    }

    pub async fn get_my_seller_info(&self, seller_id: i64) -> Result<SellerMyInfoDto> {
        Ok(SellerMyInfoDto::from(&self.find_seller(seller_id).await?))
    }

    /// Admin listing, deleted sellers included.
    pub async fn get_all_seller(&self, page: PageRequest) -> Result<Page<SellerInfoForAdminDto>> {
        let sellers = self.store.find_all(page).await?;
        Ok(sellers.map(|s| SellerInfoForAdminDto::from(&s)))
    }

    /// Consumer listing, deleted sellers never appear.
    pub async fn get_all_seller_by_consumer(
        &self,
        page: PageRequest,
    ) -> Result<Page<GetSellerForConsumerDto>> {
        let sellers = self.store.find_all_excluding_deleted(page).await?;
        Ok(sellers.map(|s| GetSellerForConsumerDto::from(&s)))
    }

    /// Assign a new approval state. Any state may follow any other.
    pub async fn modify_seller_approval_state(&self, request: SellerJudgeRequest) -> Result<()> {
        let mut uow = self.store.begin().await?;
        let outcome = judge(uow.as_mut(), request).await;
        let seller = finish(uow, outcome).await?;

        metrics::record_mutation("judge");
        tracing::info!(
            seller_id = seller.seller_id,
            approval_state = %seller.approval_state,
            "Seller approval state changed"
        );
        Ok(())
    }

    pub async fn get_seller_one_for_consumer(
        &self,
        seller_id: i64,
    ) -> Result<SellerInfoForConsumerDto> {
        Ok(SellerInfoForConsumerDto::from(
            &self.find_seller(seller_id).await?,
        ))
    }

    pub async fn get_seller_one(&self, seller_id: i64) -> Result<SellerInfoDetailsDto> {
        Ok(SellerInfoDetailsDto::from(&self.find_seller(seller_id).await?))
    }

    pub async fn get_my_info(&self, seller_id: i64) -> Result<GetMySellerInfo> {
        Ok(GetMySellerInfo::from(&self.find_seller(seller_id).await?))
    }

    /// Soft-delete a seller, then tell product, review and authentication about it.
    ///
    /// Deleting an already-deleted seller is accepted and notifies again.
    pub async fn delete_seller(&self, seller_id: i64) -> Result<()> {
        let mut uow = self.store.begin().await?;
        let outcome = mark_deleted(uow.as_mut(), seller_id).await;
        finish(uow, outcome).await?;

        metrics::record_mutation("delete");
        tracing::info!(seller_id, "Seller soft-deleted");

        self.publisher.notify_seller_deleted(seller_id);
        Ok(())
    }

    /// Apply a profile patch, then publish the post-mutation summary.
    pub async fn modify_seller(&self, seller_id: i64, patch: ModifySellerInfo) -> Result<()> {
        let mut uow = self.store.begin().await?;
        let outcome = apply_patch(uow.as_mut(), seller_id, &patch).await;
        let seller = finish(uow, outcome).await?;

        metrics::record_mutation("modify");
        tracing::info!(seller_id, "Seller profile modified");

        self.publisher
            .notify_seller_updated(SellerInfoDto::from(&seller));
        Ok(())
    }

    /// Create a seller from a sign-up hand-off. New sellers start in `WAIT`.
    pub async fn save_seller(&self, sign_up: SignUpInfo) -> Result<Seller> {
        let mut uow = self.store.begin().await?;
        let outcome = uow.insert(sign_up.into_new_seller(Utc::now())).await;
        let seller = finish(uow, outcome).await?;

        metrics::record_mutation("create");
        tracing::info!(seller_id = seller.seller_id, "Seller created");
        Ok(seller)
    }

    pub async fn get_seller_info_for_auction(
        &self,
        seller_id: i64,
    ) -> Result<SellerInfoForAuctionDto> {
        Ok(SellerInfoForAuctionDto::from(
            &self.find_seller(seller_id).await?,
        ))
    }

    /// Unpaginated admin list, deleted sellers included.
    pub async fn get_seller_list_by_admin(&self) -> Result<Vec<GetSellerByAdminDto>> {
        let sellers = self.store.find_all_unpaged().await?;
        Ok(sellers.iter().map(GetSellerByAdminDto::from).collect())
    }

    pub async fn get_approval_wait_count(&self) -> Result<i64> {
        self.store
            .count_by_approval_state(ApprovalState::Wait)
            .await
    }
}

/// Commit on success, roll back on failure. Either way the unit of work is released here.
async fn finish<T>(uow: Box<dyn SellerUnitOfWork>, outcome: Result<T>) -> Result<T> {
    match outcome {
        Ok(value) => {
            uow.commit().await?;
            Ok(value)
        }
        Err(e) => {
            if let Err(rollback_err) = uow.rollback().await {
                tracing::warn!(error = %rollback_err, "Rollback failed");
            }
            Err(e)
        }
    }
}

async fn load_for_update(uow: &mut dyn SellerUnitOfWork, seller_id: i64) -> Result<Seller> {
    uow.find_by_id_for_update(seller_id)
        .await?
        .ok_or(Error::SellerNotFound(seller_id))
}

async fn judge(uow: &mut dyn SellerUnitOfWork, request: SellerJudgeRequest) -> Result<Seller> {
    let mut seller = load_for_update(uow, request.seller_id).await?;
    seller.judge(request.approval_state, Utc::now());
    uow.update(&seller).await
}

async fn mark_deleted(uow: &mut dyn SellerUnitOfWork, seller_id: i64) -> Result<Seller> {
    let mut seller = load_for_update(uow, seller_id).await?;
    seller.mark_deleted(Utc::now());
    uow.update(&seller).await
}

async fn apply_patch(
    uow: &mut dyn SellerUnitOfWork,
    seller_id: i64,
    patch: &ModifySellerInfo,
) -> Result<Seller> {
    let mut seller = load_for_update(uow, seller_id).await?;
    seller.modify(patch, Utc::now());
    uow.update(&seller).await
}
