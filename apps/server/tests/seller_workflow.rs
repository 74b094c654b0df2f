//! Seller workflow behaviour at the service layer
//!
//! Runs `SellerService` over the in-memory store and message sink, with the
//! real producer in between, and checks reads, writes and emitted events.

#[allow(unused)]
mod support;

use async_trait::async_trait;
use seller_service::{
    config::TopicsConfig,
    db::{InMemorySellerStore, SellerStore, SellerUnitOfWork},
    messaging::InMemoryMessageSink,
    models::{
        ApprovalState, ModifySellerInfo, NewSeller, Page, PageRequest, Seller,
        SellerInfoDto, SellerJudgeRequest, SignUpInfo,
    },
    state::AppState,
    Error,
};
use std::{sync::Arc, time::Duration};
use support::{test_config, TestApp};

fn sign_up(store_name: &str) -> SignUpInfo {
    serde_json::from_value(support::sign_up_body(store_name)).expect("valid sign-up body")
}

fn judge(seller_id: i64, approval_state: ApprovalState) -> SellerJudgeRequest {
    SellerJudgeRequest {
        seller_id,
        approval_state,
    }
}

#[tokio::test]
async fn saved_seller_is_retrievable_and_waiting() -> anyhow::Result<()> {
    let app = TestApp::new(test_config());
    let service = &app.state.seller_service;

    let first = service.save_seller(sign_up("Andong Soju")).await?;
    let second = service.save_seller(sign_up("Jindo Hongju")).await?;

    assert_ne!(first.seller_id, second.seller_id);
    assert_eq!(first.approval_state, ApprovalState::Wait);
    assert!(!first.is_deleted);

    let info = service.get_seller_info(first.seller_id).await?;
    assert_eq!(info.seller_id, first.seller_id);
    assert_eq!(info.store_name, "Andong Soju");
    assert_eq!(info.approval_state, ApprovalState::Wait);

    // Creating a seller is not an event downstream services hear about.
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(app.sink.attempts(), 0);
    Ok(())
}

#[tokio::test]
async fn every_lookup_of_an_absent_id_is_not_found() -> anyhow::Result<()> {
    let app = TestApp::new(test_config());
    let service = &app.state.seller_service;

    assert!(matches!(service.get_seller_info(9).await, Err(Error::SellerNotFound(9))));
    assert!(matches!(service.get_my_seller_info(9).await, Err(Error::SellerNotFound(9))));
    assert!(matches!(service.get_seller_one(9).await, Err(Error::SellerNotFound(9))));
    assert!(matches!(service.get_my_info(9).await, Err(Error::SellerNotFound(9))));
    assert!(matches!(
        service.get_seller_one_for_consumer(9).await,
        Err(Error::SellerNotFound(9))
    ));
    assert!(matches!(
        service.get_seller_info_for_auction(9).await,
        Err(Error::SellerNotFound(9))
    ));
    Ok(())
}

#[tokio::test]
async fn delete_keeps_record_and_notifies_each_downstream_once() -> anyhow::Result<()> {
    let app = TestApp::new(test_config());
    let service = &app.state.seller_service;
    let kept = service.save_seller(sign_up("Gyeongju Beopju")).await?;
    let removed = service.save_seller(sign_up("Boeun Daechu")).await?;

    service.delete_seller(removed.seller_id).await?;

    // Soft deletion: id lookups still succeed.
    let info = service.get_seller_info(removed.seller_id).await?;
    assert_eq!(info.seller_id, removed.seller_id);

    let consumer_page = service
        .get_all_seller_by_consumer(PageRequest::default())
        .await?;
    let consumer_ids: Vec<i64> = consumer_page.content.iter().map(|s| s.seller_id).collect();
    assert_eq!(consumer_ids, vec![kept.seller_id]);
    assert_eq!(consumer_page.total_elements, 1);

    let admin_page = service.get_all_seller(PageRequest::default()).await?;
    assert_eq!(admin_page.total_elements, 2);
    let admin_view = admin_page
        .content
        .iter()
        .find(|s| s.seller_id == removed.seller_id)
        .expect("deleted seller listed for admins");
    assert!(admin_view.is_deleted);

    assert!(app.wait_for_messages(3).await);
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(app.sink.attempts(), 3);
    let topics = &app.state.config.messaging.topics;
    for topic in [
        &topics.seller_deleted_product,
        &topics.seller_deleted_review,
        &topics.seller_deleted_authentication,
    ] {
        let messages = app.sink.messages_for(topic);
        assert_eq!(messages.len(), 1, "topic {}", topic);
        assert_eq!(messages[0].payload, serde_json::json!(removed.seller_id));
    }
    assert!(app.sink.messages_for(&topics.seller_updated).is_empty());
    Ok(())
}

#[tokio::test]
async fn deletion_notifications_are_independent() -> anyhow::Result<()> {
    let app = TestApp::new(test_config());
    let topics = app.state.config.messaging.topics.clone();
    app.sink.fail_topic(topics.seller_deleted_product.clone());

    let seller = app
        .state
        .seller_service
        .save_seller(sign_up("Hansan Sogokju"))
        .await?;
    app.state.seller_service.delete_seller(seller.seller_id).await?;

    assert!(app.wait_for_messages(3).await);
    assert!(app.sink.messages_for(&topics.seller_deleted_product).is_empty());
    assert_eq!(app.sink.messages_for(&topics.seller_deleted_review).len(), 1);
    assert_eq!(
        app.sink.messages_for(&topics.seller_deleted_authentication).len(),
        1
    );

    // The failed delivery never reached the caller and the deletion stands.
    let admin = app.state.seller_service.get_seller_list_by_admin().await?;
    assert!(admin[0].is_deleted);
    Ok(())
}

#[tokio::test]
async fn modify_applies_patch_and_emits_one_update() -> anyhow::Result<()> {
    let app = TestApp::new(test_config());
    let service = &app.state.seller_service;
    let seller = service.save_seller(sign_up("Munbae Ju")).await?;

    service
        .modify_seller(
            seller.seller_id,
            ModifySellerInfo {
                store_name: Some("Munbaeju Distillery".to_string()),
                store_image_url: Some("https://img.example/munbae.png".to_string()),
                ..Default::default()
            },
        )
        .await?;

    let info = service.get_seller_info(seller.seller_id).await?;
    assert_eq!(info.store_name, "Munbaeju Distillery");
    assert_eq!(
        info.store_image_url.as_deref(),
        Some("https://img.example/munbae.png")
    );
    // Untouched fields survive the patch.
    assert_eq!(info.store_phone_number, seller.store_phone_number);

    assert!(app.wait_for_messages(1).await);
    tokio::time::sleep(Duration::from_millis(50)).await;
    let messages = app.sink.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].topic, TopicsConfig::default().seller_updated);
    assert_eq!(messages[0].key, seller.seller_id.to_string());

    let published: SellerInfoDto = serde_json::from_value(messages[0].payload.clone())?;
    assert_eq!(published, info);
    Ok(())
}

#[tokio::test]
async fn approval_wait_count_tracks_judgements() -> anyhow::Result<()> {
    let app = TestApp::new(test_config());
    let service = &app.state.seller_service;

    let mut ids = Vec::new();
    for name in ["Seoul Yakju", "Busan Sansung", "Jeju Omegi", "Gimpo Geumjeong"] {
        ids.push(service.save_seller(sign_up(name)).await?.seller_id);
    }
    assert_eq!(service.get_approval_wait_count().await?, 4);

    service
        .modify_seller_approval_state(judge(ids[0], ApprovalState::Approved))
        .await?;
    service
        .modify_seller_approval_state(judge(ids[1], ApprovalState::Rejected))
        .await?;
    assert_eq!(service.get_approval_wait_count().await?, 2);

    // Rejected sellers can be sent back to the queue.
    service
        .modify_seller_approval_state(judge(ids[1], ApprovalState::Wait))
        .await?;
    assert_eq!(service.get_approval_wait_count().await?, 3);

    let err = service
        .modify_seller_approval_state(judge(999, ApprovalState::Approved))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::SellerNotFound(999)));
    assert_eq!(service.get_approval_wait_count().await?, 3);
    Ok(())
}

#[tokio::test]
async fn paging_walks_sellers_in_id_order() -> anyhow::Result<()> {
    let app = TestApp::new(test_config());
    let service = &app.state.seller_service;
    for i in 0..5 {
        service.save_seller(sign_up(&format!("Brewery {}", i))).await?;
    }

    let first = service
        .get_all_seller_by_consumer(PageRequest::new(0, 2, 100))
        .await?;
    let last = service
        .get_all_seller_by_consumer(PageRequest::new(2, 2, 100))
        .await?;

    assert_eq!(first.total_elements, 5);
    assert_eq!(first.total_pages, 3);
    assert_eq!(first.content.len(), 2);
    assert!(first.content[0].seller_id < first.content[1].seller_id);
    assert!(!first.is_last());
    assert_eq!(last.content.len(), 1);
    assert!(last.is_last());
    Ok(())
}

/// Store that behaves like the in-memory one but refuses every commit.
struct CommitRefusingStore {
    inner: InMemorySellerStore,
}

struct CommitRefusingUnitOfWork {
    inner: Box<dyn SellerUnitOfWork>,
}

#[async_trait]
impl SellerStore for CommitRefusingStore {
    async fn find_by_id(&self, seller_id: i64) -> seller_service::Result<Option<Seller>> {
        self.inner.find_by_id(seller_id).await
    }

    async fn find_all(&self, page: PageRequest) -> seller_service::Result<Page<Seller>> {
        self.inner.find_all(page).await
    }

    async fn find_all_excluding_deleted(
        &self,
        page: PageRequest,
    ) -> seller_service::Result<Page<Seller>> {
        self.inner.find_all_excluding_deleted(page).await
    }

    async fn find_all_unpaged(&self) -> seller_service::Result<Vec<Seller>> {
        self.inner.find_all_unpaged().await
    }

    async fn count_by_approval_state(&self, state: ApprovalState) -> seller_service::Result<i64> {
        self.inner.count_by_approval_state(state).await
    }

    async fn begin(&self) -> seller_service::Result<Box<dyn SellerUnitOfWork>> {
        Ok(Box::new(CommitRefusingUnitOfWork {
            inner: self.inner.begin().await?,
        }))
    }

    async fn health_check(&self) -> seller_service::Result<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "commit-refusing"
    }
}

#[async_trait]
impl SellerUnitOfWork for CommitRefusingUnitOfWork {
    async fn find_by_id_for_update(
        &mut self,
        seller_id: i64,
    ) -> seller_service::Result<Option<Seller>> {
        self.inner.find_by_id_for_update(seller_id).await
    }

    async fn insert(&mut self, seller: NewSeller) -> seller_service::Result<Seller> {
        self.inner.insert(seller).await
    }

    async fn update(&mut self, seller: &Seller) -> seller_service::Result<Seller> {
        self.inner.update(seller).await
    }

    async fn commit(self: Box<Self>) -> seller_service::Result<()> {
        self.inner.rollback().await?;
        Err(Error::Internal("commit refused".to_string()))
    }

    async fn rollback(self: Box<Self>) -> seller_service::Result<()> {
        self.inner.rollback().await
    }
}

#[tokio::test]
async fn failed_commit_publishes_nothing_and_changes_nothing() -> anyhow::Result<()> {
    let inner = InMemorySellerStore::new();
    let mut seed = inner.begin().await?;
    let seller = seed
        .insert(sign_up("Sunchang Gochujang Makgeolli").into_new_seller(chrono::Utc::now()))
        .await?;
    seed.commit().await?;

    let store = Arc::new(CommitRefusingStore { inner });
    let sink = Arc::new(InMemoryMessageSink::new());
    let state = AppState::from_parts(test_config(), store.clone(), sink.clone());
    let service = &state.seller_service;

    let patch = ModifySellerInfo {
        store_name: Some("Renamed".to_string()),
        ..Default::default()
    };
    assert!(service.modify_seller(seller.seller_id, patch).await.is_err());
    assert!(service.delete_seller(seller.seller_id).await.is_err());
    assert!(service
        .modify_seller_approval_state(judge(seller.seller_id, ApprovalState::Approved))
        .await
        .is_err());
    assert!(service.save_seller(sign_up("Never Stored")).await.is_err());

    let unchanged = store
        .find_by_id(seller.seller_id)
        .await?
        .expect("seeded seller still present");
    assert_eq!(unchanged, seller);
    assert_eq!(store.find_all_unpaged().await?.len(), 1);

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(sink.attempts(), 0);
    Ok(())
}
