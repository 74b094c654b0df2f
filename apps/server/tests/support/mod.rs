//! Shared harness for the HTTP-level tests
//!
//! Builds an `AppState` over the in-memory store and message sink and drives
//! the router directly with `oneshot`, so no listener or database is needed.

use anyhow::Context;
use axum::{
    body::{Body, Bytes},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use seller_service::{
    api::create_router,
    config::Config,
    db::InMemorySellerStore,
    messaging::InMemoryMessageSink,
    state::AppState,
};
use serde_json::{json, Value};
use std::{future::Future, pin::Pin, sync::Arc, time::Duration};
use tower::ServiceExt;

pub type TestFuture = Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send>>;

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub store: Arc<InMemorySellerStore>,
    pub sink: Arc<InMemoryMessageSink>,
}

impl TestApp {
    pub fn new(config: Config) -> Self {
        let store = Arc::new(InMemorySellerStore::new());
        let sink = Arc::new(InMemoryMessageSink::new());
        let state = AppState::from_parts(config, store.clone(), sink.clone());
        let router = create_router(state.clone());
        Self {
            router,
            state,
            store,
            sink,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> anyhow::Result<(StatusCode, HeaderMap, Bytes)> {
        self.request_with_extra_headers(method, path, body, &[])
            .await
    }

    /// Request on behalf of a seller, setting the `memberId` header.
    pub async fn request_as(
        &self,
        member_id: i64,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> anyhow::Result<(StatusCode, HeaderMap, Bytes)> {
        let member_id = member_id.to_string();
        self.request_with_extra_headers(method, path, body, &[("memberId", member_id.as_str())])
            .await
    }

    pub async fn request_with_extra_headers(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
        headers: &[(&str, &str)],
    ) -> anyhow::Result<(StatusCode, HeaderMap, Bytes)> {
        let mut builder = Request::builder().method(method).uri(path);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }

        let request = match body {
            Some(bytes) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(bytes))?,
            None => builder.body(Body::empty())?,
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .context("router failed to respond")?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        Ok((status, headers, body))
    }

    /// Register a seller through the internal sign-up route and return its id.
    pub async fn sign_up(&self, store_name: &str) -> anyhow::Result<i64> {
        let (status, _headers, body) = self
            .request(
                Method::POST,
                "/internal/sellers",
                Some(to_json_body(&sign_up_body(store_name))?),
            )
            .await?;
        assert_status(status, StatusCode::CREATED, "sign up");

        let seller: Value = serde_json::from_slice(&body)?;
        seller["sellerId"]
            .as_i64()
            .context("sign-up response carries sellerId")
    }

    /// Wait until the sink has seen `count` delivery attempts.
    pub async fn wait_for_messages(&self, count: usize) -> bool {
        self.sink
            .wait_for_attempts(count, Duration::from_secs(2))
            .await
    }
}

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.messaging.backend = "memory".to_string();
    config
}

pub async fn with_test_app<F>(test: F) -> anyhow::Result<()>
where
    F: FnOnce(TestApp) -> TestFuture,
{
    with_test_app_with_config(|_| {}, test).await
}

pub async fn with_test_app_with_config<C, F>(configure: C, test: F) -> anyhow::Result<()>
where
    C: FnOnce(&mut Config),
    F: FnOnce(TestApp) -> TestFuture,
{
    let mut config = test_config();
    configure(&mut config);
    test(TestApp::new(config)).await
}

pub fn sign_up_body(store_name: &str) -> Value {
    json!({
        "email": format!("{}@example.com", store_name.to_lowercase().replace(' ', "-")),
        "storeName": store_name,
        "storeDescription": format!("{} brews traditional makgeolli", store_name),
        "storeImageUrl": null,
        "storePhoneNumber": "010-1234-5678",
        "businessName": format!("{} Co.", store_name),
        "businessOwnerName": "Park Jiho",
        "businessRegistrationNumber": "123-45-67890"
    })
}

pub fn to_json_body(value: &Value) -> anyhow::Result<Vec<u8>> {
    Ok(serde_json::to_vec(value)?)
}

pub fn assert_status(actual: StatusCode, expected: StatusCode, context: &str) {
    assert_eq!(
        actual, expected,
        "unexpected status for {}: got {}, expected {}",
        context, actual, expected
    );
}
