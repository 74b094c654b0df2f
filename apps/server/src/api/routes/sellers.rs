use crate::api::handlers::sellers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

/// Read-only views other services and consumers query by seller id
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(sellers::list_sellers))
        .route("/:id", get(sellers::get_seller))
        .route("/:id/consumer", get(sellers::get_seller_for_consumer))
        .route("/:id/info", get(sellers::get_seller_info))
        .route("/:id/auction", get(sellers::get_seller_for_auction))
}

/// The authenticated seller's own record, identified by the `memberId` header
pub fn my_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(sellers::get_my_seller)
                .patch(sellers::modify_my_seller)
                .delete(sellers::delete_my_seller),
        )
        .route("/info", get(sellers::get_my_info))
}

pub fn internal_routes() -> Router<AppState> {
    Router::new().route("/", post(sellers::create_seller))
}
