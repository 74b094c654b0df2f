use crate::api::handlers::admin;
use crate::state::AppState;
use axum::{
    routing::{delete, get, patch},
    Router,
};

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(admin::list_sellers))
        .route("/all", get(admin::list_all_sellers))
        // Approval moderation
        .route("/approval", patch(admin::judge_seller))
        .route("/approval-wait-count", get(admin::approval_wait_count))
        .route("/:id", delete(admin::delete_seller))
}
