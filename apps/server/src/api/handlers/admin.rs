//! Seller moderation handlers (admin API)

use crate::{
    api::extract::{json_body, path_id, PageQuery},
    models::SellerJudgeRequest,
    state::AppState,
    Result,
};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Paged admin listing, deleted sellers included
pub async fn list_sellers(
    State(state): State<AppState>,
    Query(q): Query<PageQuery>,
) -> Result<Response> {
    let page = q.to_page_request(&state.config.pagination)?;
    let sellers = state.seller_service.get_all_seller(page).await?;
    Ok((StatusCode::OK, Json(sellers)).into_response())
}

pub async fn list_all_sellers(State(state): State<AppState>) -> Result<Response> {
    let sellers = state.seller_service.get_seller_list_by_admin().await?;
    Ok((StatusCode::OK, Json(sellers)).into_response())
}

pub async fn judge_seller(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SellerJudgeRequest>, JsonRejection>,
) -> Result<Response> {
    let request = json_body(payload)?;
    state
        .seller_service
        .modify_seller_approval_state(request)
        .await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

pub async fn approval_wait_count(State(state): State<AppState>) -> Result<Response> {
    let count = state.seller_service.get_approval_wait_count().await?;
    Ok((StatusCode::OK, Json(json!({ "count": count }))).into_response())
}

pub async fn delete_seller(
    State(state): State<AppState>,
    path: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Response> {
    let seller_id = path_id(path)?;
    state.seller_service.delete_seller(seller_id).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
