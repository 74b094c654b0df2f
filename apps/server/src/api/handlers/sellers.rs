//! Seller-facing and consumer-facing handlers

use crate::{
    api::extract::{json_body, path_id, MemberId, PageQuery},
    models::{ModifySellerInfo, SignUpInfo},
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
use validator::Validate;

/// Consumer listing, deleted sellers excluded
pub async fn list_sellers(
    State(state): State<AppState>,
    Query(q): Query<PageQuery>,
) -> Result<Response> {
    let page = q.to_page_request(&state.config.pagination)?;
    let sellers = state.seller_service.get_all_seller_by_consumer(page).await?;
    Ok((StatusCode::OK, Json(sellers)).into_response())
}

pub async fn get_seller(
    State(state): State<AppState>,
    path: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Response> {
    let seller_id = path_id(path)?;
    let seller = state.seller_service.get_seller_one(seller_id).await?;
    Ok((StatusCode::OK, Json(seller)).into_response())
}

pub async fn get_seller_for_consumer(
    State(state): State<AppState>,
    path: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Response> {
    let seller_id = path_id(path)?;
    let seller = state
        .seller_service
        .get_seller_one_for_consumer(seller_id)
        .await?;
    Ok((StatusCode::OK, Json(seller)).into_response())
}

pub async fn get_seller_info(
    State(state): State<AppState>,
    path: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Response> {
    let seller_id = path_id(path)?;
    let seller = state.seller_service.get_seller_info(seller_id).await?;
    Ok((StatusCode::OK, Json(seller)).into_response())
}

pub async fn get_seller_for_auction(
    State(state): State<AppState>,
    path: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Response> {
    let seller_id = path_id(path)?;
    let seller = state
        .seller_service
        .get_seller_info_for_auction(seller_id)
        .await?;
    Ok((StatusCode::OK, Json(seller)).into_response())
}

pub async fn get_my_seller(
    State(state): State<AppState>,
    MemberId(seller_id): MemberId,
) -> Result<Response> {
    let seller = state.seller_service.get_my_seller_info(seller_id).await?;
    Ok((StatusCode::OK, Json(seller)).into_response())
}

pub async fn get_my_info(
    State(state): State<AppState>,
    MemberId(seller_id): MemberId,
) -> Result<Response> {
    let seller = state.seller_service.get_my_info(seller_id).await?;
    Ok((StatusCode::OK, Json(seller)).into_response())
}

pub async fn modify_my_seller(
    State(state): State<AppState>,
    MemberId(seller_id): MemberId,
    payload: std::result::Result<Json<ModifySellerInfo>, JsonRejection>,
) -> Result<Response> {
    let patch = json_body(payload)?;
    patch.validate()?;

    state.seller_service.modify_seller(seller_id, patch).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

pub async fn delete_my_seller(
    State(state): State<AppState>,
    MemberId(seller_id): MemberId,
) -> Result<Response> {
    state.seller_service.delete_seller(seller_id).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

/// Sign-up hand-off from the authentication service
pub async fn create_seller(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SignUpInfo>, JsonRejection>,
) -> Result<Response> {
    let sign_up = json_body(payload)?;
    sign_up.validate()?;

    let seller = state.seller_service.save_seller(sign_up).await?;
    Ok((StatusCode::CREATED, Json(seller)).into_response())
}
