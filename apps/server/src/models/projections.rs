//! Response shapes derived from a `Seller`
//!
//! Each projection exposes a different subset of the record. Administrative
//! views carry moderation metadata; consumer views never do.

use super::seller::{ApprovalState, Seller};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Seller summary. Also the payload of the seller-updated event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerInfoDto {
    pub seller_id: i64,
    pub store_name: String,
    pub store_description: String,
    pub store_image_url: Option<String>,
    pub store_phone_number: String,
    pub approval_state: ApprovalState,
}

impl From<&Seller> for SellerInfoDto {
    fn from(seller: &Seller) -> Self {
        Self {
            seller_id: seller.seller_id,
            store_name: seller.store_name.clone(),
            store_description: seller.store_description.clone(),
            store_image_url: seller.store_image_url.clone(),
            store_phone_number: seller.store_phone_number.clone(),
            approval_state: seller.approval_state,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerMyInfoDto {
    pub store_name: String,
    pub store_image_url: Option<String>,
    pub email: String,
}

impl From<&Seller> for SellerMyInfoDto {
    fn from(seller: &Seller) -> Self {
        Self {
            store_name: seller.store_name.clone(),
            store_image_url: seller.store_image_url.clone(),
            email: seller.email.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerInfoForAdminDto {
    pub seller_id: i64,
    pub email: String,
    pub store_name: String,
    pub business_registration_number: String,
    pub approval_state: ApprovalState,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Seller> for SellerInfoForAdminDto {
    fn from(seller: &Seller) -> Self {
        Self {
            seller_id: seller.seller_id,
            email: seller.email.clone(),
            store_name: seller.store_name.clone(),
            business_registration_number: seller.business_registration_number.clone(),
            approval_state: seller.approval_state,
            is_deleted: seller.is_deleted,
            created_at: seller.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetSellerForConsumerDto {
    pub seller_id: i64,
    pub store_name: String,
    pub store_image_url: Option<String>,
}

impl From<&Seller> for GetSellerForConsumerDto {
    fn from(seller: &Seller) -> Self {
        Self {
            seller_id: seller.seller_id,
            store_name: seller.store_name.clone(),
            store_image_url: seller.store_image_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerInfoForConsumerDto {
    pub store_name: String,
    pub store_description: String,
    pub store_image_url: Option<String>,
    pub store_phone_number: String,
}

impl From<&Seller> for SellerInfoForConsumerDto {
    fn from(seller: &Seller) -> Self {
        Self {
            store_name: seller.store_name.clone(),
            store_description: seller.store_description.clone(),
            store_image_url: seller.store_image_url.clone(),
            store_phone_number: seller.store_phone_number.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerInfoDetailsDto {
    pub seller_id: i64,
    pub email: String,
    pub store_name: String,
    pub store_description: String,
    pub store_image_url: Option<String>,
    pub store_phone_number: String,
    pub business_name: String,
    pub business_owner_name: String,
    pub business_registration_number: String,
}

impl From<&Seller> for SellerInfoDetailsDto {
    fn from(seller: &Seller) -> Self {
        Self {
            seller_id: seller.seller_id,
            email: seller.email.clone(),
            store_name: seller.store_name.clone(),
            store_description: seller.store_description.clone(),
            store_image_url: seller.store_image_url.clone(),
            store_phone_number: seller.store_phone_number.clone(),
            business_name: seller.business_name.clone(),
            business_owner_name: seller.business_owner_name.clone(),
            business_registration_number: seller.business_registration_number.clone(),
        }
    }
}

/// Self view used by the seller's own account page.
///
/// Deliberately separate from `SellerMyInfoDto`; the two are independent projections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetMySellerInfo {
    pub email: String,
    pub store_name: String,
    pub store_description: String,
    pub store_image_url: Option<String>,
    pub store_phone_number: String,
    pub approval_state: ApprovalState,
}

impl From<&Seller> for GetMySellerInfo {
    fn from(seller: &Seller) -> Self {
        Self {
            email: seller.email.clone(),
            store_name: seller.store_name.clone(),
            store_description: seller.store_description.clone(),
            store_image_url: seller.store_image_url.clone(),
            store_phone_number: seller.store_phone_number.clone(),
            approval_state: seller.approval_state,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerInfoForAuctionDto {
    pub seller_id: i64,
    pub store_name: String,
    pub store_image_url: Option<String>,
}

impl From<&Seller> for SellerInfoForAuctionDto {
    fn from(seller: &Seller) -> Self {
        Self {
            seller_id: seller.seller_id,
            store_name: seller.store_name.clone(),
            store_image_url: seller.store_image_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetSellerByAdminDto {
    pub seller_id: i64,
    pub store_name: String,
    pub approval_state: ApprovalState,
    pub is_deleted: bool,
}

impl From<&Seller> for GetSellerByAdminDto {
    fn from(seller: &Seller) -> Self {
        Self {
            seller_id: seller.seller_id,
            store_name: seller.store_name.clone(),
            approval_state: seller.approval_state,
            is_deleted: seller.is_deleted,
        }
    }
}
