//! Seller entity and the inputs that create or mutate it

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use validator::Validate;

/// Moderation status of a seller account.
///
/// Any state may be assigned from any other; there is no transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalState {
    #[default]
    Wait,
    Approved,
    Rejected,
}

impl ApprovalState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wait => "WAIT",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for ApprovalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApprovalState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "WAIT" => Ok(Self::Wait),
            "APPROVED" => Ok(Self::Approved),
            "REJECTED" => Ok(Self::Rejected),
            other => Err(format!("Unknown approval state '{}'", other)),
        }
    }
}

/// Accepts any letter case, same as `FromStr`.
impl<'de> Deserialize<'de> for ApprovalState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A persisted seller record.
///
/// `seller_id` is assigned by the store on insert and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Seller {
    pub seller_id: i64,
    pub email: String,
    pub store_name: String,
    pub store_description: String,
    pub store_image_url: Option<String>,
    pub store_phone_number: String,
    pub business_name: String,
    pub business_owner_name: String,
    pub business_registration_number: String,
    pub approval_state: ApprovalState,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Seller {
    /// Apply a profile patch. Only fields present in the patch are touched.
    pub fn modify(&mut self, patch: &ModifySellerInfo, now: DateTime<Utc>) {
        if let Some(store_name) = &patch.store_name {
            self.store_name = store_name.clone();
        }
        if let Some(store_description) = &patch.store_description {
            self.store_description = store_description.clone();
        }
        if let Some(store_image_url) = &patch.store_image_url {
            self.store_image_url = Some(store_image_url.clone());
        }
        if let Some(store_phone_number) = &patch.store_phone_number {
            self.store_phone_number = store_phone_number.clone();
        }
        self.updated_at = now;
    }

    pub fn judge(&mut self, approval_state: ApprovalState, now: DateTime<Utc>) {
        self.approval_state = approval_state;
        self.updated_at = now;
    }

    pub fn mark_deleted(&mut self, now: DateTime<Utc>) {
        self.is_deleted = true;
        self.updated_at = now;
    }
}

/// A seller that has not been persisted yet (no identifier).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSeller {
    pub email: String,
    pub store_name: String,
    pub store_description: String,
    pub store_image_url: Option<String>,
    pub store_phone_number: String,
    pub business_name: String,
    pub business_owner_name: String,
    pub business_registration_number: String,
    pub approval_state: ApprovalState,
    pub created_at: DateTime<Utc>,
}

impl NewSeller {
    /// Attach the store-assigned identifier.
    pub fn into_seller(self, seller_id: i64) -> Seller {
        Seller {
            seller_id,
            email: self.email,
            store_name: self.store_name,
            store_description: self.store_description,
            store_image_url: self.store_image_url,
            store_phone_number: self.store_phone_number,
            business_name: self.business_name,
            business_owner_name: self.business_owner_name,
            business_registration_number: self.business_registration_number,
            approval_state: self.approval_state,
            is_deleted: false,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

/// Sign-up payload handed over by the authentication service.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignUpInfo {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 100))]
    pub store_name: String,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub store_description: String,
    pub store_image_url: Option<String>,
    #[validate(length(min = 1, max = 20))]
    pub store_phone_number: String,
    #[validate(length(min = 1, max = 100))]
    pub business_name: String,
    #[validate(length(min = 1, max = 50))]
    pub business_owner_name: String,
    #[validate(length(min = 1, max = 20))]
    pub business_registration_number: String,
}

impl SignUpInfo {
    pub fn into_new_seller(self, now: DateTime<Utc>) -> NewSeller {
        NewSeller {
            email: self.email,
            store_name: self.store_name,
            store_description: self.store_description,
            store_image_url: self.store_image_url,
            store_phone_number: self.store_phone_number,
            business_name: self.business_name,
            business_owner_name: self.business_owner_name,
            business_registration_number: self.business_registration_number,
            approval_state: ApprovalState::default(),
            created_at: now,
        }
    }
}

/// Profile patch submitted by the seller.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ModifySellerInfo {
    #[validate(length(min = 1, max = 100))]
    pub store_name: Option<String>,
    #[validate(length(max = 2000))]
    pub store_description: Option<String>,
    pub store_image_url: Option<String>,
    #[validate(length(min = 1, max = 20))]
    pub store_phone_number: Option<String>,
}

/// Approval judgement issued by an administrator.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerJudgeRequest {
    pub seller_id: i64,
    pub approval_state: ApprovalState,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn sign_up(store_name: &str) -> SignUpInfo {
        SignUpInfo {
            email: format!("{}@example.com", store_name.to_lowercase().replace(' ', "-")),
            store_name: store_name.to_string(),
            store_description: format!("{} brews traditional makgeolli", store_name),
            store_image_url: None,
            store_phone_number: "010-1234-5678".to_string(),
            business_name: format!("{} Co.", store_name),
            business_owner_name: "Kim Minji".to_string(),
            business_registration_number: "123-45-67890".to_string(),
        }
    }
}
