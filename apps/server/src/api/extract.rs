//! Request extractors shared by the seller handlers

use crate::{config::PaginationConfig, models::PageRequest, Error, Result};
use axum::{
    async_trait,
    extract::{
        rejection::{JsonRejection, PathRejection},
        FromRequestParts, Path,
    },
    http::request::Parts,
    Json,
};
use serde::Deserialize;

/// Header set by the gateway after authenticating the caller.
pub const MEMBER_ID_HEADER: &str = "memberId";

/// Identifier of the authenticated seller, taken from the `memberId` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for MemberId
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(MEMBER_ID_HEADER)
            .ok_or_else(|| Error::Validation(format!("Missing {} header", MEMBER_ID_HEADER)))?;

        raw.to_str()
            .ok()
            .and_then(|v| v.trim().parse::<i64>().ok())
            .map(MemberId)
            .ok_or_else(|| Error::Validation(format!("Invalid {} header", MEMBER_ID_HEADER)))
    }
}

/// `?page=&size=` kept as raw strings so malformed values map to a 400 with our error body.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub size: Option<String>,
}

impl PageQuery {
    pub fn to_page_request(&self, config: &PaginationConfig) -> Result<PageRequest> {
        let page = parse_param("page", self.page.as_deref())?.unwrap_or(0);
        let size = match parse_param("size", self.size.as_deref())? {
            Some(0) => return Err(Error::Validation("size must be at least 1".to_string())),
            Some(size) => size,
            None => config.default_size,
        };
        Ok(PageRequest::new(page, size, config.max_size))
    }
}

fn parse_param(name: &str, value: Option<&str>) -> Result<Option<u32>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => v
            .parse::<u32>()
            .map(Some)
            .map_err(|_| Error::Validation(format!("{} must be a non-negative integer", name))),
    }
}

/// Unwrap a JSON body, turning axum's rejection into a validation error.
pub fn json_body<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| Error::Validation(rejection.body_text()))
}

/// Unwrap a numeric path id, turning axum's rejection into a validation error.
pub fn path_id(path: std::result::Result<Path<i64>, PathRejection>) -> Result<i64> {
    path.map(|Path(id)| id)
        .map_err(|rejection| Error::Validation(rejection.body_text()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pagination() -> PaginationConfig {
        PaginationConfig {
            default_size: 20,
            max_size: 50,
        }
    }

    #[test]
    fn missing_params_use_defaults() {
        let request = PageQuery::default().to_page_request(&pagination()).unwrap();
        assert_eq!(request, PageRequest { page: 0, size: 20 });
    }

    #[test]
    fn oversized_pages_are_clamped() {
        let query = PageQuery {
            page: Some("3".to_string()),
            size: Some("500".to_string()),
        };
        let request = query.to_page_request(&pagination()).unwrap();
        assert_eq!(request, PageRequest { page: 3, size: 50 });
    }

    #[test]
    fn malformed_params_are_rejected() {
        for (page, size) in [("-1", "10"), ("x", "10"), ("0", "0"), ("0", "ten")] {
            let query = PageQuery {
                page: Some(page.to_string()),
                size: Some(size.to_string()),
            };
            assert!(matches!(
                query.to_page_request(&pagination()),
                Err(Error::Validation(_))
            ));
        }
    }
}
