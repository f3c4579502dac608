//! Pagination extractor
//!
//! Extracts page-based pagination and an optional status filter from the
//! query string.

use affiliate_service::dto::PageRequest;
use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;

use crate::response::ApiError;

/// Raw list query parameters
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Clamped page request plus status filter
#[derive(Debug, Clone, Default)]
pub struct Pagination {
    pub page: PageRequest,
    pub status: Option<String>,
}

impl Pagination {
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }
}

impl From<ListParams> for Pagination {
    fn from(params: ListParams) -> Self {
        Self {
            page: PageRequest::new(params.page, params.limit),
            status: params
                .status
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<ListParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.body_text()))?;

        Ok(Pagination::from(params))
    }
}
