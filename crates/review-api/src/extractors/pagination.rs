//! Pagination extractor
//!
//! Extracts page-number pagination parameters from query strings. The
//! default and maximum page sizes come from the review settings.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts, Query},
    http::request::Parts,
};
use review_common::ReviewSettings;
use review_core::traits::Page;
use serde::Deserialize;

use crate::response::ApiError;
use crate::state::AppState;

/// Raw pagination query parameters
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    /// 1-based page number
    #[serde(default)]
    pub page: Option<u32>,
    /// Maximum number of items to return
    #[serde(default)]
    pub limit: Option<u32>,
}

/// Validated pagination parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination(pub Page);

impl Pagination {
    /// Validate raw parameters against the configured page sizes
    ///
    /// `page` must be at least 1; `limit` must be within `1..=max_page_size`.
    pub fn from_params(params: PaginationParams, settings: &ReviewSettings) -> Result<Self, ApiError> {
        let page = params.page.unwrap_or(1);
        if page == 0 {
            return Err(ApiError::invalid_query("page must be at least 1"));
        }

        let limit = params.limit.unwrap_or(settings.default_page_size);
        if limit == 0 || limit > settings.max_page_size {
            return Err(ApiError::invalid_query(format!(
                "limit must be between 1 and {}",
                settings.max_page_size
            )));
        }

        Ok(Pagination(Page::new(page, limit)))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PaginationParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.body_text()))?;

        let app_state = AppState::from_ref(state);
        Pagination::from_params(params, &app_state.config().reviews)
    }
}
