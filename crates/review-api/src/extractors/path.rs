//! Path parameter extractors
//!
//! Typed extraction of ids from path segments. Ids must be positive integers.
//! The cuisine segment is free text of at most 100 characters.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use review_core::value_objects::{RestaurantId, ReviewId, UserId};
use serde::Deserialize;

use crate::response::ApiError;

macro_rules! id_path {
    ($(#[$meta:meta])* $name:ident, $field:ident, $id:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name(pub $id);

        #[async_trait]
        impl<S> FromRequestParts<S> for $name
        where
            S: Send + Sync,
        {
            type Rejection = ApiError;

            async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
                #[derive(Deserialize)]
                struct Params {
                    $field: String,
                }

                let Path(params) = Path::<Params>::from_request_parts(parts, state)
                    .await
                    .map_err(|e| ApiError::invalid_path(e.body_text()))?;

                params.$field.parse::<$id>().map($name).map_err(|_| {
                    ApiError::invalid_path(concat!("Invalid ", stringify!($field), " format"))
                })
            }
        }
    };
}

id_path!(
    /// `:restaurant_id` path segment
    RestaurantIdPath,
    restaurant_id,
    RestaurantId
);

id_path!(
    /// `:review_id` path segment
    ReviewIdPath,
    review_id,
    ReviewId
);

id_path!(
    /// `:user_id` path segment
    UserIdPath,
    user_id,
    UserId
);

/// `:cuisine` path segment, percent-decoded and trimmed
#[derive(Debug, Clone)]
pub struct CuisinePath(pub String);

impl CuisinePath {
    const MAX_CHARS: usize = 100;

    fn parse(raw: &str) -> Result<Self, ApiError> {
        let cuisine = raw.trim();
        if cuisine.is_empty() || cuisine.chars().count() > Self::MAX_CHARS {
            return Err(ApiError::invalid_path("cuisine must be 1-100 characters"));
        }
        Ok(CuisinePath(cuisine.to_string()))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CuisinePath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        #[derive(Deserialize)]
        struct Params {
            cuisine: String,
        }

        let Path(params) = Path::<Params>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.body_text()))?;

        CuisinePath::parse(&params.cuisine)
    }
}
