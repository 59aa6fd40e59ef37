//! Axum extractors for request handling
//!
//! Custom extractors for caller identity, validation, pagination and ids.

mod auth;
mod pagination;
mod path;
mod validated;

pub use auth::{CurrentActor, MaybeActor, USER_ID_HEADER};
pub use pagination::{Pagination, PaginationParams};
pub use path::{CuisinePath, RestaurantIdPath, ReviewIdPath, UserIdPath};
pub use validated::{ValidatedJson, ValidatedQuery};
