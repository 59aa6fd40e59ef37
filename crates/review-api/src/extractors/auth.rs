//! Caller identity extractor
//!
//! Authentication is handled upstream; the gateway forwards the caller's user
//! id in the `X-User-Id` header. Moderator permissions are looked up from the
//! stored role on every request.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use review_common::AppError;
use review_core::value_objects::{Actor, UserId};
use review_service::ModerationService;

use crate::response::ApiError;
use crate::state::AppState;

/// Header carrying the authenticated user id
pub const USER_ID_HEADER: &str = "x-user-id";

/// The calling user together with its moderator permissions
#[derive(Debug, Clone, Copy)]
pub struct CurrentActor(pub Actor);

impl CurrentActor {
    pub fn user_id(&self) -> UserId {
        self.0.user_id
    }
}

/// Parse the identity header; `None` when the header is absent
fn user_id_from_parts(parts: &Parts) -> Result<Option<UserId>, AppError> {
    let Some(value) = parts.headers.get(USER_ID_HEADER) else {
        return Ok(None);
    };

    let raw = value
        .to_str()
        .map_err(|_| AppError::InvalidIdentity("header is not valid ASCII".to_string()))?;

    raw.parse::<UserId>()
        .map(Some)
        .map_err(|_| AppError::InvalidIdentity(format!("'{raw}' is not a user id")))
}

/// Resolve the caller from the identity header, if one was sent
async fn resolve_actor<S>(parts: &Parts, state: &S) -> Result<Option<Actor>, ApiError>
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    let user_id = user_id_from_parts(parts).map_err(|e| {
        tracing::warn!(error = %e, "Invalid identity header");
        e
    })?;
    let Some(user_id) = user_id else {
        return Ok(None);
    };

    let app_state = AppState::from_ref(state);
    let actor = ModerationService::new(app_state.service_context())
        .resolve_actor(user_id)
        .await?;
    Ok(Some(actor))
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentActor
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let actor = resolve_actor(parts, state)
            .await?
            .ok_or(AppError::MissingIdentity)?;
        Ok(CurrentActor(actor))
    }
}

/// The caller when the identity header is present; anonymous otherwise
///
/// A malformed header is still rejected.
#[derive(Debug, Clone, Copy)]
pub struct MaybeActor(pub Option<Actor>);

#[async_trait]
impl<S> FromRequestParts<S> for MaybeActor
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        resolve_actor(parts, state).await.map(MaybeActor)
    }
}
