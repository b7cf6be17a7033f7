//! Caller identity extractor.
//!
//! Authentication lives in front of this service; the gateway resolves
//! the session and injects the caller's user id as the `x-caller-id`
//! header. This extractor surfaces it to handlers that record ownership.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use stagemap_core::error::CoreError;
use stagemap_core::types::UserId;

use crate::error::AppError;
use crate::state::AppState;

/// The caller resolved by the upstream auth collaborator.
///
/// Use as an extractor parameter in any handler that needs to know who
/// is acting:
///
/// ```ignore
/// async fn my_handler(caller: CallerIdentity) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %caller.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CallerIdentity {
    pub user_id: UserId,
}

impl FromRequestParts<AppState> for CallerIdentity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get("x-caller-id")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Missing x-caller-id header".into()))
            })?;

        let user_id: UserId = header.parse().map_err(|_| {
            AppError::Core(CoreError::Unauthorized(
                "x-caller-id must be a valid UUID".into(),
            ))
        })?;

        Ok(CallerIdentity { user_id })
    }
}
