//! Handlers for a presentation's cast (`/presentations/{id}/viewers`).

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use stagemap_core::error::CoreError;
use stagemap_core::types::{DbId, UserId};
use stagemap_db::models::viewer::AddViewer;
use stagemap_db::repositories::{PresentationRepo, ViewerRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path};
use crate::response::CastStatus;
use crate::state::AppState;

/// POST /presentations/{id}/viewers
///
/// Add a user to the cast. Adding someone who is already a member is
/// not an error: the call reports the existing membership with 200
/// instead of 201.
pub async fn add(
    State(state): State<AppState>,
    Path(presentation_id): Path<DbId>,
    Json(input): Json<AddViewer>,
) -> AppResult<Response> {
    PresentationRepo::find_by_id(&state.pool, presentation_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Presentation", presentation_id)))?;

    let inserted = ViewerRepo::add(&state.pool, presentation_id, input.user_id).await?;
    if !inserted {
        return Ok((
            StatusCode::OK,
            Json(CastStatus {
                message: "User already in cast",
            }),
        )
            .into_response());
    }

    let viewer = ViewerRepo::find(&state.pool, presentation_id, input.user_id)
        .await?
        .ok_or_else(|| {
            AppError::InternalError("viewer row missing right after insert".into())
        })?;

    tracing::info!(presentation_id, user_id = %input.user_id, "Viewer added to cast");
    Ok((StatusCode::CREATED, Json(viewer)).into_response())
}

/// GET /presentations/{id}/viewers
pub async fn list(
    State(state): State<AppState>,
    Path(presentation_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    PresentationRepo::find_by_id(&state.pool, presentation_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Presentation", presentation_id)))?;

    let viewers = ViewerRepo::list(&state.pool, presentation_id).await?;
    Ok(Json(viewers))
}

/// GET /presentations/{id}/viewers/{user_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path((presentation_id, user_id)): Path<(DbId, UserId)>,
) -> AppResult<impl IntoResponse> {
    let viewer = ViewerRepo::find(&state.pool, presentation_id, user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Viewer", user_id)))?;
    Ok(Json(viewer))
}

/// DELETE /presentations/{id}/viewers/{user_id}
pub async fn remove(
    State(state): State<AppState>,
    Path((presentation_id, user_id)): Path<(DbId, UserId)>,
) -> AppResult<impl IntoResponse> {
    let removed = ViewerRepo::remove(&state.pool, presentation_id, user_id).await?;
    if removed {
        tracing::info!(presentation_id, user_id = %user_id, "Viewer removed from cast");
        Ok(Json(CastStatus {
            message: "User removed from cast",
        }))
    } else {
        Err(AppError::Core(CoreError::not_found("Viewer", user_id)))
    }
}
