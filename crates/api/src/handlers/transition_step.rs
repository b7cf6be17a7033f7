//! Handlers for the `/transition_steps` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use stagemap_core::error::CoreError;
use stagemap_core::text;
use stagemap_core::types::DbId;
use stagemap_db::models::scene::SceneKind;
use stagemap_db::models::transition_step::{CreateTransitionStep, UpdateTransitionStep};
use stagemap_db::repositories::{SceneRepo, TransitionStepRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path};
use crate::response::Deleted;
use crate::state::AppState;

/// POST /transition_steps
///
/// Append (or insert at an explicit position) a checklist step on a
/// transition scene. The description must be non-blank.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateTransitionStep>,
) -> AppResult<impl IntoResponse> {
    let scene = SceneRepo::find_by_id(&state.pool, input.scene_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Scene", input.scene_id)))?;
    if scene.kind != SceneKind::Transition {
        return Err(AppError::Core(CoreError::Validation(
            "steps can only be added to transition scenes".into(),
        )));
    }

    let description = text::require_non_empty("description", &input.description)?;
    let input = CreateTransitionStep {
        description,
        ..input
    };

    let created = TransitionStepRepo::create(&state.pool, &input).await?;

    tracing::info!(
        id = created.step.id,
        scene_id = created.step.scene_id,
        "Transition step created"
    );
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /transition_steps/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let step = TransitionStepRepo::find_with_assignee(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("TransitionStep", id)))?;
    Ok(Json(step))
}

/// GET /scenes/{id}/steps
pub async fn list_by_scene(
    State(state): State<AppState>,
    Path(scene_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    SceneRepo::find_by_id(&state.pool, scene_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Scene", scene_id)))?;

    let steps = TransitionStepRepo::list_by_scene(&state.pool, scene_id).await?;
    Ok(Json(steps))
}

/// PATCH /transition_steps/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTransitionStep>,
) -> AppResult<impl IntoResponse> {
    let UpdateTransitionStep {
        description,
        position,
        assigned_user_id,
    } = input;
    let description = match description {
        Some(raw) => Some(text::require_non_empty("description", &raw)?),
        None => None,
    };
    let input = UpdateTransitionStep {
        description,
        position,
        assigned_user_id,
    };

    let updated = TransitionStepRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("TransitionStep", id)))?;

    tracing::info!(id = updated.step.id, "Transition step updated");
    Ok(Json(updated))
}

/// DELETE /transition_steps/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = TransitionStepRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(id, "Transition step deleted");
        Ok(Json(Deleted { id }))
    } else {
        Err(AppError::Core(CoreError::not_found("TransitionStep", id)))
    }
}
