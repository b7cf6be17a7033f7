//! Handlers for the `/scenes` resource plus the presentation-scoped
//! scene collection (listing, reordering, cloning).

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use stagemap_core::error::CoreError;
use stagemap_core::types::DbId;
use stagemap_core::{ordering, text};
use stagemap_db::models::scene::{CloneScene, CreateScene, ReorderScenes, UpdateScene};
use stagemap_db::repositories::{PresentationRepo, SceneCloneRepo, SceneRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path};
use crate::response::Deleted;
use crate::state::AppState;

/// POST /scenes
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateScene>,
) -> AppResult<impl IntoResponse> {
    PresentationRepo::find_by_id(&state.pool, input.presentation_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::not_found("Presentation", input.presentation_id))
        })?;

    let name = text::require_non_empty("name", &input.name)?;
    let input = CreateScene { name, ..input };

    let created = SceneRepo::create(&state.pool, &input).await?;

    tracing::info!(
        id = created.id,
        presentation_id = created.presentation_id,
        kind = ?created.kind,
        "Scene created"
    );
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /scenes/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let scene = SceneRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Scene", id)))?;
    Ok(Json(scene))
}

/// GET /presentations/{id}/scenes
pub async fn list_by_presentation(
    State(state): State<AppState>,
    Path(presentation_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    PresentationRepo::find_by_id(&state.pool, presentation_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Presentation", presentation_id)))?;

    let scenes = SceneRepo::list_by_presentation(&state.pool, presentation_id).await?;
    Ok(Json(scenes))
}

/// PATCH /scenes/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateScene>,
) -> AppResult<impl IntoResponse> {
    let UpdateScene { name, description } = input;
    let name = match name {
        Some(raw) => Some(text::require_non_empty("name", &raw)?),
        None => None,
    };
    let input = UpdateScene { name, description };

    let updated = SceneRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Scene", id)))?;

    tracing::info!(id = updated.id, "Scene updated");
    Ok(Json(updated))
}

/// DELETE /scenes/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = SceneRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(id, "Scene deleted");
        Ok(Json(Deleted { id }))
    } else {
        Err(AppError::Core(CoreError::not_found("Scene", id)))
    }
}

/// PATCH /presentations/{id}/scenes
///
/// Rewrite the presentation's scene order. The request must list every
/// scene exactly once; the repository re-checks the set under lock so a
/// concurrent insert or delete fails the whole call instead of leaving
/// a half-applied order.
pub async fn reorder(
    State(state): State<AppState>,
    Path(presentation_id): Path<DbId>,
    Json(input): Json<ReorderScenes>,
) -> AppResult<impl IntoResponse> {
    PresentationRepo::find_by_id(&state.pool, presentation_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Presentation", presentation_id)))?;

    let current = SceneRepo::list_ids(&state.pool, presentation_id).await?;
    ordering::validate_reorder(&current, &input.scene_ids)?;

    let scenes = SceneRepo::reorder(&state.pool, presentation_id, &input.scene_ids)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(
                "scene list changed while reordering, retry with the current order".into(),
            ))
        })?;

    tracing::info!(presentation_id, count = scenes.len(), "Scenes reordered");
    Ok(Json(scenes))
}

/// POST /presentations/{id}/scenes/clone
///
/// Deep-copy a scene into this presentation. The paste option decides
/// how much slot identity travels with the elements.
pub async fn clone_into(
    State(state): State<AppState>,
    Path(presentation_id): Path<DbId>,
    Json(input): Json<CloneScene>,
) -> AppResult<impl IntoResponse> {
    PresentationRepo::find_by_id(&state.pool, presentation_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Presentation", presentation_id)))?;

    let source = SceneRepo::find_by_id(&state.pool, input.scene_data.source_scene_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::not_found(
                "Scene",
                input.scene_data.source_scene_id,
            ))
        })?;

    let name = match &input.scene_data.name {
        Some(raw) => Some(text::require_non_empty("name", raw)?),
        None => None,
    };

    let cloned = SceneCloneRepo::clone_scene(
        &state.pool,
        &source,
        presentation_id,
        input.paste_option,
        name.as_deref(),
        input.scene_data.position,
    )
    .await?;

    tracing::info!(
        id = cloned.id,
        source_id = source.id,
        presentation_id,
        paste_option = ?input.paste_option,
        "Scene cloned"
    );
    Ok((StatusCode::CREATED, Json(cloned)))
}
