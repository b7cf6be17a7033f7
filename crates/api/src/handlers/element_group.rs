//! Handlers for the `/element_groups` resource.
//!
//! A group is the named slot one or more placed elements share. Deleting
//! one takes its elements along; merging folds one slot into another.

use axum::extract::State;
use axum::response::IntoResponse;
use stagemap_core::assignment;
use stagemap_core::error::CoreError;
use stagemap_core::text;
use stagemap_core::types::DbId;
use stagemap_db::models::element_group::{MergeGroups, UpdateElementGroup};
use stagemap_db::repositories::ElementGroupRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path};
use crate::response::{Deleted, MergeOutcome};
use crate::state::AppState;

/// GET /element_groups/{id}
///
/// Get a group with its assignee user ids (empty array when none).
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let group = ElementGroupRepo::find_with_assignees(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("ElementGroup", id)))?;
    Ok(Json(group))
}

/// PATCH /element_groups/{id}
///
/// Update the display name and/or replace the assignee set. Assignees
/// are deduplicated before the cap check; the whole change is atomic.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateElementGroup>,
) -> AppResult<impl IntoResponse> {
    // Validate before any transaction opens.
    let input = UpdateElementGroup {
        display_name: input.display_name.map(text::normalize_display_name),
        assignees: match input.assignees {
            Some(raw) => Some(assignment::normalize_assignees(
                raw,
                state.config.max_assignees_per_group,
            )?),
            None => None,
        },
    };

    let updated = ElementGroupRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("ElementGroup", id)))?;

    tracing::info!(id = updated.group.id, "Element group updated");
    Ok(Json(updated))
}

/// DELETE /element_groups/{id}
///
/// Delete a group and, via cascade, every element placed in it.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = ElementGroupRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(id, "Element group deleted");
        Ok(Json(Deleted { id }))
    } else {
        Err(AppError::Core(CoreError::not_found("ElementGroup", id)))
    }
}

/// POST /element_groups/merge
///
/// Re-point every element from the source group to the target, then
/// delete the source. Self-merge is rejected before anything is read.
pub async fn merge(
    State(state): State<AppState>,
    Json(input): Json<MergeGroups>,
) -> AppResult<impl IntoResponse> {
    if input.target_group_id == input.source_group_id {
        return Err(AppError::Core(CoreError::Validation(
            "cannot merge a group into itself".into(),
        )));
    }

    let target = ElementGroupRepo::find_by_id(&state.pool, input.target_group_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::not_found("ElementGroup", input.target_group_id))
        })?;
    let source = ElementGroupRepo::find_by_id(&state.pool, input.source_group_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::not_found("ElementGroup", input.source_group_id))
        })?;

    if target.scene_id != source.scene_id {
        return Err(AppError::Core(CoreError::Validation(
            "groups must belong to the same scene to merge".into(),
        )));
    }

    let elements_moved = ElementGroupRepo::merge(&state.pool, target.id, source.id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("ElementGroup", source.id)))?;

    tracing::info!(
        target_id = target.id,
        source_id = source.id,
        elements_moved,
        "Element groups merged"
    );
    Ok(Json(MergeOutcome { elements_moved }))
}
