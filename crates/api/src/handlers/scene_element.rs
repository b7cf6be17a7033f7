//! Handlers for the `/scene_elements` resource.
//!
//! Creation resolves the slot target from the request body: a
//! `group_id` attaches the element to an existing slot, otherwise a
//! fresh group is created from the optional name and assignee.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use stagemap_core::error::CoreError;
use stagemap_core::types::DbId;
use stagemap_core::{stage, text};
use stagemap_db::models::scene::SceneKind;
use stagemap_db::models::scene_element::{
    CreateSceneElement, NewElementPlacement, SlotTarget, UpdateSceneElement,
};
use stagemap_db::repositories::{ElementGroupRepo, ElementTypeRepo, SceneElementRepo, SceneRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path};
use crate::response::Deleted;
use crate::state::AppState;

/// POST /scene_elements
///
/// Place an element on a formation scene. Coordinates are validated
/// before anything is written; the referenced scene, element type and
/// (for existing slots) group must all exist.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateSceneElement>,
) -> AppResult<impl IntoResponse> {
    let scene = SceneRepo::find_by_id(&state.pool, input.scene_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Scene", input.scene_id)))?;
    if scene.kind != SceneKind::Formation {
        return Err(AppError::Core(CoreError::Validation(
            "elements can only be placed on formation scenes".into(),
        )));
    }

    ElementTypeRepo::find_by_id(&state.pool, input.element_type_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::not_found("ElementType", input.element_type_id))
        })?;

    stage::validate_position(input.position_x, input.position_y)?;

    let placement = NewElementPlacement {
        scene_id: input.scene_id,
        element_type_id: input.element_type_id,
        position_x: input.position_x,
        position_y: input.position_y,
    };

    let created = match input.slot {
        SlotTarget::Existing { group_id } => {
            let group = ElementGroupRepo::find_by_id(&state.pool, group_id)
                .await?
                .ok_or_else(|| AppError::Core(CoreError::not_found("ElementGroup", group_id)))?;
            if group.scene_id != scene.id {
                return Err(AppError::Core(CoreError::Validation(
                    "group belongs to a different scene".into(),
                )));
            }
            SceneElementRepo::create_in_group(&state.pool, &placement, group.id).await?
        }
        SlotTarget::New {
            display_name,
            assigned_user_id,
        } => {
            let display_name = text::normalize_display_name(display_name);
            SceneElementRepo::create_with_new_group(
                &state.pool,
                &placement,
                display_name.as_deref(),
                assigned_user_id,
            )
            .await?
        }
    };

    tracing::info!(
        id = created.element.id,
        scene_id = created.element.scene_id,
        group_id = created.element.group_id,
        "Scene element created"
    );
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /scene_elements/{id}
///
/// Get an element enriched with its slot's display name and the
/// earliest-assigned user of its group.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let element = SceneElementRepo::find_with_slot(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("SceneElement", id)))?;
    Ok(Json(element))
}

/// GET /scenes/{id}/elements
pub async fn list_by_scene(
    State(state): State<AppState>,
    Path(scene_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    SceneRepo::find_by_id(&state.pool, scene_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Scene", scene_id)))?;

    let elements = SceneElementRepo::list_by_scene(&state.pool, scene_id).await?;
    Ok(Json(elements))
}

/// PATCH /scene_elements/{id}
///
/// Move the element and/or rewrite its group's shared slot. Name and
/// assignee changes land on the group, so siblings see them too.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSceneElement>,
) -> AppResult<impl IntoResponse> {
    let UpdateSceneElement {
        position_x,
        position_y,
        display_name,
        assigned_user_id,
    } = input;

    if let Some(x) = position_x {
        stage::validate_coordinate("position_x", x)?;
    }
    if let Some(y) = position_y {
        stage::validate_coordinate("position_y", y)?;
    }

    let input = UpdateSceneElement {
        position_x,
        position_y,
        display_name: display_name.map(text::normalize_display_name),
        assigned_user_id,
    };

    let updated = SceneElementRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("SceneElement", id)))?;

    tracing::info!(id = updated.element.id, "Scene element updated");
    Ok(Json(updated))
}

/// DELETE /scene_elements/{id}
///
/// Delete the element; its group goes with it when no sibling is left.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let group_removed = SceneElementRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("SceneElement", id)))?;

    tracing::info!(id, group_removed, "Scene element deleted");
    Ok(Json(Deleted { id }))
}
