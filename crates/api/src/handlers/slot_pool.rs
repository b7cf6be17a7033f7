//! Handlers for the presentation-wide slot pool: the distinct named
//! slots in use, and the bulk rename that rewrites a name everywhere
//! it appears for one element type.

use axum::extract::State;
use axum::response::IntoResponse;
use stagemap_core::error::CoreError;
use stagemap_core::text;
use stagemap_core::types::DbId;
use stagemap_db::models::element_group::BulkRenameSlots;
use stagemap_db::repositories::{ElementTypeRepo, PresentationRepo, SlotPoolRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path};
use crate::response::RenameOutcome;
use crate::state::AppState;

/// GET /presentations/{id}/pool
///
/// List the distinct (element type, display name) slots across every
/// scene of the presentation. Unnamed slots are not part of the pool.
pub async fn list_pool(
    State(state): State<AppState>,
    Path(presentation_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    PresentationRepo::find_by_id(&state.pool, presentation_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Presentation", presentation_id)))?;

    let pool = SlotPoolRepo::list_pool(&state.pool, presentation_id).await?;
    Ok(Json(pool))
}

/// PATCH /presentations/{id}/element-names
///
/// Rename every slot of one element type that carries the old name,
/// across all scenes of the presentation, in a single transaction.
pub async fn bulk_rename(
    State(state): State<AppState>,
    Path(presentation_id): Path<DbId>,
    Json(input): Json<BulkRenameSlots>,
) -> AppResult<impl IntoResponse> {
    PresentationRepo::find_by_id(&state.pool, presentation_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Presentation", presentation_id)))?;

    ElementTypeRepo::find_by_id(&state.pool, input.element_type_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::not_found("ElementType", input.element_type_id))
        })?;

    let old_display_name = text::require_non_empty("old_display_name", &input.old_display_name)?;
    let new_display_name = text::require_non_empty("new_display_name", &input.new_display_name)?;

    let updated_count = SlotPoolRepo::rename_across_presentation(
        &state.pool,
        presentation_id,
        input.element_type_id,
        &old_display_name,
        &new_display_name,
        input.new_assigned_user_id,
    )
    .await?;

    tracing::info!(
        presentation_id,
        element_type_id = input.element_type_id,
        updated_count,
        "Slots renamed"
    );
    Ok(Json(RenameOutcome { updated_count }))
}
