//! Handlers for the read-only `/element_types` catalog.

use axum::extract::State;
use axum::response::IntoResponse;
use stagemap_core::error::CoreError;
use stagemap_core::types::DbId;
use stagemap_db::repositories::ElementTypeRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path};
use crate::state::AppState;

/// GET /element_types
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let element_types = ElementTypeRepo::list(&state.pool).await?;
    Ok(Json(element_types))
}

/// GET /element_types/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let element_type = ElementTypeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("ElementType", id)))?;
    Ok(Json(element_type))
}
