//! Handlers for the `/presentations` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use stagemap_core::error::CoreError;
use stagemap_core::text;
use stagemap_core::types::DbId;
use stagemap_db::models::presentation::{CreatePresentation, UpdatePresentation};
use stagemap_db::repositories::PresentationRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path};
use crate::middleware::identity::CallerIdentity;
use crate::response::Deleted;
use crate::state::AppState;

/// POST /presentations
pub async fn create(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Json(input): Json<CreatePresentation>,
) -> AppResult<impl IntoResponse> {
    let name = text::require_non_empty("name", &input.name)?;
    let input = CreatePresentation { name, ..input };

    let created = PresentationRepo::create(&state.pool, caller.user_id, &input).await?;

    tracing::info!(
        id = created.id,
        name = %created.name,
        created_by = %created.created_by,
        "Presentation created"
    );
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /presentations
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let presentations = PresentationRepo::list(&state.pool).await?;
    Ok(Json(presentations))
}

/// GET /presentations/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let presentation = PresentationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Presentation", id)))?;
    Ok(Json(presentation))
}

/// PATCH /presentations/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePresentation>,
) -> AppResult<impl IntoResponse> {
    let UpdatePresentation {
        name,
        is_public,
        is_active,
    } = input;
    let name = match name {
        Some(raw) => Some(text::require_non_empty("name", &raw)?),
        None => None,
    };
    let input = UpdatePresentation {
        name,
        is_public,
        is_active,
    };

    let updated = PresentationRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Presentation", id)))?;

    tracing::info!(id = updated.id, "Presentation updated");
    Ok(Json(updated))
}

/// DELETE /presentations/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = PresentationRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(id, "Presentation deleted");
        Ok(Json(Deleted { id }))
    } else {
        Err(AppError::Core(CoreError::not_found("Presentation", id)))
    }
}
