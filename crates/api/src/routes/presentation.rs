//! Route definitions for presentations and presentation-wide operations.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::{presentation, scene, slot_pool, viewer};
use crate::state::AppState;

/// Routes mounted at `/presentations`.
///
/// ```text
/// GET    /                          -> list
/// POST   /                          -> create
/// GET    /{id}                      -> get_by_id
/// PATCH  /{id}                      -> update
/// DELETE /{id}                      -> delete
///
/// GET    /{id}/scenes               -> list scenes in order
/// PATCH  /{id}/scenes               -> reorder (total rewrite)
/// POST   /{id}/scenes/clone         -> clone a scene into this presentation
///
/// PATCH  /{id}/element-names        -> bulk slot rename
/// GET    /{id}/pool                 -> named slots in use
///
/// GET    /{id}/viewers              -> list cast
/// POST   /{id}/viewers              -> add to cast (idempotent)
/// GET    /{id}/viewers/{user_id}    -> get one membership
/// DELETE /{id}/viewers/{user_id}    -> remove from cast
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(presentation::list).post(presentation::create))
        .route(
            "/{id}",
            get(presentation::get_by_id)
                .patch(presentation::update)
                .delete(presentation::delete),
        )
        .route(
            "/{id}/scenes",
            get(scene::list_by_presentation).patch(scene::reorder),
        )
        .route("/{id}/scenes/clone", post(scene::clone_into))
        .route("/{id}/element-names", patch(slot_pool::bulk_rename))
        .route("/{id}/pool", get(slot_pool::list_pool))
        .route("/{id}/viewers", get(viewer::list).post(viewer::add))
        .route(
            "/{id}/viewers/{user_id}",
            get(viewer::get_by_id).delete(viewer::remove),
        )
}
