//! Route definitions for scenes and their content listings.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{scene, scene_element, transition_step};
use crate::state::AppState;

/// Routes mounted at `/scenes`.
///
/// ```text
/// POST   /                 -> create
/// GET    /{id}             -> get_by_id
/// PATCH  /{id}             -> update
/// DELETE /{id}             -> delete
/// GET    /{id}/elements    -> list a formation's elements
/// GET    /{id}/steps       -> list a transition's steps
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(scene::create))
        .route(
            "/{id}",
            get(scene::get_by_id).patch(scene::update).delete(scene::delete),
        )
        .route("/{id}/elements", get(scene_element::list_by_scene))
        .route("/{id}/steps", get(transition_step::list_by_scene))
}
