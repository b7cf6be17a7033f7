//! Route definitions for placed scene elements.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::scene_element;
use crate::state::AppState;

/// Routes mounted at `/scene_elements`.
///
/// ```text
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PATCH  /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(scene_element::create))
        .route(
            "/{id}",
            get(scene_element::get_by_id)
                .patch(scene_element::update)
                .delete(scene_element::delete),
        )
}
