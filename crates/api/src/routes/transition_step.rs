//! Route definitions for transition checklist steps.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::transition_step;
use crate::state::AppState;

/// Routes mounted at `/transition_steps`.
///
/// ```text
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PATCH  /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(transition_step::create))
        .route(
            "/{id}",
            get(transition_step::get_by_id)
                .patch(transition_step::update)
                .delete(transition_step::delete),
        )
}
