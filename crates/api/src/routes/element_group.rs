//! Route definitions for element groups (shared slots).

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::element_group;
use crate::state::AppState;

/// Routes mounted at `/element_groups`.
///
/// ```text
/// GET    /{id}    -> get_by_id
/// PATCH  /{id}    -> update
/// DELETE /{id}    -> delete
/// POST   /merge   -> merge
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(element_group::get_by_id)
                .patch(element_group::update)
                .delete(element_group::delete),
        )
        .route("/merge", post(element_group::merge))
}
