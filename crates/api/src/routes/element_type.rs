//! Route definitions for the element type catalog.

use axum::routing::get;
use axum::Router;

use crate::handlers::element_type;
use crate::state::AppState;

/// Routes mounted at `/element_types`.
///
/// ```text
/// GET /        -> list
/// GET /{id}    -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(element_type::list))
        .route("/{id}", get(element_type::get_by_id))
}
