pub mod element_group;
pub mod element_type;
pub mod health;
pub mod presentation;
pub mod scene;
pub mod scene_element;
pub mod transition_step;

use axum::Router;

use crate::state::AppState;

/// Build the full route tree.
///
/// Route hierarchy:
///
/// ```text
/// /health                                      service + database health
///
/// /presentations                               list, create
/// /presentations/{id}                          get, update, delete
/// /presentations/{id}/scenes                   list (GET), reorder (PATCH)
/// /presentations/{id}/scenes/clone             clone a scene in (POST)
/// /presentations/{id}/element-names            bulk slot rename (PATCH)
/// /presentations/{id}/pool                     named slots in use (GET)
/// /presentations/{id}/viewers                  cast: list, add
/// /presentations/{id}/viewers/{user_id}        cast: get, remove
///
/// /scenes                                      create
/// /scenes/{id}                                 get, update, delete
/// /scenes/{id}/elements                        list a formation's elements
/// /scenes/{id}/steps                           list a transition's steps
///
/// /scene_elements                              create
/// /scene_elements/{id}                         get, update, delete
///
/// /element_groups/{id}                         get, update, delete
/// /element_groups/merge                        merge two groups (POST)
///
/// /transition_steps                            create
/// /transition_steps/{id}                       get, update, delete
///
/// /element_types                               list the catalog
/// /element_types/{id}                          get one catalog entry
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        // Health check.
        .merge(health::router())
        // Presentations and their presentation-wide operations.
        .nest("/presentations", presentation::router())
        // Scene CRUD plus per-scene content listings.
        .nest("/scenes", scene::router())
        // Placed elements.
        .nest("/scene_elements", scene_element::router())
        // Slots shared by elements.
        .nest("/element_groups", element_group::router())
        // Transition checklist steps.
        .nest("/transition_steps", transition_step::router())
        // Placeable type catalog.
        .nest("/element_types", element_type::router())
}
