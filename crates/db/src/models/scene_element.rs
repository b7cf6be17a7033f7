//! Scene element entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stagemap_core::types::{DbId, Timestamp, UserId};

use crate::models::double_option;

/// A row from the `scene_elements` table: one placed instrument/role
/// instance, belonging to exactly one element group.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SceneElement {
    pub id: DbId,
    pub scene_id: DbId,
    pub element_type_id: DbId,
    pub group_id: DbId,
    pub position_x: f64,
    pub position_y: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An element enriched with its group's name and first assignee, the
/// denormalized view callers render from.
#[derive(Debug, Clone, Serialize)]
pub struct SceneElementWithSlot {
    #[serde(flatten)]
    pub element: SceneElement,
    pub display_name: Option<String>,
    pub assigned_user_id: Option<UserId>,
}

/// Which slot a new element lands in: an existing group by id, or a
/// fresh group optionally seeded with a name and assignee.
///
/// Untagged on the wire; a `group_id` key selects the existing-group
/// form, anything else falls through to a new group.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SlotTarget {
    Existing {
        group_id: DbId,
    },
    New {
        #[serde(default)]
        display_name: Option<String>,
        #[serde(default)]
        assigned_user_id: Option<UserId>,
    },
}

/// DTO for placing a new element.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSceneElement {
    pub scene_id: DbId,
    pub element_type_id: DbId,
    pub position_x: f64,
    pub position_y: f64,
    #[serde(flatten)]
    pub slot: SlotTarget,
}

/// Placement fields for an element insert, with the slot target already
/// resolved by the caller.
#[derive(Debug, Clone)]
pub struct NewElementPlacement {
    pub scene_id: DbId,
    pub element_type_id: DbId,
    pub position_x: f64,
    pub position_y: f64,
}

/// DTO for updating an element. Position fields touch the element row;
/// `display_name`/`assigned_user_id` touch the owning group and so every
/// element sharing it.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSceneElement {
    pub position_x: Option<f64>,
    pub position_y: Option<f64>,
    #[serde(default, deserialize_with = "double_option")]
    pub display_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub assigned_user_id: Option<Option<UserId>>,
}
