//! Scene entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stagemap_core::paste::PasteOption;
use stagemap_core::types::{DbId, Timestamp};

use crate::models::double_option;

/// What a scene contains: a spatial formation or an ordered checklist.
///
/// Immutable after creation; cloning preserves the source's kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "scene_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SceneKind {
    Formation,
    Transition,
}

/// A row from the `scenes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Scene {
    pub id: DbId,
    pub presentation_id: DbId,
    pub position: i32,
    pub kind: SceneKind,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new scene.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateScene {
    pub presentation_id: DbId,
    pub kind: SceneKind,
    pub name: String,
    pub description: Option<String>,
    /// Appended after the presentation's last scene if omitted.
    pub position: Option<i32>,
}

/// DTO for updating an existing scene. `kind` is immutable and `position`
/// only moves through a whole-presentation reorder.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateScene {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
}

/// Request body for reordering a presentation's scenes. Must list every
/// scene id exactly once.
#[derive(Debug, Clone, Deserialize)]
pub struct ReorderScenes {
    pub scene_ids: Vec<DbId>,
}

/// Request body for cloning a scene into a presentation.
#[derive(Debug, Clone, Deserialize)]
pub struct CloneScene {
    pub scene_data: CloneSceneData,
    pub paste_option: PasteOption,
}

/// Source scene and overrides for a clone.
#[derive(Debug, Clone, Deserialize)]
pub struct CloneSceneData {
    pub source_scene_id: DbId,
    /// Defaults to the source scene's name.
    pub name: Option<String>,
    /// Appended after the target's last scene if omitted. Cloning never
    /// resequences the target's other scenes; follow up with a reorder.
    pub position: Option<i32>,
}
