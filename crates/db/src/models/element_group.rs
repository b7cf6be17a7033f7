//! Element group ("slot") entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stagemap_core::types::{DbId, Timestamp, UserId};

use crate::models::double_option;

/// A row from the `element_groups` table: the named, optionally-assigned
/// slot shared by one or more placed elements within a scene.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ElementGroup {
    pub id: DbId,
    pub scene_id: DbId,
    pub display_name: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A group enriched with its assignee user ids (empty array when none).
#[derive(Debug, Clone, Serialize)]
pub struct ElementGroupWithAssignees {
    #[serde(flatten)]
    pub group: ElementGroup,
    pub assignees: Vec<UserId>,
}

/// DTO for updating a group. `display_name: null` clears the name;
/// `assignees` replaces the whole assignee set.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateElementGroup {
    #[serde(default, deserialize_with = "double_option")]
    pub display_name: Option<Option<String>>,
    pub assignees: Option<Vec<UserId>>,
}

/// Request body for folding one group into another.
#[derive(Debug, Clone, Deserialize)]
pub struct MergeGroups {
    pub target_group_id: DbId,
    pub source_group_id: DbId,
}

/// One distinct named slot in use somewhere in a presentation, for the
/// slot pool listing.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SlotPoolEntry {
    pub element_type_id: DbId,
    pub element_type_name: String,
    pub display_name: String,
}

/// Request body for the presentation-wide slot rename.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkRenameSlots {
    pub element_type_id: DbId,
    pub old_display_name: String,
    pub new_display_name: String,
    /// Replaces every matched group's assignee set; `null` clears it.
    pub new_assigned_user_id: Option<UserId>,
}
