//! Transition step entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stagemap_core::types::{DbId, Timestamp, UserId};

use crate::models::double_option;

/// A row from the `transition_steps` table: one ordered checklist entry
/// within a transition scene.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TransitionStep {
    pub id: DbId,
    pub scene_id: DbId,
    pub position: i32,
    pub description: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A step enriched with its assignee. Steps never share assignee rows
/// with other steps, unlike element groups.
#[derive(Debug, Clone, Serialize)]
pub struct TransitionStepWithAssignee {
    #[serde(flatten)]
    pub step: TransitionStep,
    pub assigned_user_id: Option<UserId>,
}

/// DTO for creating a new step.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTransitionStep {
    pub scene_id: DbId,
    pub description: String,
    /// Appended after the scene's last step if omitted.
    pub position: Option<i32>,
    pub assigned_user_id: Option<UserId>,
}

/// DTO for updating a step. `assigned_user_id: null` un-assigns.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTransitionStep {
    pub description: Option<String>,
    pub position: Option<i32>,
    #[serde(default, deserialize_with = "double_option")]
    pub assigned_user_id: Option<Option<UserId>>,
}
