//! Viewer (cast membership) model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stagemap_core::types::{DbId, Timestamp, UserId};

/// A row from the `viewers` table: one user in a presentation's cast.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Viewer {
    pub presentation_id: DbId,
    pub user_id: UserId,
    pub created_at: Timestamp,
}

/// Request body for adding a user to the cast.
#[derive(Debug, Clone, Deserialize)]
pub struct AddViewer {
    pub user_id: UserId,
}
