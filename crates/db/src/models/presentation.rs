//! Presentation entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stagemap_core::types::{DbId, Timestamp, UserId};

/// A row from the `presentations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Presentation {
    pub id: DbId,
    pub name: String,
    pub is_public: bool,
    pub is_active: bool,
    pub created_by: UserId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new presentation. `created_by` comes from the
/// caller identity, not the body.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePresentation {
    pub name: String,
    /// Defaults to false if omitted.
    pub is_public: Option<bool>,
    /// Defaults to true if omitted.
    pub is_active: Option<bool>,
}

/// DTO for updating an existing presentation. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePresentation {
    pub name: Option<String>,
    pub is_public: Option<bool>,
    pub is_active: Option<bool>,
}
