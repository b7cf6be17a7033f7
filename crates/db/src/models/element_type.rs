//! Element type catalog model.
//!
//! The catalog is seeded by migration and read-only at runtime; elements
//! reference it, never own it.

use serde::Serialize;
use sqlx::FromRow;
use stagemap_core::types::{DbId, Timestamp};

/// A row from the `element_types` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ElementType {
    pub id: DbId,
    pub name: String,
    pub image_url: String,
    pub scale: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
