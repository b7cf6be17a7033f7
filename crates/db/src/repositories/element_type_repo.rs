//! Repository for the `element_types` catalog table.

use sqlx::PgPool;
use stagemap_core::types::DbId;

use crate::models::element_type::ElementType;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, image_url, scale, created_at, updated_at";

/// Read access to the placeable element type catalog.
pub struct ElementTypeRepo;

impl ElementTypeRepo {
    /// Find an element type by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ElementType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM element_types WHERE id = $1");
        sqlx::query_as::<_, ElementType>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the whole catalog, alphabetically.
    pub async fn list(pool: &PgPool) -> Result<Vec<ElementType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM element_types ORDER BY name ASC");
        sqlx::query_as::<_, ElementType>(&query)
            .fetch_all(pool)
            .await
    }
}
