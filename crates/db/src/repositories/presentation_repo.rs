//! Repository for the `presentations` table.

use sqlx::PgPool;
use stagemap_core::types::{DbId, UserId};

use crate::models::presentation::{CreatePresentation, Presentation, UpdatePresentation};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, is_public, is_active, created_by, created_at, updated_at";

/// Provides CRUD operations for presentations.
pub struct PresentationRepo;

impl PresentationRepo {
    /// Insert a new presentation, returning the created row.
    pub async fn create(
        pool: &PgPool,
        created_by: UserId,
        input: &CreatePresentation,
    ) -> Result<Presentation, sqlx::Error> {
        let query = format!(
            "INSERT INTO presentations (name, is_public, is_active, created_by)
             VALUES ($1, COALESCE($2, false), COALESCE($3, true), $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Presentation>(&query)
            .bind(&input.name)
            .bind(input.is_public)
            .bind(input.is_active)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a presentation by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Presentation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM presentations WHERE id = $1");
        sqlx::query_as::<_, Presentation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all presentations, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Presentation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM presentations ORDER BY created_at DESC");
        sqlx::query_as::<_, Presentation>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update a presentation. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePresentation,
    ) -> Result<Option<Presentation>, sqlx::Error> {
        let query = format!(
            "UPDATE presentations SET
                name = COALESCE($2, name),
                is_public = COALESCE($3, is_public),
                is_active = COALESCE($4, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Presentation>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.is_public)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Delete a presentation by ID, cascading to its scenes and their
    /// contents. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM presentations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
