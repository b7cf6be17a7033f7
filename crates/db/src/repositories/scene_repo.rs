//! Repository for the `scenes` table.

use std::collections::HashSet;

use sqlx::PgPool;
use stagemap_core::types::DbId;

use crate::models::scene::{CreateScene, Scene, UpdateScene};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, presentation_id, position, kind, name, description, created_at, updated_at";

/// Provides CRUD and reorder operations for scenes.
pub struct SceneRepo;

impl SceneRepo {
    /// Insert a new scene, returning the created row.
    ///
    /// If `position` is `None`, appends after the presentation's last scene.
    pub async fn create(pool: &PgPool, input: &CreateScene) -> Result<Scene, sqlx::Error> {
        let query = format!(
            "INSERT INTO scenes (presentation_id, position, kind, name, description)
             VALUES (
                $1,
                COALESCE($2, (SELECT COALESCE(MAX(position) + 1, 0)
                              FROM scenes WHERE presentation_id = $1)),
                $3, $4, $5
             )
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Scene>(&query)
            .bind(input.presentation_id)
            .bind(input.position)
            .bind(input.kind)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a scene by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Scene>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM scenes WHERE id = $1");
        sqlx::query_as::<_, Scene>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a presentation's scenes in presentation order.
    pub async fn list_by_presentation(
        pool: &PgPool,
        presentation_id: DbId,
    ) -> Result<Vec<Scene>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM scenes
             WHERE presentation_id = $1
             ORDER BY position ASC, id ASC"
        );
        sqlx::query_as::<_, Scene>(&query)
            .bind(presentation_id)
            .fetch_all(pool)
            .await
    }

    /// Ids of a presentation's scenes in presentation order.
    pub async fn list_ids(pool: &PgPool, presentation_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT id FROM scenes WHERE presentation_id = $1 ORDER BY position ASC, id ASC",
        )
        .bind(presentation_id)
        .fetch_all(pool)
        .await
    }

    /// Update a scene's name/description. `kind` is immutable; `position`
    /// only moves through [`SceneRepo::reorder`].
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateScene,
    ) -> Result<Option<Scene>, sqlx::Error> {
        let query = format!(
            "UPDATE scenes SET
                name = COALESCE($2, name),
                description = CASE WHEN $3 THEN $4 ELSE description END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Scene>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.description.is_some())
            .bind(input.description.as_ref().and_then(|d| d.as_deref()))
            .fetch_optional(pool)
            .await
    }

    /// Delete a scene by ID, cascading to its elements, groups, and steps.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM scenes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Rewrite every scene's position to its index in `ordered_ids`, in
    /// one transaction.
    ///
    /// The caller validates the requested order against the current scene
    /// set before calling; this re-checks under a row lock and returns
    /// `None` without writing if the set changed concurrently.
    pub async fn reorder(
        pool: &PgPool,
        presentation_id: DbId,
        ordered_ids: &[DbId],
    ) -> Result<Option<Vec<Scene>>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let current: Vec<DbId> =
            sqlx::query_scalar("SELECT id FROM scenes WHERE presentation_id = $1 FOR UPDATE")
                .bind(presentation_id)
                .fetch_all(&mut *tx)
                .await?;

        let current_set: HashSet<DbId> = current.iter().copied().collect();
        let requested_set: HashSet<DbId> = ordered_ids.iter().copied().collect();
        if ordered_ids.len() != current.len() || requested_set != current_set {
            tx.rollback().await?;
            return Ok(None);
        }

        for (index, scene_id) in ordered_ids.iter().enumerate() {
            sqlx::query("UPDATE scenes SET position = $2 WHERE id = $1")
                .bind(scene_id)
                .bind(index as i32)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Self::list_by_presentation(pool, presentation_id)
            .await
            .map(Some)
    }
}
