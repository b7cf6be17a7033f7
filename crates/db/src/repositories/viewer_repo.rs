//! Repository for the `viewers` table (a presentation's cast).

use sqlx::PgPool;
use stagemap_core::types::{DbId, UserId};

use crate::models::viewer::Viewer;

/// Column list for the `viewers` table.
const COLUMNS: &str = "presentation_id, user_id, created_at";

/// Provides cast membership operations.
pub struct ViewerRepo;

impl ViewerRepo {
    /// Add a user to a presentation's cast (idempotent).
    ///
    /// Returns `true` if a row was inserted, `false` if the user was
    /// already in the cast.
    pub async fn add(
        pool: &PgPool,
        presentation_id: DbId,
        user_id: UserId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO viewers (presentation_id, user_id)
             VALUES ($1, $2)
             ON CONFLICT DO NOTHING",
        )
        .bind(presentation_id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Find one cast membership row.
    pub async fn find(
        pool: &PgPool,
        presentation_id: DbId,
        user_id: UserId,
    ) -> Result<Option<Viewer>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM viewers WHERE presentation_id = $1 AND user_id = $2");
        sqlx::query_as::<_, Viewer>(&query)
            .bind(presentation_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List a presentation's cast, oldest membership first.
    pub async fn list(pool: &PgPool, presentation_id: DbId) -> Result<Vec<Viewer>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM viewers
             WHERE presentation_id = $1
             ORDER BY created_at ASC, user_id ASC"
        );
        sqlx::query_as::<_, Viewer>(&query)
            .bind(presentation_id)
            .fetch_all(pool)
            .await
    }

    /// Remove a user from a presentation's cast. Returns `true` if a row
    /// was removed.
    pub async fn remove(
        pool: &PgPool,
        presentation_id: DbId,
        user_id: UserId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM viewers WHERE presentation_id = $1 AND user_id = $2")
                .bind(presentation_id)
                .bind(user_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Ensure every listed user is in the cast, within an existing
    /// transaction. Used by the clone engine's `with_users` policy.
    pub(crate) async fn ensure_members_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        presentation_id: DbId,
        user_ids: &[UserId],
    ) -> Result<(), sqlx::Error> {
        for &user_id in user_ids {
            sqlx::query(
                "INSERT INTO viewers (presentation_id, user_id)
                 VALUES ($1, $2)
                 ON CONFLICT DO NOTHING",
            )
            .bind(presentation_id)
            .bind(user_id)
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }
}
