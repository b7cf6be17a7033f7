//! Repository for the `element_groups` and `element_group_assignees` tables.

use sqlx::PgPool;
use stagemap_core::types::{DbId, UserId};

use crate::models::element_group::{ElementGroup, ElementGroupWithAssignees, UpdateElementGroup};

/// Column list for the `element_groups` table.
const COLUMNS: &str = "id, scene_id, display_name, created_at, updated_at";

/// Provides slot lifecycle operations: update, delete, merge, and
/// assignee-set replacement.
pub struct ElementGroupRepo;

impl ElementGroupRepo {
    /// Find a group by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ElementGroup>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM element_groups WHERE id = $1");
        sqlx::query_as::<_, ElementGroup>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a group by ID, enriched with its assignee user ids.
    pub async fn find_with_assignees(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ElementGroupWithAssignees>, sqlx::Error> {
        let group = Self::find_by_id(pool, id).await?;
        match group {
            Some(group) => {
                let assignees = Self::get_assignees(pool, group.id).await?;
                Ok(Some(ElementGroupWithAssignees { group, assignees }))
            }
            None => Ok(None),
        }
    }

    /// Update a group's display name and/or replace its assignee set, in
    /// one transaction. The caller normalizes `assignees` (dedupe, cap)
    /// before calling.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateElementGroup,
    ) -> Result<Option<ElementGroupWithAssignees>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let update_query = format!(
            "UPDATE element_groups SET
                display_name = CASE WHEN $2 THEN $3 ELSE display_name END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let group = sqlx::query_as::<_, ElementGroup>(&update_query)
            .bind(id)
            .bind(input.display_name.is_some())
            .bind(input.display_name.as_ref().and_then(|n| n.as_deref()))
            .fetch_optional(&mut *tx)
            .await?;

        match group {
            Some(group) => {
                if let Some(ref assignees) = input.assignees {
                    Self::set_assignees_inner(&mut tx, group.id, assignees).await?;
                }
                tx.commit().await?;

                let assignees = Self::get_assignees(pool, group.id).await?;
                Ok(Some(ElementGroupWithAssignees { group, assignees }))
            }
            None => {
                tx.rollback().await?;
                Ok(None)
            }
        }
    }

    /// Delete a group by ID. Its elements go with it via the native
    /// cascade. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM element_groups WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Fold `source_id` into `target_id`: re-point every element from the
    /// source group to the target, then delete the source, in one
    /// transaction.
    ///
    /// Returns the number of elements moved, or `None` without writing if
    /// either group vanished since the caller's checks.
    pub async fn merge(
        pool: &PgPool,
        target_id: DbId,
        source_id: DbId,
    ) -> Result<Option<i64>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let target: Option<DbId> =
            sqlx::query_scalar("SELECT id FROM element_groups WHERE id = $1 FOR UPDATE")
                .bind(target_id)
                .fetch_optional(&mut *tx)
                .await?;
        if target.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }

        let moved = sqlx::query("UPDATE scene_elements SET group_id = $1 WHERE group_id = $2")
            .bind(target_id)
            .bind(source_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        // The source's own assignee rows die with it via cascade.
        let removed = sqlx::query("DELETE FROM element_groups WHERE id = $1")
            .bind(source_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if removed == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        tx.commit().await?;
        Ok(Some(moved as i64))
    }

    // -----------------------------------------------------------------------
    // Assignee helpers
    // -----------------------------------------------------------------------

    /// Get a group's assignee user ids, oldest assignment first.
    pub async fn get_assignees(pool: &PgPool, group_id: DbId) -> Result<Vec<UserId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT user_id FROM element_group_assignees
             WHERE group_id = $1
             ORDER BY created_at ASC, user_id ASC",
        )
        .bind(group_id)
        .fetch_all(pool)
        .await
    }

    /// Replace a group's assignee set within an existing transaction.
    ///
    /// Deletes existing rows, then inserts the new set.
    pub(crate) async fn set_assignees_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        group_id: DbId,
        user_ids: &[UserId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM element_group_assignees WHERE group_id = $1")
            .bind(group_id)
            .execute(&mut **tx)
            .await?;

        for &user_id in user_ids {
            sqlx::query(
                "INSERT INTO element_group_assignees (group_id, user_id) VALUES ($1, $2)",
            )
            .bind(group_id)
            .bind(user_id)
            .execute(&mut **tx)
            .await?;
        }

        Ok(())
    }
}
