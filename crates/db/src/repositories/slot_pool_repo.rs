//! Presentation-wide slot operations: the pool of named slots in use,
//! and the "apply everywhere" bulk rename.

use sqlx::PgPool;
use stagemap_core::types::{DbId, UserId};

use crate::models::element_group::SlotPoolEntry;

/// Cross-scene queries over a presentation's element groups.
pub struct SlotPoolRepo;

impl SlotPoolRepo {
    /// List the distinct (element type, display name) pairs used anywhere
    /// in a presentation. Unnamed groups are not part of the pool.
    pub async fn list_pool(
        pool: &PgPool,
        presentation_id: DbId,
    ) -> Result<Vec<SlotPoolEntry>, sqlx::Error> {
        sqlx::query_as::<_, SlotPoolEntry>(
            "SELECT DISTINCT se.element_type_id,
                    et.name AS element_type_name,
                    eg.display_name
             FROM element_groups eg
             JOIN scenes s ON s.id = eg.scene_id
             JOIN scene_elements se ON se.group_id = eg.id
             JOIN element_types et ON et.id = se.element_type_id
             WHERE s.presentation_id = $1 AND eg.display_name IS NOT NULL
             ORDER BY element_type_name ASC, display_name ASC",
        )
        .bind(presentation_id)
        .fetch_all(pool)
        .await
    }

    /// Rewrite every matching slot in the presentation: groups whose
    /// elements carry `element_type_id` and whose current name equals
    /// `old_display_name` get `new_display_name` and have their assignee
    /// set replaced (`new_assigned_user_id: None` clears it). One
    /// transaction for the whole pass.
    ///
    /// Returns the number of groups rewritten.
    pub async fn rename_across_presentation(
        pool: &PgPool,
        presentation_id: DbId,
        element_type_id: DbId,
        old_display_name: &str,
        new_display_name: &str,
        new_assigned_user_id: Option<UserId>,
    ) -> Result<i64, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let matched: Vec<DbId> = sqlx::query_scalar(
            "SELECT DISTINCT eg.id
             FROM element_groups eg
             JOIN scenes s ON s.id = eg.scene_id
             JOIN scene_elements se ON se.group_id = eg.id
             WHERE s.presentation_id = $1
               AND se.element_type_id = $2
               AND eg.display_name = $3",
        )
        .bind(presentation_id)
        .bind(element_type_id)
        .bind(old_display_name)
        .fetch_all(&mut *tx)
        .await?;

        if matched.is_empty() {
            tx.rollback().await?;
            return Ok(0);
        }

        sqlx::query("UPDATE element_groups SET display_name = $2 WHERE id = ANY($1)")
            .bind(&matched)
            .bind(new_display_name)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM element_group_assignees WHERE group_id = ANY($1)")
            .bind(&matched)
            .execute(&mut *tx)
            .await?;

        if let Some(user_id) = new_assigned_user_id {
            for &group_id in &matched {
                sqlx::query(
                    "INSERT INTO element_group_assignees (group_id, user_id) VALUES ($1, $2)",
                )
                .bind(group_id)
                .bind(user_id)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        Ok(matched.len() as i64)
    }
}
