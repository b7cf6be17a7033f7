//! Repository for the `scene_elements` table.
//!
//! Elements always belong to exactly one element group; creates either
//! mint a fresh group or attach to an existing one, and deletes sweep the
//! group away when its last element goes (orphan cleanup). Every write
//! that touches both tables runs in one transaction.

use sqlx::PgPool;
use stagemap_core::types::{DbId, UserId};

use crate::models::scene_element::{
    NewElementPlacement, SceneElement, SceneElementWithSlot, UpdateSceneElement,
};
use crate::repositories::ElementGroupRepo;

/// Column list for the `scene_elements` table.
const COLUMNS: &str = "id, scene_id, element_type_id, group_id, \
    position_x, position_y, created_at, updated_at";

/// The slot fields an element's denormalized view carries: the group's
/// name and its first assignee.
#[derive(sqlx::FromRow)]
struct SlotSummary {
    display_name: Option<String>,
    assigned_user_id: Option<UserId>,
}

/// Provides placement operations for scene elements, including implicit
/// group creation and orphan-group cleanup.
pub struct SceneElementRepo;

impl SceneElementRepo {
    /// Insert an element into a freshly created group, optionally seeded
    /// with a display name and one assignee, in one transaction.
    pub async fn create_with_new_group(
        pool: &PgPool,
        placement: &NewElementPlacement,
        display_name: Option<&str>,
        assigned_user_id: Option<UserId>,
    ) -> Result<SceneElementWithSlot, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let group_id: DbId = sqlx::query_scalar(
            "INSERT INTO element_groups (scene_id, display_name) VALUES ($1, $2) RETURNING id",
        )
        .bind(placement.scene_id)
        .bind(display_name)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(user_id) = assigned_user_id {
            sqlx::query("INSERT INTO element_group_assignees (group_id, user_id) VALUES ($1, $2)")
                .bind(group_id)
                .bind(user_id)
                .execute(&mut *tx)
                .await?;
        }

        let element = Self::insert_element(&mut tx, placement, group_id).await?;

        tx.commit().await?;

        Ok(SceneElementWithSlot {
            element,
            display_name: display_name.map(str::to_string),
            assigned_user_id,
        })
    }

    /// Insert an element into an existing group. The caller has already
    /// verified the group exists and lives in the same scene.
    pub async fn create_in_group(
        pool: &PgPool,
        placement: &NewElementPlacement,
        group_id: DbId,
    ) -> Result<SceneElementWithSlot, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let element = Self::insert_element(&mut tx, placement, group_id).await?;
        tx.commit().await?;

        let slot = Self::slot_summary(pool, group_id).await?;
        Ok(SceneElementWithSlot {
            element,
            display_name: slot.display_name,
            assigned_user_id: slot.assigned_user_id,
        })
    }

    /// Find an element row by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SceneElement>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM scene_elements WHERE id = $1");
        sqlx::query_as::<_, SceneElement>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an element by ID, enriched with its group's name and first
    /// assignee.
    pub async fn find_with_slot(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<SceneElementWithSlot>, sqlx::Error> {
        let element = Self::find_by_id(pool, id).await?;
        match element {
            Some(element) => {
                let slot = Self::slot_summary(pool, element.group_id).await?;
                Ok(Some(SceneElementWithSlot {
                    element,
                    display_name: slot.display_name,
                    assigned_user_id: slot.assigned_user_id,
                }))
            }
            None => Ok(None),
        }
    }

    /// List a scene's elements with their slot fields, oldest first.
    pub async fn list_by_scene(
        pool: &PgPool,
        scene_id: DbId,
    ) -> Result<Vec<SceneElementWithSlot>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM scene_elements WHERE scene_id = $1 ORDER BY id ASC"
        );
        let elements = sqlx::query_as::<_, SceneElement>(&query)
            .bind(scene_id)
            .fetch_all(pool)
            .await?;

        let mut result = Vec::with_capacity(elements.len());
        for element in elements {
            let slot = Self::slot_summary(pool, element.group_id).await?;
            result.push(SceneElementWithSlot {
                element,
                display_name: slot.display_name,
                assigned_user_id: slot.assigned_user_id,
            });
        }

        Ok(result)
    }

    /// Update an element's position and/or its owning group's slot
    /// fields, in one transaction. A slot change is visible through every
    /// sibling element sharing the group.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSceneElement,
    ) -> Result<Option<SceneElementWithSlot>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let update_query = format!(
            "UPDATE scene_elements SET
                position_x = COALESCE($2, position_x),
                position_y = COALESCE($3, position_y)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let element = sqlx::query_as::<_, SceneElement>(&update_query)
            .bind(id)
            .bind(input.position_x)
            .bind(input.position_y)
            .fetch_optional(&mut *tx)
            .await?;

        match element {
            Some(element) => {
                if let Some(ref display_name) = input.display_name {
                    sqlx::query("UPDATE element_groups SET display_name = $2 WHERE id = $1")
                        .bind(element.group_id)
                        .bind(display_name.as_deref())
                        .execute(&mut *tx)
                        .await?;
                }
                if let Some(assigned) = input.assigned_user_id {
                    // The single-user element view replaces the whole set.
                    let new_set: Vec<UserId> = assigned.into_iter().collect();
                    ElementGroupRepo::set_assignees_inner(&mut tx, element.group_id, &new_set)
                        .await?;
                }
                tx.commit().await?;

                let slot = Self::slot_summary(pool, element.group_id).await?;
                Ok(Some(SceneElementWithSlot {
                    element,
                    display_name: slot.display_name,
                    assigned_user_id: slot.assigned_user_id,
                }))
            }
            None => {
                tx.rollback().await?;
                Ok(None)
            }
        }
    }

    /// Delete an element, sweeping its group away if this was the last
    /// element referencing it. Both steps run in one transaction so the
    /// orphan check never sees a torn state.
    ///
    /// Returns `Some(group_removed)` on success, `None` if the element
    /// does not exist.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<bool>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let group_id: Option<DbId> =
            sqlx::query_scalar("DELETE FROM scene_elements WHERE id = $1 RETURNING group_id")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        match group_id {
            Some(group_id) => {
                let remaining: i64 =
                    sqlx::query_scalar("SELECT COUNT(*) FROM scene_elements WHERE group_id = $1")
                        .bind(group_id)
                        .fetch_one(&mut *tx)
                        .await?;

                let group_removed = if remaining == 0 {
                    sqlx::query("DELETE FROM element_groups WHERE id = $1")
                        .bind(group_id)
                        .execute(&mut *tx)
                        .await?
                        .rows_affected()
                        > 0
                } else {
                    false
                };

                tx.commit().await?;
                Ok(Some(group_removed))
            }
            None => {
                tx.rollback().await?;
                Ok(None)
            }
        }
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Insert the element row within an existing transaction.
    async fn insert_element(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        placement: &NewElementPlacement,
        group_id: DbId,
    ) -> Result<SceneElement, sqlx::Error> {
        let query = format!(
            "INSERT INTO scene_elements
                (scene_id, element_type_id, group_id, position_x, position_y)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SceneElement>(&query)
            .bind(placement.scene_id)
            .bind(placement.element_type_id)
            .bind(group_id)
            .bind(placement.position_x)
            .bind(placement.position_y)
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetch a group's slot fields. The group must exist; every element
    /// holds exactly one group at rest.
    async fn slot_summary(pool: &PgPool, group_id: DbId) -> Result<SlotSummary, sqlx::Error> {
        sqlx::query_as::<_, SlotSummary>(
            "SELECT eg.display_name,
                    (SELECT ega.user_id FROM element_group_assignees ega
                      WHERE ega.group_id = eg.id
                      ORDER BY ega.created_at ASC, ega.user_id ASC
                      LIMIT 1) AS assigned_user_id
             FROM element_groups eg
             WHERE eg.id = $1",
        )
        .bind(group_id)
        .fetch_one(pool)
        .await
    }
}
