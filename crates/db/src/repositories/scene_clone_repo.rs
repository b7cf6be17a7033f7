//! Cross-presentation scene cloning.
//!
//! Copies one scene's full structure into a target presentation under a
//! paste policy deciding how much slot identity travels along. The whole
//! copy is one transaction; the target's other scenes are never
//! resequenced (callers follow up with a reorder to splice).

use std::collections::HashMap;

use sqlx::PgPool;
use stagemap_core::paste::PasteOption;
use stagemap_core::types::{DbId, UserId};

use crate::models::scene::{Scene, SceneKind};
use crate::models::scene_element::SceneElement;
use crate::repositories::ViewerRepo;

/// Column list for the `scenes` table.
const SCENE_COLUMNS: &str =
    "id, presentation_id, position, kind, name, description, created_at, updated_at";

/// Column list for the `scene_elements` table.
const ELEMENT_COLUMNS: &str = "id, scene_id, element_type_id, group_id, \
    position_x, position_y, created_at, updated_at";

/// One source step row plus its id, for the transition copy loop.
#[derive(sqlx::FromRow)]
struct SourceStep {
    id: DbId,
    position: i32,
    description: String,
}

/// Copies scenes between presentations.
pub struct SceneCloneRepo;

impl SceneCloneRepo {
    /// Clone `source` into `target_presentation_id` as a new scene,
    /// copying its elements/groups or steps per `paste`.
    ///
    /// `name` defaults to the source's name; `position` appends after the
    /// target's last scene when omitted. The caller has already verified
    /// that the source scene and target presentation exist.
    pub async fn clone_scene(
        pool: &PgPool,
        source: &Scene,
        target_presentation_id: DbId,
        paste: PasteOption,
        name: Option<&str>,
        position: Option<i32>,
    ) -> Result<Scene, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO scenes (presentation_id, position, kind, name, description)
             VALUES (
                $1,
                COALESCE($2, (SELECT COALESCE(MAX(position) + 1, 0)
                              FROM scenes WHERE presentation_id = $1)),
                $3, $4, $5
             )
             RETURNING {SCENE_COLUMNS}"
        );
        let new_scene = sqlx::query_as::<_, Scene>(&insert_query)
            .bind(target_presentation_id)
            .bind(position)
            .bind(source.kind)
            .bind(name.unwrap_or(&source.name))
            .bind(&source.description)
            .fetch_one(&mut *tx)
            .await?;

        match source.kind {
            SceneKind::Formation => {
                Self::clone_formation_content(
                    &mut tx,
                    source.id,
                    new_scene.id,
                    target_presentation_id,
                    paste,
                )
                .await?;
            }
            SceneKind::Transition => {
                Self::clone_transition_content(
                    &mut tx,
                    source.id,
                    new_scene.id,
                    target_presentation_id,
                    paste,
                )
                .await?;
            }
        }

        tx.commit().await?;
        Ok(new_scene)
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Copy a formation scene's groups and elements. Elements sharing a
    /// source group keep sharing its copy.
    async fn clone_formation_content(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        source_scene_id: DbId,
        new_scene_id: DbId,
        target_presentation_id: DbId,
        paste: PasteOption,
    ) -> Result<(), sqlx::Error> {
        let select_query = format!(
            "SELECT {ELEMENT_COLUMNS} FROM scene_elements WHERE scene_id = $1 ORDER BY id ASC"
        );
        let elements = sqlx::query_as::<_, SceneElement>(&select_query)
            .bind(source_scene_id)
            .fetch_all(&mut **tx)
            .await?;

        let mut group_map: HashMap<DbId, DbId> = HashMap::new();
        for element in &elements {
            if group_map.contains_key(&element.group_id) {
                continue;
            }

            let display_name: Option<String> =
                sqlx::query_scalar("SELECT display_name FROM element_groups WHERE id = $1")
                    .bind(element.group_id)
                    .fetch_one(&mut **tx)
                    .await?;
            let assignees: Vec<UserId> = sqlx::query_scalar(
                "SELECT user_id FROM element_group_assignees
                 WHERE group_id = $1
                 ORDER BY created_at ASC, user_id ASC",
            )
            .bind(element.group_id)
            .fetch_all(&mut **tx)
            .await?;

            let carried_name = paste.carried_display_name(display_name.as_deref());
            let carried_assignees = paste.carried_assignees(&assignees);

            let new_group_id: DbId = sqlx::query_scalar(
                "INSERT INTO element_groups (scene_id, display_name)
                 VALUES ($1, $2)
                 RETURNING id",
            )
            .bind(new_scene_id)
            .bind(&carried_name)
            .fetch_one(&mut **tx)
            .await?;

            for &user_id in &carried_assignees {
                sqlx::query(
                    "INSERT INTO element_group_assignees (group_id, user_id) VALUES ($1, $2)",
                )
                .bind(new_group_id)
                .bind(user_id)
                .execute(&mut **tx)
                .await?;
            }

            if paste.extends_cast() && !carried_assignees.is_empty() {
                ViewerRepo::ensure_members_inner(tx, target_presentation_id, &carried_assignees)
                    .await?;
            }

            group_map.insert(element.group_id, new_group_id);
        }

        for element in &elements {
            sqlx::query(
                "INSERT INTO scene_elements
                    (scene_id, element_type_id, group_id, position_x, position_y)
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(new_scene_id)
            .bind(element.element_type_id)
            .bind(group_map[&element.group_id])
            .bind(element.position_x)
            .bind(element.position_y)
            .execute(&mut **tx)
            .await?;
        }

        Ok(())
    }

    /// Copy a transition scene's steps. Descriptions always travel;
    /// assignees only under `with_users`.
    async fn clone_transition_content(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        source_scene_id: DbId,
        new_scene_id: DbId,
        target_presentation_id: DbId,
        paste: PasteOption,
    ) -> Result<(), sqlx::Error> {
        let steps = sqlx::query_as::<_, SourceStep>(
            "SELECT id, position, description FROM transition_steps
             WHERE scene_id = $1
             ORDER BY position ASC, id ASC",
        )
        .bind(source_scene_id)
        .fetch_all(&mut **tx)
        .await?;

        for step in &steps {
            let new_step_id: DbId = sqlx::query_scalar(
                "INSERT INTO transition_steps (scene_id, position, description)
                 VALUES ($1, $2, $3)
                 RETURNING id",
            )
            .bind(new_scene_id)
            .bind(step.position)
            .bind(&step.description)
            .fetch_one(&mut **tx)
            .await?;

            let assignees: Vec<UserId> = sqlx::query_scalar(
                "SELECT user_id FROM transition_step_assignees
                 WHERE step_id = $1
                 ORDER BY created_at ASC, user_id ASC",
            )
            .bind(step.id)
            .fetch_all(&mut **tx)
            .await?;

            let carried_assignees = paste.carried_assignees(&assignees);
            for &user_id in &carried_assignees {
                sqlx::query(
                    "INSERT INTO transition_step_assignees (step_id, user_id) VALUES ($1, $2)",
                )
                .bind(new_step_id)
                .bind(user_id)
                .execute(&mut **tx)
                .await?;
            }

            if paste.extends_cast() && !carried_assignees.is_empty() {
                ViewerRepo::ensure_members_inner(tx, target_presentation_id, &carried_assignees)
                    .await?;
            }
        }

        Ok(())
    }
}
