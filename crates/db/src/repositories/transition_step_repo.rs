//! Repository for the `transition_steps` and `transition_step_assignees`
//! tables.
//!
//! Steps parallel element groups structurally but are never shared:
//! each step owns its assignee rows outright, so there is no orphan
//! cleanup here.

use sqlx::PgPool;
use stagemap_core::types::{DbId, UserId};

use crate::models::transition_step::{
    CreateTransitionStep, TransitionStep, TransitionStepWithAssignee, UpdateTransitionStep,
};

/// Column list for the `transition_steps` table.
const COLUMNS: &str = "id, scene_id, position, description, created_at, updated_at";

/// Provides CRUD operations for transition checklist steps.
pub struct TransitionStepRepo;

impl TransitionStepRepo {
    /// Insert a new step, returning it with its assignee.
    ///
    /// If `position` is `None`, appends after the scene's last step.
    pub async fn create(
        pool: &PgPool,
        input: &CreateTransitionStep,
    ) -> Result<TransitionStepWithAssignee, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO transition_steps (scene_id, position, description)
             VALUES (
                $1,
                COALESCE($2, (SELECT COALESCE(MAX(position) + 1, 0)
                              FROM transition_steps WHERE scene_id = $1)),
                $3
             )
             RETURNING {COLUMNS}"
        );
        let step = sqlx::query_as::<_, TransitionStep>(&query)
            .bind(input.scene_id)
            .bind(input.position)
            .bind(&input.description)
            .fetch_one(&mut *tx)
            .await?;

        if let Some(user_id) = input.assigned_user_id {
            sqlx::query(
                "INSERT INTO transition_step_assignees (step_id, user_id) VALUES ($1, $2)",
            )
            .bind(step.id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(TransitionStepWithAssignee {
            step,
            assigned_user_id: input.assigned_user_id,
        })
    }

    /// Find a step row by its internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<TransitionStep>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM transition_steps WHERE id = $1");
        sqlx::query_as::<_, TransitionStep>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a step by ID, enriched with its assignee.
    pub async fn find_with_assignee(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<TransitionStepWithAssignee>, sqlx::Error> {
        let step = Self::find_by_id(pool, id).await?;
        match step {
            Some(step) => {
                let assigned_user_id = Self::first_assignee(pool, step.id).await?;
                Ok(Some(TransitionStepWithAssignee {
                    step,
                    assigned_user_id,
                }))
            }
            None => Ok(None),
        }
    }

    /// List a scene's steps in checklist order.
    pub async fn list_by_scene(
        pool: &PgPool,
        scene_id: DbId,
    ) -> Result<Vec<TransitionStepWithAssignee>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM transition_steps
             WHERE scene_id = $1
             ORDER BY position ASC, id ASC"
        );
        let steps = sqlx::query_as::<_, TransitionStep>(&query)
            .bind(scene_id)
            .fetch_all(pool)
            .await?;

        let mut result = Vec::with_capacity(steps.len());
        for step in steps {
            let assigned_user_id = Self::first_assignee(pool, step.id).await?;
            result.push(TransitionStepWithAssignee {
                step,
                assigned_user_id,
            });
        }

        Ok(result)
    }

    /// Update a step. Only non-`None` fields are applied; an explicit
    /// `assigned_user_id: null` un-assigns.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTransitionStep,
    ) -> Result<Option<TransitionStepWithAssignee>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE transition_steps SET
                description = COALESCE($2, description),
                position = COALESCE($3, position)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let step = sqlx::query_as::<_, TransitionStep>(&query)
            .bind(id)
            .bind(&input.description)
            .bind(input.position)
            .fetch_optional(&mut *tx)
            .await?;

        match step {
            Some(step) => {
                if let Some(assigned) = input.assigned_user_id {
                    Self::set_assignee_inner(&mut tx, step.id, assigned).await?;
                }
                tx.commit().await?;

                let assigned_user_id = Self::first_assignee(pool, step.id).await?;
                Ok(Some(TransitionStepWithAssignee {
                    step,
                    assigned_user_id,
                }))
            }
            None => {
                tx.rollback().await?;
                Ok(None)
            }
        }
    }

    /// Delete a step by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM transition_steps WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// A step's assignee, oldest assignment first.
    async fn first_assignee(pool: &PgPool, step_id: DbId) -> Result<Option<UserId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT user_id FROM transition_step_assignees
             WHERE step_id = $1
             ORDER BY created_at ASC, user_id ASC
             LIMIT 1",
        )
        .bind(step_id)
        .fetch_optional(pool)
        .await
    }

    /// Replace a step's assignee within an existing transaction.
    async fn set_assignee_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        step_id: DbId,
        user_id: Option<UserId>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM transition_step_assignees WHERE step_id = $1")
            .bind(step_id)
            .execute(&mut **tx)
            .await?;

        if let Some(user_id) = user_id {
            sqlx::query(
                "INSERT INTO transition_step_assignees (step_id, user_id) VALUES ($1, $2)",
            )
            .bind(step_id)
            .bind(user_id)
            .execute(&mut **tx)
            .await?;
        }

        Ok(())
    }
}
