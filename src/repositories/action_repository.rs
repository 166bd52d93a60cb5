use sqlx::PgPool;

use crate::models::action::Action;
use crate::utils::errors::AppError;

pub struct ActionRepository {
    pool: PgPool,
}

impl ActionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserta la fila de auditoría. Se llama antes de ejecutar la
    /// operación de administración correspondiente.
    pub async fn record(&self, action: &Action) -> Result<Action, AppError> {
        let recorded = sqlx::query_as::<_, Action>(
            r#"
            INSERT INTO actions (id, action_type, entity_type, entity_id, field_name,
                                 old_value, new_value, created_by, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(action.id)
        .bind(action.action_type)
        .bind(&action.entity_type)
        .bind(action.entity_id)
        .bind(&action.field_name)
        .bind(&action.old_value)
        .bind(&action.new_value)
        .bind(&action.created_by)
        .bind(action.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(recorded)
    }

    pub async fn find_all_paginated(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Action>, AppError> {
        let actions = sqlx::query_as::<_, Action>(
            "SELECT * FROM actions ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(actions)
    }

    pub async fn count_all(&self) -> Result<i64, AppError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM actions")
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    pub async fn find_by_creator(&self, username: &str) -> Result<Vec<Action>, AppError> {
        let actions = sqlx::query_as::<_, Action>(
            "SELECT * FROM actions WHERE created_by = $1 ORDER BY created_at DESC",
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await?;

        Ok(actions)
    }
}
