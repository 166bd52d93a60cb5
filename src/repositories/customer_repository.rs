use sqlx::PgPool;
use uuid::Uuid;

use crate::models::customer::Customer;
use crate::services::edit_service::CustomerEdit;
use crate::utils::errors::AppError;

pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, customer: &Customer) -> Result<Customer, AppError> {
        let created = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (id, first_name, last_name, username, password_hash, role,
                                   account_enabled, account_locked, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(customer.id)
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.username)
        .bind(&customer.password_hash)
        .bind(customer.role)
        .bind(customer.account_enabled)
        .bind(customer.account_locked)
        .bind(customer.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, AppError> {
        let customer = sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(customer)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<Customer>, AppError> {
        let customer =
            sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE username = $1")
                .bind(username)
                .fetch_optional(&self.pool)
                .await?;

        Ok(customer)
    }

    pub async fn username_exists(&self, username: &str) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM customers WHERE username = $1)")
                .bind(username)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    pub async fn find_all_paginated(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Customer>, AppError> {
        let customers = sqlx::query_as::<_, Customer>(
            "SELECT * FROM customers ORDER BY username ASC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    pub async fn count_all(&self) -> Result<i64, AppError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    pub async fn set_enabled(&self, id: Uuid, enabled: bool) -> Result<Option<Customer>, AppError> {
        let customer = sqlx::query_as::<_, Customer>(
            "UPDATE customers SET account_enabled = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(enabled)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    pub async fn set_locked(&self, id: Uuid, locked: bool) -> Result<Option<Customer>, AppError> {
        let customer = sqlx::query_as::<_, Customer>(
            "UPDATE customers SET account_locked = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(locked)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Aplica una edición de campo ya verificada por `edit_service`.
    pub async fn apply_edit(
        &self,
        id: Uuid,
        edit: &CustomerEdit,
    ) -> Result<Option<Customer>, AppError> {
        let customer = match edit {
            CustomerEdit::Username(value) => {
                sqlx::query_as::<_, Customer>(
                    "UPDATE customers SET username = $2 WHERE id = $1 RETURNING *",
                )
                .bind(id)
                .bind(value)
                .fetch_optional(&self.pool)
                .await?
            }
            CustomerEdit::Password(hash) => {
                sqlx::query_as::<_, Customer>(
                    "UPDATE customers SET password_hash = $2 WHERE id = $1 RETURNING *",
                )
                .bind(id)
                .bind(hash)
                .fetch_optional(&self.pool)
                .await?
            }
            CustomerEdit::FirstName(value) => {
                sqlx::query_as::<_, Customer>(
                    "UPDATE customers SET first_name = $2 WHERE id = $1 RETURNING *",
                )
                .bind(id)
                .bind(value)
                .fetch_optional(&self.pool)
                .await?
            }
            CustomerEdit::LastName(value) => {
                sqlx::query_as::<_, Customer>(
                    "UPDATE customers SET last_name = $2 WHERE id = $1 RETURNING *",
                )
                .bind(id)
                .bind(value)
                .fetch_optional(&self.pool)
                .await?
            }
        };

        Ok(customer)
    }
}
