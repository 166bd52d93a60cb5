use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::car::{Car, Fuel};
use crate::services::edit_service::CarEdit;
use crate::utils::errors::AppError;

pub struct CarRepository {
    pool: PgPool,
}

impl CarRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, car: &Car) -> Result<Car, AppError> {
        let created = sqlx::query_as::<_, Car>(
            r#"
            INSERT INTO cars (id, brand, model, price, length, width, date_of_production,
                              fuel, parking_id, customer_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(car.id)
        .bind(&car.brand)
        .bind(&car.model)
        .bind(car.price)
        .bind(car.length)
        .bind(car.width)
        .bind(car.date_of_production)
        .bind(car.fuel)
        .bind(car.parking_id)
        .bind(car.customer_id)
        .bind(car.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Alta en lote dentro de una sola transacción: o entran todos o ninguno.
    pub async fn create_batch(&self, cars: &[Car]) -> Result<Vec<Car>, AppError> {
        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(cars.len());

        for car in cars {
            let row = sqlx::query_as::<_, Car>(
                r#"
                INSERT INTO cars (id, brand, model, price, length, width, date_of_production,
                                  fuel, parking_id, customer_id, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                RETURNING *
                "#,
            )
            .bind(car.id)
            .bind(&car.brand)
            .bind(&car.model)
            .bind(car.price)
            .bind(car.length)
            .bind(car.width)
            .bind(car.date_of_production)
            .bind(car.fuel)
            .bind(car.parking_id)
            .bind(car.customer_id)
            .bind(car.created_at)
            .fetch_one(&mut *tx)
            .await?;

            created.push(row);
        }

        tx.commit().await?;
        Ok(created)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Car>, AppError> {
        let car = sqlx::query_as::<_, Car>("SELECT * FROM cars WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(car)
    }

    pub async fn find_all(&self) -> Result<Vec<Car>, AppError> {
        let cars = sqlx::query_as::<_, Car>("SELECT * FROM cars ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(cars)
    }

    pub async fn find_all_paginated(&self, limit: i64, offset: i64) -> Result<Vec<Car>, AppError> {
        let cars = sqlx::query_as::<_, Car>(
            "SELECT * FROM cars ORDER BY brand ASC, model ASC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(cars)
    }

    pub async fn count_all(&self) -> Result<i64, AppError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cars")
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    pub async fn find_by_customer(&self, customer_id: Uuid) -> Result<Vec<Car>, AppError> {
        let cars = sqlx::query_as::<_, Car>(
            "SELECT * FROM cars WHERE customer_id = $1 ORDER BY created_at DESC",
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(cars)
    }

    pub async fn find_by_customer_and_brand(
        &self,
        customer_id: Uuid,
        brand: &str,
    ) -> Result<Vec<Car>, AppError> {
        let cars = sqlx::query_as::<_, Car>(
            "SELECT * FROM cars WHERE customer_id = $1 AND brand = $2 ORDER BY created_at DESC",
        )
        .bind(customer_id)
        .bind(brand)
        .fetch_all(&self.pool)
        .await?;

        Ok(cars)
    }

    pub async fn find_by_customer_and_fuel(
        &self,
        customer_id: Uuid,
        fuel: Fuel,
    ) -> Result<Vec<Car>, AppError> {
        let cars = sqlx::query_as::<_, Car>(
            "SELECT * FROM cars WHERE customer_id = $1 AND fuel = $2 ORDER BY created_at DESC",
        )
        .bind(customer_id)
        .bind(fuel)
        .fetch_all(&self.pool)
        .await?;

        Ok(cars)
    }

    pub async fn most_expensive(&self) -> Result<Option<Car>, AppError> {
        let car = sqlx::query_as::<_, Car>("SELECT * FROM cars ORDER BY price DESC LIMIT 1")
            .fetch_optional(&self.pool)
            .await?;

        Ok(car)
    }

    pub async fn most_expensive_for_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Option<Car>, AppError> {
        let car = sqlx::query_as::<_, Car>(
            "SELECT * FROM cars WHERE customer_id = $1 ORDER BY price DESC LIMIT 1",
        )
        .bind(customer_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(car)
    }

    pub async fn most_expensive_for_customer_by_brand(
        &self,
        customer_id: Uuid,
        brand: &str,
    ) -> Result<Option<Car>, AppError> {
        let car = sqlx::query_as::<_, Car>(
            "SELECT * FROM cars WHERE customer_id = $1 AND brand = $2 ORDER BY price DESC LIMIT 1",
        )
        .bind(customer_id)
        .bind(brand)
        .fetch_optional(&self.pool)
        .await?;

        Ok(car)
    }

    pub async fn find_by_parking(&self, parking_id: Uuid) -> Result<Vec<Car>, AppError> {
        let cars = sqlx::query_as::<_, Car>(
            "SELECT * FROM cars WHERE parking_id = $1 ORDER BY created_at DESC",
        )
        .bind(parking_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(cars)
    }

    pub async fn count_by_parking(&self, parking_id: Uuid) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cars WHERE parking_id = $1")
            .bind(parking_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    pub async fn most_expensive_in_parking(
        &self,
        parking_id: Uuid,
    ) -> Result<Option<Car>, AppError> {
        let car = sqlx::query_as::<_, Car>(
            "SELECT * FROM cars WHERE parking_id = $1 ORDER BY price DESC LIMIT 1",
        )
        .bind(parking_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(car)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM cars WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Aplica una edición de campo ya validada por `edit_service`.
    pub async fn apply_edit(&self, id: Uuid, edit: &CarEdit) -> Result<Option<Car>, AppError> {
        let car = match edit {
            CarEdit::Brand(value) => {
                sqlx::query_as::<_, Car>("UPDATE cars SET brand = $2 WHERE id = $1 RETURNING *")
                    .bind(id)
                    .bind(value)
                    .fetch_optional(&self.pool)
                    .await?
            }
            CarEdit::Model(value) => {
                sqlx::query_as::<_, Car>("UPDATE cars SET model = $2 WHERE id = $1 RETURNING *")
                    .bind(id)
                    .bind(value)
                    .fetch_optional(&self.pool)
                    .await?
            }
            CarEdit::Price(value) => {
                sqlx::query_as::<_, Car>("UPDATE cars SET price = $2 WHERE id = $1 RETURNING *")
                    .bind(id)
                    .bind(value)
                    .fetch_optional(&self.pool)
                    .await?
            }
            CarEdit::Length(value) => {
                sqlx::query_as::<_, Car>("UPDATE cars SET length = $2 WHERE id = $1 RETURNING *")
                    .bind(id)
                    .bind(value)
                    .fetch_optional(&self.pool)
                    .await?
            }
            CarEdit::Width(value) => {
                sqlx::query_as::<_, Car>("UPDATE cars SET width = $2 WHERE id = $1 RETURNING *")
                    .bind(id)
                    .bind(value)
                    .fetch_optional(&self.pool)
                    .await?
            }
            CarEdit::DateOfProduction(value) => {
                sqlx::query_as::<_, Car>(
                    "UPDATE cars SET date_of_production = $2 WHERE id = $1 RETURNING *",
                )
                .bind(id)
                .bind(value)
                .fetch_optional(&self.pool)
                .await?
            }
            CarEdit::Fuel(value) => {
                sqlx::query_as::<_, Car>("UPDATE cars SET fuel = $2 WHERE id = $1 RETURNING *")
                    .bind(id)
                    .bind(value)
                    .fetch_optional(&self.pool)
                    .await?
            }
        };

        Ok(car)
    }

    /// Bloquea la fila del coche dentro de la transacción del llamante.
    ///
    /// El flujo de aparcar/salir bloquea siempre primero el coche y después
    /// el parking, así dos peticiones sobre el mismo par no pueden
    /// interbloquearse.
    pub async fn lock_by_id(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<Car>, AppError> {
        let car = sqlx::query_as::<_, Car>("SELECT * FROM cars WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(conn)
            .await?;

        Ok(car)
    }

    /// Persiste la asignación de parking calculada por el núcleo de ocupación.
    pub async fn store_parking_assignment(
        conn: &mut PgConnection,
        car: &Car,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE cars SET parking_id = $2 WHERE id = $1")
            .bind(car.id)
            .bind(car.parking_id)
            .execute(conn)
            .await?;

        Ok(())
    }
}
