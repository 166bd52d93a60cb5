use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::dto::parking_dto::ParkingCommand;
use crate::models::parking::Parking;
use crate::services::edit_service::ParkingEdit;
use crate::utils::errors::AppError;

pub struct ParkingRepository {
    pool: PgPool,
}

impl ParkingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, parking: &Parking) -> Result<Parking, AppError> {
        let created = sqlx::query_as::<_, Parking>(
            r#"
            INSERT INTO parkings (id, name, address, capacity, taken_places,
                                  places_for_electric_cars, taken_electric_places,
                                  parking_spot_width, parking_spot_length, parking_type, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(parking.id)
        .bind(&parking.name)
        .bind(&parking.address)
        .bind(parking.capacity)
        .bind(parking.taken_places)
        .bind(parking.places_for_electric_cars)
        .bind(parking.taken_electric_places)
        .bind(parking.parking_spot_width)
        .bind(parking.parking_spot_length)
        .bind(parking.parking_type)
        .bind(parking.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Parking>, AppError> {
        let parking = sqlx::query_as::<_, Parking>("SELECT * FROM parkings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(parking)
    }

    pub async fn find_all(&self) -> Result<Vec<Parking>, AppError> {
        let parkings = sqlx::query_as::<_, Parking>("SELECT * FROM parkings ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(parkings)
    }

    pub async fn find_all_paginated(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Parking>, AppError> {
        let parkings = sqlx::query_as::<_, Parking>(
            "SELECT * FROM parkings ORDER BY name ASC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(parkings)
    }

    pub async fn count_all(&self) -> Result<i64, AppError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM parkings")
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    /// Actualización completa de los datos del parking. Los contadores de
    /// ocupación no se tocan: solo los modifica el flujo de aparcar/salir.
    pub async fn update_details(
        &self,
        id: Uuid,
        command: &ParkingCommand,
    ) -> Result<Option<Parking>, AppError> {
        let parking = sqlx::query_as::<_, Parking>(
            r#"
            UPDATE parkings
            SET name = $2, address = $3, capacity = $4, places_for_electric_cars = $5,
                parking_spot_width = $6, parking_spot_length = $7, parking_type = $8
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&command.name)
        .bind(&command.address)
        .bind(command.capacity)
        .bind(command.places_for_electric_cars)
        .bind(command.parking_spot_width)
        .bind(command.parking_spot_length)
        .bind(command.parking_type)
        .fetch_optional(&self.pool)
        .await?;

        Ok(parking)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM parkings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Aplica una edición de campo ya validada por `edit_service`.
    pub async fn apply_edit(
        &self,
        id: Uuid,
        edit: &ParkingEdit,
    ) -> Result<Option<Parking>, AppError> {
        let parking = match edit {
            ParkingEdit::Name(value) => {
                sqlx::query_as::<_, Parking>(
                    "UPDATE parkings SET name = $2 WHERE id = $1 RETURNING *",
                )
                .bind(id)
                .bind(value)
                .fetch_optional(&self.pool)
                .await?
            }
            ParkingEdit::Address(value) => {
                sqlx::query_as::<_, Parking>(
                    "UPDATE parkings SET address = $2 WHERE id = $1 RETURNING *",
                )
                .bind(id)
                .bind(value)
                .fetch_optional(&self.pool)
                .await?
            }
            ParkingEdit::Capacity(value) => {
                sqlx::query_as::<_, Parking>(
                    "UPDATE parkings SET capacity = $2 WHERE id = $1 RETURNING *",
                )
                .bind(id)
                .bind(value)
                .fetch_optional(&self.pool)
                .await?
            }
            ParkingEdit::ParkingType(value) => {
                sqlx::query_as::<_, Parking>(
                    "UPDATE parkings SET parking_type = $2 WHERE id = $1 RETURNING *",
                )
                .bind(id)
                .bind(value)
                .fetch_optional(&self.pool)
                .await?
            }
            ParkingEdit::ParkingSpotWidth(value) => {
                sqlx::query_as::<_, Parking>(
                    "UPDATE parkings SET parking_spot_width = $2 WHERE id = $1 RETURNING *",
                )
                .bind(id)
                .bind(value)
                .fetch_optional(&self.pool)
                .await?
            }
            ParkingEdit::ParkingSpotLength(value) => {
                sqlx::query_as::<_, Parking>(
                    "UPDATE parkings SET parking_spot_length = $2 WHERE id = $1 RETURNING *",
                )
                .bind(id)
                .bind(value)
                .fetch_optional(&self.pool)
                .await?
            }
            ParkingEdit::PlacesForElectricCars(value) => {
                sqlx::query_as::<_, Parking>(
                    "UPDATE parkings SET places_for_electric_cars = $2 WHERE id = $1 RETURNING *",
                )
                .bind(id)
                .bind(value)
                .fetch_optional(&self.pool)
                .await?
            }
        };

        Ok(parking)
    }

    /// Bloquea la fila del parking dentro de la transacción del llamante.
    /// Serializa aparcar/salir por parking: nadie más lee ni escribe los
    /// contadores hasta que la transacción termina.
    pub async fn lock_by_id(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<Parking>, AppError> {
        let parking =
            sqlx::query_as::<_, Parking>("SELECT * FROM parkings WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(conn)
                .await?;

        Ok(parking)
    }

    /// Persiste los contadores calculados por el núcleo de ocupación.
    pub async fn store_counters(
        conn: &mut PgConnection,
        parking: &Parking,
    ) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE parkings SET taken_places = $2, taken_electric_places = $3 WHERE id = $1",
        )
        .bind(parking.id)
        .bind(parking.taken_places)
        .bind(parking.taken_electric_places)
        .execute(conn)
        .await?;

        Ok(())
    }
}
