//! Operaciones sobre coches, incluidas las dos transaccionales
//! (aparcar y salir).
//!
//! Aparcar y salir siguen siempre el mismo protocolo: transacción,
//! `SELECT ... FOR UPDATE` del coche, después del parking, núcleo puro de
//! ocupación en memoria y por último persistencia de ambas filas. El orden
//! de bloqueo coche → parking es fijo para que dos peticiones concurrentes
//! no puedan interbloquearse.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::car_dto::{CarCommand, CarResponse, LeaveResponse};
use crate::models::car::Car;
use crate::repositories::car_repository::CarRepository;
use crate::repositories::customer_repository::CustomerRepository;
use crate::repositories::parking_repository::ParkingRepository;
use crate::services::occupancy::{self, LeaveError, ParkError};
use crate::utils::errors::{not_found_error, AppError};

pub struct CarController {
    pool: PgPool,
    cars: CarRepository,
    customers: CustomerRepository,
}

impl CarController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            cars: CarRepository::new(pool.clone()),
            customers: CustomerRepository::new(pool.clone()),
            pool,
        }
    }

    pub async fn list_all(&self) -> Result<Vec<CarResponse>, AppError> {
        let cars = self.cars.find_all().await?;

        Ok(cars.into_iter().map(CarResponse::from).collect())
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<CarResponse, AppError> {
        let car = self
            .cars
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Car", &id.to_string()))?;

        Ok(car.into())
    }

    /// Alta de coche. `customer_id` es `None` cuando lo crea un admin sin
    /// asignar dueño; si viene informado, el cliente debe existir.
    pub async fn create(
        &self,
        customer_id: Option<Uuid>,
        command: CarCommand,
    ) -> Result<CarResponse, AppError> {
        command.validate()?;

        if let Some(owner) = customer_id {
            self.customers
                .find_by_id(owner)
                .await?
                .ok_or_else(|| not_found_error("Customer", &owner.to_string()))?;
        }

        let car = build_car(customer_id, command);
        let created = self.cars.create(&car).await?;

        Ok(created.into())
    }

    /// Alta en lote. Se validan todos los commands antes de escribir nada;
    /// el repositorio inserta el lote completo en una única transacción.
    pub async fn create_batch(
        &self,
        customer_id: Option<Uuid>,
        commands: Vec<CarCommand>,
    ) -> Result<Vec<CarResponse>, AppError> {
        for command in &commands {
            command.validate()?;
        }

        if let Some(owner) = customer_id {
            self.customers
                .find_by_id(owner)
                .await?
                .ok_or_else(|| not_found_error("Customer", &owner.to_string()))?;
        }

        let cars: Vec<Car> = commands
            .into_iter()
            .map(|command| build_car(customer_id, command))
            .collect();

        let created = self.cars.create_batch(&cars).await?;

        Ok(created.into_iter().map(CarResponse::from).collect())
    }

    /// Borra un coche. Un coche aparcado sale primero de su parking para
    /// que los contadores no queden huérfanos.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let car = self
            .cars
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Car", &id.to_string()))?;

        if car.is_parked() {
            tracing::warn!(
                car_id = %id,
                "Attempt to delete a parked car, car left parking before deletion"
            );
            self.leave(id).await?;
        }

        self.cars.delete(id).await?;

        Ok(())
    }

    pub async fn most_expensive(&self) -> Result<CarResponse, AppError> {
        let car = self
            .cars
            .most_expensive()
            .await?
            .ok_or_else(|| AppError::NotFound("No cars found".to_string()))?;

        Ok(car.into())
    }

    /// Aparca un coche en un parking.
    ///
    /// Un coche ya aparcado se rechaza antes de resolver el parking de
    /// destino: aparcar en su propio parking falla igual que en cualquier
    /// otro. Las validaciones de hueco corren sobre las filas bloqueadas,
    /// así el contador nunca rebasa la capacidad por una carrera.
    pub async fn park(&self, car_id: Uuid, parking_id: Uuid) -> Result<CarResponse, AppError> {
        let mut tx = self.pool.begin().await?;

        let mut car = CarRepository::lock_by_id(&mut tx, car_id)
            .await?
            .ok_or_else(|| not_found_error("Car", &car_id.to_string()))?;

        if car.is_parked() {
            return Err(ParkError::AlreadyParked.into());
        }

        let mut parking = ParkingRepository::lock_by_id(&mut tx, parking_id)
            .await?
            .ok_or_else(|| not_found_error("Parking", &parking_id.to_string()))?;

        occupancy::park(&mut parking, &mut car)?;

        ParkingRepository::store_counters(&mut tx, &parking).await?;
        CarRepository::store_parking_assignment(&mut tx, &car).await?;

        tx.commit().await?;

        tracing::info!(car_id = %car_id, parking_id = %parking_id, "Car parked");

        Ok(car.into())
    }

    /// Saca un coche de su parking y devuelve el parking abandonado.
    ///
    /// El parking de destino sale del propio coche, no de la petición. Una
    /// fila de parking desaparecida con coches dentro es corrupción de
    /// datos y responde 500, no 404.
    pub async fn leave(&self, car_id: Uuid) -> Result<LeaveResponse, AppError> {
        let mut tx = self.pool.begin().await?;

        let mut car = CarRepository::lock_by_id(&mut tx, car_id)
            .await?
            .ok_or_else(|| not_found_error("Car", &car_id.to_string()))?;

        let parking_id = car.parking_id.ok_or(LeaveError::NotParked)?;

        let mut parking = ParkingRepository::lock_by_id(&mut tx, parking_id)
            .await?
            .ok_or_else(|| {
                AppError::Internal(format!(
                    "Parking '{}' referenced by car '{}' does not exist",
                    parking_id, car_id
                ))
            })?;

        let left = occupancy::leave(&mut parking, &mut car)?;

        ParkingRepository::store_counters(&mut tx, &parking).await?;
        CarRepository::store_parking_assignment(&mut tx, &car).await?;

        tx.commit().await?;

        tracing::info!(car_id = %car_id, parking_id = %left, "Car left parking");

        Ok(LeaveResponse { parking_id: left })
    }
}

fn build_car(customer_id: Option<Uuid>, command: CarCommand) -> Car {
    Car {
        id: Uuid::new_v4(),
        brand: command.brand,
        model: command.model,
        price: command.price,
        length: command.length,
        width: command.width,
        date_of_production: command.date_of_production,
        fuel: command.fuel,
        parking_id: None,
        customer_id,
        created_at: Utc::now(),
    }
}
