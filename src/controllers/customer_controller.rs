//! Área de cliente: cada endpoint opera sobre los datos del cliente
//! autenticado y de nadie más.

use sqlx::PgPool;
use uuid::Uuid;

use crate::controllers::car_controller::CarController;
use crate::dto::car_dto::{CarCommand, CarResponse, LeaveResponse};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::car::{Car, Fuel};
use crate::repositories::car_repository::CarRepository;
use crate::utils::errors::{not_found_error, AppError};

pub struct CustomerController {
    cars: CarRepository,
    car_ops: CarController,
}

impl CustomerController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            cars: CarRepository::new(pool.clone()),
            car_ops: CarController::new(pool),
        }
    }

    /// El `customer_id` de la ruta debe ser el del cliente autenticado.
    /// El token ya pasó el middleware; esto corta el acceso cruzado.
    fn verify_customer_access(
        auth: &AuthenticatedUser,
        customer_id: Uuid,
    ) -> Result<(), AppError> {
        if auth.account_id != customer_id {
            return Err(AppError::Forbidden(
                "Access denied. You can only access your own data".to_string(),
            ));
        }

        Ok(())
    }

    pub async fn my_cars(
        &self,
        auth: &AuthenticatedUser,
        customer_id: Uuid,
    ) -> Result<Vec<CarResponse>, AppError> {
        Self::verify_customer_access(auth, customer_id)?;

        let cars = self.cars.find_by_customer(customer_id).await?;

        Ok(cars.into_iter().map(CarResponse::from).collect())
    }

    pub async fn add_car(
        &self,
        auth: &AuthenticatedUser,
        customer_id: Uuid,
        command: CarCommand,
    ) -> Result<CarResponse, AppError> {
        Self::verify_customer_access(auth, customer_id)?;

        self.car_ops.create(Some(customer_id), command).await
    }

    pub async fn add_cars_batch(
        &self,
        auth: &AuthenticatedUser,
        customer_id: Uuid,
        commands: Vec<CarCommand>,
    ) -> Result<Vec<CarResponse>, AppError> {
        Self::verify_customer_access(auth, customer_id)?;

        self.car_ops.create_batch(Some(customer_id), commands).await
    }

    pub async fn delete_car(
        &self,
        auth: &AuthenticatedUser,
        customer_id: Uuid,
        car_id: Uuid,
    ) -> Result<(), AppError> {
        Self::verify_customer_access(auth, customer_id)?;
        self.owned_car(customer_id, car_id).await?;

        self.car_ops.delete(car_id).await
    }

    pub async fn park_car(
        &self,
        auth: &AuthenticatedUser,
        customer_id: Uuid,
        car_id: Uuid,
        parking_id: Uuid,
    ) -> Result<CarResponse, AppError> {
        Self::verify_customer_access(auth, customer_id)?;
        self.owned_car(customer_id, car_id).await?;

        self.car_ops.park(car_id, parking_id).await
    }

    pub async fn leave_parking(
        &self,
        auth: &AuthenticatedUser,
        customer_id: Uuid,
        car_id: Uuid,
    ) -> Result<LeaveResponse, AppError> {
        Self::verify_customer_access(auth, customer_id)?;
        self.owned_car(customer_id, car_id).await?;

        self.car_ops.leave(car_id).await
    }

    pub async fn most_expensive(
        &self,
        auth: &AuthenticatedUser,
        customer_id: Uuid,
    ) -> Result<CarResponse, AppError> {
        Self::verify_customer_access(auth, customer_id)?;

        let car = self
            .cars
            .most_expensive_for_customer(customer_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("No cars found for customer {}", auth.username))
            })?;

        Ok(car.into())
    }

    pub async fn most_expensive_by_brand(
        &self,
        auth: &AuthenticatedUser,
        customer_id: Uuid,
        brand: &str,
    ) -> Result<CarResponse, AppError> {
        Self::verify_customer_access(auth, customer_id)?;

        let car = self
            .cars
            .most_expensive_for_customer_by_brand(customer_id, brand)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "No cars found for customer {} and brand {}",
                    auth.username, brand
                ))
            })?;

        Ok(car.into())
    }

    pub async fn cars_by_brand(
        &self,
        auth: &AuthenticatedUser,
        customer_id: Uuid,
        brand: &str,
    ) -> Result<Vec<CarResponse>, AppError> {
        Self::verify_customer_access(auth, customer_id)?;

        let cars = self
            .cars
            .find_by_customer_and_brand(customer_id, brand)
            .await?;

        Ok(cars.into_iter().map(CarResponse::from).collect())
    }

    pub async fn cars_by_fuel(
        &self,
        auth: &AuthenticatedUser,
        customer_id: Uuid,
        fuel: Fuel,
    ) -> Result<Vec<CarResponse>, AppError> {
        Self::verify_customer_access(auth, customer_id)?;

        let cars = self.cars.find_by_customer_and_fuel(customer_id, fuel).await?;

        Ok(cars.into_iter().map(CarResponse::from).collect())
    }

    /// El coche debe existir y pertenecer al cliente. Un coche ajeno
    /// responde 403 aunque exista: el recurso no se niega, se prohíbe.
    async fn owned_car(&self, customer_id: Uuid, car_id: Uuid) -> Result<Car, AppError> {
        let car = self
            .cars
            .find_by_id(car_id)
            .await?
            .ok_or_else(|| not_found_error("Car", &car_id.to_string()))?;

        if car.customer_id != Some(customer_id) {
            return Err(AppError::Forbidden(
                "Access denied. You can only access your own cars".to_string(),
            ));
        }

        Ok(car)
    }
}
