use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::car_dto::CarResponse;
use crate::dto::parking_dto::{CarsCountResponse, ParkingCommand, ParkingResponse};
use crate::models::parking::Parking;
use crate::repositories::car_repository::CarRepository;
use crate::repositories::parking_repository::ParkingRepository;
use crate::utils::errors::{not_found_error, AppError};

pub struct ParkingController {
    parkings: ParkingRepository,
    cars: CarRepository,
}

impl ParkingController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            parkings: ParkingRepository::new(pool.clone()),
            cars: CarRepository::new(pool),
        }
    }

    pub async fn list_all(&self) -> Result<Vec<ParkingResponse>, AppError> {
        let parkings = self.parkings.find_all().await?;

        Ok(parkings.into_iter().map(ParkingResponse::from).collect())
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<ParkingResponse, AppError> {
        let parking = self.find_parking(id).await?;

        Ok(parking.into())
    }

    pub async fn cars_of(&self, id: Uuid) -> Result<Vec<CarResponse>, AppError> {
        self.find_parking(id).await?;

        let cars = self.cars.find_by_parking(id).await?;

        Ok(cars.into_iter().map(CarResponse::from).collect())
    }

    pub async fn count_cars(&self, id: Uuid) -> Result<CarsCountResponse, AppError> {
        self.find_parking(id).await?;

        let count = self.cars.count_by_parking(id).await?;

        Ok(CarsCountResponse { count })
    }

    pub async fn most_expensive_car(&self, id: Uuid) -> Result<CarResponse, AppError> {
        self.find_parking(id).await?;

        let car = self
            .cars
            .most_expensive_in_parking(id)
            .await?
            .ok_or_else(|| AppError::NotFound("No cars found".to_string()))?;

        Ok(car.into())
    }

    /// Alta de parking. Los contadores de ocupación nacen siempre a cero,
    /// venga lo que venga en la petición.
    pub async fn create(&self, command: ParkingCommand) -> Result<ParkingResponse, AppError> {
        command.validate()?;

        let parking = Parking {
            id: Uuid::new_v4(),
            name: command.name,
            address: command.address,
            capacity: command.capacity,
            taken_places: 0,
            parking_type: command.parking_type,
            parking_spot_width: command.parking_spot_width,
            parking_spot_length: command.parking_spot_length,
            places_for_electric_cars: command.places_for_electric_cars,
            taken_electric_places: 0,
            created_at: Utc::now(),
        };

        let created = self.parkings.create(&parking).await?;
        tracing::info!(parking_id = %created.id, "Parking '{}' created", created.name);

        Ok(created.into())
    }

    /// Actualización completa de los datos descriptivos. Los contadores de
    /// ocupación no se tocan: solo los mueven aparcar y salir.
    pub async fn update_details(
        &self,
        id: Uuid,
        command: ParkingCommand,
    ) -> Result<ParkingResponse, AppError> {
        command.validate()?;

        let updated = self
            .parkings
            .update_details(id, &command)
            .await?
            .ok_or_else(|| not_found_error("Parking", &id.to_string()))?;

        Ok(updated.into())
    }

    /// Borra un parking vacío. Con coches dentro responde conflicto: hay
    /// que sacarlos antes.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.find_parking(id).await?;

        let parked = self.cars.count_by_parking(id).await?;
        if parked > 0 {
            return Err(AppError::Conflict(format!(
                "Parking with id '{}' still has {} parked cars",
                id, parked
            )));
        }

        self.parkings.delete(id).await?;

        Ok(())
    }

    async fn find_parking(&self, id: Uuid) -> Result<Parking, AppError> {
        self.parkings
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Parking", &id.to_string()))
    }
}
