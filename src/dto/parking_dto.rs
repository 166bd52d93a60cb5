use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::parking::{Parking, ParkingType};
use crate::utils::validation::validate_not_blank;

// Alta o actualización completa de un parking
#[derive(Debug, Deserialize, Validate)]
pub struct ParkingCommand {
    #[validate(length(min = 1, max = 100), custom = "validate_not_blank")]
    pub name: String,

    #[validate(length(min = 1, max = 200), custom = "validate_not_blank")]
    pub address: String,

    #[validate(range(min = 1))]
    pub capacity: i32,

    #[validate(range(min = 0))]
    pub places_for_electric_cars: i32,

    // Dimensiones de una plaza en centímetros
    #[validate(range(min = 1))]
    pub parking_spot_width: i32,

    #[validate(range(min = 1))]
    pub parking_spot_length: i32,

    pub parking_type: ParkingType,
}

// Response de parking con sus contadores de ocupación
#[derive(Debug, Serialize)]
pub struct ParkingResponse {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub capacity: i32,
    pub taken_places: i32,
    pub places_for_electric_cars: i32,
    pub taken_electric_places: i32,
    pub parking_spot_width: i32,
    pub parking_spot_length: i32,
    pub parking_type: ParkingType,
    pub created_at: DateTime<Utc>,
}

impl From<Parking> for ParkingResponse {
    fn from(parking: Parking) -> Self {
        Self {
            id: parking.id,
            name: parking.name,
            address: parking.address,
            capacity: parking.capacity,
            taken_places: parking.taken_places,
            places_for_electric_cars: parking.places_for_electric_cars,
            taken_electric_places: parking.taken_electric_places,
            parking_spot_width: parking.parking_spot_width,
            parking_spot_length: parking.parking_spot_length,
            parking_type: parking.parking_type,
            created_at: parking.created_at,
        }
    }
}

// Response del contador de coches de un parking
#[derive(Debug, Serialize)]
pub struct CarsCountResponse {
    pub count: i64,
}
