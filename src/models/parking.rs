//! Modelo de Parking
//!
//! Cada parking lleva dos contadores de ocupación (`taken_places` y
//! `taken_electric_places`). Solo `services::occupancy` los modifica:
//! el resto del código los trata como de solo lectura.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Tipo de parking. Se persiste como enum `parking_kind` en PostgreSQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "parking_kind", rename_all = "snake_case")]
pub enum ParkingType {
    OpenAir,
    Underground,
}

impl fmt::Display for ParkingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParkingType::OpenAir => "open_air",
            ParkingType::Underground => "underground",
        };
        write!(f, "{name}")
    }
}

impl FromStr for ParkingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open_air" => Ok(ParkingType::OpenAir),
            "underground" => Ok(ParkingType::Underground),
            other => Err(format!("unknown parking type: {other}")),
        }
    }
}

/// Parking - mapea exactamente a la tabla `parkings`
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Parking {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub capacity: i32,
    pub taken_places: i32,
    pub places_for_electric_cars: i32,
    pub taken_electric_places: i32,
    /// Dimensiones de una plaza en centímetros.
    pub parking_spot_width: i32,
    pub parking_spot_length: i32,
    pub parking_type: ParkingType,
    pub created_at: DateTime<Utc>,
}

impl Parking {
    pub fn free_places(&self) -> i32 {
        self.capacity - self.taken_places
    }

    pub fn free_electric_places(&self) -> i32 {
        self.places_for_electric_cars - self.taken_electric_places
    }
}
