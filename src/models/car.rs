//! Modelo de Car
//!
//! Un coche pertenece (opcionalmente) a un cliente y puede estar aparcado
//! en como mucho un parking a la vez (`parking_id`).

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Tipo de combustible. Se persiste como enum `fuel_kind` en PostgreSQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "fuel_kind", rename_all = "lowercase")]
pub enum Fuel {
    Petrol,
    Diesel,
    Electric,
    Lpg,
    Hybrid,
}

impl fmt::Display for Fuel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Fuel::Petrol => "petrol",
            Fuel::Diesel => "diesel",
            Fuel::Electric => "electric",
            Fuel::Lpg => "lpg",
            Fuel::Hybrid => "hybrid",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Fuel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "petrol" => Ok(Fuel::Petrol),
            "diesel" => Ok(Fuel::Diesel),
            "electric" => Ok(Fuel::Electric),
            "lpg" => Ok(Fuel::Lpg),
            "hybrid" => Ok(Fuel::Hybrid),
            other => Err(format!("unknown fuel: {other}")),
        }
    }
}

/// Car - mapea exactamente a la tabla `cars`
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Car {
    pub id: Uuid,
    pub brand: String,
    pub model: String,
    pub price: Decimal,
    /// Dimensiones en centímetros, igual que las plazas del parking.
    pub length: i32,
    pub width: i32,
    pub date_of_production: NaiveDate,
    pub fuel: Fuel,
    pub parking_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Car {
    pub fn is_electric(&self) -> bool {
        self.fuel == Fuel::Electric
    }

    pub fn is_parked(&self) -> bool {
        self.parking_id.is_some()
    }
}
