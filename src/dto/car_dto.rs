use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::car::{Car, Fuel};
use crate::utils::validation::{validate_not_blank, validate_price};

// Alta de coche (área de cliente; el dueño es siempre el autenticado)
#[derive(Debug, Deserialize, Validate)]
pub struct CarCommand {
    #[validate(length(min = 1, max = 50), custom = "validate_not_blank")]
    pub brand: String,

    #[validate(length(min = 1, max = 50), custom = "validate_not_blank")]
    pub model: String,

    #[validate(custom = "validate_price")]
    pub price: Decimal,

    // Dimensiones en centímetros
    #[validate(range(min = 1))]
    pub length: i32,

    #[validate(range(min = 1))]
    pub width: i32,

    pub date_of_production: NaiveDate,

    pub fuel: Fuel,
}

// Alta de coche desde administración: el dueño es opcional
#[derive(Debug, Deserialize, Validate)]
pub struct AdminCarCommand {
    pub customer_id: Option<Uuid>,

    #[serde(flatten)]
    #[validate]
    pub car: CarCommand,
}

// Response de coche
#[derive(Debug, Serialize)]
pub struct CarResponse {
    pub id: Uuid,
    pub brand: String,
    pub model: String,
    pub price: f64,
    pub length: i32,
    pub width: i32,
    pub date_of_production: NaiveDate,
    pub fuel: Fuel,
    pub parking_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,
}

impl From<Car> for CarResponse {
    fn from(car: Car) -> Self {
        Self {
            id: car.id,
            brand: car.brand,
            model: car.model,
            price: car.price.to_f64().unwrap_or_default(),
            length: car.length,
            width: car.width,
            date_of_production: car.date_of_production,
            fuel: car.fuel,
            parking_id: car.parking_id,
            customer_id: car.customer_id,
        }
    }
}

// Response al salir de un parking: el parking que se abandona
#[derive(Debug, Serialize)]
pub struct LeaveResponse {
    pub parking_id: Uuid,
}
