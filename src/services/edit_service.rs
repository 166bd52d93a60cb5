//! Ediciones de campo desde administración
//!
//! Un admin puede cambiar un único campo de un customer, car o parking
//! mandando `EditCommand { field_name, new_value }`. Aquí se valida el
//! nombre del campo contra la lista permitida de cada entidad, se parsea
//! el valor al tipo correcto (400 si no parsea) y se captura el valor
//! anterior para la fila de auditoría.

use bcrypt::{hash, DEFAULT_COST};
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::car::{Car, Fuel};
use crate::models::customer::Customer;
use crate::models::parking::{Parking, ParkingType};
use crate::utils::errors::AppError;

const CUSTOMER_FIELDS: &str = "username, password, first_name, last_name";
const CAR_FIELDS: &str = "brand, model, price, length, width, date_of_production, fuel";
const PARKING_FIELDS: &str =
    "name, address, capacity, parking_type, parking_spot_width, parking_spot_length, places_for_electric_cars";

fn invalid_field(entity: &str, valid: &str) -> AppError {
    AppError::BadRequest(format!(
        "Invalid field name for {}. Choose from {}",
        entity, valid
    ))
}

fn invalid_value(field: &str, value: &str) -> AppError {
    AppError::BadRequest(format!("Invalid value '{}' for field {}", value, field))
}

fn parse_positive_int(field: &str, value: &str) -> Result<i32, AppError> {
    let parsed: i32 = value.parse().map_err(|_| invalid_value(field, value))?;
    if parsed <= 0 {
        return Err(invalid_value(field, value));
    }
    Ok(parsed)
}

/// Edición tipada de un campo de Customer.
///
/// `Password` lleva ya el hash bcrypt: el valor en claro no sale de `parse`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerEdit {
    Username(String),
    Password(String),
    FirstName(String),
    LastName(String),
}

impl CustomerEdit {
    pub fn parse(field_name: &str, new_value: &str) -> Result<Self, AppError> {
        match field_name {
            "username" => Ok(Self::Username(new_value.to_string())),
            "password" => Ok(Self::Password(hash(new_value, DEFAULT_COST)?)),
            "first_name" => Ok(Self::FirstName(new_value.to_string())),
            "last_name" => Ok(Self::LastName(new_value.to_string())),
            _ => Err(invalid_field("customer", CUSTOMER_FIELDS)),
        }
    }

    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Username(_) => "username",
            Self::Password(_) => "password",
            Self::FirstName(_) => "first_name",
            Self::LastName(_) => "last_name",
        }
    }

    /// Valor actual del campo editado. Para `password` es el hash
    /// almacenado, igual que hacía el sistema original.
    pub fn old_value(&self, customer: &Customer) -> String {
        match self {
            Self::Username(_) => customer.username.clone(),
            Self::Password(_) => customer.password_hash.clone(),
            Self::FirstName(_) => customer.first_name.clone(),
            Self::LastName(_) => customer.last_name.clone(),
        }
    }
}

/// Edición tipada de un campo de Car.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CarEdit {
    Brand(String),
    Model(String),
    Price(Decimal),
    Length(i32),
    Width(i32),
    DateOfProduction(NaiveDate),
    Fuel(Fuel),
}

impl CarEdit {
    pub fn parse(field_name: &str, new_value: &str) -> Result<Self, AppError> {
        match field_name {
            "brand" => Ok(Self::Brand(new_value.to_string())),
            "model" => Ok(Self::Model(new_value.to_string())),
            "price" => {
                let price: Decimal = new_value
                    .parse()
                    .map_err(|_| invalid_value("price", new_value))?;
                if price <= Decimal::ZERO {
                    return Err(invalid_value("price", new_value));
                }
                Ok(Self::Price(price))
            }
            "length" => Ok(Self::Length(parse_positive_int("length", new_value)?)),
            "width" => Ok(Self::Width(parse_positive_int("width", new_value)?)),
            "date_of_production" => {
                let date: NaiveDate = new_value
                    .parse()
                    .map_err(|_| invalid_value("date_of_production", new_value))?;
                Ok(Self::DateOfProduction(date))
            }
            "fuel" => {
                let fuel: Fuel = new_value
                    .parse()
                    .map_err(|_| invalid_value("fuel", new_value))?;
                Ok(Self::Fuel(fuel))
            }
            _ => Err(invalid_field("car", CAR_FIELDS)),
        }
    }

    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Brand(_) => "brand",
            Self::Model(_) => "model",
            Self::Price(_) => "price",
            Self::Length(_) => "length",
            Self::Width(_) => "width",
            Self::DateOfProduction(_) => "date_of_production",
            Self::Fuel(_) => "fuel",
        }
    }

    pub fn old_value(&self, car: &Car) -> String {
        match self {
            Self::Brand(_) => car.brand.clone(),
            Self::Model(_) => car.model.clone(),
            Self::Price(_) => car.price.to_string(),
            Self::Length(_) => car.length.to_string(),
            Self::Width(_) => car.width.to_string(),
            Self::DateOfProduction(_) => car.date_of_production.to_string(),
            Self::Fuel(_) => car.fuel.to_string(),
        }
    }
}

/// Edición tipada de un campo de Parking.
///
/// Los contadores de ocupación no son editables: solo los toca
/// `services::occupancy`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParkingEdit {
    Name(String),
    Address(String),
    Capacity(i32),
    ParkingType(ParkingType),
    ParkingSpotWidth(i32),
    ParkingSpotLength(i32),
    PlacesForElectricCars(i32),
}

impl ParkingEdit {
    pub fn parse(field_name: &str, new_value: &str) -> Result<Self, AppError> {
        match field_name {
            "name" => Ok(Self::Name(new_value.to_string())),
            "address" => Ok(Self::Address(new_value.to_string())),
            "capacity" => Ok(Self::Capacity(parse_positive_int("capacity", new_value)?)),
            "parking_type" => {
                let parking_type: ParkingType = new_value
                    .parse()
                    .map_err(|_| invalid_value("parking_type", new_value))?;
                Ok(Self::ParkingType(parking_type))
            }
            "parking_spot_width" => Ok(Self::ParkingSpotWidth(parse_positive_int(
                "parking_spot_width",
                new_value,
            )?)),
            "parking_spot_length" => Ok(Self::ParkingSpotLength(parse_positive_int(
                "parking_spot_length",
                new_value,
            )?)),
            "places_for_electric_cars" => {
                let places: i32 = new_value
                    .parse()
                    .map_err(|_| invalid_value("places_for_electric_cars", new_value))?;
                if places < 0 {
                    return Err(invalid_value("places_for_electric_cars", new_value));
                }
                Ok(Self::PlacesForElectricCars(places))
            }
            _ => Err(invalid_field("parking", PARKING_FIELDS)),
        }
    }

    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Name(_) => "name",
            Self::Address(_) => "address",
            Self::Capacity(_) => "capacity",
            Self::ParkingType(_) => "parking_type",
            Self::ParkingSpotWidth(_) => "parking_spot_width",
            Self::ParkingSpotLength(_) => "parking_spot_length",
            Self::PlacesForElectricCars(_) => "places_for_electric_cars",
        }
    }

    pub fn old_value(&self, parking: &Parking) -> String {
        match self {
            Self::Name(_) => parking.name.clone(),
            Self::Address(_) => parking.address.clone(),
            Self::Capacity(_) => parking.capacity.to_string(),
            Self::ParkingType(_) => parking.parking_type.to_string(),
            Self::ParkingSpotWidth(_) => parking.parking_spot_width.to_string(),
            Self::ParkingSpotLength(_) => parking.parking_spot_length.to_string(),
            Self::PlacesForElectricCars(_) => parking.places_for_electric_cars.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn customer_edit_rejects_unknown_field() {
        let err = CustomerEdit::parse("role", "admin").unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn customer_password_edit_stores_a_hash() {
        let edit = CustomerEdit::parse("password", "nueva-clave").unwrap();
        match edit {
            CustomerEdit::Password(hash) => {
                assert_ne!(hash, "nueva-clave");
                assert!(bcrypt::verify("nueva-clave", &hash).unwrap());
            }
            other => panic!("unexpected edit: {:?}", other),
        }
    }

    #[test]
    fn car_edit_parses_typed_values() {
        assert_eq!(
            CarEdit::parse("length", "420").unwrap(),
            CarEdit::Length(420)
        );
        assert_eq!(
            CarEdit::parse("fuel", "electric").unwrap(),
            CarEdit::Fuel(Fuel::Electric)
        );
        assert_eq!(
            CarEdit::parse("date_of_production", "2020-05-01").unwrap(),
            CarEdit::DateOfProduction(NaiveDate::from_ymd_opt(2020, 5, 1).unwrap())
        );
    }

    #[test]
    fn car_edit_rejects_malformed_values() {
        assert!(CarEdit::parse("price", "caro").is_err());
        assert!(CarEdit::parse("price", "-5").is_err());
        assert!(CarEdit::parse("length", "0").is_err());
        assert!(CarEdit::parse("fuel", "carbón").is_err());
        assert!(CarEdit::parse("date_of_production", "ayer").is_err());
    }

    #[test]
    fn parking_edit_accepts_zero_electric_places_but_not_negative() {
        assert_eq!(
            ParkingEdit::parse("places_for_electric_cars", "0").unwrap(),
            ParkingEdit::PlacesForElectricCars(0)
        );
        assert!(ParkingEdit::parse("places_for_electric_cars", "-1").is_err());
    }

    #[test]
    fn parking_edit_parses_parking_type() {
        assert_eq!(
            ParkingEdit::parse("parking_type", "underground").unwrap(),
            ParkingEdit::ParkingType(ParkingType::Underground)
        );
        assert!(ParkingEdit::parse("parking_type", "submarino").is_err());
    }

    #[test]
    fn old_value_reads_the_edited_field() {
        let parking = Parking {
            id: Uuid::new_v4(),
            name: "Centro".to_string(),
            address: "Calle Mayor 1".to_string(),
            capacity: 50,
            taken_places: 3,
            places_for_electric_cars: 5,
            taken_electric_places: 1,
            parking_spot_width: 200,
            parking_spot_length: 450,
            parking_type: ParkingType::OpenAir,
            created_at: Utc::now(),
        };

        let edit = ParkingEdit::parse("capacity", "80").unwrap();
        assert_eq!(edit.old_value(&parking), "50");
        assert_eq!(edit.field_name(), "capacity");
    }
}
