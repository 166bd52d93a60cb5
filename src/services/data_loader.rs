//! Datos de demostración
//!
//! Con `SEED_DEMO_DATA=true` siembra clientes, parkings y coches la
//! primera vez que el servidor arranca contra una base vacía, para poder
//! probar la API sin dar de alta todo a mano. Los coches que nacen
//! aparcados pasan por el núcleo de ocupación, así los contadores de los
//! parkings sembrados cuadran siempre con sus coches.

use bcrypt::{hash, DEFAULT_COST};
use chrono::{NaiveDate, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::car::{Car, Fuel};
use crate::models::customer::{Customer, Role};
use crate::models::parking::{Parking, ParkingType};
use crate::repositories::car_repository::CarRepository;
use crate::repositories::customer_repository::CustomerRepository;
use crate::repositories::parking_repository::ParkingRepository;
use crate::services::occupancy;
use crate::utils::errors::AppError;

const FIRST_NAMES: &[&str] = &[
    "Maria", "Juan", "Lucia", "Carlos", "Ana", "Pablo", "Elena", "Sergio", "Carmen", "Diego",
];

const LAST_NAMES: &[&str] = &[
    "Garcia", "Lopez", "Martinez", "Sanchez", "Fernandez", "Perez", "Gomez", "Ruiz", "Diaz",
    "Torres",
];

const CAR_MODELS: &[(&str, &str)] = &[
    ("Seat", "Ibiza"),
    ("Seat", "Leon"),
    ("Renault", "Clio"),
    ("Renault", "Zoe"),
    ("Volkswagen", "Golf"),
    ("Toyota", "Prius"),
    ("Tesla", "Model 3"),
    ("Dacia", "Sandero"),
    ("Peugeot", "208"),
];

const FUELS: &[Fuel] = &[
    Fuel::Petrol,
    Fuel::Diesel,
    Fuel::Electric,
    Fuel::Lpg,
    Fuel::Hybrid,
];

/// Siembra los datos de demostración. Si la base ya tiene clientes no
/// hace nada: la siembra es solo para el primer arranque.
pub async fn load_demo_data(pool: &PgPool) -> Result<(), AppError> {
    let customers = CustomerRepository::new(pool.clone());
    let parkings = ParkingRepository::new(pool.clone());
    let cars = CarRepository::new(pool.clone());

    if customers.count_all().await? > 0 {
        info!("La base de datos ya tiene datos, siembra de demostración omitida");
        return Ok(());
    }

    let (demo_customers, demo_parkings, demo_cars) = build_demo_data()?;

    for customer in &demo_customers {
        customers.create(customer).await?;
    }
    for parking in &demo_parkings {
        parkings.create(parking).await?;
    }
    cars.create_batch(&demo_cars).await?;

    info!(
        "Sembrados {} clientes, {} parkings y {} coches de demostración",
        demo_customers.len(),
        demo_parkings.len(),
        demo_cars.len()
    );

    Ok(())
}

/// Construye el juego de datos completo en memoria. El generador de
/// números aleatorios no es `Send`, así que toda la parte aleatoria vive
/// aquí y no cruza ningún `await`.
fn build_demo_data() -> Result<(Vec<Customer>, Vec<Parking>, Vec<Car>), AppError> {
    let mut rng = rand::thread_rng();

    // Todas las cuentas de demostración comparten la clave "password".
    let password_hash = hash("password", DEFAULT_COST)?;

    let demo_customers: Vec<Customer> = FIRST_NAMES
        .iter()
        .enumerate()
        .map(|(i, first_name)| {
            let last_name = LAST_NAMES[i % LAST_NAMES.len()];
            Customer {
                id: Uuid::new_v4(),
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                username: format!(
                    "{}.{}@example.com",
                    first_name.to_lowercase(),
                    last_name.to_lowercase()
                ),
                password_hash: password_hash.clone(),
                role: Role::Customer,
                account_enabled: true,
                account_locked: false,
                created_at: Utc::now(),
            }
        })
        .collect();

    let mut demo_parkings = vec![
        demo_parking("Parking Centro", "Calle Mayor 1", 50, 5, ParkingType::OpenAir),
        demo_parking(
            "Parking Estacion",
            "Avenida de la Estacion 12",
            120,
            12,
            ParkingType::Underground,
        ),
        demo_parking("Parking Mercado", "Plaza del Mercado 3", 30, 2, ParkingType::OpenAir),
    ];

    let mut demo_cars = Vec::new();
    for customer in &demo_customers {
        for _ in 0..rng.gen_range(1..=3) {
            let (brand, model) = CAR_MODELS[rng.gen_range(0..CAR_MODELS.len())];
            let mut car = Car {
                id: Uuid::new_v4(),
                brand: brand.to_string(),
                model: model.to_string(),
                price: Decimal::new(rng.gen_range(500_000..=4_500_000), 2),
                length: rng.gen_range(380..=470),
                width: rng.gen_range(170..=200),
                date_of_production: NaiveDate::from_ymd_opt(
                    rng.gen_range(2005..=2023),
                    rng.gen_range(1..=12),
                    rng.gen_range(1..=28),
                )
                .unwrap_or_default(),
                fuel: FUELS[rng.gen_range(0..FUELS.len())],
                parking_id: None,
                customer_id: Some(customer.id),
                created_at: Utc::now(),
            };

            // Más o menos la mitad de los coches arranca ya aparcada. Si el
            // núcleo rechaza la colocación, el coche se queda en la calle.
            if rng.gen_bool(0.5) {
                let idx = rng.gen_range(0..demo_parkings.len());
                let parking = &mut demo_parkings[idx];
                let _ = occupancy::park(parking, &mut car);
            }

            demo_cars.push(car);
        }
    }

    Ok((demo_customers, demo_parkings, demo_cars))
}

fn demo_parking(
    name: &str,
    address: &str,
    capacity: i32,
    electric_places: i32,
    parking_type: ParkingType,
) -> Parking {
    Parking {
        id: Uuid::new_v4(),
        name: name.to_string(),
        address: address.to_string(),
        capacity,
        taken_places: 0,
        places_for_electric_cars: electric_places,
        taken_electric_places: 0,
        parking_spot_width: 220,
        parking_spot_length: 500,
        parking_type,
        created_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_counters_match_parked_cars() {
        let (customers, parkings, cars) = build_demo_data().unwrap();

        assert_eq!(customers.len(), FIRST_NAMES.len());
        assert_eq!(parkings.len(), 3);
        assert!(!cars.is_empty());

        for parking in &parkings {
            let parked = cars
                .iter()
                .filter(|c| c.parking_id == Some(parking.id))
                .count() as i32;
            let parked_electric = cars
                .iter()
                .filter(|c| c.parking_id == Some(parking.id) && c.is_electric())
                .count() as i32;

            assert_eq!(parking.taken_places, parked);
            assert_eq!(parking.taken_electric_places, parked_electric);
        }
    }

    #[test]
    fn every_demo_car_belongs_to_a_seeded_customer() {
        let (customers, _, cars) = build_demo_data().unwrap();

        for car in &cars {
            let owner = car.customer_id.expect("coche de demostración sin dueño");
            assert!(customers.iter().any(|c| c.id == owner));
        }
    }
}
