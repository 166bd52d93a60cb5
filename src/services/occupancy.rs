//! Núcleo de ocupación de parkings
//!
//! Todas las reglas de colocación y toda la contabilidad de ocupación viven
//! aquí, como funciones puras sobre `Parking` y `Car`. Los controladores se
//! encargan de cargar y bloquear las filas dentro de una transacción y de
//! persistir el resultado; este módulo no sabe nada de SQL ni de HTTP.
//!
//! Las comprobaciones de `validate_placement` se evalúan siempre en el mismo
//! orden: parking lleno, plaza demasiado pequeña, sin huecos eléctricos,
//! combustible no admitido. El primer fallo gana, así el mismo estado produce
//! siempre el mismo error.

use thiserror::Error;
use uuid::Uuid;

use crate::models::car::{Car, Fuel};
use crate::models::parking::{Parking, ParkingType};

/// Motivos por los que un coche no cabe en un parking.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("Parking is full")]
    LotFull,
    #[error("Parking space is too small for this car")]
    SpaceTooSmall,
    #[error("No more places for electric cars")]
    NoElectricCapacity,
    #[error("LPG cars are not allowed in underground parkings")]
    FuelTypeDisallowed,
}

/// Fallos de la operación de aparcar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParkError {
    #[error("Car is already parked")]
    AlreadyParked,
    #[error(transparent)]
    Placement(#[from] PlacementError),
}

/// Fallos de la operación de salir del parking.
///
/// `NotParked` es un error del cliente; los otros dos solo pueden aparecer
/// si el estado persistido se ha corrompido y se tratan como fatales.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeaveError {
    #[error("Car is not parked")]
    NotParked,
    #[error("car {car_id} is not assigned to parking {parking_id}")]
    LotMismatch { car_id: Uuid, parking_id: Uuid },
    #[error("occupancy counters for parking {parking_id} would drop below zero")]
    CounterUnderflow { parking_id: Uuid },
}

/// Comprueba si `car` puede aparcar en `parking` sin modificar nada.
///
/// Reglas, en orden:
/// 1. Tiene que quedar al menos una plaza libre.
/// 2. El coche tiene que caber en una plaza (ancho y largo).
/// 3. Un coche eléctrico necesita un hueco eléctrico libre.
/// 4. Un coche de GLP no puede entrar en un parking subterráneo.
pub fn validate_placement(parking: &Parking, car: &Car) -> Result<(), PlacementError> {
    if parking.taken_places >= parking.capacity {
        return Err(PlacementError::LotFull);
    }

    if car.width > parking.parking_spot_width || car.length > parking.parking_spot_length {
        return Err(PlacementError::SpaceTooSmall);
    }

    if car.is_electric() && parking.taken_electric_places >= parking.places_for_electric_cars {
        return Err(PlacementError::NoElectricCapacity);
    }

    if car.fuel == Fuel::Lpg && parking.parking_type == ParkingType::Underground {
        return Err(PlacementError::FuelTypeDisallowed);
    }

    Ok(())
}

/// Aparca `car` en `parking`, actualizando contadores y asignación.
///
/// Un coche ya aparcado se rechaza antes de mirar el parking de destino.
/// Si la operación falla, ni `parking` ni `car` quedan modificados.
pub fn park(parking: &mut Parking, car: &mut Car) -> Result<(), ParkError> {
    if car.is_parked() {
        return Err(ParkError::AlreadyParked);
    }

    validate_placement(parking, car)?;

    parking.taken_places += 1;
    if car.is_electric() {
        parking.taken_electric_places += 1;
    }
    car.parking_id = Some(parking.id);

    Ok(())
}

/// Saca `car` de `parking` y devuelve el id del parking abandonado.
///
/// Las comprobaciones van antes que cualquier mutación: si el coche no está
/// aparcado aquí, o algún contador quedara negativo, no se toca nada.
pub fn leave(parking: &mut Parking, car: &mut Car) -> Result<Uuid, LeaveError> {
    match car.parking_id {
        None => return Err(LeaveError::NotParked),
        Some(assigned) if assigned != parking.id => {
            return Err(LeaveError::LotMismatch {
                car_id: car.id,
                parking_id: parking.id,
            });
        }
        Some(_) => {}
    }

    if parking.taken_places == 0 || (car.is_electric() && parking.taken_electric_places == 0) {
        return Err(LeaveError::CounterUnderflow {
            parking_id: parking.id,
        });
    }

    parking.taken_places -= 1;
    if car.is_electric() {
        parking.taken_electric_places -= 1;
    }
    car.parking_id = None;

    Ok(parking.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use rust_decimal::Decimal;

    fn parking(capacity: i32, electric_places: i32, parking_type: ParkingType) -> Parking {
        Parking {
            id: Uuid::new_v4(),
            name: "Centro".to_string(),
            address: "Calle Mayor 1".to_string(),
            capacity,
            taken_places: 0,
            places_for_electric_cars: electric_places,
            taken_electric_places: 0,
            parking_spot_width: 200,
            parking_spot_length: 450,
            parking_type,
            created_at: Utc::now(),
        }
    }

    fn car(fuel: Fuel) -> Car {
        Car {
            id: Uuid::new_v4(),
            brand: "Seat".to_string(),
            model: "Ibiza".to_string(),
            price: Decimal::new(1_850_000, 2),
            length: 400,
            width: 180,
            date_of_production: NaiveDate::from_ymd_opt(2021, 3, 15).unwrap(),
            fuel,
            parking_id: None,
            customer_id: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn petrol_car_parks_in_open_air_lot() {
        let mut lot = parking(10, 2, ParkingType::OpenAir);
        let mut ibiza = car(Fuel::Petrol);

        park(&mut lot, &mut ibiza).unwrap();

        assert_eq!(lot.taken_places, 1);
        assert_eq!(lot.taken_electric_places, 0);
        assert_eq!(ibiza.parking_id, Some(lot.id));
    }

    #[test]
    fn electric_car_takes_both_counters() {
        let mut lot = parking(10, 2, ParkingType::Underground);
        let mut zoe = car(Fuel::Electric);

        park(&mut lot, &mut zoe).unwrap();

        assert_eq!(lot.taken_places, 1);
        assert_eq!(lot.taken_electric_places, 1);
    }

    #[test]
    fn hybrid_car_does_not_touch_electric_counter() {
        let mut lot = parking(10, 2, ParkingType::Underground);
        let mut prius = car(Fuel::Hybrid);

        park(&mut lot, &mut prius).unwrap();

        assert_eq!(lot.taken_places, 1);
        assert_eq!(lot.taken_electric_places, 0);
    }

    #[test]
    fn full_lot_rejects_any_car() {
        let mut lot = parking(2, 0, ParkingType::OpenAir);
        lot.taken_places = 2;
        let mut ibiza = car(Fuel::Petrol);

        let err = park(&mut lot, &mut ibiza).unwrap_err();

        assert_eq!(err, ParkError::Placement(PlacementError::LotFull));
        assert_eq!(lot.taken_places, 2);
        assert_eq!(ibiza.parking_id, None);
    }

    #[test]
    fn last_free_place_can_still_be_taken() {
        let mut lot = parking(3, 0, ParkingType::OpenAir);
        lot.taken_places = 2;
        let mut ibiza = car(Fuel::Petrol);

        park(&mut lot, &mut ibiza).unwrap();

        assert_eq!(lot.taken_places, 3);
        assert_eq!(
            validate_placement(&lot, &car(Fuel::Petrol)),
            Err(PlacementError::LotFull)
        );
    }

    #[test]
    fn car_wider_than_spot_is_rejected() {
        let lot = parking(10, 0, ParkingType::OpenAir);
        let mut van = car(Fuel::Diesel);
        van.width = lot.parking_spot_width + 1;

        assert_eq!(
            validate_placement(&lot, &van),
            Err(PlacementError::SpaceTooSmall)
        );
    }

    #[test]
    fn car_longer_than_spot_is_rejected() {
        let lot = parking(10, 0, ParkingType::OpenAir);
        let mut limo = car(Fuel::Petrol);
        limo.length = lot.parking_spot_length + 1;

        assert_eq!(
            validate_placement(&lot, &limo),
            Err(PlacementError::SpaceTooSmall)
        );
    }

    #[test]
    fn exact_fit_is_accepted() {
        let lot = parking(10, 0, ParkingType::OpenAir);
        let mut snug = car(Fuel::Petrol);
        snug.width = lot.parking_spot_width;
        snug.length = lot.parking_spot_length;

        assert!(validate_placement(&lot, &snug).is_ok());
    }

    #[test]
    fn electric_car_rejected_when_electric_places_are_taken() {
        // Quedan plazas normales pero los huecos eléctricos están completos.
        let mut lot = parking(10, 1, ParkingType::OpenAir);
        lot.taken_places = 1;
        lot.taken_electric_places = 1;
        let mut zoe = car(Fuel::Electric);

        let err = park(&mut lot, &mut zoe).unwrap_err();

        assert_eq!(err, ParkError::Placement(PlacementError::NoElectricCapacity));
        assert_eq!(lot.taken_places, 1);
    }

    #[test]
    fn electric_car_rejected_when_lot_reserves_no_electric_places() {
        let lot = parking(10, 0, ParkingType::OpenAir);

        assert_eq!(
            validate_placement(&lot, &car(Fuel::Electric)),
            Err(PlacementError::NoElectricCapacity)
        );
    }

    #[test]
    fn lpg_car_rejected_underground_but_allowed_open_air() {
        let underground = parking(10, 0, ParkingType::Underground);
        let open_air = parking(10, 0, ParkingType::OpenAir);
        let butano = car(Fuel::Lpg);

        assert_eq!(
            validate_placement(&underground, &butano),
            Err(PlacementError::FuelTypeDisallowed)
        );
        assert!(validate_placement(&open_air, &butano).is_ok());
    }

    #[test]
    fn full_lot_wins_over_too_small_spot() {
        let mut lot = parking(1, 0, ParkingType::OpenAir);
        lot.taken_places = 1;
        let mut van = car(Fuel::Diesel);
        van.width = lot.parking_spot_width + 50;

        assert_eq!(validate_placement(&lot, &van), Err(PlacementError::LotFull));
    }

    #[test]
    fn too_small_spot_wins_over_electric_capacity() {
        let lot = parking(10, 0, ParkingType::OpenAir);
        let mut zoe = car(Fuel::Electric);
        zoe.length = lot.parking_spot_length + 10;

        assert_eq!(
            validate_placement(&lot, &zoe),
            Err(PlacementError::SpaceTooSmall)
        );
    }

    #[test]
    fn too_small_spot_wins_over_fuel_rule() {
        let lot = parking(10, 0, ParkingType::Underground);
        let mut butano = car(Fuel::Lpg);
        butano.width = lot.parking_spot_width + 1;

        assert_eq!(
            validate_placement(&lot, &butano),
            Err(PlacementError::SpaceTooSmall)
        );
    }

    #[test]
    fn parked_car_cannot_park_again_anywhere() {
        let mut origin = parking(10, 0, ParkingType::OpenAir);
        let mut other = parking(10, 0, ParkingType::OpenAir);
        let mut ibiza = car(Fuel::Petrol);
        park(&mut origin, &mut ibiza).unwrap();

        // Da igual que el destino sea otro parking o el mismo.
        assert_eq!(
            park(&mut other, &mut ibiza).unwrap_err(),
            ParkError::AlreadyParked
        );
        assert_eq!(
            park(&mut origin, &mut ibiza).unwrap_err(),
            ParkError::AlreadyParked
        );
        assert_eq!(other.taken_places, 0);
        assert_eq!(origin.taken_places, 1);
    }

    #[test]
    fn already_parked_wins_over_full_destination() {
        let mut origin = parking(10, 0, ParkingType::OpenAir);
        let mut full = parking(1, 0, ParkingType::OpenAir);
        full.taken_places = 1;
        let mut ibiza = car(Fuel::Petrol);
        park(&mut origin, &mut ibiza).unwrap();

        assert_eq!(
            park(&mut full, &mut ibiza).unwrap_err(),
            ParkError::AlreadyParked
        );
    }

    #[test]
    fn failed_park_leaves_everything_untouched() {
        let mut lot = parking(1, 1, ParkingType::Underground);
        lot.taken_places = 1;
        lot.taken_electric_places = 1;
        let mut zoe = car(Fuel::Electric);

        let lot_before = lot.clone();
        let car_before = zoe.clone();

        assert!(park(&mut lot, &mut zoe).is_err());

        assert_eq!(lot, lot_before);
        assert_eq!(zoe, car_before);
    }

    #[test]
    fn leave_restores_counters_and_returns_lot_id() {
        let mut lot = parking(10, 2, ParkingType::OpenAir);
        let mut zoe = car(Fuel::Electric);
        park(&mut lot, &mut zoe).unwrap();

        let left = leave(&mut lot, &mut zoe).unwrap();

        assert_eq!(left, lot.id);
        assert_eq!(lot.taken_places, 0);
        assert_eq!(lot.taken_electric_places, 0);
        assert_eq!(zoe.parking_id, None);
    }

    #[test]
    fn park_and_leave_round_trip_is_lossless() {
        let mut lot = parking(5, 1, ParkingType::Underground);
        lot.taken_places = 3;
        let mut ibiza = car(Fuel::Petrol);

        let lot_before = lot.clone();
        let car_before = ibiza.clone();

        park(&mut lot, &mut ibiza).unwrap();
        leave(&mut lot, &mut ibiza).unwrap();

        assert_eq!(lot, lot_before);
        assert_eq!(ibiza, car_before);
    }

    #[test]
    fn leave_rejects_car_that_is_not_parked() {
        let mut lot = parking(10, 0, ParkingType::OpenAir);
        lot.taken_places = 4;
        let mut ibiza = car(Fuel::Petrol);

        assert_eq!(leave(&mut lot, &mut ibiza).unwrap_err(), LeaveError::NotParked);
        assert_eq!(lot.taken_places, 4);
    }

    #[test]
    fn leave_rejects_mismatched_lot() {
        let mut origin = parking(10, 0, ParkingType::OpenAir);
        let mut other = parking(10, 0, ParkingType::OpenAir);
        other.taken_places = 5;
        let mut ibiza = car(Fuel::Petrol);
        park(&mut origin, &mut ibiza).unwrap();

        let err = leave(&mut other, &mut ibiza).unwrap_err();

        assert_eq!(
            err,
            LeaveError::LotMismatch {
                car_id: ibiza.id,
                parking_id: other.id,
            }
        );
        assert_eq!(other.taken_places, 5);
        assert_eq!(ibiza.parking_id, Some(origin.id));
    }

    #[test]
    fn leave_with_zeroed_counter_is_a_fatal_underflow() {
        // Estado corrupto: el coche consta como aparcado pero el contador es 0.
        let mut lot = parking(10, 0, ParkingType::OpenAir);
        let mut ibiza = car(Fuel::Petrol);
        ibiza.parking_id = Some(lot.id);

        let err = leave(&mut lot, &mut ibiza).unwrap_err();

        assert_eq!(err, LeaveError::CounterUnderflow { parking_id: lot.id });
        assert_eq!(lot.taken_places, 0);
        assert_eq!(ibiza.parking_id, Some(lot.id));
    }

    #[test]
    fn electric_leave_with_zeroed_electric_counter_is_fatal() {
        let mut lot = parking(10, 2, ParkingType::OpenAir);
        lot.taken_places = 1;
        let mut zoe = car(Fuel::Electric);
        zoe.parking_id = Some(lot.id);

        let err = leave(&mut lot, &mut zoe).unwrap_err();

        assert_eq!(err, LeaveError::CounterUnderflow { parking_id: lot.id });
        assert_eq!(lot.taken_places, 1);
    }

    #[test]
    fn counters_stay_within_bounds_across_a_long_sequence() {
        // Un parking pequeño sometido a una ráfaga de entradas y salidas
        // mezcladas. Tras cada operación, fallida o no, los contadores deben
        // seguir dentro de sus límites.
        let mut lot = parking(3, 1, ParkingType::Underground);
        let mut fleet = vec![
            car(Fuel::Petrol),
            car(Fuel::Electric),
            car(Fuel::Diesel),
            car(Fuel::Electric),
            car(Fuel::Hybrid),
        ];

        let assert_bounds = |lot: &Parking| {
            assert!(lot.taken_places >= 0 && lot.taken_places <= lot.capacity);
            assert!(
                lot.taken_electric_places >= 0
                    && lot.taken_electric_places <= lot.places_for_electric_cars
            );
        };

        // Entradas hasta reventar el aforo (las últimas deben fallar).
        for c in fleet.iter_mut() {
            let _ = park(&mut lot, c);
            assert_bounds(&lot);
        }
        assert_eq!(lot.taken_places, 3);

        // Salen los que llegaron a entrar, intercalando reintentos de entrada.
        for i in 0..fleet.len() {
            if fleet[i].is_parked() {
                leave(&mut lot, &mut fleet[i]).unwrap();
            }
            assert_bounds(&lot);

            let next = (i + 1) % fleet.len();
            if !fleet[next].is_parked() {
                let _ = park(&mut lot, &mut fleet[next]);
            }
            assert_bounds(&lot);
        }

        // Vaciado final: el parking vuelve exactamente a cero.
        for c in fleet.iter_mut().filter(|c| c.is_parked()) {
            leave(&mut lot, c).unwrap();
            assert_bounds(&lot);
        }
        assert_eq!(lot.taken_places, 0);
        assert_eq!(lot.taken_electric_places, 0);
    }
}
