//! Acceso a datos
//!
//! Un repositorio por tabla. Las funciones asociadas que reciben
//! `&mut PgConnection` están pensadas para usarse dentro de una
//! transacción abierta por el controlador (bloqueos `FOR UPDATE`).

pub mod action_repository;
pub mod admin_repository;
pub mod car_repository;
pub mod customer_repository;
pub mod parking_repository;
