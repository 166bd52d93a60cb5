//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL definido en `migrations/`.

pub mod action;
pub mod admin;
pub mod car;
pub mod customer;
pub mod parking;
