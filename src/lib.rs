//! API de gestión de aparcamientos
//!
//! Backend REST para clientes, coches, parkings y acciones de administración.
//! El núcleo del sistema es el contador de ocupación de cada parking: las
//! operaciones de aparcar y salir pasan siempre por `services::occupancy`.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
