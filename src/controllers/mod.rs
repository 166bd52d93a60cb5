//! Controladores HTTP
//!
//! Cada controlador agrupa las operaciones de un área de la API. Los
//! handlers de `routes/` los construyen por petición sobre el pool
//! compartido y traducen sus `Result` a respuestas JSON.

pub mod admin_controller;
pub mod auth_controller;
pub mod car_controller;
pub mod customer_controller;
pub mod parking_controller;
