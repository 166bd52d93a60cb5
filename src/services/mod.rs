//! Lógica de negocio
//!
//! `occupancy` es el núcleo puro de plazas: validación de encaje y
//! contadores, sin tocar base de datos. `edit_service` tipa las ediciones
//! de campo del área de administración y `data_loader` siembra datos de
//! demostración en arranques de desarrollo.

pub mod data_loader;
pub mod edit_service;
pub mod occupancy;
