//! Middleware del sistema
//!
//! Autenticación JWT (token Bearer, guardas por rol) y CORS.

pub mod auth;
pub mod cors;
