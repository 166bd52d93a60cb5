//! Rutas de la API
//!
//! Un router por área, ensamblados bajo `/api/v1`. Las áreas protegidas
//! cuelgan del middleware de autenticación; admin y customer añaden además
//! su filtro de rol.

pub mod admin_routes;
pub mod auth_routes;
pub mod car_routes;
pub mod customer_routes;
pub mod parking_routes;

use axum::{response::Json, routing::get, Router};
use serde_json::json;

use crate::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use crate::state::AppState;

/// Construye la aplicación completa con el estado ya aplicado.
pub fn create_api_router(state: AppState) -> Router {
    let cors = if state.config.cors_origins.is_empty() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(&state.config.cors_origins)
    };

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1/auth", auth_routes::create_auth_router())
        .nest("/api/v1/car", car_routes::create_car_router(state.clone()))
        .nest(
            "/api/v1/parking",
            parking_routes::create_parking_router(state.clone()),
        )
        .nest(
            "/api/v1/customer",
            customer_routes::create_customer_router(state.clone()),
        )
        .nest(
            "/api/v1/admin",
            admin_routes::create_admin_router(state.clone()),
        )
        .layer(cors)
        .with_state(state)
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "car-parking-api",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
