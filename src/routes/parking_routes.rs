use axum::{
    extract::{Path, State},
    middleware,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::parking_controller::ParkingController;
use crate::dto::car_dto::CarResponse;
use crate::dto::parking_dto::{CarsCountResponse, ParkingResponse};
use crate::middleware::auth::auth_middleware;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Área compartida de parkings, solo lectura. Cualquier rol autenticado.
pub fn create_parking_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_parkings))
        .route("/:id", get(get_parking))
        .route("/:id/cars", get(cars_of_parking))
        .route("/:id/cars/count", get(count_cars))
        .route("/:id/cars/most-expensive", get(most_expensive_car))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

async fn list_parkings(
    State(state): State<AppState>,
) -> Result<Json<Vec<ParkingResponse>>, AppError> {
    let response = ParkingController::new(state.pool.clone()).list_all().await?;
    Ok(Json(response))
}

async fn get_parking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ParkingResponse>, AppError> {
    let response = ParkingController::new(state.pool.clone()).get_by_id(id).await?;
    Ok(Json(response))
}

async fn cars_of_parking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<CarResponse>>, AppError> {
    let response = ParkingController::new(state.pool.clone()).cars_of(id).await?;
    Ok(Json(response))
}

async fn count_cars(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CarsCountResponse>, AppError> {
    let response = ParkingController::new(state.pool.clone()).count_cars(id).await?;
    Ok(Json(response))
}

async fn most_expensive_car(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CarResponse>, AppError> {
    let response = ParkingController::new(state.pool.clone())
        .most_expensive_car(id)
        .await?;
    Ok(Json(response))
}
