use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::customer_controller::CustomerController;
use crate::dto::car_dto::{CarCommand, CarResponse, LeaveResponse};
use crate::middleware::auth::{auth_middleware, customer_only_middleware, AuthenticatedUser};
use crate::models::car::Fuel;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Área de cliente. Token con rol customer y, además, el `customer_id` de
/// la ruta debe ser el del propio token (lo comprueba el controlador).
pub fn create_customer_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/:customer_id/cars", get(my_cars).post(add_car))
        .route("/:customer_id/cars/batch", post(add_cars_batch))
        .route("/:customer_id/cars/most-expensive", get(most_expensive))
        .route(
            "/:customer_id/cars/most-expensive/:brand",
            get(most_expensive_by_brand),
        )
        .route("/:customer_id/cars/brand/:brand", get(cars_by_brand))
        .route("/:customer_id/cars/fuel/:fuel", get(cars_by_fuel))
        .route("/:customer_id/cars/:car_id", delete(delete_car))
        .route("/:customer_id/cars/:car_id/park/:parking_id", post(park_car))
        .route("/:customer_id/cars/:car_id/leave", post(leave_parking))
        .route_layer(middleware::from_fn(customer_only_middleware))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

async fn my_cars(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(customer_id): Path<Uuid>,
) -> Result<Json<Vec<CarResponse>>, AppError> {
    let response = CustomerController::new(state.pool.clone())
        .my_cars(&user, customer_id)
        .await?;
    Ok(Json(response))
}

async fn add_car(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(customer_id): Path<Uuid>,
    Json(command): Json<CarCommand>,
) -> Result<(StatusCode, Json<CarResponse>), AppError> {
    let response = CustomerController::new(state.pool.clone())
        .add_car(&user, customer_id, command)
        .await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn add_cars_batch(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(customer_id): Path<Uuid>,
    Json(commands): Json<Vec<CarCommand>>,
) -> Result<(StatusCode, Json<Vec<CarResponse>>), AppError> {
    let response = CustomerController::new(state.pool.clone())
        .add_cars_batch(&user, customer_id, commands)
        .await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn delete_car(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path((customer_id, car_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    CustomerController::new(state.pool.clone())
        .delete_car(&user, customer_id, car_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn park_car(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path((customer_id, car_id, parking_id)): Path<(Uuid, Uuid, Uuid)>,
) -> Result<Json<CarResponse>, AppError> {
    let response = CustomerController::new(state.pool.clone())
        .park_car(&user, customer_id, car_id, parking_id)
        .await?;
    Ok(Json(response))
}

async fn leave_parking(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path((customer_id, car_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<LeaveResponse>, AppError> {
    let response = CustomerController::new(state.pool.clone())
        .leave_parking(&user, customer_id, car_id)
        .await?;
    Ok(Json(response))
}

async fn most_expensive(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(customer_id): Path<Uuid>,
) -> Result<Json<CarResponse>, AppError> {
    let response = CustomerController::new(state.pool.clone())
        .most_expensive(&user, customer_id)
        .await?;
    Ok(Json(response))
}

async fn most_expensive_by_brand(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path((customer_id, brand)): Path<(Uuid, String)>,
) -> Result<Json<CarResponse>, AppError> {
    let response = CustomerController::new(state.pool.clone())
        .most_expensive_by_brand(&user, customer_id, &brand)
        .await?;
    Ok(Json(response))
}

async fn cars_by_brand(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path((customer_id, brand)): Path<(Uuid, String)>,
) -> Result<Json<Vec<CarResponse>>, AppError> {
    let response = CustomerController::new(state.pool.clone())
        .cars_by_brand(&user, customer_id, &brand)
        .await?;
    Ok(Json(response))
}

async fn cars_by_fuel(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path((customer_id, fuel)): Path<(Uuid, Fuel)>,
) -> Result<Json<Vec<CarResponse>>, AppError> {
    let response = CustomerController::new(state.pool.clone())
        .cars_by_fuel(&user, customer_id, fuel)
        .await?;
    Ok(Json(response))
}
