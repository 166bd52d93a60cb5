use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::admin_controller::AdminController;
use crate::dto::admin_dto::{ActionResponse, EditCommand};
use crate::dto::car_dto::{AdminCarCommand, CarResponse, LeaveResponse};
use crate::dto::common::{PageParams, PageResponse};
use crate::dto::customer_dto::CustomerResponse;
use crate::dto::parking_dto::{CarsCountResponse, ParkingCommand, ParkingResponse};
use crate::middleware::auth::{admin_only_middleware, auth_middleware, AuthenticatedUser};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_admin_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/customers", get(list_customers))
        .route("/customers/:customer_id", put(update_customer))
        .route("/customers/:customer_id/enable", put(enable_customer))
        .route("/customers/:customer_id/disable", put(disable_customer))
        .route("/customers/:customer_id/lock", put(lock_customer))
        .route("/customers/:customer_id/unlock", put(unlock_customer))
        .route("/cars", get(list_cars).post(add_car))
        .route("/cars/most-expensive", get(most_expensive_car))
        .route("/cars/:car_id", put(update_car).delete(delete_car))
        .route("/cars/:car_id/park/:parking_id", post(park_car))
        .route("/cars/:car_id/leave", post(leave_parking))
        .route("/parkings", get(list_parkings).post(add_parking))
        .route(
            "/parkings/:parking_id",
            get(get_parking).put(update_parking).delete(delete_parking),
        )
        .route("/parkings/:parking_id/details", put(update_parking_details))
        .route("/parkings/:parking_id/cars", get(cars_from_parking))
        .route("/parkings/:parking_id/cars/count", get(count_cars_from_parking))
        .route(
            "/parkings/:parking_id/cars/most-expensive",
            get(most_expensive_car_from_parking),
        )
        .route("/actions", get(list_actions))
        .route("/actions/mine", get(my_actions))
        .route_layer(middleware::from_fn(admin_only_middleware))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

async fn list_customers(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(params): Query<PageParams>,
) -> Result<Json<PageResponse<CustomerResponse>>, AppError> {
    let response = AdminController::new(state.pool.clone())
        .list_customers(&user, &params)
        .await?;
    Ok(Json(response))
}

async fn list_cars(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(params): Query<PageParams>,
) -> Result<Json<PageResponse<CarResponse>>, AppError> {
    let response = AdminController::new(state.pool.clone())
        .list_cars(&user, &params)
        .await?;
    Ok(Json(response))
}

async fn list_parkings(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(params): Query<PageParams>,
) -> Result<Json<PageResponse<ParkingResponse>>, AppError> {
    let response = AdminController::new(state.pool.clone())
        .list_parkings(&user, &params)
        .await?;
    Ok(Json(response))
}

async fn list_actions(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(params): Query<PageParams>,
) -> Result<Json<PageResponse<ActionResponse>>, AppError> {
    let response = AdminController::new(state.pool.clone())
        .list_actions(&user, &params)
        .await?;
    Ok(Json(response))
}

async fn my_actions(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<ActionResponse>>, AppError> {
    let response = AdminController::new(state.pool.clone())
        .my_actions(&user)
        .await?;
    Ok(Json(response))
}

async fn update_customer(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(customer_id): Path<Uuid>,
    Json(command): Json<EditCommand>,
) -> Result<Json<CustomerResponse>, AppError> {
    let response = AdminController::new(state.pool.clone())
        .update_customer(&user, customer_id, command)
        .await?;
    Ok(Json(response))
}

async fn enable_customer(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(customer_id): Path<Uuid>,
) -> Result<Json<CustomerResponse>, AppError> {
    let response = AdminController::new(state.pool.clone())
        .enable_customer(&user, customer_id)
        .await?;
    Ok(Json(response))
}

async fn disable_customer(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(customer_id): Path<Uuid>,
) -> Result<Json<CustomerResponse>, AppError> {
    let response = AdminController::new(state.pool.clone())
        .disable_customer(&user, customer_id)
        .await?;
    Ok(Json(response))
}

async fn lock_customer(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(customer_id): Path<Uuid>,
) -> Result<Json<CustomerResponse>, AppError> {
    let response = AdminController::new(state.pool.clone())
        .lock_customer(&user, customer_id)
        .await?;
    Ok(Json(response))
}

async fn unlock_customer(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(customer_id): Path<Uuid>,
) -> Result<Json<CustomerResponse>, AppError> {
    let response = AdminController::new(state.pool.clone())
        .unlock_customer(&user, customer_id)
        .await?;
    Ok(Json(response))
}

async fn add_car(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(command): Json<AdminCarCommand>,
) -> Result<(StatusCode, Json<CarResponse>), AppError> {
    let response = AdminController::new(state.pool.clone())
        .add_car(&user, command)
        .await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn update_car(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(car_id): Path<Uuid>,
    Json(command): Json<EditCommand>,
) -> Result<Json<CarResponse>, AppError> {
    let response = AdminController::new(state.pool.clone())
        .update_car(&user, car_id, command)
        .await?;
    Ok(Json(response))
}

async fn delete_car(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(car_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    AdminController::new(state.pool.clone())
        .delete_car(&user, car_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn park_car(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path((car_id, parking_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<CarResponse>, AppError> {
    let response = AdminController::new(state.pool.clone())
        .park_car(&user, car_id, parking_id)
        .await?;
    Ok(Json(response))
}

async fn leave_parking(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(car_id): Path<Uuid>,
) -> Result<Json<LeaveResponse>, AppError> {
    let response = AdminController::new(state.pool.clone())
        .leave_parking(&user, car_id)
        .await?;
    Ok(Json(response))
}

async fn most_expensive_car(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<CarResponse>, AppError> {
    let response = AdminController::new(state.pool.clone())
        .most_expensive_car(&user)
        .await?;
    Ok(Json(response))
}

async fn add_parking(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(command): Json<ParkingCommand>,
) -> Result<(StatusCode, Json<ParkingResponse>), AppError> {
    let response = AdminController::new(state.pool.clone())
        .add_parking(&user, command)
        .await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_parking(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(parking_id): Path<Uuid>,
) -> Result<Json<ParkingResponse>, AppError> {
    let response = AdminController::new(state.pool.clone())
        .get_parking(&user, parking_id)
        .await?;
    Ok(Json(response))
}

async fn update_parking(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(parking_id): Path<Uuid>,
    Json(command): Json<EditCommand>,
) -> Result<Json<ParkingResponse>, AppError> {
    let response = AdminController::new(state.pool.clone())
        .update_parking(&user, parking_id, command)
        .await?;
    Ok(Json(response))
}

async fn update_parking_details(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(parking_id): Path<Uuid>,
    Json(command): Json<ParkingCommand>,
) -> Result<Json<ParkingResponse>, AppError> {
    let response = AdminController::new(state.pool.clone())
        .update_parking_details(&user, parking_id, command)
        .await?;
    Ok(Json(response))
}

async fn delete_parking(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(parking_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    AdminController::new(state.pool.clone())
        .delete_parking(&user, parking_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn cars_from_parking(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(parking_id): Path<Uuid>,
) -> Result<Json<Vec<CarResponse>>, AppError> {
    let response = AdminController::new(state.pool.clone())
        .cars_from_parking(&user, parking_id)
        .await?;
    Ok(Json(response))
}

async fn count_cars_from_parking(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(parking_id): Path<Uuid>,
) -> Result<Json<CarsCountResponse>, AppError> {
    let response = AdminController::new(state.pool.clone())
        .count_cars_from_parking(&user, parking_id)
        .await?;
    Ok(Json(response))
}

async fn most_expensive_car_from_parking(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(parking_id): Path<Uuid>,
) -> Result<Json<CarResponse>, AppError> {
    let response = AdminController::new(state.pool.clone())
        .most_expensive_car_from_parking(&user, parking_id)
        .await?;
    Ok(Json(response))
}
