use axum::{
    extract::{Path, State},
    middleware,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::car_controller::CarController;
use crate::dto::car_dto::CarResponse;
use crate::middleware::auth::auth_middleware;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Área compartida de coches. El listado completo es el único endpoint
/// público de la API; el detalle exige token de cualquier rol.
pub fn create_car_router(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/:id", get(get_car))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new().route("/", get(list_cars)).merge(protected)
}

async fn list_cars(State(state): State<AppState>) -> Result<Json<Vec<CarResponse>>, AppError> {
    let response = CarController::new(state.pool.clone()).list_all().await?;
    Ok(Json(response))
}

async fn get_car(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CarResponse>, AppError> {
    let response = CarController::new(state.pool.clone()).get_by_id(id).await?;
    Ok(Json(response))
}
