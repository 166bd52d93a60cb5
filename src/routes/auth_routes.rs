use axum::{
    extract::State,
    http::StatusCode,
    routing::post,
    Json, Router,
};

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::{
    AdminCommand, AuthenticationRequest, AuthenticationResponse, CustomerCommand,
};
use crate::dto::customer_dto::CustomerResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::JwtConfig;

pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/customer/register", post(register_customer))
        .route("/customer/authenticate", post(authenticate_customer))
        .route("/admin/register", post(register_admin))
        .route("/admin/authenticate", post(authenticate_admin))
}

fn controller(state: &AppState) -> AuthController {
    AuthController::new(state.pool.clone(), JwtConfig::from(&state.config))
}

async fn register_customer(
    State(state): State<AppState>,
    Json(request): Json<CustomerCommand>,
) -> Result<(StatusCode, Json<CustomerResponse>), AppError> {
    let response = controller(&state).register_customer(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn authenticate_customer(
    State(state): State<AppState>,
    Json(request): Json<AuthenticationRequest>,
) -> Result<Json<AuthenticationResponse>, AppError> {
    let response = controller(&state).authenticate_customer(request).await?;
    Ok(Json(response))
}

async fn register_admin(
    State(state): State<AppState>,
    Json(request): Json<AdminCommand>,
) -> Result<(StatusCode, Json<AuthenticationResponse>), AppError> {
    let response = controller(&state).register_admin(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn authenticate_admin(
    State(state): State<AppState>,
    Json(request): Json<AuthenticationRequest>,
) -> Result<Json<AuthenticationResponse>, AppError> {
    let response = controller(&state).authenticate_admin(request).await?;
    Ok(Json(response))
}
