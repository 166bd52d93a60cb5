//! Middleware de autenticación JWT
//!
//! Valida el token Bearer y deja un `AuthenticatedUser` en las extensions
//! de la request. La identidad se reconstruye solo con los claims del
//! token, sin tocar la base de datos; las comprobaciones que sí necesitan
//! la base (que el admin siga existiendo, que el coche sea del cliente)
//! viven en los controladores.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
    Extension,
};
use uuid::Uuid;

use crate::{
    models::customer::Role,
    state::AppState,
    utils::errors::AppError,
    utils::jwt::{extract_token_from_header, verify_token, JwtConfig},
};

/// Identidad autenticada que viaja en las extensions de la request.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub account_id: Uuid,
    pub username: String,
    pub role: Role,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Middleware de autenticación: exige un token Bearer válido.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Authorization token required".to_string()))?;

    let token = extract_token_from_header(auth_header)?;
    let claims = verify_token(token, &JwtConfig::from(&state.config))?;

    let account_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("Invalid account id in token".to_string()))?;
    let role: Role = claims
        .role
        .parse()
        .map_err(|_| AppError::Unauthorized("Invalid role in token".to_string()))?;

    request.extensions_mut().insert(AuthenticatedUser {
        account_id,
        username: claims.username,
        role,
    });

    Ok(next.run(request).await)
}

/// Middleware para rutas reservadas a administradores.
pub async fn admin_only_middleware(
    Extension(user): Extension<AuthenticatedUser>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if user.role != Role::Admin {
        return Err(AppError::Forbidden(
            "Admin privileges required".to_string(),
        ));
    }

    Ok(next.run(request).await)
}

/// Middleware para el área de clientes.
pub async fn customer_only_middleware(
    Extension(user): Extension<AuthenticatedUser>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if user.role != Role::Customer {
        return Err(AppError::Forbidden(
            "Customer account required".to_string(),
        ));
    }

    Ok(next.run(request).await)
}
