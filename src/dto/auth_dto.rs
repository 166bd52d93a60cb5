use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::validation::validate_not_blank;

// Registro de cliente
#[derive(Debug, Deserialize, Validate)]
pub struct CustomerCommand {
    #[validate(length(min = 1, max = 50), custom = "validate_not_blank")]
    pub first_name: String,

    #[validate(length(min = 1, max = 50), custom = "validate_not_blank")]
    pub last_name: String,

    #[validate(length(min = 3, max = 50), custom = "validate_not_blank")]
    pub username: String,

    #[validate(length(min = 6, max = 100))]
    pub password: String,
}

// Registro de administrador
#[derive(Debug, Deserialize, Validate)]
pub struct AdminCommand {
    #[validate(length(min = 3, max = 50), custom = "validate_not_blank")]
    pub username: String,

    #[validate(length(min = 6, max = 100))]
    pub password: String,
}

// Login request (clientes y admins)
#[derive(Debug, Deserialize)]
pub struct AuthenticationRequest {
    pub username: String,
    pub password: String,
}

// Login response
#[derive(Debug, Serialize)]
pub struct AuthenticationResponse {
    pub token: String,
}

impl AuthenticationResponse {
    pub fn new(token: String) -> Self {
        Self { token }
    }
}
