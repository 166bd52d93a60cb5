//! Modelo de Customer
//!
//! Cuenta de cliente con sus flags de estado. El password nunca sale de
//! aquí: las respuestas de la API usan `dto::customer_dto::CustomerResponse`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Rol de una cuenta autenticada. Viaja en el claim `role` del JWT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "account_role", rename_all = "lowercase")]
pub enum Role {
    Customer,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Customer => write!(f, "customer"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Role::Customer),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// Customer - mapea exactamente a la tabla `customers`
#[derive(Debug, Clone, FromRow)]
pub struct Customer {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
    pub account_enabled: bool,
    pub account_locked: bool,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// Una cuenta solo puede autenticarse si está habilitada y no bloqueada.
    pub fn can_authenticate(&self) -> bool {
        self.account_enabled && !self.account_locked
    }
}
