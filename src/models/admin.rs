//! Modelo de Admin

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Admin - mapea exactamente a la tabla `admins`
#[derive(Debug, Clone, FromRow)]
pub struct Admin {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}
