use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::customer::{Customer, Role};

// Response de cliente (sin password)
#[derive(Debug, Serialize)]
pub struct CustomerResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub role: Role,
    pub account_enabled: bool,
    pub account_locked: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            first_name: customer.first_name,
            last_name: customer.last_name,
            username: customer.username,
            role: customer.role,
            account_enabled: customer.account_enabled,
            account_locked: customer.account_locked,
            created_at: customer.created_at,
        }
    }
}
