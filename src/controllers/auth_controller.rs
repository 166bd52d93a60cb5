use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::auth_dto::{
    AdminCommand, AuthenticationRequest, AuthenticationResponse, CustomerCommand,
};
use crate::dto::customer_dto::CustomerResponse;
use crate::models::admin::Admin;
use crate::models::customer::{Customer, Role};
use crate::repositories::admin_repository::AdminRepository;
use crate::repositories::customer_repository::CustomerRepository;
use crate::utils::errors::{conflict_error, AppError};
use crate::utils::jwt::{generate_token, JwtConfig};

pub struct AuthController {
    customers: CustomerRepository,
    admins: AdminRepository,
    jwt: JwtConfig,
}

impl AuthController {
    pub fn new(pool: PgPool, jwt: JwtConfig) -> Self {
        Self {
            customers: CustomerRepository::new(pool.clone()),
            admins: AdminRepository::new(pool),
            jwt,
        }
    }

    /// Alta de cliente. Las cuentas nacen habilitadas y sin bloquear.
    pub async fn register_customer(
        &self,
        request: CustomerCommand,
    ) -> Result<CustomerResponse, AppError> {
        request.validate()?;

        if self.customers.username_exists(&request.username).await? {
            return Err(conflict_error("Customer", "username", &request.username));
        }

        let customer = Customer {
            id: Uuid::new_v4(),
            first_name: request.first_name,
            last_name: request.last_name,
            username: request.username,
            password_hash: hash(&request.password, DEFAULT_COST)?,
            role: Role::Customer,
            account_enabled: true,
            account_locked: false,
            created_at: Utc::now(),
        };

        let created = self.customers.create(&customer).await?;
        tracing::info!("Customer '{}' registered", created.username);

        Ok(created.into())
    }

    /// Login de cliente. Una cuenta deshabilitada o bloqueada falla igual
    /// que una contraseña incorrecta: el motivo no se filtra al cliente.
    pub async fn authenticate_customer(
        &self,
        request: AuthenticationRequest,
    ) -> Result<AuthenticationResponse, AppError> {
        let customer = self
            .customers
            .find_by_username(&request.username)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

        if !verify(&request.password, &customer.password_hash)? || !customer.can_authenticate() {
            return Err(AppError::Unauthorized("Invalid credentials".to_string()));
        }

        let token = generate_token(customer.id, &customer.username, Role::Customer, &self.jwt)?;

        Ok(AuthenticationResponse::new(token))
    }

    /// Alta de administrador. Devuelve directamente un token, como el
    /// registro de admins del sistema original.
    pub async fn register_admin(
        &self,
        request: AdminCommand,
    ) -> Result<AuthenticationResponse, AppError> {
        request.validate()?;

        if self.admins.username_exists(&request.username).await? {
            return Err(conflict_error("Admin", "username", &request.username));
        }

        let admin = Admin {
            id: Uuid::new_v4(),
            username: request.username,
            password_hash: hash(&request.password, DEFAULT_COST)?,
            created_at: Utc::now(),
        };

        let created = self.admins.create(&admin).await?;
        tracing::info!("Admin '{}' registered", created.username);

        let token = generate_token(created.id, &created.username, Role::Admin, &self.jwt)?;

        Ok(AuthenticationResponse::new(token))
    }

    pub async fn authenticate_admin(
        &self,
        request: AuthenticationRequest,
    ) -> Result<AuthenticationResponse, AppError> {
        let admin = self
            .admins
            .find_by_username(&request.username)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

        if !verify(&request.password, &admin.password_hash)? {
            return Err(AppError::Unauthorized("Invalid credentials".to_string()));
        }

        let token = generate_token(admin.id, &admin.username, Role::Admin, &self.jwt)?;

        Ok(AuthenticationResponse::new(token))
    }
}
