//! Utilidades JWT
//!
//! Tokens firmados con HS512. El secreto llega por configuración codificado
//! en base64 y se decodifica antes de firmar, así puede contener bytes
//! arbitrarios. Los claims llevan todo lo necesario para reconstruir la
//! identidad sin tocar la base de datos.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    config::environment::EnvironmentConfig,
    models::customer::Role,
    utils::errors::AppError,
};

/// Claims del JWT token
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,      // id de la cuenta
    pub username: String,
    pub role: String,     // "customer" | "admin"
    pub exp: usize,       // expiration timestamp
    pub iat: usize,       // issued at timestamp
}

/// Configuración de JWT
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Clave de firma codificada en base64.
    pub secret: String,
    /// Vida del token en segundos.
    pub expiration: u64,
}

impl From<&EnvironmentConfig> for JwtConfig {
    fn from(config: &EnvironmentConfig) -> Self {
        Self {
            secret: config.jwt_secret.clone(),
            expiration: config.jwt_expiration,
        }
    }
}

fn signing_key(config: &JwtConfig) -> Result<Vec<u8>, AppError> {
    BASE64
        .decode(&config.secret)
        .map_err(|e| AppError::Jwt(format!("Clave de firma inválida: {}", e)))
}

/// Generar JWT token para una cuenta (cliente o admin)
pub fn generate_token(
    user_id: Uuid,
    username: &str,
    role: Role,
    config: &JwtConfig,
) -> Result<String, AppError> {
    let now = chrono::Utc::now();
    let expires_at = now + chrono::Duration::seconds(config.expiration as i64);

    let claims = JwtClaims {
        sub: user_id.to_string(),
        username: username.to_string(),
        role: role.to_string(),
        exp: expires_at.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    let encoding_key = EncodingKey::from_secret(&signing_key(config)?);

    encode(&Header::new(Algorithm::HS512), &claims, &encoding_key)
        .map_err(|e| AppError::Jwt(format!("Error generando token: {}", e)))
}

/// Verificar y decodificar JWT token
pub fn verify_token(token: &str, config: &JwtConfig) -> Result<JwtClaims, AppError> {
    let decoding_key = DecodingKey::from_secret(&signing_key(config)?);

    let token_data = decode::<JwtClaims>(
        token,
        &decoding_key,
        &Validation::new(Algorithm::HS512),
    )
    .map_err(|e| AppError::Jwt(format!("Token inválido: {}", e)))?;

    Ok(token_data.claims)
}

/// Verificar si un token ha expirado
pub fn is_token_expired(claims: &JwtClaims) -> bool {
    let now = chrono::Utc::now().timestamp() as usize;
    claims.exp < now
}

/// Extraer token del header Authorization
pub fn extract_token_from_header(auth_header: &str) -> Result<&str, AppError> {
    if !auth_header.starts_with("Bearer ") {
        return Err(AppError::Jwt(
            "Header Authorization debe comenzar con 'Bearer '".to_string(),
        ));
    }

    let token = &auth_header[7..];
    if token.is_empty() {
        return Err(AppError::Jwt("Token no puede estar vacío".to_string()));
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: BASE64.encode("clave-de-pruebas-suficientemente-larga-para-hs512"),
            expiration: 3600,
        }
    }

    #[test]
    fn test_generate_and_verify_token() {
        let config = test_config();
        let user_id = Uuid::new_v4();

        let token = generate_token(user_id, "maria", Role::Customer, &config).unwrap();
        let claims = verify_token(&token, &config).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.username, "maria");
        assert_eq!(claims.role, "customer");
        assert!(!is_token_expired(&claims));
    }

    #[test]
    fn test_admin_role_travels_in_claims() {
        let config = test_config();

        let token = generate_token(Uuid::new_v4(), "root", Role::Admin, &config).unwrap();
        let claims = verify_token(&token, &config).unwrap();

        assert_eq!(claims.role, "admin");
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let config = test_config();
        let other = JwtConfig {
            secret: BASE64.encode("otra-clave-distinta-igual-de-larga-que-antes"),
            expiration: 3600,
        };

        let token = generate_token(Uuid::new_v4(), "maria", Role::Customer, &config).unwrap();

        assert!(verify_token(&token, &other).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let config = test_config();
        let now = chrono::Utc::now().timestamp();
        let claims = JwtClaims {
            sub: Uuid::new_v4().to_string(),
            username: "maria".to_string(),
            role: "customer".to_string(),
            exp: (now - 600) as usize,
            iat: (now - 4200) as usize,
        };
        let key = EncodingKey::from_secret(&signing_key(&config).unwrap());
        let token = encode(&Header::new(Algorithm::HS512), &claims, &key).unwrap();

        assert!(verify_token(&token, &config).is_err());
        assert!(is_token_expired(&claims));
    }

    #[test]
    fn test_non_base64_secret_fails_cleanly() {
        let config = JwtConfig {
            secret: "esto no es base64 válido!!!".to_string(),
            expiration: 3600,
        };

        assert!(generate_token(Uuid::new_v4(), "maria", Role::Customer, &config).is_err());
    }

    #[test]
    fn test_extract_token_from_header() {
        assert_eq!(
            extract_token_from_header("Bearer abc.def.ghi").unwrap(),
            "abc.def.ghi"
        );
        assert!(extract_token_from_header("Basic abc").is_err());
        assert!(extract_token_from_header("Bearer ").is_err());
    }
}
