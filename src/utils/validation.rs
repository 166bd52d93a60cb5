//! Utilidades de validación
//!
//! Validadores custom que el derive de `validator` no trae de serie.
//! Se enganchan en los commands con `#[validate(custom = "...")]`.

use rust_decimal::Decimal;
use validator::ValidationError;

/// Validar que un string no esté en blanco (espacios no cuentan)
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_blank");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un precio sea estrictamente positivo
pub fn validate_price(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        let mut error = ValidationError::new("positive_price");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("Seat").is_ok());
        assert!(validate_not_blank("").is_err());
        assert!(validate_not_blank("   ").is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(&Decimal::new(1_500_000, 2)).is_ok());
        assert!(validate_price(&Decimal::ZERO).is_err());
        assert!(validate_price(&Decimal::new(-100, 2)).is_err());
    }
}
