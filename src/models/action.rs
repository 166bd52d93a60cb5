//! Modelo de Action
//!
//! Registro de auditoría: cada operación de administración queda anotada
//! con quién la hizo y, para las ediciones, qué campo cambió y de qué
//! valor a qué valor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Tipos de acción de administración. Se persiste como enum `action_kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "action_kind", rename_all = "snake_case")]
pub enum ActionType {
    Edit,
    EnableCustomerAccount,
    DisableCustomerAccount,
    LockCustomerAccount,
    UnlockCustomerAccount,
    RetrievingAllActions,
    RetrievingAllCustomers,
    RetrievingAllCars,
    RetrievingAllParkings,
    AddingCar,
    DeletingCar,
    ParkingCar,
    LeavingParking,
    RetrievingMostExpensiveCar,
    AddingParking,
    RetrievingParking,
    DeletingParking,
    RetrievingAllCarsFromParking,
    RetrievingCarsCountFromParking,
    RetrievingMostExpensiveCarFromParking,
}

/// Action - mapea exactamente a la tabla `actions`
#[derive(Debug, Clone, FromRow)]
pub struct Action {
    pub id: Uuid,
    pub action_type: ActionType,
    /// "customer", "car" o "parking" cuando la acción apunta a una entidad.
    pub entity_type: Option<String>,
    pub entity_id: Option<Uuid>,
    pub field_name: Option<String>,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl Action {
    /// Acción simple sin entidad asociada (p. ej. listados).
    pub fn of(action_type: ActionType, created_by: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            action_type,
            entity_type: None,
            entity_id: None,
            field_name: None,
            old_value: None,
            new_value: None,
            created_by: created_by.to_string(),
            created_at: Utc::now(),
        }
    }

    /// Acción que apunta a una entidad concreta (alta, borrado, aparcar...).
    pub fn on_entity(
        action_type: ActionType,
        created_by: &str,
        entity_type: &str,
        entity_id: Uuid,
    ) -> Self {
        Self {
            entity_type: Some(entity_type.to_string()),
            entity_id: Some(entity_id),
            ..Self::of(action_type, created_by)
        }
    }

    /// Acción de edición con el valor anterior y el nuevo.
    pub fn edit(
        created_by: &str,
        entity_type: &str,
        entity_id: Uuid,
        field_name: &str,
        old_value: Option<String>,
        new_value: &str,
    ) -> Self {
        Self {
            field_name: Some(field_name.to_string()),
            old_value,
            new_value: Some(new_value.to_string()),
            ..Self::on_entity(ActionType::Edit, created_by, entity_type, entity_id)
        }
    }
}
