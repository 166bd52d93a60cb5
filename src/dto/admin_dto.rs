use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::action::{Action, ActionType};
use crate::utils::validation::validate_not_blank;

// Edición de un único campo de un customer, car o parking
#[derive(Debug, Deserialize, Validate)]
pub struct EditCommand {
    #[validate(length(min = 1, max = 50), custom = "validate_not_blank")]
    pub field_name: String,

    #[validate(length(min = 1, max = 200))]
    pub new_value: String,
}

// Response de una entrada de auditoría
#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub id: Uuid,
    pub action_type: ActionType,
    pub entity_type: Option<String>,
    pub entity_id: Option<Uuid>,
    pub field_name: Option<String>,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl From<Action> for ActionResponse {
    fn from(action: Action) -> Self {
        Self {
            id: action.id,
            action_type: action.action_type,
            entity_type: action.entity_type,
            entity_id: action.entity_id,
            field_name: action.field_name,
            old_value: action.old_value,
            new_value: action.new_value,
            created_by: action.created_by,
            created_at: action.created_at,
        }
    }
}
