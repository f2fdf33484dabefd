// src/models/building.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

// O prédio mora no schema public; os dados dele moram em `schema_name`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Building {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub schema_name: String,
    pub manager_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBuildingPayload {
    #[validate(length(min = 2, max = 128, message = "O nome deve ter entre 2 e 128 caracteres"))]
    pub name: String,

    #[validate(length(min = 3, message = "O endereço é obrigatório"))]
    pub address: String,

    // Validado de verdade por SchemaName::parse
    #[validate(length(min = 1, max = 63, message = "O schema deve ter entre 1 e 63 caracteres"))]
    pub schema_name: String,

    pub manager_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchBuildingPayload {
    // Nulo mantém o prédio atual
    pub building_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentBuildingResponse {
    pub schema_name: String,
    pub building: Option<Building>,
}
