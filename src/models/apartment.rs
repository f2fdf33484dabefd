// src/models/apartment.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::listing::{FieldValue, ListItem};

text_enum! {
    ApartmentStatus, "status" {
        Vacant => "VACANT",
        Occupied => "OCCUPIED",
        Maintenance => "MAINTENANCE",
    }
}

// O id é o código da unidade: bloco + andar (2 dígitos) + unidade (2 dígitos), ex: "A0512".
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Apartment {
    pub id: String,
    pub building_id: Uuid,
    pub owner_id: Option<Uuid>,

    pub floor: i32,
    pub room_number: i32,
    pub area: Decimal,

    // Contadores de ocupação
    pub population: i32,
    pub max_population: i32,

    #[sqlx(try_from = "String")]
    pub status: ApartmentStatus,
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ListItem for Apartment {
    const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("id", "id"),
        ("ownerId", "owner_id"),
        ("floor", "floor"),
        ("roomNumber", "room_number"),
        ("area", "area"),
        ("population", "population"),
        ("maxPopulation", "max_population"),
        ("status", "status"),
        ("isActive", "is_active"),
        ("createdAt", "created_at"),
        ("updatedAt", "updated_at"),
    ];
    const TEXT_FIELDS: &'static [&'static str] = &["id", "status"];
    const TIMESTAMP_FIELDS: &'static [&'static str] = &["createdAt", "updatedAt"];

    fn field(&self, name: &str) -> Option<FieldValue> {
        let value = match name {
            "id" => FieldValue::from(&self.id),
            "ownerId" => self.owner_id.into(),
            "floor" => self.floor.into(),
            "roomNumber" => self.room_number.into(),
            "area" => self.area.into(),
            "population" => self.population.into(),
            "maxPopulation" => self.max_population.into(),
            "status" => self.status.into(),
            "isActive" => self.is_active.into(),
            "createdAt" => self.created_at.into(),
            "updatedAt" => self.updated_at.into(),
            _ => return None,
        };
        Some(value)
    }
}

// O formato do código não é validado aqui: quem rejeita é a constraint
// apartments_id_format_check, traduzida em db_utils.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateApartmentPayload {
    #[validate(length(min = 1, max = 10, message = "O código deve ter entre 1 e 10 caracteres"))]
    pub id: String,

    pub floor: i32,
    pub room_number: i32,

    #[serde(default)]
    pub area: Decimal,

    #[validate(range(min = 1, max = 20, message = "A lotação máxima deve estar entre 1 e 20"))]
    pub max_population: Option<i32>,

    pub owner_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateApartmentPayload {
    pub floor: i32,
    pub room_number: i32,
    pub area: Decimal,

    #[validate(range(min = 1, max = 20, message = "A lotação máxima deve estar entre 1 e 20"))]
    pub max_population: i32,

    pub owner_id: Option<Uuid>,
    pub status: ApartmentStatus,
    pub is_active: bool,
}
