// src/models/resident.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::listing::{FieldValue, ListItem};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Resident {
    pub id: Uuid,
    pub apartment_id: String,

    // Responsável pela família. NULL = este morador é o responsável.
    pub owner_id: Option<Uuid>,

    pub full_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub id_number: String,
    pub date_of_birth: Option<NaiveDate>,
    pub relationship: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Resident {
    pub fn is_head_of_household(&self) -> bool {
        self.owner_id.is_none()
    }
}

impl ListItem for Resident {
    const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("id", "id"),
        ("apartmentId", "apartment_id"),
        ("ownerId", "owner_id"),
        ("fullName", "full_name"),
        ("phone", "phone"),
        ("email", "email"),
        ("idNumber", "id_number"),
        ("dateOfBirth", "date_of_birth"),
        ("relationship", "relationship"),
        ("createdAt", "created_at"),
    ];
    const TEXT_FIELDS: &'static [&'static str] = &["apartmentId", "fullName", "phone", "email", "idNumber", "relationship"];
    const TIMESTAMP_FIELDS: &'static [&'static str] = &["createdAt"];

    fn field(&self, name: &str) -> Option<FieldValue> {
        let value = match name {
            "id" => self.id.into(),
            "apartmentId" => FieldValue::from(&self.apartment_id),
            "ownerId" => self.owner_id.into(),
            "fullName" => FieldValue::from(&self.full_name),
            "phone" => self.phone.as_ref().into(),
            "email" => self.email.as_ref().into(),
            "idNumber" => FieldValue::from(&self.id_number),
            "dateOfBirth" => self.date_of_birth.into(),
            "relationship" => self.relationship.as_ref().into(),
            "createdAt" => self.created_at.into(),
            _ => return None,
        };
        Some(value)
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResidentPayload {
    #[validate(length(min = 1, max = 10, message = "O apartamento é obrigatório"))]
    pub apartment_id: String,

    pub owner_id: Option<Uuid>,

    #[validate(length(min = 2, max = 128, message = "O nome deve ter entre 2 e 128 caracteres"))]
    pub full_name: String,

    #[validate(length(max = 32, message = "Telefone muito longo"))]
    pub phone: Option<String>,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,

    #[validate(length(min = 5, max = 32, message = "O documento deve ter entre 5 e 32 caracteres"))]
    pub id_number: String,

    pub date_of_birth: Option<NaiveDate>,

    #[validate(length(max = 32, message = "Parentesco muito longo"))]
    pub relationship: Option<String>,
}
