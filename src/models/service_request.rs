// src/models/service_request.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::listing::{FieldValue, ListItem};

text_enum! {
    ServiceCategory, "category" {
        Cleaning => "CLEANING",
        Repair => "REPAIR",
        Security => "SECURITY",
        Internet => "INTERNET",
        Other => "OTHER",
    }
}

text_enum! {
    ServiceRequestStatus, "status" {
        Pending => "PENDING",
        InProgress => "IN_PROGRESS",
        Completed => "COMPLETED",
        Cancelled => "CANCELLED",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequest {
    pub id: Uuid,
    pub apartment_id: String,
    pub resident_id: Option<Uuid>,

    #[sqlx(try_from = "String")]
    pub category: ServiceCategory,
    pub description: String,

    #[sqlx(try_from = "String")]
    pub status: ServiceRequestStatus,
    pub amount: Decimal,

    pub request_date: DateTime<Utc>,
    pub completed_date: Option<DateTime<Utc>>,
}

impl ListItem for ServiceRequest {
    const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("id", "id"),
        ("apartmentId", "apartment_id"),
        ("residentId", "resident_id"),
        ("category", "category"),
        ("description", "description"),
        ("status", "status"),
        ("amount", "amount"),
        ("requestDate", "request_date"),
        ("completedDate", "completed_date"),
    ];
    const TEXT_FIELDS: &'static [&'static str] = &["apartmentId", "category", "description", "status"];
    const TIMESTAMP_FIELDS: &'static [&'static str] = &["requestDate", "completedDate"];

    fn field(&self, name: &str) -> Option<FieldValue> {
        let value = match name {
            "id" => FieldValue::from(self.id),
            "apartmentId" => FieldValue::from(&self.apartment_id),
            "residentId" => self.resident_id.into(),
            "category" => self.category.into(),
            "description" => FieldValue::from(&self.description),
            "status" => self.status.into(),
            "amount" => self.amount.into(),
            "requestDate" => self.request_date.into(),
            "completedDate" => self.completed_date.into(),
            _ => return None,
        };
        Some(value)
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequestPayload {
    #[validate(length(min = 1, max = 10, message = "O apartamento é obrigatório"))]
    pub apartment_id: String,

    pub resident_id: Option<Uuid>,
    pub category: ServiceCategory,

    #[validate(length(min = 3, max = 2000, message = "A descrição deve ter entre 3 e 2000 caracteres"))]
    pub description: String,

    #[serde(default)]
    pub amount: Decimal,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServiceStatusPayload {
    pub status: ServiceRequestStatus,
}
