// src/models/bill.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::listing::{FieldValue, ListItem};

text_enum! {
    BillType, "billType" {
        Electricity => "ELECTRICITY",
        Water => "WATER",
        Management => "MANAGEMENT",
        Parking => "PARKING",
        Service => "SERVICE",
        Other => "OTHER",
    }
}

text_enum! {
    BillStatus, "status" {
        Unpaid => "UNPAID",
        Paid => "PAID",
        Overdue => "OVERDUE",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: Uuid,
    pub apartment_id: String,

    #[sqlx(try_from = "String")]
    pub bill_type: BillType,
    pub amount: Decimal,
    pub due_date: NaiveDate,

    #[sqlx(try_from = "String")]
    pub status: BillStatus,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ListItem for Bill {
    const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("id", "id"),
        ("apartmentId", "apartment_id"),
        ("billType", "bill_type"),
        ("amount", "amount"),
        ("dueDate", "due_date"),
        ("status", "status"),
        ("createdAt", "created_at"),
    ];
    const TEXT_FIELDS: &'static [&'static str] = &["apartmentId", "billType", "status"];
    const TIMESTAMP_FIELDS: &'static [&'static str] = &["createdAt"];

    fn field(&self, name: &str) -> Option<FieldValue> {
        let value = match name {
            "id" => FieldValue::from(self.id),
            "apartmentId" => FieldValue::from(&self.apartment_id),
            "billType" => self.bill_type.into(),
            "amount" => self.amount.into(),
            "dueDate" => self.due_date.into(),
            "status" => self.status.into(),
            "createdAt" => self.created_at.into(),
            _ => return None,
        };
        Some(value)
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBillPayload {
    #[validate(length(min = 1, max = 10, message = "O apartamento é obrigatório"))]
    pub apartment_id: String,
    pub bill_type: BillType,
    pub amount: Decimal,
    pub due_date: NaiveDate,
}
