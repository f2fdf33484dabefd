// src/models/payment.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::listing::{FieldValue, ListItem};

text_enum! {
    PaymentStatus, "status" {
        Pending => "PENDING",
        Completed => "COMPLETED",
        Failed => "FAILED",
    }
}

text_enum! {
    PaymentMethod, "method" {
        Cash => "CASH",
        BankTransfer => "BANK_TRANSFER",
        Card => "CARD",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Uuid,
    pub apartment_id: String,
    pub amount: Decimal,

    #[sqlx(try_from = "String")]
    pub status: PaymentStatus,
    #[sqlx(try_from = "String")]
    pub method: PaymentMethod,

    pub payment_date: DateTime<Utc>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ListItem for Payment {
    const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("id", "id"),
        ("apartmentId", "apartment_id"),
        ("amount", "amount"),
        ("status", "status"),
        ("method", "method"),
        ("paymentDate", "payment_date"),
        ("note", "note"),
    ];
    const TEXT_FIELDS: &'static [&'static str] = &["apartmentId", "status", "method", "note"];
    const TIMESTAMP_FIELDS: &'static [&'static str] = &["paymentDate"];

    fn field(&self, name: &str) -> Option<FieldValue> {
        let value = match name {
            "id" => FieldValue::from(self.id),
            "apartmentId" => FieldValue::from(&self.apartment_id),
            "amount" => self.amount.into(),
            "status" => self.status.into(),
            "method" => self.method.into(),
            "paymentDate" => self.payment_date.into(),
            "note" => self.note.as_ref().into(),
            _ => return None,
        };
        Some(value)
    }
}

// Linha da tabela-ponte paymentsdetail: qual conta foi quitada por qual pagamento.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetail {
    pub bill_id: Uuid,
    pub payment_id: Uuid,
    #[sqlx(try_from = "String")]
    pub method: PaymentMethod,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentPayload {
    #[validate(length(min = 1, max = 10, message = "O apartamento é obrigatório"))]
    pub apartment_id: String,

    pub amount: Decimal,
    pub method: PaymentMethod,

    #[validate(length(max = 500, message = "Observação muito longa"))]
    pub note: Option<String>,

    // Contas quitadas por este pagamento (pode ser vazio: pagamento avulso)
    #[serde(default)]
    pub bill_ids: Vec<Uuid>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePaymentStatusPayload {
    pub status: PaymentStatus,
}
