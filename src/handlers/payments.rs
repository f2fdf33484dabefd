// src/handlers/payments.rs

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use rust_decimal::Decimal;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    handlers::{deleted_or_not_found, ListParams},
    middleware::building::BuildingContext,
    models::{
        listing::Page,
        payment::{CreatePaymentPayload, Payment, PaymentDetail, UpdatePaymentStatusPayload},
    },
    views::fetch_page,
};

pub async fn list_payments(
    ctx: BuildingContext,
    Query(params): Query<ListParams>,
) -> Result<Json<Page<Payment>>, AppError> {
    let state = params.to_state::<Payment>()?;
    let page = fetch_page(&ctx.services.payments, &state).await?;
    Ok(Json(page))
}

pub async fn get_payment(
    ctx: BuildingContext,
    Path(id): Path<Uuid>,
) -> Result<Json<Payment>, AppError> {
    let payment = ctx.services.payments.fetch_by_id(id).await?;
    Ok(Json(payment))
}

pub async fn get_payment_details(
    ctx: BuildingContext,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<PaymentDetail>>, AppError> {
    // 404 se o pagamento não existe, em vez de lista vazia
    ctx.services.payments.fetch_by_id(id).await?;
    let details = ctx.services.payments.fetch_details(id).await?;
    Ok(Json(details))
}

pub async fn create_payment(
    ctx: BuildingContext,
    Json(payload): Json<CreatePaymentPayload>,
) -> Result<(StatusCode, Json<Payment>), AppError> {
    payload.validate()?;
    if payload.amount <= Decimal::ZERO {
        return Err(AppError::InsufficientPayment);
    }
    let payment = ctx.services.payments.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

pub async fn update_payment_status(
    ctx: BuildingContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePaymentStatusPayload>,
) -> Result<Json<Payment>, AppError> {
    let payment = ctx.services.payments.update_status(id, payload.status).await?;
    Ok(Json(payment))
}

// Apagar reabre as contas que o pagamento quitava
pub async fn delete_payment(
    ctx: BuildingContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let deleted = ctx.services.payments.delete(id).await?;
    deleted_or_not_found(deleted, "Pagamento")
}
