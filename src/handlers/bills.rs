// src/handlers/bills.rs

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    handlers::{deleted_or_not_found, ListParams},
    middleware::building::BuildingContext,
    models::{
        bill::{Bill, CreateBillPayload},
        listing::Page,
    },
    views::fetch_page,
};

pub async fn list_bills(
    ctx: BuildingContext,
    Query(params): Query<ListParams>,
) -> Result<Json<Page<Bill>>, AppError> {
    let state = params.to_state::<Bill>()?;
    let page = fetch_page(&ctx.services.bills, &state).await?;
    Ok(Json(page))
}

pub async fn get_bill(
    ctx: BuildingContext,
    Path(id): Path<Uuid>,
) -> Result<Json<Bill>, AppError> {
    let bill = ctx.services.bills.fetch_by_id(id).await?;
    Ok(Json(bill))
}

// Contas em aberto (ou vencidas) de um apartamento: o que pode entrar num pagamento
pub async fn list_unpaid(
    ctx: BuildingContext,
    Path(apartment_id): Path<String>,
) -> Result<Json<Vec<Bill>>, AppError> {
    let bills = ctx.services.bills.fetch_unpaid_by_apartment(&apartment_id).await?;
    Ok(Json(bills))
}

pub async fn create_bill(
    ctx: BuildingContext,
    Json(payload): Json<CreateBillPayload>,
) -> Result<(StatusCode, Json<Bill>), AppError> {
    payload.validate()?;
    let bill = ctx.services.bills.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(bill)))
}

pub async fn mark_overdue(ctx: BuildingContext) -> Result<Json<Value>, AppError> {
    let updated = ctx.services.bills.mark_overdue().await?;
    Ok(Json(json!({ "updated": updated })))
}

pub async fn delete_bill(
    ctx: BuildingContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let deleted = ctx.services.bills.delete(id).await?;
    deleted_or_not_found(deleted, "Conta")
}
