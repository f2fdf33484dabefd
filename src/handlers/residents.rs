// src/handlers/residents.rs

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    handlers::{deleted_or_not_found, ListParams},
    middleware::building::BuildingContext,
    models::{
        listing::Page,
        resident::{Resident, ResidentPayload},
    },
    views::fetch_page,
};

pub async fn list_residents(
    ctx: BuildingContext,
    Query(params): Query<ListParams>,
) -> Result<Json<Page<Resident>>, AppError> {
    let state = params.to_state::<Resident>()?;
    let page = fetch_page(&ctx.services.residents, &state).await?;
    Ok(Json(page))
}

pub async fn get_resident(
    ctx: BuildingContext,
    Path(id): Path<Uuid>,
) -> Result<Json<Resident>, AppError> {
    let resident = ctx.services.residents.fetch_by_id(id).await?;
    Ok(Json(resident))
}

// Moradores ligados a um titular
pub async fn get_household(
    ctx: BuildingContext,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Resident>>, AppError> {
    let members = ctx.services.residents.fetch_household(id).await?;
    Ok(Json(members))
}

pub async fn create_resident(
    ctx: BuildingContext,
    Json(payload): Json<ResidentPayload>,
) -> Result<(StatusCode, Json<Resident>), AppError> {
    payload.validate()?;
    let resident = ctx.services.residents.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(resident)))
}

pub async fn update_resident(
    ctx: BuildingContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<ResidentPayload>,
) -> Result<Json<Resident>, AppError> {
    payload.validate()?;
    let resident = ctx.services.residents.update(id, &payload).await?;
    Ok(Json(resident))
}

pub async fn delete_resident(
    ctx: BuildingContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let deleted = ctx.services.residents.delete(id).await?;
    deleted_or_not_found(deleted, "Morador")
}
