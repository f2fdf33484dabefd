// src/handlers/apartments.rs

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    common::error::AppError,
    handlers::{deleted_or_not_found, ListParams},
    middleware::building::BuildingContext,
    models::{
        apartment::{Apartment, ApartmentStatus, CreateApartmentPayload, UpdateApartmentPayload},
        listing::Page,
    },
    views::fetch_page,
};

pub async fn list_apartments(
    ctx: BuildingContext,
    Query(params): Query<ListParams>,
) -> Result<Json<Page<Apartment>>, AppError> {
    let state = params.to_state::<Apartment>()?;
    let page = fetch_page(&ctx.services.apartments, &state).await?;
    Ok(Json(page))
}

pub async fn list_by_status(
    ctx: BuildingContext,
    Path(status): Path<String>,
) -> Result<Json<Vec<Apartment>>, AppError> {
    let status: ApartmentStatus = status.parse()?;
    let apartments = ctx.services.apartments.fetch_by_status(status).await?;
    Ok(Json(apartments))
}

pub async fn get_apartment(
    ctx: BuildingContext,
    Path(id): Path<String>,
) -> Result<Json<Apartment>, AppError> {
    let apartment = ctx.services.apartments.fetch_by_id(&id).await?;
    Ok(Json(apartment))
}

// O prédio vem do contexto da requisição, não do corpo
pub async fn create_apartment(
    ctx: BuildingContext,
    Json(payload): Json<CreateApartmentPayload>,
) -> Result<(StatusCode, Json<Apartment>), AppError> {
    payload.validate()?;
    let apartment = ctx.services.apartments.create(ctx.building.id, &payload).await?;
    Ok((StatusCode::CREATED, Json(apartment)))
}

pub async fn update_apartment(
    ctx: BuildingContext,
    Path(id): Path<String>,
    Json(payload): Json<UpdateApartmentPayload>,
) -> Result<Json<Apartment>, AppError> {
    payload.validate()?;
    let apartment = ctx.services.apartments.update(&id, &payload).await?;
    Ok(Json(apartment))
}

pub async fn delete_apartment(
    ctx: BuildingContext,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let deleted = ctx.services.apartments.delete(&id).await?;
    deleted_or_not_found(deleted, "Apartamento")
}
