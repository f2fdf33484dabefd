// src/handlers/service_requests.rs

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
        service_request::{ServiceRequest, ServiceRequestPayload, UpdateServiceStatusPayload},
    },
    views::fetch_page,
};

pub async fn list_service_requests(
    ctx: BuildingContext,
    Query(params): Query<ListParams>,
) -> Result<Json<Page<ServiceRequest>>, AppError> {
    let state = params.to_state::<ServiceRequest>()?;
    let page = fetch_page(&ctx.services.service_requests, &state).await?;
    Ok(Json(page))
}

pub async fn get_service_request(
    ctx: BuildingContext,
    Path(id): Path<Uuid>,
) -> Result<Json<ServiceRequest>, AppError> {
    let request = ctx.services.service_requests.fetch_by_id(id).await?;
    Ok(Json(request))
}

pub async fn create_service_request(
    ctx: BuildingContext,
    Json(payload): Json<ServiceRequestPayload>,
) -> Result<(StatusCode, Json<ServiceRequest>), AppError> {
    payload.validate()?;
    let request = ctx.services.service_requests.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

pub async fn update_service_request(
    ctx: BuildingContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<ServiceRequestPayload>,
) -> Result<Json<ServiceRequest>, AppError> {
    payload.validate()?;
    let request = ctx.services.service_requests.update(id, &payload).await?;
    Ok(Json(request))
}

pub async fn update_service_status(
    ctx: BuildingContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateServiceStatusPayload>,
) -> Result<Json<ServiceRequest>, AppError> {
    let request = ctx.services.service_requests.update_status(id, payload.status).await?;
    Ok(Json(request))
}

pub async fn delete_service_request(
    ctx: BuildingContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let deleted = ctx.services.service_requests.delete(id).await?;
    deleted_or_not_found(deleted, "Chamado")
}
