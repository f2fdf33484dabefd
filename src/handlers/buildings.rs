// src/handlers/buildings.rs

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::building::{Building, CreateBuildingPayload, CurrentBuildingResponse, SwitchBuildingPayload},
};

// Admin vê todos; os demais, os prédios que administram
pub async fn list_buildings(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<Vec<Building>>, AppError> {
    let buildings = app_state.building_service.list_for_user(&user).await?;
    Ok(Json(buildings))
}

pub async fn create_building(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateBuildingPayload>,
) -> Result<(StatusCode, Json<Building>), AppError> {
    payload.validate()?;
    let building = app_state.building_service.create(&user, &payload).await?;
    Ok((StatusCode::CREATED, Json(building)))
}

pub async fn get_current_building(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<CurrentBuildingResponse>, AppError> {
    let selector = app_state.selectors.for_user(user.id);
    let current = app_state.building_service.current(&selector).await?;
    Ok(Json(current))
}

// Troca o prédio ativo do usuário. `buildingId` nulo mantém o atual.
pub async fn switch_building(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<SwitchBuildingPayload>,
) -> Result<Json<CurrentBuildingResponse>, AppError> {
    let selector = app_state.selectors.for_user(user.id);
    let current = app_state
        .building_service
        .switch(&selector, &user, payload.building_id)
        .await?;
    Ok(Json(current))
}
