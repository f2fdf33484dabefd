// src/handlers/dashboard.rs

use axum::Json;

use crate::{
    common::error::AppError,
    middleware::building::BuildingContext,
    models::dashboard::{DashboardSummary, RevenueEntry},
};

pub async fn get_summary(ctx: BuildingContext) -> Result<Json<DashboardSummary>, AppError> {
    let summary = ctx.services.dashboard.get_summary().await?;
    Ok(Json(summary))
}

pub async fn get_revenue(ctx: BuildingContext) -> Result<Json<Vec<RevenueEntry>>, AppError> {
    let revenue = ctx.services.dashboard.get_revenue_chart().await?;
    Ok(Json(revenue))
}
