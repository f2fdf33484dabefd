// src/services/dashboard_service.rs

use crate::{
    common::error::AppError,
    db::{DashboardRepository, DbContext},
    models::dashboard::{DashboardSummary, RevenueEntry},
};

#[derive(Clone)]
pub struct DashboardService {
    repo: DashboardRepository,
}

impl DashboardService {
    pub fn new(repo: DashboardRepository) -> Self {
        Self { repo }
    }

    pub fn context(&self) -> &DbContext {
        self.repo.context()
    }

    pub async fn get_summary(&self) -> Result<DashboardSummary, AppError> {
        self.repo.get_summary().await
    }

    pub async fn get_revenue_chart(&self) -> Result<Vec<RevenueEntry>, AppError> {
        self.repo.get_revenue_last_12_months().await
    }
}
