// src/services/bill_service.rs

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{BillRepository, DbContext},
    models::{
        bill::{Bill, CreateBillPayload},
        listing::{FilterSpec, ListQuery},
    },
    views::{ListSource, QuerySource},
};

#[derive(Clone)]
pub struct BillService {
    repo: BillRepository,
}

impl BillService {
    pub fn new(repo: BillRepository) -> Self {
        Self { repo }
    }

    pub fn context(&self) -> &DbContext {
        self.repo.context()
    }

    pub async fn fetch_all(&self) -> Result<Vec<Bill>, AppError> {
        self.repo.fetch_all().await
    }

    pub async fn fetch_filtered(&self, query: &ListQuery) -> Result<Vec<Bill>, AppError> {
        self.repo.fetch_filtered(query).await
    }

    pub async fn count(&self, filter: Option<&FilterSpec>) -> Result<i64, AppError> {
        self.repo.count(filter).await
    }

    pub async fn fetch_by_id(&self, id: Uuid) -> Result<Bill, AppError> {
        self.repo
            .fetch_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Conta"))
    }

    pub async fn fetch_unpaid_by_apartment(&self, apartment_id: &str) -> Result<Vec<Bill>, AppError> {
        self.repo.fetch_unpaid_by_apartment(apartment_id).await
    }

    pub async fn create(&self, payload: &CreateBillPayload) -> Result<Bill, AppError> {
        self.repo.create(payload).await
    }

    pub async fn mark_overdue(&self) -> Result<u64, AppError> {
        let updated = self.repo.mark_overdue().await?;
        if updated > 0 {
            tracing::info!("📅 {} contas marcadas como vencidas em '{}'", updated, self.context().schema());
        }
        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        self.repo.delete(id).await
    }
}

#[async_trait]
impl ListSource<Bill> for BillService {
    async fn load_all(&self) -> Result<Vec<Bill>, AppError> {
        self.fetch_all().await
    }
}

#[async_trait]
impl QuerySource<Bill> for BillService {
    async fn query_page(&self, query: &ListQuery) -> Result<Vec<Bill>, AppError> {
        self.fetch_filtered(query).await
    }

    async fn count_matching(&self, filter: Option<&FilterSpec>) -> Result<i64, AppError> {
        self.count(filter).await
    }
}
