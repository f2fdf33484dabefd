// src/services/resident_service.rs

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{DbContext, ResidentRepository},
    models::{
        listing::{FilterSpec, ListQuery},
        resident::{Resident, ResidentPayload},
    },
    views::{ListSource, QuerySource},
};

#[derive(Clone)]
pub struct ResidentService {
    repo: ResidentRepository,
}

impl ResidentService {
    pub fn new(repo: ResidentRepository) -> Self {
        Self { repo }
    }

    pub fn context(&self) -> &DbContext {
        self.repo.context()
    }

    pub async fn fetch_all(&self) -> Result<Vec<Resident>, AppError> {
        self.repo.fetch_all().await
    }

    pub async fn fetch_filtered(&self, query: &ListQuery) -> Result<Vec<Resident>, AppError> {
        self.repo.fetch_filtered(query).await
    }

    pub async fn count(&self, filter: Option<&FilterSpec>) -> Result<i64, AppError> {
        self.repo.count(filter).await
    }

    pub async fn fetch_by_id(&self, id: Uuid) -> Result<Resident, AppError> {
        self.repo
            .fetch_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Morador"))
    }

    pub async fn fetch_household(&self, owner_id: Uuid) -> Result<Vec<Resident>, AppError> {
        self.repo.fetch_household(owner_id).await
    }

    pub async fn create(&self, payload: &ResidentPayload) -> Result<Resident, AppError> {
        self.repo.create(payload).await
    }

    pub async fn update(&self, id: Uuid, payload: &ResidentPayload) -> Result<Resident, AppError> {
        self.repo
            .update(id, payload)
            .await?
            .ok_or(AppError::NotFound("Morador"))
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        self.repo.delete(id).await
    }
}

#[async_trait]
impl ListSource<Resident> for ResidentService {
    async fn load_all(&self) -> Result<Vec<Resident>, AppError> {
        self.fetch_all().await
    }
}

#[async_trait]
impl QuerySource<Resident> for ResidentService {
    async fn query_page(&self, query: &ListQuery) -> Result<Vec<Resident>, AppError> {
        self.fetch_filtered(query).await
    }

    async fn count_matching(&self, filter: Option<&FilterSpec>) -> Result<i64, AppError> {
        self.count(filter).await
    }
}
