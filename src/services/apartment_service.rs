// src/services/apartment_service.rs

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ApartmentRepository, DbContext},
    models::{
        apartment::{Apartment, ApartmentStatus, CreateApartmentPayload, UpdateApartmentPayload},
        listing::{FilterSpec, ListQuery},
    },
    views::{ListSource, QuerySource},
};

#[derive(Clone)]
pub struct ApartmentService {
    repo: ApartmentRepository,
}

impl ApartmentService {
    pub fn new(repo: ApartmentRepository) -> Self {
        Self { repo }
    }

    pub fn context(&self) -> &DbContext {
        self.repo.context()
    }

    pub async fn fetch_all(&self) -> Result<Vec<Apartment>, AppError> {
        self.repo.fetch_all().await
    }

    pub async fn fetch_filtered(&self, query: &ListQuery) -> Result<Vec<Apartment>, AppError> {
        self.repo.fetch_filtered(query).await
    }

    pub async fn fetch_by_status(&self, status: ApartmentStatus) -> Result<Vec<Apartment>, AppError> {
        self.repo.fetch_by_status(status).await
    }

    pub async fn count(&self, filter: Option<&FilterSpec>) -> Result<i64, AppError> {
        self.repo.count(filter).await
    }

    pub async fn fetch_by_id(&self, id: &str) -> Result<Apartment, AppError> {
        self.repo
            .fetch_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Apartamento"))
    }

    pub async fn create(&self, building_id: Uuid, payload: &CreateApartmentPayload) -> Result<Apartment, AppError> {
        self.repo.create(building_id, payload).await
    }

    pub async fn update(&self, id: &str, payload: &UpdateApartmentPayload) -> Result<Apartment, AppError> {
        self.repo
            .update(id, payload)
            .await?
            .ok_or(AppError::NotFound("Apartamento"))
    }

    pub async fn delete(&self, id: &str) -> Result<bool, AppError> {
        self.repo.delete(id).await
    }
}

#[async_trait]
impl ListSource<Apartment> for ApartmentService {
    async fn load_all(&self) -> Result<Vec<Apartment>, AppError> {
        self.fetch_all().await
    }
}

#[async_trait]
impl QuerySource<Apartment> for ApartmentService {
    async fn query_page(&self, query: &ListQuery) -> Result<Vec<Apartment>, AppError> {
        self.fetch_filtered(query).await
    }

    async fn count_matching(&self, filter: Option<&FilterSpec>) -> Result<i64, AppError> {
        self.count(filter).await
    }
}
