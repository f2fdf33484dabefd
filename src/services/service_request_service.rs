// src/services/service_request_service.rs

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{DbContext, ServiceRequestRepository},
    models::{
        listing::{FilterSpec, ListQuery},
        service_request::{ServiceRequest, ServiceRequestPayload, ServiceRequestStatus},
    },
    views::{ListSource, QuerySource},
};

#[derive(Clone)]
pub struct ServiceRequestService {
    repo: ServiceRequestRepository,
}

impl ServiceRequestService {
    pub fn new(repo: ServiceRequestRepository) -> Self {
        Self { repo }
    }

    pub fn context(&self) -> &DbContext {
        self.repo.context()
    }

    pub async fn fetch_all(&self) -> Result<Vec<ServiceRequest>, AppError> {
        self.repo.fetch_all().await
    }

    pub async fn fetch_filtered(&self, query: &ListQuery) -> Result<Vec<ServiceRequest>, AppError> {
        self.repo.fetch_filtered(query).await
    }

    pub async fn count(&self, filter: Option<&FilterSpec>) -> Result<i64, AppError> {
        self.repo.count(filter).await
    }

    pub async fn fetch_by_id(&self, id: Uuid) -> Result<ServiceRequest, AppError> {
        self.repo
            .fetch_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Chamado"))
    }

    pub async fn create(&self, payload: &ServiceRequestPayload) -> Result<ServiceRequest, AppError> {
        self.repo.create(payload).await
    }

    pub async fn update(&self, id: Uuid, payload: &ServiceRequestPayload) -> Result<ServiceRequest, AppError> {
        self.repo
            .update(id, payload)
            .await?
            .ok_or(AppError::NotFound("Chamado"))
    }

    /// Repassa a mensagem da constraint quando a troca de status é recusada pelo banco.
    pub async fn update_status(&self, id: Uuid, status: ServiceRequestStatus) -> Result<ServiceRequest, AppError> {
        let updated = self.repo.update_status(id, status).await.map_err(|e| {
            if let AppError::ConstraintViolation { message, .. } = &e {
                tracing::warn!("Troca de status recusada para o chamado {}: {}", id, message);
            }
            e
        })?;

        if !updated {
            return Err(AppError::NotFound("Chamado"));
        }
        self.fetch_by_id(id).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        self.repo.delete(id).await
    }
}

#[async_trait]
impl ListSource<ServiceRequest> for ServiceRequestService {
    async fn load_all(&self) -> Result<Vec<ServiceRequest>, AppError> {
        self.fetch_all().await
    }
}

#[async_trait]
impl QuerySource<ServiceRequest> for ServiceRequestService {
    async fn query_page(&self, query: &ListQuery) -> Result<Vec<ServiceRequest>, AppError> {
        self.fetch_filtered(query).await
    }

    async fn count_matching(&self, filter: Option<&FilterSpec>) -> Result<i64, AppError> {
        self.count(filter).await
    }
}
