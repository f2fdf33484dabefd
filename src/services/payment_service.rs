// src/services/payment_service.rs

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{DbContext, PaymentRepository},
    models::{
        listing::{FilterSpec, ListQuery},
        payment::{CreatePaymentPayload, Payment, PaymentDetail, PaymentStatus},
    },
    views::{ListSource, QuerySource},
};

#[derive(Clone)]
pub struct PaymentService {
    repo: PaymentRepository,
}

impl PaymentService {
    pub fn new(repo: PaymentRepository) -> Self {
        Self { repo }
    }

    pub fn context(&self) -> &DbContext {
        self.repo.context()
    }

    pub async fn fetch_all(&self) -> Result<Vec<Payment>, AppError> {
        self.repo.fetch_all().await
    }

    pub async fn fetch_filtered(&self, query: &ListQuery) -> Result<Vec<Payment>, AppError> {
        self.repo.fetch_filtered(query).await
    }

    pub async fn count(&self, filter: Option<&FilterSpec>) -> Result<i64, AppError> {
        self.repo.count(filter).await
    }

    pub async fn fetch_by_id(&self, id: Uuid) -> Result<Payment, AppError> {
        self.repo
            .fetch_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Pagamento"))
    }

    pub async fn fetch_details(&self, payment_id: Uuid) -> Result<Vec<PaymentDetail>, AppError> {
        self.repo.fetch_details(payment_id).await
    }

    /// Registra o pagamento e quita as contas selecionadas, tudo ou nada.
    pub async fn create(&self, payload: &CreatePaymentPayload) -> Result<Payment, AppError> {
        self.repo.create_with_allocations(payload).await
    }

    pub async fn update_status(&self, id: Uuid, status: PaymentStatus) -> Result<Payment, AppError> {
        self.repo
            .update_status(id, status)
            .await?
            .ok_or(AppError::NotFound("Pagamento"))
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        self.repo.delete(id).await
    }
}

#[async_trait]
impl ListSource<Payment> for PaymentService {
    async fn load_all(&self) -> Result<Vec<Payment>, AppError> {
        self.fetch_all().await
    }
}

#[async_trait]
impl QuerySource<Payment> for PaymentService {
    async fn query_page(&self, query: &ListQuery) -> Result<Vec<Payment>, AppError> {
        self.fetch_filtered(query).await
    }

    async fn count_matching(&self, filter: Option<&FilterSpec>) -> Result<i64, AppError> {
        self.count(filter).await
    }
}
