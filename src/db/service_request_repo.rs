// src/db/service_request_repo.rs

use uuid::Uuid;

use crate::{
    common::{
        db_utils::map_db_error,
        error::AppError,
        query::{count_rows, fetch_list},
    },
    db::context::DbContext,
    models::{
        listing::{FilterSpec, ListQuery},
        service_request::{ServiceRequest, ServiceRequestPayload, ServiceRequestStatus},
    },
};

const TABLE: &str = "service_requests";

#[derive(Clone)]
pub struct ServiceRequestRepository {
    ctx: DbContext,
}

impl ServiceRequestRepository {
    pub fn new(ctx: DbContext) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &DbContext {
        &self.ctx
    }

    pub async fn fetch_all(&self) -> Result<Vec<ServiceRequest>, AppError> {
        fetch_list(&self.ctx, TABLE, &ListQuery::default()).await
    }

    pub async fn fetch_filtered(&self, query: &ListQuery) -> Result<Vec<ServiceRequest>, AppError> {
        fetch_list(&self.ctx, TABLE, query).await
    }

    pub async fn count(&self, filter: Option<&FilterSpec>) -> Result<i64, AppError> {
        count_rows::<ServiceRequest>(&self.ctx, TABLE, filter).await
    }

    pub async fn fetch_by_id(&self, id: Uuid) -> Result<Option<ServiceRequest>, AppError> {
        let sql = format!("SELECT * FROM {} WHERE id = $1", self.ctx.table(TABLE));
        sqlx::query_as::<_, ServiceRequest>(&sql)
            .bind(id)
            .fetch_optional(self.ctx.pool())
            .await
            .map_err(map_db_error)
    }

    pub async fn create(&self, payload: &ServiceRequestPayload) -> Result<ServiceRequest, AppError> {
        let sql = format!(
            r#"
            INSERT INTO {} (id, apartment_id, resident_id, category, description, amount)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
            self.ctx.table(TABLE)
        );
        sqlx::query_as::<_, ServiceRequest>(&sql)
            .bind(Uuid::new_v4())
            .bind(payload.apartment_id.trim())
            .bind(payload.resident_id)
            .bind(payload.category.as_str())
            .bind(&payload.description)
            .bind(payload.amount)
            .fetch_one(self.ctx.pool())
            .await
            .map_err(map_db_error)
    }

    pub async fn update(&self, id: Uuid, payload: &ServiceRequestPayload) -> Result<Option<ServiceRequest>, AppError> {
        let sql = format!(
            r#"
            UPDATE {}
            SET apartment_id = $2, resident_id = $3, category = $4, description = $5, amount = $6
            WHERE id = $1
            RETURNING *
            "#,
            self.ctx.table(TABLE)
        );
        sqlx::query_as::<_, ServiceRequest>(&sql)
            .bind(id)
            .bind(payload.apartment_id.trim())
            .bind(payload.resident_id)
            .bind(payload.category.as_str())
            .bind(&payload.description)
            .bind(payload.amount)
            .fetch_optional(self.ctx.pool())
            .await
            .map_err(map_db_error)
    }

    /// Troca de status em SQL direto, qualificado pelo schema do contexto.
    /// Ao concluir, grava a data de conclusão; ao reabrir, limpa.
    pub async fn update_status(&self, id: Uuid, status: ServiceRequestStatus) -> Result<bool, AppError> {
        let sql = format!(
            r#"
            UPDATE "{}".service_requests
            SET status = $2::text,
                completed_date = CASE WHEN $2::text = 'COMPLETED' THEN NOW() ELSE NULL END
            WHERE id = $1
            "#,
            self.ctx.schema()
        );
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(status.as_str())
            .execute(self.ctx.pool())
            .await
            .map_err(map_db_error)?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", self.ctx.table(TABLE));
        let result = sqlx::query(&sql)
            .bind(id)
            .execute(self.ctx.pool())
            .await
            .map_err(map_db_error)?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::TestBuilding;
    use crate::models::service_request::ServiceCategory;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn status_update_sets_and_clears_completion_date() {
        let Some(db) = TestBuilding::create().await else { return };
        let repo = ServiceRequestRepository::new(db.ctx.clone());
        db.apartment("A0101", 4).await;

        let request = repo
            .create(&ServiceRequestPayload {
                apartment_id: "A0101".into(),
                resident_id: None,
                category: ServiceCategory::Repair,
                description: "Vazamento na cozinha".into(),
                amount: Decimal::new(15000, 2),
            })
            .await
            .unwrap();
        assert_eq!(request.status, ServiceRequestStatus::Pending);

        assert!(repo.update_status(request.id, ServiceRequestStatus::Completed).await.unwrap());
        let done = repo.fetch_by_id(request.id).await.unwrap().unwrap();
        assert_eq!(done.status, ServiceRequestStatus::Completed);
        assert!(done.completed_date.is_some());

        assert!(repo.update_status(request.id, ServiceRequestStatus::InProgress).await.unwrap());
        let reopened = repo.fetch_by_id(request.id).await.unwrap().unwrap();
        assert_eq!(reopened.status, ServiceRequestStatus::InProgress);
        assert_eq!(reopened.completed_date, None);

        assert!(!repo.update_status(Uuid::new_v4(), ServiceRequestStatus::Cancelled).await.unwrap());
        assert!(!repo.delete(Uuid::new_v4()).await.unwrap());

        db.drop().await;
    }
}
