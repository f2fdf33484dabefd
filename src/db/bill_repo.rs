// src/db/bill_repo.rs

use uuid::Uuid;

use crate::{
    common::{
        db_utils::map_db_error,
        error::AppError,
        query::{count_rows, fetch_list},
    },
    db::context::DbContext,
    models::{
        bill::{Bill, CreateBillPayload},
        listing::{FilterSpec, ListQuery},
    },
};

const TABLE: &str = "bills";

#[derive(Clone)]
pub struct BillRepository {
    ctx: DbContext,
}

impl BillRepository {
    pub fn new(ctx: DbContext) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &DbContext {
        &self.ctx
    }

    pub async fn fetch_all(&self) -> Result<Vec<Bill>, AppError> {
        fetch_list(&self.ctx, TABLE, &ListQuery::default()).await
    }

    pub async fn fetch_filtered(&self, query: &ListQuery) -> Result<Vec<Bill>, AppError> {
        fetch_list(&self.ctx, TABLE, query).await
    }

    pub async fn count(&self, filter: Option<&FilterSpec>) -> Result<i64, AppError> {
        count_rows::<Bill>(&self.ctx, TABLE, filter).await
    }

    pub async fn fetch_by_id(&self, id: Uuid) -> Result<Option<Bill>, AppError> {
        let sql = format!("SELECT * FROM {} WHERE id = $1", self.ctx.table(TABLE));
        sqlx::query_as::<_, Bill>(&sql)
            .bind(id)
            .fetch_optional(self.ctx.pool())
            .await
            .map_err(map_db_error)
    }

    /// Contas em aberto (não pagas ou vencidas) de um apartamento, da mais antiga para a mais nova.
    pub async fn fetch_unpaid_by_apartment(&self, apartment_id: &str) -> Result<Vec<Bill>, AppError> {
        let sql = format!(
            r#"
            SELECT * FROM {}
            WHERE apartment_id = $1 AND status IN ('UNPAID', 'OVERDUE')
            ORDER BY due_date ASC, id ASC
            "#,
            self.ctx.table(TABLE)
        );
        sqlx::query_as::<_, Bill>(&sql)
            .bind(apartment_id)
            .fetch_all(self.ctx.pool())
            .await
            .map_err(map_db_error)
    }

    pub async fn create(&self, payload: &CreateBillPayload) -> Result<Bill, AppError> {
        let sql = format!(
            r#"
            INSERT INTO {} (id, apartment_id, bill_type, amount, due_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
            self.ctx.table(TABLE)
        );
        sqlx::query_as::<_, Bill>(&sql)
            .bind(Uuid::new_v4())
            .bind(payload.apartment_id.trim())
            .bind(payload.bill_type.as_str())
            .bind(payload.amount)
            .bind(payload.due_date)
            .fetch_one(self.ctx.pool())
            .await
            .map_err(map_db_error)
    }

    /// Marca como vencidas as contas não pagas com vencimento anterior a hoje.
    pub async fn mark_overdue(&self) -> Result<u64, AppError> {
        let sql = format!(
            r#"
            UPDATE {}
            SET status = 'OVERDUE', updated_at = NOW()
            WHERE status = 'UNPAID' AND due_date < CURRENT_DATE
            "#,
            self.ctx.table(TABLE)
        );
        let result = sqlx::query(&sql)
            .execute(self.ctx.pool())
            .await
            .map_err(map_db_error)?;
        Ok(result.rows_affected())
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
