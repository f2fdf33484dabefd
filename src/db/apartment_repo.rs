// src/db/apartment_repo.rs

use uuid::Uuid;

use crate::{
    common::{
        db_utils::map_db_error,
        error::AppError,
        query::{count_rows, fetch_list},
    },
    db::context::DbContext,
    models::{
        apartment::{Apartment, ApartmentStatus, CreateApartmentPayload, UpdateApartmentPayload},
        listing::{FilterSpec, ListQuery},
    },
};

const TABLE: &str = "apartments";

#[derive(Clone)]
pub struct ApartmentRepository {
    ctx: DbContext,
}

impl ApartmentRepository {
    pub fn new(ctx: DbContext) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &DbContext {
        &self.ctx
    }

    pub async fn fetch_all(&self) -> Result<Vec<Apartment>, AppError> {
        fetch_list(&self.ctx, TABLE, &ListQuery::default()).await
    }

    pub async fn fetch_filtered(&self, query: &ListQuery) -> Result<Vec<Apartment>, AppError> {
        fetch_list(&self.ctx, TABLE, query).await
    }

    pub async fn count(&self, filter: Option<&FilterSpec>) -> Result<i64, AppError> {
        count_rows::<Apartment>(&self.ctx, TABLE, filter).await
    }

    pub async fn fetch_by_id(&self, id: &str) -> Result<Option<Apartment>, AppError> {
        let sql = format!("SELECT * FROM {} WHERE id = $1", self.ctx.table(TABLE));
        sqlx::query_as::<_, Apartment>(&sql)
            .bind(id)
            .fetch_optional(self.ctx.pool())
            .await
            .map_err(map_db_error)
    }

    pub async fn fetch_by_status(&self, status: ApartmentStatus) -> Result<Vec<Apartment>, AppError> {
        let sql = format!(
            "SELECT * FROM {} WHERE status = $1 ORDER BY id ASC",
            self.ctx.table(TABLE)
        );
        sqlx::query_as::<_, Apartment>(&sql)
            .bind(status.as_str())
            .fetch_all(self.ctx.pool())
            .await
            .map_err(map_db_error)
    }

    pub async fn create(
        &self,
        building_id: Uuid,
        payload: &CreateApartmentPayload,
    ) -> Result<Apartment, AppError> {
        let sql = format!(
            r#"
            INSERT INTO {} (id, building_id, owner_id, floor, room_number, area, max_population)
            VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 4))
            RETURNING *
            "#,
            self.ctx.table(TABLE)
        );
        sqlx::query_as::<_, Apartment>(&sql)
            .bind(payload.id.trim())
            .bind(building_id)
            .bind(payload.owner_id)
            .bind(payload.floor)
            .bind(payload.room_number)
            .bind(payload.area)
            .bind(payload.max_population)
            .fetch_one(self.ctx.pool())
            .await
            .map_err(map_db_error)
    }

    /// `None` quando o apartamento não existe.
    pub async fn update(
        &self,
        id: &str,
        payload: &UpdateApartmentPayload,
    ) -> Result<Option<Apartment>, AppError> {
        let sql = format!(
            r#"
            UPDATE {}
            SET owner_id = $2, floor = $3, room_number = $4, area = $5,
                max_population = $6, status = $7, is_active = $8, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
            self.ctx.table(TABLE)
        );
        sqlx::query_as::<_, Apartment>(&sql)
            .bind(id)
            .bind(payload.owner_id)
            .bind(payload.floor)
            .bind(payload.room_number)
            .bind(payload.area)
            .bind(payload.max_population)
            .bind(payload.status.as_str())
            .bind(payload.is_active)
            .fetch_optional(self.ctx.pool())
            .await
            .map_err(map_db_error)
    }

    /// `false` quando não havia nada para apagar.
    pub async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", self.ctx.table(TABLE));
        let result = sqlx::query(&sql)
            .bind(id)
            .execute(self.ctx.pool())
            .await
            .map_err(map_db_error)?;
        Ok(result.rows_affected() > 0)
    }
}
