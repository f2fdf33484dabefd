// src/db/resident_repo.rs

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
        resident::{Resident, ResidentPayload},
    },
};

const TABLE: &str = "residents";

#[derive(Clone)]
pub struct ResidentRepository {
    ctx: DbContext,
}

impl ResidentRepository {
    pub fn new(ctx: DbContext) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &DbContext {
        &self.ctx
    }

    pub async fn fetch_all(&self) -> Result<Vec<Resident>, AppError> {
        fetch_list(&self.ctx, TABLE, &ListQuery::default()).await
    }

    pub async fn fetch_filtered(&self, query: &ListQuery) -> Result<Vec<Resident>, AppError> {
        fetch_list(&self.ctx, TABLE, query).await
    }

    pub async fn count(&self, filter: Option<&FilterSpec>) -> Result<i64, AppError> {
        count_rows::<Resident>(&self.ctx, TABLE, filter).await
    }

    pub async fn fetch_by_id(&self, id: Uuid) -> Result<Option<Resident>, AppError> {
        let sql = format!("SELECT * FROM {} WHERE id = $1", self.ctx.table(TABLE));
        sqlx::query_as::<_, Resident>(&sql)
            .bind(id)
            .fetch_optional(self.ctx.pool())
            .await
            .map_err(map_db_error)
    }

    /// Membros da família de um responsável (sem o próprio responsável).
    pub async fn fetch_household(&self, owner_id: Uuid) -> Result<Vec<Resident>, AppError> {
        let sql = format!(
            "SELECT * FROM {} WHERE owner_id = $1 ORDER BY full_name ASC",
            self.ctx.table(TABLE)
        );
        sqlx::query_as::<_, Resident>(&sql)
            .bind(owner_id)
            .fetch_all(self.ctx.pool())
            .await
            .map_err(map_db_error)
    }

    // =========================================================================
    //  ESCRITA (mantém os contadores do apartamento na mesma transação)
    // =========================================================================

    pub async fn create(&self, payload: &ResidentPayload) -> Result<Resident, AppError> {
        let mut tx = self.ctx.begin().await?;

        let insert = format!(
            r#"
            INSERT INTO {} (
                id, apartment_id, owner_id, full_name, phone, email,
                id_number, date_of_birth, relationship
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
            self.ctx.table(TABLE)
        );
        let resident = sqlx::query_as::<_, Resident>(&insert)
            .bind(Uuid::new_v4())
            .bind(payload.apartment_id.trim())
            .bind(payload.owner_id)
            .bind(&payload.full_name)
            .bind(&payload.phone)
            .bind(&payload.email)
            .bind(&payload.id_number)
            .bind(payload.date_of_birth)
            .bind(&payload.relationship)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_db_error)?;

        // Se o limite estourar, a constraint apartments_population_check derruba a transação.
        let counters = format!(
            r#"
            UPDATE {}
            SET population = population + 1,
                status = CASE WHEN status = 'MAINTENANCE' THEN status ELSE 'OCCUPIED' END,
                owner_id = COALESCE(owner_id, CASE WHEN $2::uuid IS NULL THEN $3::uuid END),
                updated_at = NOW()
            WHERE id = $1
            "#,
            self.ctx.table("apartments")
        );
        sqlx::query(&counters)
            .bind(&resident.apartment_id)
            .bind(resident.owner_id)
            .bind(resident.id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        tx.commit().await?;
        Ok(resident)
    }

    pub async fn update(&self, id: Uuid, payload: &ResidentPayload) -> Result<Option<Resident>, AppError> {
        let sql = format!(
            r#"
            UPDATE {}
            SET owner_id = $2, full_name = $3, phone = $4, email = $5,
                id_number = $6, date_of_birth = $7, relationship = $8, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
            self.ctx.table(TABLE)
        );
        sqlx::query_as::<_, Resident>(&sql)
            .bind(id)
            .bind(payload.owner_id)
            .bind(&payload.full_name)
            .bind(&payload.phone)
            .bind(&payload.email)
            .bind(&payload.id_number)
            .bind(payload.date_of_birth)
            .bind(&payload.relationship)
            .fetch_optional(self.ctx.pool())
            .await
            .map_err(map_db_error)
    }

    /// `false` quando o morador não existe.
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tx = self.ctx.begin().await?;

        let delete = format!(
            "DELETE FROM {} WHERE id = $1 RETURNING apartment_id",
            self.ctx.table(TABLE)
        );
        let apartment_id: Option<String> = sqlx::query_scalar(&delete)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_db_error)?;

        let Some(apartment_id) = apartment_id else {
            return Ok(false);
        };

        let counters = format!(
            r#"
            UPDATE {}
            SET population = GREATEST(population - 1, 0),
                status = CASE
                    WHEN status = 'MAINTENANCE' THEN status
                    WHEN population - 1 <= 0 THEN 'VACANT'
                    ELSE 'OCCUPIED'
                END,
                updated_at = NOW()
            WHERE id = $1
            "#,
            self.ctx.table("apartments")
        );
        sqlx::query(&counters)
            .bind(&apartment_id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        tx.commit().await?;
        Ok(true)
    }
}
