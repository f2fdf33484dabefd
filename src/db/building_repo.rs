// src/db/building_repo.rs

use uuid::Uuid;

use crate::{
    common::{db_utils::map_db_error, error::AppError},
    db::context::{DbContext, SchemaName},
    models::building::Building,
};

// Prédios ficam no schema public; o contexto recebido deve ser o do public.
#[derive(Clone)]
pub struct BuildingRepository {
    ctx: DbContext,
}

impl BuildingRepository {
    pub fn new(ctx: DbContext) -> Self {
        Self { ctx }
    }

    pub async fn fetch_all(&self) -> Result<Vec<Building>, AppError> {
        let sql = format!("SELECT * FROM {} ORDER BY name ASC", self.ctx.table("buildings"));
        sqlx::query_as::<_, Building>(&sql)
            .fetch_all(self.ctx.pool())
            .await
            .map_err(map_db_error)
    }

    /// Prédios que o usuário gerencia ou aos quais foi vinculado.
    pub async fn fetch_managed_by(&self, user_id: Uuid) -> Result<Vec<Building>, AppError> {
        let sql = format!(
            r#"
            SELECT b.* FROM {buildings} b
            WHERE b.manager_id = $1
               OR EXISTS (SELECT 1 FROM {links} ub WHERE ub.building_id = b.id AND ub.user_id = $1)
            ORDER BY b.name ASC
            "#,
            buildings = self.ctx.table("buildings"),
            links = self.ctx.table("user_buildings"),
        );
        sqlx::query_as::<_, Building>(&sql)
            .bind(user_id)
            .fetch_all(self.ctx.pool())
            .await
            .map_err(map_db_error)
    }

    pub async fn fetch_by_id(&self, id: Uuid) -> Result<Option<Building>, AppError> {
        let sql = format!("SELECT * FROM {} WHERE id = $1", self.ctx.table("buildings"));
        sqlx::query_as::<_, Building>(&sql)
            .bind(id)
            .fetch_optional(self.ctx.pool())
            .await
            .map_err(map_db_error)
    }

    pub async fn fetch_by_schema(&self, schema: &SchemaName) -> Result<Option<Building>, AppError> {
        let sql = format!("SELECT * FROM {} WHERE schema_name = $1", self.ctx.table("buildings"));
        sqlx::query_as::<_, Building>(&sql)
            .bind(schema.as_str())
            .fetch_optional(self.ctx.pool())
            .await
            .map_err(map_db_error)
    }

    pub async fn create(
        &self,
        name: &str,
        address: &str,
        schema: &SchemaName,
        manager_id: Option<Uuid>,
    ) -> Result<Building, AppError> {
        let sql = format!(
            r#"
            INSERT INTO {} (id, name, address, schema_name, manager_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
            self.ctx.table("buildings")
        );
        sqlx::query_as::<_, Building>(&sql)
            .bind(Uuid::new_v4())
            .bind(name)
            .bind(address)
            .bind(schema.as_str())
            .bind(manager_id)
            .fetch_one(self.ctx.pool())
            .await
            .map_err(map_db_error)
    }

    /// Registro do prédio do schema, criado se ainda não existir.
    /// Um registro existente volta como está.
    pub async fn ensure_for_schema(&self, name: &str, schema: &SchemaName) -> Result<Building, AppError> {
        let sql = format!(
            r#"
            INSERT INTO {} (id, name, address, schema_name)
            VALUES ($1, $2, '', $3)
            ON CONFLICT (schema_name) DO UPDATE SET schema_name = EXCLUDED.schema_name
            RETURNING *
            "#,
            self.ctx.table("buildings")
        );
        sqlx::query_as::<_, Building>(&sql)
            .bind(Uuid::new_v4())
            .bind(name)
            .bind(schema.as_str())
            .fetch_one(self.ctx.pool())
            .await
            .map_err(map_db_error)
    }
}
