// src/db/user_repo.rs

use uuid::Uuid;

use crate::{
    common::{db_utils::map_db_error, error::AppError},
    db::context::DbContext,
    models::auth::{User, UserRole},
};

// O repositório de usuários, responsável pela tabela 'users' do schema public
#[derive(Clone)]
pub struct UserRepository {
    ctx: DbContext,
}

impl UserRepository {
    pub fn new(ctx: DbContext) -> Self {
        Self { ctx }
    }

    // Busca um usuário pelo login
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT * FROM {} WHERE username = $1", self.ctx.table("users"));
        sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .fetch_optional(self.ctx.pool())
            .await
            .map_err(map_db_error)
    }

    // Busca um usuário pelo seu ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT * FROM {} WHERE id = $1", self.ctx.table("users"));
        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(self.ctx.pool())
            .await
            .map_err(map_db_error)
    }

    // Cria um novo usuário no banco de dados
    pub async fn create_user(
        &self,
        username: &str,
        hashed_password: &str,
        role: UserRole,
    ) -> Result<User, AppError> {
        let sql = format!(
            "INSERT INTO {} (id, username, password_hash, role) VALUES ($1, $2, $3, $4) RETURNING *",
            self.ctx.table("users")
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(Uuid::new_v4())
            .bind(username)
            .bind(hashed_password)
            .bind(role.as_str())
            .fetch_one(self.ctx.pool())
            .await
            .map_err(map_db_error)
    }

    /// Verifica se o usuário pode acessar o prédio: gerente dele ou vinculado em user_buildings.
    pub async fn can_access_building(&self, user_id: Uuid, building_id: Uuid) -> Result<bool, AppError> {
        let sql = format!(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM {buildings} WHERE id = $2 AND manager_id = $1
                UNION ALL
                SELECT 1 FROM {links} WHERE building_id = $2 AND user_id = $1
            )
            "#,
            buildings = self.ctx.table("buildings"),
            links = self.ctx.table("user_buildings"),
        );
        sqlx::query_scalar::<_, bool>(&sql)
            .bind(user_id)
            .bind(building_id)
            .fetch_one(self.ctx.pool())
            .await
            .map_err(map_db_error)
    }
}
