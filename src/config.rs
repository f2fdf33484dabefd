// src/config.rs

pub mod settings;

pub use settings::Settings;

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{BuildingRepository, ContextFactory, SchemaName, UserRepository, UserSelectors},
    services::{AuthService, BuildingService},
};

#[derive(Clone)]
pub struct AppState {
    // Pool do schema public (usuários e prédios)
    pub db_pool: PgPool,
    pub factory: ContextFactory,
    // Prédio ativo de cada usuário
    pub selectors: UserSelectors,
    pub auth_service: AuthService,
    pub building_service: BuildingService,
}

impl AppState {
    /// Monta o gráfico de dependências. As pools são preguiçosas:
    /// nenhuma conexão é aberta aqui.
    pub fn new(settings: &Settings) -> Result<Self, AppError> {
        let factory = ContextFactory::new(settings.database_url.clone(), settings.db_max_connections);
        let selectors = UserSelectors::new(settings.default_schema.clone());

        let public = factory.create(&SchemaName::public())?;
        let user_repo = UserRepository::new(public.clone());
        let building_repo = BuildingRepository::new(public.clone());

        let auth_service = AuthService::new(user_repo.clone(), settings.jwt_secret.clone());
        let building_service = BuildingService::new(building_repo, user_repo, factory.clone());

        Ok(Self {
            db_pool: public.pool().clone(),
            factory,
            selectors,
            auth_service,
            building_service,
        })
    }
}
