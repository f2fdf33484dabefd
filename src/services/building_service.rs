// src/services/building_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{
        provision::provision_building_schema, BuildingRepository, ContextFactory, DbContext,
        SchemaName, SchemaSelector, UserRepository,
    },
    models::{
        auth::User,
        building::{Building, CreateBuildingPayload, CurrentBuildingResponse},
    },
};

const DEFAULT_BUILDING_NAME: &str = "Prédio padrão";

#[derive(Clone)]
pub struct BuildingService {
    repo: BuildingRepository,
    user_repo: UserRepository,
    factory: ContextFactory,
}

impl BuildingService {
    pub fn new(repo: BuildingRepository, user_repo: UserRepository, factory: ContextFactory) -> Self {
        Self { repo, user_repo, factory }
    }

    /// Lista usada na troca de prédio: admin vê todos, os demais só os seus.
    pub async fn list_for_user(&self, user: &User) -> Result<Vec<Building>, AppError> {
        if user.is_admin() {
            self.repo.fetch_all().await
        } else {
            self.repo.fetch_managed_by(user.id).await
        }
    }

    pub async fn get_accessible(&self, user: &User, building_id: Uuid) -> Result<Building, AppError> {
        let building = self.repo
            .fetch_by_id(building_id)
            .await?
            .ok_or(AppError::BuildingNotFound)?;
        self.check_access(user, &building).await?;
        Ok(building)
    }

    async fn check_access(&self, user: &User, building: &Building) -> Result<(), AppError> {
        if user.is_admin() || building.manager_id == Some(user.id) {
            return Ok(());
        }
        if self.user_repo.can_access_building(user.id, building.id).await? {
            return Ok(());
        }
        tracing::warn!("Usuário {} sem acesso ao prédio {}", user.id, building.id);
        Err(AppError::BuildingAccessDenied)
    }

    /// Cria o prédio e provisiona o schema dele. Só administradores.
    pub async fn create(&self, user: &User, payload: &CreateBuildingPayload) -> Result<Building, AppError> {
        if !user.is_admin() {
            return Err(AppError::BuildingAccessDenied);
        }
        let schema = SchemaName::parse(&payload.schema_name)?;

        // Provisionar é idempotente: se o insert falhar, o schema vazio não atrapalha.
        let ctx = self.factory.create(&schema)?;
        provision_building_schema(ctx.pool(), &schema).await?;

        let building = self.repo
            .create(&payload.name, &payload.address, &schema, payload.manager_id)
            .await?;

        tracing::info!("🏢 Prédio '{}' criado no schema '{}'", building.name, schema);
        Ok(building)
    }

    /// Provisiona o schema padrão e garante o registro do prédio dele:
    /// é para lá que vai quem nunca escolheu um prédio.
    pub async fn ensure_default_building(&self, schema: &SchemaName) -> Result<Building, AppError> {
        let ctx = self.factory.create(schema)?;
        provision_building_schema(ctx.pool(), schema).await?;

        let building = self.repo.ensure_for_schema(DEFAULT_BUILDING_NAME, schema).await?;
        tracing::info!("🏢 Prédio padrão pronto no schema '{}'", schema);
        Ok(building)
    }

    pub async fn current(&self, selector: &SchemaSelector) -> Result<CurrentBuildingResponse, AppError> {
        let schema = selector.current();
        let building = self.repo.fetch_by_schema(&schema).await?;
        Ok(CurrentBuildingResponse {
            schema_name: schema.to_string(),
            building,
        })
    }

    /// Troca o prédio ativo. `None` mantém o atual.
    pub async fn switch(
        &self,
        selector: &SchemaSelector,
        user: &User,
        building_id: Option<Uuid>,
    ) -> Result<CurrentBuildingResponse, AppError> {
        if let Some(building_id) = building_id {
            let building = self.get_accessible(user, building_id).await?;
            selector.set(Some(SchemaName::parse(&building.schema_name)?));
        } else {
            selector.set(None);
        }
        self.current(selector).await
    }

    /// Resolve o contexto de uma requisição: prédio explícito ou o ativo
    /// do seletor do próprio usuário.
    pub async fn resolve_context(
        &self,
        user: &User,
        building_id: Option<Uuid>,
        selector: &SchemaSelector,
    ) -> Result<(Building, DbContext), AppError> {
        let building = match building_id {
            Some(id) => self.get_accessible(user, id).await?,
            None => {
                let building = self.repo
                    .fetch_by_schema(&selector.current())
                    .await?
                    .ok_or(AppError::BuildingNotFound)?;
                self.check_access(user, &building).await?;
                building
            }
        };

        let schema = SchemaName::parse(&building.schema_name)?;
        let ctx = self.factory.create(&schema)?;
        Ok((building, ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{
        test_support::{self, unique_schema, TestBuilding},
        UserSelectors,
    };
    use crate::models::auth::UserRole;

    fn service(db: &TestBuilding) -> BuildingService {
        BuildingService::new(
            BuildingRepository::new(db.public.clone()),
            UserRepository::new(db.public.clone()),
            db.factory.clone(),
        )
    }

    #[tokio::test]
    async fn one_manager_switching_does_not_move_another() {
        let Some(factory) = test_support::factory().await else { return };
        let public = factory.create(&SchemaName::public()).unwrap();
        let m1 = test_support::user(&public, UserRole::Manager).await;
        let m2 = test_support::user(&public, UserRole::Manager).await;

        let Some(x) = TestBuilding::create_managed_by(Some(m1.id)).await else { return };
        let Some(y) = TestBuilding::create_managed_by(Some(m2.id)).await else { return };
        let service = service(&x);
        let selectors = UserSelectors::new(SchemaName::default_schema());

        service.switch(&selectors.for_user(m2.id), &m2, Some(y.building.id)).await.unwrap();
        service.switch(&selectors.for_user(m1.id), &m1, Some(x.building.id)).await.unwrap();

        let (building, ctx) = service
            .resolve_context(&m2, None, &selectors.for_user(m2.id))
            .await
            .unwrap();
        assert_eq!(building.id, y.building.id);
        assert_eq!(ctx.schema(), y.ctx.schema());

        // Prédio alheio continua proibido
        assert!(matches!(
            service.resolve_context(&m2, Some(x.building.id), &selectors.for_user(m2.id)).await,
            Err(AppError::BuildingAccessDenied)
        ));

        x.drop().await;
        y.drop().await;
    }

    #[tokio::test]
    async fn user_without_choice_lands_on_default_building() {
        let Some(db) = TestBuilding::create().await else { return };
        let service = service(&db);
        let admin = test_support::user(&db.public, UserRole::Admin).await;

        let default = unique_schema();
        let created = service.ensure_default_building(&default).await.unwrap();
        let again = service.ensure_default_building(&default).await.unwrap();
        assert_eq!(created.id, again.id);

        let selectors = UserSelectors::new(default.clone());
        let (building, ctx) = service
            .resolve_context(&admin, None, &selectors.for_user(admin.id))
            .await
            .unwrap();
        assert_eq!(building.id, created.id);
        assert_eq!(ctx.schema(), &default);

        let default_db = TestBuilding {
            factory: db.factory.clone(),
            public: db.public.clone(),
            ctx,
            building,
        };
        default_db.drop().await;
        db.drop().await;
    }
}
