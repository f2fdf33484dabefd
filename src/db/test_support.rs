// src/db/test_support.rs

//! Banco para os testes de repositório. Sem `DATABASE_URL` (ambiente ou
//! `.env`) os testes de banco são pulados.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    db::{
        provision::provision_building_schema, ApartmentRepository, BuildingRepository,
        ContextFactory, DbContext, SchemaName, UserRepository,
    },
    models::{
        apartment::{Apartment, CreateApartmentPayload},
        auth::{User, UserRole},
        building::Building,
    },
};

/// Fábrica com as migrações do public aplicadas.
pub async fn factory() -> Option<ContextFactory> {
    dotenvy::dotenv().ok();
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL não definido: teste de banco pulado");
        return None;
    };

    let factory = ContextFactory::new(Some(url), 2);
    let public = factory.create(&SchemaName::public()).unwrap();
    sqlx::migrate!().run(public.pool()).await.unwrap();
    Some(factory)
}

pub fn unique_schema() -> SchemaName {
    SchemaName::parse(&format!("test_{}", Uuid::new_v4().simple())).unwrap()
}

/// Um prédio recém-criado, com schema próprio.
pub struct TestBuilding {
    pub factory: ContextFactory,
    pub public: DbContext,
    pub ctx: DbContext,
    pub building: Building,
}

impl TestBuilding {
    pub async fn create() -> Option<Self> {
        Self::create_managed_by(None).await
    }

    pub async fn create_managed_by(manager_id: Option<Uuid>) -> Option<Self> {
        let factory = factory().await?;
        let public = factory.create(&SchemaName::public()).unwrap();

        let schema = unique_schema();
        let ctx = factory.create(&schema).unwrap();
        provision_building_schema(ctx.pool(), &schema).await.unwrap();

        let building = BuildingRepository::new(public.clone())
            .create("Prédio de teste", "Rua dos Testes, 1", &schema, manager_id)
            .await
            .unwrap();

        Some(Self { factory, public, ctx, building })
    }

    pub async fn apartment(&self, code: &str, max_population: i32) -> Apartment {
        let payload = CreateApartmentPayload {
            id: code.to_string(),
            floor: 1,
            room_number: 1,
            area: Decimal::new(5000, 2),
            max_population: Some(max_population),
            owner_id: None,
        };
        ApartmentRepository::new(self.ctx.clone())
            .create(self.building.id, &payload)
            .await
            .unwrap()
    }

    /// Apaga o schema e o registro do prédio.
    pub async fn drop(self) {
        sqlx::raw_sql(&format!(r#"DROP SCHEMA IF EXISTS "{}" CASCADE"#, self.ctx.schema()))
            .execute(self.public.pool())
            .await
            .unwrap();
        sqlx::query(&format!("DELETE FROM {} WHERE id = $1", self.public.table("buildings")))
            .bind(self.building.id)
            .execute(self.public.pool())
            .await
            .unwrap();
    }
}

pub async fn user(public: &DbContext, role: UserRole) -> User {
    let username = format!("user_{}", Uuid::new_v4().simple());
    UserRepository::new(public.clone())
        .create_user(&username, "hash", role)
        .await
        .unwrap()
}
