// src/db/provision.rs

use sqlx::PgPool;

use crate::common::error::AppError;
use crate::db::context::SchemaName;

/// Versão do layout das tabelas de prédio. Entra na chave do cache de
/// pools; incremente ao mudar o DDL abaixo.
pub const MAPPING_VERSION: u32 = 1;

/// Cria (se não existir) o schema do prédio com todas as tabelas.
/// Idempotente: pode rodar a cada criação de prédio ou no boot.
pub async fn provision_building_schema(pool: &PgPool, schema: &SchemaName) -> Result<(), AppError> {
    let s = schema.as_str();

    // --- Schema ---
    sqlx::raw_sql(&format!(r#"CREATE SCHEMA IF NOT EXISTS "{s}""#))
        .execute(pool)
        .await?;

    // --- Apartamentos ---
    sqlx::raw_sql(&format!(
        r#"CREATE TABLE IF NOT EXISTS "{s}".apartments (
            id             VARCHAR(10) NOT NULL
                           CONSTRAINT apartments_pkey PRIMARY KEY
                           CONSTRAINT apartments_id_format_check CHECK (id ~ '^[A-Z][0-9]{{4}}$'),
            building_id    UUID NOT NULL REFERENCES public.buildings(id) ON DELETE CASCADE,
            owner_id       UUID,
            floor          INT NOT NULL
                           CONSTRAINT apartments_floor_check CHECK (floor BETWEEN 1 AND 40),
            room_number    INT NOT NULL
                           CONSTRAINT apartments_room_check CHECK (room_number BETWEEN 1 AND 30),
            area           NUMERIC(10, 2) NOT NULL DEFAULT 0,
            population     INT NOT NULL DEFAULT 0,
            max_population INT NOT NULL DEFAULT 4,
            status         TEXT NOT NULL DEFAULT 'VACANT'
                           CHECK (status IN ('VACANT', 'OCCUPIED', 'MAINTENANCE')),
            is_active      BOOLEAN NOT NULL DEFAULT TRUE,
            created_at     TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at     TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            CONSTRAINT apartments_population_check CHECK (population BETWEEN 0 AND max_population)
        )"#
    ))
    .execute(pool)
    .await?;

    // --- Moradores (owner_id = responsável pela família; NULL = o próprio) ---
    sqlx::raw_sql(&format!(
        r#"CREATE TABLE IF NOT EXISTS "{s}".residents (
            id            UUID PRIMARY KEY,
            apartment_id  VARCHAR(10) NOT NULL
                          CONSTRAINT residents_apartment_id_fkey
                          REFERENCES "{s}".apartments(id) ON DELETE CASCADE,
            owner_id      UUID
                          CONSTRAINT residents_owner_id_fkey
                          REFERENCES "{s}".residents(id) ON DELETE SET NULL,
            full_name     VARCHAR(128) NOT NULL,
            phone         VARCHAR(32),
            email         VARCHAR(255),
            id_number     VARCHAR(32) NOT NULL
                          CONSTRAINT residents_id_number_key UNIQUE,
            date_of_birth DATE,
            relationship  VARCHAR(32),
            created_at    TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at    TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )"#
    ))
    .execute(pool)
    .await?;

    // A FK do proprietário só pode existir depois da tabela de moradores.
    sqlx::raw_sql(&format!(
        r#"DO $$ BEGIN
             IF NOT EXISTS (
               SELECT 1 FROM pg_constraint c
               JOIN pg_namespace n ON n.oid = c.connamespace
               WHERE c.conname = 'apartments_owner_id_fkey' AND n.nspname = '{s}'
             ) THEN
               ALTER TABLE "{s}".apartments
                 ADD CONSTRAINT apartments_owner_id_fkey
                 FOREIGN KEY (owner_id) REFERENCES "{s}".residents(id) ON DELETE SET NULL;
             END IF;
           END $$"#
    ))
    .execute(pool)
    .await?;

    // --- Contas ---
    sqlx::raw_sql(&format!(
        r#"CREATE TABLE IF NOT EXISTS "{s}".bills (
            id           UUID PRIMARY KEY,
            apartment_id VARCHAR(10) NOT NULL
                         CONSTRAINT bills_apartment_id_fkey
                         REFERENCES "{s}".apartments(id) ON DELETE CASCADE,
            bill_type    TEXT NOT NULL
                         CHECK (bill_type IN ('ELECTRICITY', 'WATER', 'MANAGEMENT', 'PARKING', 'SERVICE', 'OTHER')),
            amount       NUMERIC(12, 2) NOT NULL
                         CONSTRAINT bills_amount_check CHECK (amount > 0),
            due_date     DATE NOT NULL,
            status       TEXT NOT NULL DEFAULT 'UNPAID'
                         CHECK (status IN ('UNPAID', 'PAID', 'OVERDUE')),
            created_at   TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at   TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )"#
    ))
    .execute(pool)
    .await?;

    // --- Pagamentos ---
    sqlx::raw_sql(&format!(
        r#"CREATE TABLE IF NOT EXISTS "{s}".payments (
            id           UUID PRIMARY KEY,
            apartment_id VARCHAR(10) NOT NULL
                         CONSTRAINT payments_apartment_id_fkey
                         REFERENCES "{s}".apartments(id) ON DELETE CASCADE,
            amount       NUMERIC(12, 2) NOT NULL
                         CONSTRAINT payments_amount_check CHECK (amount > 0),
            status       TEXT NOT NULL DEFAULT 'COMPLETED'
                         CHECK (status IN ('PENDING', 'COMPLETED', 'FAILED')),
            method       TEXT NOT NULL
                         CHECK (method IN ('CASH', 'BANK_TRANSFER', 'CARD')),
            payment_date TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            note         TEXT,
            created_at   TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )"#
    ))
    .execute(pool)
    .await?;

    // --- Rateio pagamento x conta ---
    sqlx::raw_sql(&format!(
        r#"CREATE TABLE IF NOT EXISTS "{s}".paymentsdetail (
            bill_id    UUID NOT NULL REFERENCES "{s}".bills(id) ON DELETE CASCADE,
            payment_id UUID NOT NULL REFERENCES "{s}".payments(id) ON DELETE CASCADE,
            method     TEXT NOT NULL
                       CHECK (method IN ('CASH', 'BANK_TRANSFER', 'CARD')),
            PRIMARY KEY (bill_id, payment_id)
        )"#
    ))
    .execute(pool)
    .await?;

    // --- Chamados de serviço ---
    sqlx::raw_sql(&format!(
        r#"CREATE TABLE IF NOT EXISTS "{s}".service_requests (
            id             UUID PRIMARY KEY,
            apartment_id   VARCHAR(10) NOT NULL
                           CONSTRAINT service_requests_apartment_id_fkey
                           REFERENCES "{s}".apartments(id) ON DELETE CASCADE,
            resident_id    UUID
                           CONSTRAINT service_requests_resident_id_fkey
                           REFERENCES "{s}".residents(id) ON DELETE SET NULL,
            category       TEXT NOT NULL
                           CHECK (category IN ('CLEANING', 'REPAIR', 'SECURITY', 'INTERNET', 'OTHER')),
            description    TEXT NOT NULL,
            status         TEXT NOT NULL DEFAULT 'PENDING'
                           CHECK (status IN ('PENDING', 'IN_PROGRESS', 'COMPLETED', 'CANCELLED')),
            amount         NUMERIC(12, 2) NOT NULL DEFAULT 0
                           CONSTRAINT service_requests_amount_check CHECK (amount >= 0),
            request_date   TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            completed_date TIMESTAMPTZ
        )"#
    ))
    .execute(pool)
    .await?;

    tracing::info!("✅ Schema '{}' provisionado (versão {})", schema, MAPPING_VERSION);
    Ok(())
}
