// src/db/dashboard_repo.rs

use rust_decimal::Decimal;

use crate::{
    common::{db_utils::map_db_error, error::AppError},
    db::context::DbContext,
    models::dashboard::{occupancy_rate, DashboardSummary, RevenueEntry},
};

#[derive(Clone)]
pub struct DashboardRepository {
    ctx: DbContext,
}

impl DashboardRepository {
    pub fn new(ctx: DbContext) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &DbContext {
        &self.ctx
    }

    // 1. Resumo Geral
    pub async fn get_summary(&self) -> Result<DashboardSummary, AppError> {
        // Iniciamos uma transação (snapshot consistente dos dados)
        let mut tx = self.ctx.begin().await?;

        // A. Ocupação
        // Em manutenção não conta como vago
        let (total_apartments, occupied_apartments, vacant_apartments): (i64, i64, i64) = sqlx::query_as(&format!(
            r#"
            SELECT COUNT(*),
                   COUNT(*) FILTER (WHERE status = 'OCCUPIED'),
                   COUNT(*) FILTER (WHERE status = 'VACANT')
            FROM {}
            WHERE is_active = TRUE
            "#,
            self.ctx.table("apartments")
        ))
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        // B. Moradores
        let total_residents: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM {}",
            self.ctx.table("residents")
        ))
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        // C. Receita do mês corrente
        let revenue_this_month: Decimal = sqlx::query_scalar(&format!(
            r#"
            SELECT COALESCE(SUM(amount), 0)
            FROM {}
            WHERE status = 'COMPLETED'
              AND date_trunc('month', payment_date) = date_trunc('month', NOW())
            "#,
            self.ctx.table("payments")
        ))
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        // D. Contas em aberto
        let outstanding_bills: Decimal = sqlx::query_scalar(&format!(
            "SELECT COALESCE(SUM(amount), 0) FROM {} WHERE status IN ('UNPAID', 'OVERDUE')",
            self.ctx.table("bills")
        ))
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        // E. Chamados em aberto
        let pending_requests: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM {} WHERE status IN ('PENDING', 'IN_PROGRESS')",
            self.ctx.table("service_requests")
        ))
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        // Só leitura, mas commit é mais limpo
        tx.commit().await?;

        Ok(DashboardSummary {
            total_apartments,
            occupied_apartments,
            vacant_apartments,
            occupancy_rate: occupancy_rate(occupied_apartments, total_apartments),
            total_residents,
            revenue_this_month,
            outstanding_bills,
            pending_requests,
        })
    }

    // 2. Receita por mês (últimos 12 meses)
    pub async fn get_revenue_last_12_months(&self) -> Result<Vec<RevenueEntry>, AppError> {
        let sql = format!(
            r#"
            SELECT
                to_char(date_trunc('month', payment_date), 'YYYY-MM') AS month,
                SUM(amount) AS total
            FROM {}
            WHERE status = 'COMPLETED'
              AND payment_date >= date_trunc('month', NOW()) - INTERVAL '11 months'
            GROUP BY 1
            ORDER BY 1 ASC
            "#,
            self.ctx.table("payments")
        );
        sqlx::query_as::<_, RevenueEntry>(&sql)
            .fetch_all(self.ctx.pool())
            .await
            .map_err(map_db_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::TestBuilding;

    #[tokio::test]
    async fn units_in_maintenance_are_not_vacant() {
        let Some(db) = TestBuilding::create().await else { return };
        for code in ["A0101", "A0102", "A0103"] {
            db.apartment(code, 4).await;
        }
        sqlx::query(&format!(
            "UPDATE {} SET status = 'MAINTENANCE' WHERE id = 'A0102'",
            db.ctx.table("apartments")
        ))
        .execute(db.ctx.pool())
        .await
        .unwrap();
        sqlx::query(&format!(
            "UPDATE {} SET status = 'OCCUPIED', population = 1 WHERE id = 'A0103'",
            db.ctx.table("apartments")
        ))
        .execute(db.ctx.pool())
        .await
        .unwrap();

        let summary = DashboardRepository::new(db.ctx.clone()).get_summary().await.unwrap();
        assert_eq!(summary.total_apartments, 3);
        assert_eq!(summary.occupied_apartments, 1);
        assert_eq!(summary.vacant_apartments, 1);
        assert_eq!(summary.outstanding_bills, Decimal::ZERO);

        db.drop().await;
    }
}
