// src/models/dashboard.rs

use serde::Serialize;
use rust_decimal::Decimal;
use sqlx::FromRow;

// 1. Resumo do prédio (os cards do topo)
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_apartments: i64,
    pub occupied_apartments: i64,
    pub vacant_apartments: i64,
    pub occupancy_rate: Decimal,       // Percentual 0..100, duas casas
    pub total_residents: i64,
    pub revenue_this_month: Decimal,   // Pagamentos concluídos no mês corrente
    pub outstanding_bills: Decimal,    // Contas em aberto ou vencidas
    pub pending_requests: i64,         // Chamados pendentes ou em andamento
}

// 2. Gráfico de receita (últimos 12 meses)
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RevenueEntry {
    pub month: Option<String>, // YYYY-MM
    pub total: Option<Decimal>,
}

/// Taxa de ocupação em percentual, arredondada em duas casas.
pub fn occupancy_rate(occupied: i64, total: i64) -> Decimal {
    if total <= 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(occupied) * Decimal::ONE_HUNDRED / Decimal::from(total)).round_dp(2)
}
