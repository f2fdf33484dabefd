// src/views/dashboard_view.rs

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::{
    common::error::AppError,
    models::dashboard::{DashboardSummary, RevenueEntry},
    services::DashboardService,
    views::list_view::ViewEvent,
};

#[async_trait]
pub trait DashboardSource: Send + Sync {
    async fn load_summary(&self) -> Result<DashboardSummary, AppError>;
    async fn load_revenue(&self) -> Result<Vec<RevenueEntry>, AppError>;
}

#[async_trait]
impl DashboardSource for DashboardService {
    async fn load_summary(&self) -> Result<DashboardSummary, AppError> {
        self.get_summary().await
    }

    async fn load_revenue(&self) -> Result<Vec<RevenueEntry>, AppError> {
        self.get_revenue_chart().await
    }
}

/// Indicadores do prédio ativo. Antes do primeiro `refresh` tudo é zero.
pub struct DashboardView<S> {
    source: S,
    summary: DashboardSummary,
    revenue: Vec<RevenueEntry>,
    last_error: Option<String>,
    events: broadcast::Sender<ViewEvent>,
}

impl<S: DashboardSource> DashboardView<S> {
    pub fn new(source: S) -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            source,
            summary: DashboardSummary::default(),
            revenue: Vec::new(),
            last_error: None,
            events,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ViewEvent> {
        self.events.subscribe()
    }

    pub fn summary(&self) -> &DashboardSummary {
        &self.summary
    }

    pub fn revenue(&self) -> &[RevenueEntry] {
        &self.revenue
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Só troca os valores se as duas consultas derem certo.
    pub async fn refresh(&mut self) -> Result<(), AppError> {
        let loaded = async {
            let summary = self.source.load_summary().await?;
            let revenue = self.source.load_revenue().await?;
            Ok::<_, AppError>((summary, revenue))
        }
        .await;

        match loaded {
            Ok((summary, revenue)) => {
                self.summary = summary;
                self.revenue = revenue;
                self.last_error = None;
                let _ = self.events.send(ViewEvent::PropertyChanged("Summary"));
                let _ = self.events.send(ViewEvent::PropertyChanged("Revenue"));
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Falha ao atualizar dashboard: {}", e);
                self.last_error = Some(e.to_string());
                let _ = self.events.send(ViewEvent::Error(e.to_string()));
                Err(e)
            }
        }
    }
}
