//! Estado das telas de listagem (paginação, ordenação, filtro) e do dashboard.
//!
//! Os views não falam com o banco diretamente: recebem um `ListSource`
//! (os serviços) e trabalham sobre a lista carregada em memória.

use async_trait::async_trait;

use crate::{
    common::error::AppError,
    models::listing::{FilterSpec, ListItem, ListQuery, Page},
};

pub mod list_state;
pub mod list_view;
pub mod dashboard_view;
pub mod workspace;

pub use list_state::ListState;
pub use list_view::{ListView, ViewEvent};
pub use dashboard_view::{DashboardSource, DashboardView};
pub use workspace::Workspace;

/// De onde um `ListView` carrega os itens.
#[async_trait]
pub trait ListSource<T>: Send + Sync {
    async fn load_all(&self) -> Result<Vec<T>, AppError>;
}

/// Fonte que também filtra, ordena e pagina do lado do banco.
#[async_trait]
pub trait QuerySource<T>: ListSource<T> {
    async fn query_page(&self, query: &ListQuery) -> Result<Vec<T>, AppError>;
    async fn count_matching(&self, filter: Option<&FilterSpec>) -> Result<i64, AppError>;
}

/// Página pedida em `state`, paginada no banco. Segue as mesmas regras
/// de `ListState::apply`: página além da última vira a última.
pub async fn fetch_page<T, S>(source: &S, state: &ListState) -> Result<Page<T>, AppError>
where
    T: ListItem,
    S: QuerySource<T>,
{
    let total = source.count_matching(state.filter()).await?;
    let total_items = usize::try_from(total).unwrap_or_default();

    let query = state.to_query(total_items);
    let items = source.query_page(&query).await?;

    Ok(Page {
        items,
        page: query.page.map(|p| p.page).unwrap_or(1),
        page_size: state.page_size(),
        total_items,
        total_pages: state.total_pages(total_items),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::listing::FieldValue;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    struct Row(i32);

    impl ListItem for Row {
        const FIELDS: &'static [(&'static str, &'static str)] = &[("n", "n")];

        fn field(&self, _name: &str) -> Option<FieldValue> {
            Some(self.0.into())
        }
    }

    // Guarda a última consulta para conferir o que iria ao banco.
    struct Recorder {
        total: i64,
        last: Mutex<Option<ListQuery>>,
    }

    #[async_trait]
    impl ListSource<Row> for Recorder {
        async fn load_all(&self) -> Result<Vec<Row>, AppError> {
            Ok(Vec::new())
        }
    }

    #[async_trait]
    impl QuerySource<Row> for Recorder {
        async fn query_page(&self, query: &ListQuery) -> Result<Vec<Row>, AppError> {
            *self.last.lock().unwrap() = Some(query.clone());
            Ok(vec![Row(1)])
        }

        async fn count_matching(&self, _filter: Option<&FilterSpec>) -> Result<i64, AppError> {
            Ok(self.total)
        }
    }

    #[tokio::test]
    async fn database_page_clamps_like_in_memory_page() {
        let source = Recorder { total: 25, last: Mutex::new(None) };
        let mut state = ListState::default();
        state.set_page(9);

        let page = fetch_page(&source, &state).await.unwrap();
        assert_eq!(page.page, 3);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_items, 25);

        let sent = source.last.lock().unwrap().clone().unwrap();
        assert_eq!(sent.page.unwrap().offset(), 20);
    }
}
