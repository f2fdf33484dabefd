// src/views/list_view.rs

use tokio::sync::broadcast;

use crate::{
    common::error::AppError,
    models::listing::{FilterMode, FilterSpec, ListItem, Page, SortDirection, SortSpec},
    views::{list_state::ListState, ListSource},
};

const EVENT_CAPACITY: usize = 32;

/// Notificações de mudança para quem observa o view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    PropertyChanged(&'static str),
    Error(String),
}

/// Lista carregada de um `ListSource`, com página, ordenação e filtro em memória.
pub struct ListView<T, S> {
    source: S,
    items: Vec<T>,
    state: ListState,
    last_error: Option<String>,
    events: broadcast::Sender<ViewEvent>,
}

impl<T, S> ListView<T, S>
where
    T: ListItem,
    S: ListSource<T>,
{
    pub fn new(source: S) -> Self {
        Self::with_state(source, ListState::default())
    }

    pub fn with_state(source: S, state: ListState) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            source,
            items: Vec::new(),
            state,
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

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Recarrega tudo da fonte. Em caso de erro os itens antigos ficam,
    /// o erro é guardado e o view continua utilizável.
    pub async fn load(&mut self) -> Result<(), AppError> {
        match self.source.load_all().await {
            Ok(items) => {
                self.items = items;
                if self.last_error.take().is_some() {
                    self.notify("LastError");
                }
                self.notify("Items");
                self.notify("CurrentPage");
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Falha ao carregar lista: {}", e);
                self.last_error = Some(e.to_string());
                let _ = self.events.send(ViewEvent::Error(e.to_string()));
                Err(e)
            }
        }
    }

    pub fn set_page(&mut self, page: usize) {
        self.state.set_page(page);
        self.notify("CurrentPage");
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.state.set_page_size(page_size);
        self.notify("PageSize");
        self.notify("CurrentPage");
    }

    pub fn set_sort(&mut self, field: &str, direction: SortDirection) -> Result<(), AppError> {
        let sort = SortSpec::new::<T>(field, direction)?;
        self.state.set_sort(Some(sort));
        self.notify("Sort");
        self.notify("CurrentPage");
        Ok(())
    }

    pub fn clear_sort(&mut self) {
        self.state.set_sort(None);
        self.notify("Sort");
        self.notify("CurrentPage");
    }

    pub fn set_filter(&mut self, field: &str, value: &str, mode: FilterMode) -> Result<(), AppError> {
        let filter = FilterSpec::new::<T>(field, value, mode)?;
        self.state.set_filter(Some(filter));
        self.notify("Filter");
        self.notify("CurrentPage");
        Ok(())
    }

    pub fn clear_filter(&mut self) {
        self.state.set_filter(None);
        self.notify("Filter");
        self.notify("CurrentPage");
    }

    /// Página atual já filtrada e ordenada.
    pub fn page(&self) -> Page<T> {
        self.state.apply(&self.items)
    }

    fn notify(&self, property: &'static str) {
        // Sem assinantes o send falha, e tudo bem.
        let _ = self.events.send(ViewEvent::PropertyChanged(property));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    };

    use crate::models::listing::FieldValue;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: i32,
        name: String,
    }

    impl ListItem for Row {
        const FIELDS: &'static [(&'static str, &'static str)] = &[("id", "id"), ("name", "name")];

        fn field(&self, name: &str) -> Option<FieldValue> {
            match name {
                "id" => Some(self.id.into()),
                "name" => Some(FieldValue::from(&self.name)),
                _ => None,
            }
        }
    }

    #[derive(Clone)]
    struct FakeSource {
        rows: Vec<Row>,
        fail: Arc<AtomicBool>,
    }

    #[async_trait]
    impl ListSource<Row> for FakeSource {
        async fn load_all(&self) -> Result<Vec<Row>, AppError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(AppError::Configuration("banco indisponível".into()));
            }
            Ok(self.rows.clone())
        }
    }

    fn source(n: i32) -> FakeSource {
        FakeSource {
            rows: (1..=n).map(|id| Row { id, name: format!("Morador {}", id) }).collect(),
            fail: Arc::new(AtomicBool::new(false)),
        }
    }

    #[tokio::test]
    async fn load_fills_first_page_and_notifies() {
        let mut view = ListView::new(source(23));
        let mut rx = view.subscribe();

        view.load().await.unwrap();

        assert_eq!(rx.recv().await.unwrap(), ViewEvent::PropertyChanged("Items"));
        assert_eq!(rx.recv().await.unwrap(), ViewEvent::PropertyChanged("CurrentPage"));

        let page = view.page();
        assert_eq!(page.items.len(), 10);
        assert_eq!(page.total_items, 23);
        assert_eq!(page.total_pages, 3);
    }

    #[tokio::test]
    async fn sort_and_filter_reject_unknown_fields() {
        let mut view = ListView::new(source(3));
        view.load().await.unwrap();

        assert!(matches!(
            view.set_sort("salary", SortDirection::Asc),
            Err(AppError::InvalidSortKey(_))
        ));
        assert!(matches!(
            view.set_filter("salary", "1", FilterMode::Exact),
            Err(AppError::InvalidFilterField(_))
        ));
        assert!(view.state().sort().is_none());
        assert!(view.state().filter().is_none());
    }

    #[tokio::test]
    async fn sort_desc_then_navigate() {
        let mut view = ListView::new(source(12));
        view.load().await.unwrap();
        view.set_sort("id", SortDirection::Desc).unwrap();
        view.set_page(2);

        let ids: Vec<i32> = view.page().items.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[tokio::test]
    async fn filter_resets_to_first_page() {
        let mut view = ListView::new(source(30));
        view.load().await.unwrap();
        view.set_page(3);

        view.set_filter("name", "morador 1", FilterMode::Contains).unwrap();
        let page = view.page();
        assert_eq!(page.page, 1);
        // 1, 10..=19
        assert_eq!(page.total_items, 11);

        view.clear_filter();
        assert_eq!(view.page().total_items, 30);
    }

    #[tokio::test]
    async fn failed_load_keeps_view_usable() {
        let src = source(5);
        let fail = src.fail.clone();
        let mut view = ListView::new(src);
        view.load().await.unwrap();

        fail.store(true, Ordering::SeqCst);
        let mut rx = view.subscribe();
        assert!(view.load().await.is_err());
        assert!(matches!(rx.recv().await.unwrap(), ViewEvent::Error(_)));
        assert!(view.last_error().is_some());
        assert_eq!(view.items().len(), 5);

        fail.store(false, Ordering::SeqCst);
        view.load().await.unwrap();
        assert!(view.last_error().is_none());
        assert_eq!(view.page().total_items, 5);
    }
}
