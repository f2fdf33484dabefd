// src/handlers.rs

use axum::http::StatusCode;
use serde::Deserialize;

use crate::{
    common::error::AppError,
    models::listing::{FilterMode, FilterSpec, ListItem, SortDirection, SortSpec},
    views::ListState,
};

pub mod auth;
pub mod buildings;
pub mod apartments;
pub mod residents;
pub mod bills;
pub mod payments;
pub mod service_requests;
pub mod dashboard;

// Parâmetros de listagem: ?page=2&pageSize=20&sortBy=floor&sortDir=desc&filterField=status&filterValue=VACANT
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub page: Option<usize>,
    pub page_size: Option<usize>,
    pub sort_by: Option<String>,
    pub sort_dir: Option<String>,
    pub filter_field: Option<String>,
    pub filter_value: Option<String>,
    pub filter_mode: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl ListParams {
    /// Valida os campos contra a lista branca de `T`.
    pub fn to_state<T: ListItem>(&self) -> Result<ListState, AppError> {
        let mut state = ListState::default();

        if let Some(page_size) = self.page_size {
            state.set_page_size(page_size);
        }

        // Valor vazio não filtra nada
        if let (Some(field), Some(value)) = (non_empty(&self.filter_field), non_empty(&self.filter_value)) {
            let mode = match non_empty(&self.filter_mode) {
                Some(mode) => mode.parse()?,
                None => FilterMode::default(),
            };
            state.set_filter(Some(FilterSpec::new::<T>(field, value, mode)?));
        }

        if let Some(field) = non_empty(&self.sort_by) {
            let direction = match non_empty(&self.sort_dir) {
                Some(direction) => direction.parse()?,
                None => SortDirection::default(),
            };
            state.set_sort(Some(SortSpec::new::<T>(field, direction)?));
        }

        // Por último: filtro e tamanho voltam para a página 1
        if let Some(page) = self.page {
            state.set_page(page);
        }

        Ok(state)
    }
}

/// 204 quando algo foi apagado, 404 quando não havia nada.
pub fn deleted_or_not_found(deleted: bool, entity: &'static str) -> Result<StatusCode, AppError> {
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(entity))
    }
}
