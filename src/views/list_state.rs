// src/views/list_state.rs

use crate::models::listing::{
    FilterSpec, ListItem, ListQuery, Page, PageRequest, SortDirection, SortSpec,
};

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 200;

/// Página, tamanho, ordenação e filtro de uma lista.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListState {
    page: usize,
    page_size: usize,
    sort: Option<SortSpec>,
    filter: Option<FilterSpec>,
}

impl Default for ListState {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            sort: None,
            filter: None,
        }
    }
}

impl ListState {
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    pub fn filter(&self) -> Option<&FilterSpec> {
        self.filter.as_ref()
    }

    /// Páginas começam em 1; zero vira 1. O teto é aplicado em `apply`.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Volta para a primeira página.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self.page = 1;
    }

    pub fn set_sort(&mut self, sort: Option<SortSpec>) {
        self.sort = sort;
    }

    /// Volta para a primeira página.
    pub fn set_filter(&mut self, filter: Option<FilterSpec>) {
        self.filter = filter;
        self.page = 1;
    }

    pub fn total_pages(&self, total_items: usize) -> usize {
        total_items.div_ceil(self.page_size).max(1)
    }

    /// Mesma página, mas para o banco paginar. `total_items` é o total
    /// já filtrado, usado para ajustar a página ao limite.
    pub fn to_query(&self, total_items: usize) -> ListQuery {
        ListQuery {
            filter: self.filter.clone(),
            sort: self.sort.clone(),
            page: Some(PageRequest {
                page: self.page.min(self.total_pages(total_items)),
                page_size: self.page_size,
            }),
        }
    }

    /// Filtra, ordena (estável) e recorta a página pedida.
    /// Página além da última é ajustada para a última.
    pub fn apply<T: ListItem>(&self, items: &[T]) -> Page<T> {
        let mut visible: Vec<&T> = match &self.filter {
            Some(filter) => items
                .iter()
                .filter(|item| {
                    item.field(&filter.field)
                        .map(|value| filter.matches(&value))
                        .unwrap_or(false)
                })
                .collect(),
            None => items.iter().collect(),
        };

        if let Some(sort) = &self.sort {
            // sort_by é estável: empates mantêm a ordem de carga.
            visible.sort_by(|a, b| {
                let (left, right) = (a.field(&sort.field), b.field(&sort.field));
                match sort.direction {
                    SortDirection::Asc => left.cmp(&right),
                    SortDirection::Desc => right.cmp(&left),
                }
            });
        }

        let total_items = visible.len();
        let total_pages = self.total_pages(total_items);
        let page = self.page.min(total_pages);

        let start = (page - 1) * self.page_size;
        let end = (start + self.page_size).min(total_items);
        let items = visible
            .get(start..end)
            .unwrap_or_default()
            .iter()
            .map(|item| (*item).clone())
            .collect();

        Page {
            items,
            page,
            page_size: self.page_size,
            total_items,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::listing::{FieldValue, FilterMode};

    #[derive(Debug, Clone, PartialEq)]
    struct Unit {
        code: &'static str,
        floor: i32,
    }

    impl ListItem for Unit {
        const FIELDS: &'static [(&'static str, &'static str)] = &[("code", "id"), ("floor", "floor")];

        fn field(&self, name: &str) -> Option<FieldValue> {
            match name {
                "code" => Some(FieldValue::from(self.code)),
                "floor" => Some(self.floor.into()),
                _ => None,
            }
        }
    }

    fn units(n: usize) -> Vec<Unit> {
        (0..n)
            .map(|i| Unit { code: Box::leak(format!("A{:04}", i).into_boxed_str()), floor: (i % 3) as i32 })
            .collect()
    }

    fn state(page: usize, size: usize) -> ListState {
        let mut state = ListState::default();
        state.set_page_size(size);
        state.set_page(page);
        state
    }

    #[test]
    fn page_contains_expected_window() {
        let items = units(25);
        for k in 1..=3 {
            let page = state(k, 10).apply(&items);
            let start = (k - 1) * 10;
            let end = (k * 10).min(25);
            assert_eq!(page.items, items[start..end].to_vec());
            assert_eq!(page.page, k);
            assert_eq!(page.total_items, 25);
            assert_eq!(page.total_pages, 3);
        }
    }

    #[test]
    fn page_beyond_last_clamps_to_last() {
        let items = units(25);
        let page = state(9, 10).apply(&items);
        assert_eq!(page.page, 3);
        assert_eq!(page.items, items[20..25].to_vec());
    }

    #[test]
    fn page_zero_is_first_page() {
        let page = state(0, 10).apply(&units(5));
        assert_eq!(page.page, 1);
        assert_eq!(page.items.len(), 5);
    }

    #[test]
    fn empty_collection_has_one_empty_page() {
        let page = state(4, 10).apply::<Unit>(&[]);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
        assert!(page.items.is_empty());
    }

    #[test]
    fn page_size_is_clamped_and_resets_page() {
        let mut s = state(3, 10);
        s.set_page_size(0);
        assert_eq!(s.page_size(), 1);
        assert_eq!(s.page(), 1);
        s.set_page_size(10_000);
        assert_eq!(s.page_size(), MAX_PAGE_SIZE);
    }

    #[test]
    fn sort_is_stable_ascending() {
        let items = units(9);
        let mut s = state(1, 50);
        s.set_sort(Some(SortSpec::new::<Unit>("floor", SortDirection::Asc).unwrap()));
        let page = s.apply(&items);

        let floors: Vec<i32> = page.items.iter().map(|u| u.floor).collect();
        assert_eq!(floors, vec![0, 0, 0, 1, 1, 1, 2, 2, 2]);
        // Empates na ordem de carga
        let zeros: Vec<&str> = page.items.iter().filter(|u| u.floor == 0).map(|u| u.code).collect();
        assert_eq!(zeros, vec!["A0000", "A0003", "A0006"]);
    }

    #[test]
    fn sort_descending_keeps_ties_in_order() {
        let items = units(6);
        let mut s = state(1, 50);
        s.set_sort(Some(SortSpec::new::<Unit>("floor", SortDirection::Desc).unwrap()));
        let codes: Vec<&str> = s.apply(&items).items.iter().map(|u| u.code).collect();
        assert_eq!(codes, vec!["A0002", "A0005", "A0001", "A0004", "A0000", "A0003"]);
    }

    #[test]
    fn filter_applies_before_paging() {
        let items = units(30);
        let mut s = state(2, 5);
        s.set_filter(Some(FilterSpec::new::<Unit>("floor", "1", FilterMode::Exact).unwrap()));
        assert_eq!(s.page(), 1);
        s.set_page(2);

        let page = s.apply(&items);
        assert_eq!(page.total_items, 10);
        assert_eq!(page.total_pages, 2);
        assert!(page.items.iter().all(|u| u.floor == 1));
        assert_eq!(page.items[0].code, "A0016");
    }

    #[test]
    fn query_page_is_clamped_by_total() {
        let query = state(7, 10).to_query(25);
        assert_eq!(query.page, Some(PageRequest { page: 3, page_size: 10 }));
        assert_eq!(state(7, 10).to_query(0).page.map(|p| p.page), Some(1));
    }

    #[test]
    fn substring_filter_matches_codes() {
        let items = units(30);
        let mut s = state(1, 50);
        s.set_filter(Some(FilterSpec::new::<Unit>("code", "a001", FilterMode::Contains).unwrap()));
        assert_eq!(s.apply(&items).total_items, 10);
    }
}
