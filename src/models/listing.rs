// src/models/listing.rs

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::error::AppError;

// --- Valor de campo (para ordenar e filtrar em memória) ---

// A ordem das variantes importa: Null fica antes de qualquer valor,
// igual ao "NULLS FIRST" que usamos no SQL ascendente.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Decimal(Decimal),
    Text(String),
    Date(NaiveDate),
    Timestamp(DateTime<Utc>),
    Uuid(Uuid),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Bool(v) => write!(f, "{}", v),
            FieldValue::Int(v) => write!(f, "{}", v),
            FieldValue::Decimal(v) => write!(f, "{}", v),
            FieldValue::Text(v) => f.write_str(v),
            FieldValue::Date(v) => write!(f, "{}", v.format("%Y-%m-%d")),
            FieldValue::Timestamp(v) => write!(f, "{}", v.to_rfc3339()),
            FieldValue::Uuid(v) => write!(f, "{}", v),
        }
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self { FieldValue::Bool(v) }
}
impl From<i32> for FieldValue {
    fn from(v: i32) -> Self { FieldValue::Int(v as i64) }
}
impl From<Decimal> for FieldValue {
    fn from(v: Decimal) -> Self { FieldValue::Decimal(v) }
}
impl From<&str> for FieldValue {
    fn from(v: &str) -> Self { FieldValue::Text(v.to_string()) }
}
impl From<&String> for FieldValue {
    fn from(v: &String) -> Self { FieldValue::Text(v.clone()) }
}
impl From<NaiveDate> for FieldValue {
    fn from(v: NaiveDate) -> Self { FieldValue::Date(v) }
}
impl From<DateTime<Utc>> for FieldValue {
    fn from(v: DateTime<Utc>) -> Self { FieldValue::Timestamp(v) }
}
impl From<Uuid> for FieldValue {
    fn from(v: Uuid) -> Self { FieldValue::Uuid(v) }
}

// --- Entidades listáveis ---

/// Entidade exibida em listas paginadas.
///
/// `FIELDS` é a lista branca de campos ordenáveis/filtráveis:
/// (nome na API, coluna no banco).
///
/// `TEXT_FIELDS` são ordenados no banco por bytes (`COLLATE "C"`), a mesma
/// ordem de `String` em memória. `TIMESTAMP_FIELDS` não aceitam filtro
/// exato: o texto do Postgres e o RFC 3339 daqui não coincidem.
pub trait ListItem: Clone + Send + Sync + 'static {
    const FIELDS: &'static [(&'static str, &'static str)];
    const TEXT_FIELDS: &'static [&'static str] = &[];
    const TIMESTAMP_FIELDS: &'static [&'static str] = &[];

    fn field(&self, name: &str) -> Option<FieldValue>;

    fn column(name: &str) -> Option<&'static str> {
        Self::FIELDS
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, column)| *column)
    }

    /// Expressão do ORDER BY para o campo.
    fn sort_expression(name: &str) -> Option<String> {
        let column = Self::column(name)?;
        if Self::TEXT_FIELDS.iter().any(|text| *text == name) {
            Some(format!("{} COLLATE \"C\"", column))
        } else {
            Some(column.to_string())
        }
    }
}

// --- Ordenação ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC NULLS FIRST",
            SortDirection::Desc => "DESC NULLS LAST",
        }
    }
}

impl FromStr for SortDirection {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            _ => Err(AppError::InvalidSortDirection(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    /// Só aceita campos da lista branca da entidade.
    pub fn new<T: ListItem>(field: &str, direction: SortDirection) -> Result<Self, AppError> {
        if T::column(field).is_none() {
            return Err(AppError::InvalidSortKey(field.to_string()));
        }
        Ok(Self { field: field.to_string(), direction })
    }
}

// --- Filtro ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Igualdade exata do valor textual.
    Exact,
    /// Substring, sem diferenciar maiúsculas.
    #[default]
    Contains,
}

impl FromStr for FilterMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "exact" | "eq" => Ok(FilterMode::Exact),
            "contains" | "like" => Ok(FilterMode::Contains),
            _ => Err(AppError::InvalidFilterMode(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    pub field: String,
    pub value: String,
    pub mode: FilterMode,
}

impl FilterSpec {
    pub fn new<T: ListItem>(field: &str, value: &str, mode: FilterMode) -> Result<Self, AppError> {
        if T::column(field).is_none() {
            return Err(AppError::InvalidFilterField(field.to_string()));
        }
        if mode == FilterMode::Exact && T::TIMESTAMP_FIELDS.iter().any(|ts| *ts == field) {
            return Err(AppError::InvalidFilterMode(format!("exact ({})", field)));
        }
        Ok(Self { field: field.to_string(), value: value.to_string(), mode })
    }

    pub fn matches(&self, value: &FieldValue) -> bool {
        let text = value.to_string();
        match self.mode {
            FilterMode::Exact => text == self.value,
            FilterMode::Contains => text.to_lowercase().contains(&self.value.to_lowercase()),
        }
    }
}

// --- Paginação ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub page_size: usize,
}

impl PageRequest {
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1) * self.page_size
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub filter: Option<FilterSpec>,
    pub sort: Option<SortSpec>,
    pub page: Option<PageRequest>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct Dummy;

    impl ListItem for Dummy {
        const FIELDS: &'static [(&'static str, &'static str)] =
            &[("fullName", "full_name"), ("floor", "floor"), ("createdAt", "created_at")];
        const TEXT_FIELDS: &'static [&'static str] = &["fullName"];
        const TIMESTAMP_FIELDS: &'static [&'static str] = &["createdAt"];

        fn field(&self, _name: &str) -> Option<FieldValue> {
            None
        }
    }

    #[test]
    fn sort_spec_rejects_unknown_fields() {
        assert!(SortSpec::new::<Dummy>("fullName", SortDirection::Asc).is_ok());
        let err = SortSpec::new::<Dummy>("password", SortDirection::Asc).unwrap_err();
        assert!(matches!(err, AppError::InvalidSortKey(f) if f == "password"));
    }

    #[test]
    fn filter_spec_rejects_unknown_fields() {
        let err = FilterSpec::new::<Dummy>("nope", "x", FilterMode::Exact).unwrap_err();
        assert!(matches!(err, AppError::InvalidFilterField(_)));
    }

    #[test]
    fn contains_ignores_case_and_exact_does_not() {
        let contains = FilterSpec::new::<Dummy>("fullName", "silva", FilterMode::Contains).unwrap();
        assert!(contains.matches(&FieldValue::Text("Maria Silva".into())));

        let exact = FilterSpec::new::<Dummy>("fullName", "silva", FilterMode::Exact).unwrap();
        assert!(!exact.matches(&FieldValue::Text("Silva".into())));
        assert!(exact.matches(&FieldValue::Text("silva".into())));
    }

    #[test]
    fn text_fields_sort_by_bytes() {
        assert_eq!(Dummy::sort_expression("fullName").as_deref(), Some("full_name COLLATE \"C\""));
        assert_eq!(Dummy::sort_expression("floor").as_deref(), Some("floor"));
        assert_eq!(Dummy::sort_expression("nope"), None);

        // Maiúsculas antes de minúsculas, como no COLLATE "C"
        let mut names = vec![FieldValue::from("ana"), FieldValue::from("bruno"), FieldValue::from("Carla")];
        names.sort();
        assert_eq!(names, vec![FieldValue::from("Carla"), FieldValue::from("ana"), FieldValue::from("bruno")]);
    }

    #[test]
    fn timestamps_only_accept_substring_filter() {
        assert!(matches!(
            FilterSpec::new::<Dummy>("createdAt", "2025-03-01T10:00:00+00:00", FilterMode::Exact),
            Err(AppError::InvalidFilterMode(_))
        ));
        assert!(FilterSpec::new::<Dummy>("createdAt", "2025-03-01", FilterMode::Contains).is_ok());
    }

    #[test]
    fn null_sorts_before_values() {
        assert!(FieldValue::Null < FieldValue::Int(0));
        assert!(FieldValue::Int(2) < FieldValue::Int(10));
        assert!(FieldValue::Text("a".into()) < FieldValue::Text("b".into()));
    }

    #[test]
    fn parses_directions_and_modes() {
        assert_eq!("DESC".parse::<SortDirection>().unwrap(), SortDirection::Desc);
        assert!("sideways".parse::<SortDirection>().is_err());
        assert_eq!("exact".parse::<FilterMode>().unwrap(), FilterMode::Exact);
        assert!("regex".parse::<FilterMode>().is_err());
    }

    #[test]
    fn page_request_offset_is_one_indexed() {
        assert_eq!(PageRequest { page: 1, page_size: 10 }.offset(), 0);
        assert_eq!(PageRequest { page: 3, page_size: 10 }.offset(), 20);
        assert_eq!(PageRequest { page: 0, page_size: 10 }.offset(), 0);
    }
}
