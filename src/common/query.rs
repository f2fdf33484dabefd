// src/common/query.rs

//! Montagem das consultas de listagem (filtro, ordenação, paginação) e os
//! helpers genéricos que os repositórios usam para executá-las.

use sqlx::postgres::PgRow;
use sqlx::FromRow;

use crate::common::db_utils::map_db_error;
use crate::common::error::AppError;
use crate::db::context::DbContext;
use crate::models::listing::{FilterMode, FilterSpec, ListItem, ListQuery};

pub struct SqlQuery {
    pub sql: String,
    pub params: Vec<String>,
}

// Escapa curingas do LIKE (o escape padrão do Postgres é a barra).
fn escape_like(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

fn where_clause<T: ListItem>(filter: Option<&FilterSpec>, params: &mut Vec<String>) -> Result<String, AppError> {
    let Some(filter) = filter else {
        return Ok(String::new());
    };
    let column = T::column(&filter.field)
        .ok_or_else(|| AppError::InvalidFilterField(filter.field.clone()))?;

    let clause = match filter.mode {
        FilterMode::Exact => {
            params.push(filter.value.clone());
            format!(" WHERE {}::text = ${}", column, params.len())
        }
        FilterMode::Contains => {
            params.push(format!("%{}%", escape_like(&filter.value)));
            format!(" WHERE {}::text ILIKE ${}", column, params.len())
        }
    };
    Ok(clause)
}

/// SELECT com filtro opcional, ORDER BY (com `id` como desempate) e LIMIT/OFFSET.
pub fn build_select<T: ListItem>(table: &str, query: &ListQuery) -> Result<SqlQuery, AppError> {
    let mut params = Vec::new();
    let where_sql = where_clause::<T>(query.filter.as_ref(), &mut params)?;

    let order_sql = match &query.sort {
        Some(sort) => {
            let expression = T::sort_expression(&sort.field)
                .ok_or_else(|| AppError::InvalidSortKey(sort.field.clone()))?;
            format!(" ORDER BY {} {}, id ASC", expression, sort.direction.as_sql())
        }
        None => " ORDER BY id ASC".to_string(),
    };

    let page_sql = query
        .page
        .map(|p| format!(" LIMIT {} OFFSET {}", p.page_size, p.offset()))
        .unwrap_or_default();

    Ok(SqlQuery {
        sql: format!("SELECT * FROM {}{}{}{}", table, where_sql, order_sql, page_sql),
        params,
    })
}

pub fn build_count<T: ListItem>(table: &str, filter: Option<&FilterSpec>) -> Result<SqlQuery, AppError> {
    let mut params = Vec::new();
    let where_sql = where_clause::<T>(filter, &mut params)?;
    Ok(SqlQuery {
        sql: format!("SELECT COUNT(*) FROM {}{}", table, where_sql),
        params,
    })
}

/// Executa uma listagem na tabela `table` do schema do contexto.
pub async fn fetch_list<T>(ctx: &DbContext, table: &str, query: &ListQuery) -> Result<Vec<T>, AppError>
where
    T: ListItem + for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let q = build_select::<T>(&ctx.table(table), query)?;
    let mut db_query = sqlx::query_as::<_, T>(&q.sql);
    for param in &q.params {
        db_query = db_query.bind(param.as_str());
    }
    db_query.fetch_all(ctx.pool()).await.map_err(map_db_error)
}

pub async fn count_rows<T: ListItem>(
    ctx: &DbContext,
    table: &str,
    filter: Option<&FilterSpec>,
) -> Result<i64, AppError> {
    let q = build_count::<T>(&ctx.table(table), filter)?;
    let mut db_query = sqlx::query_scalar::<_, i64>(&q.sql);
    for param in &q.params {
        db_query = db_query.bind(param.as_str());
    }
    db_query.fetch_one(ctx.pool()).await.map_err(map_db_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::listing::{FieldValue, PageRequest, SortDirection, SortSpec};

    #[derive(Clone)]
    struct Row;

    impl ListItem for Row {
        const FIELDS: &'static [(&'static str, &'static str)] =
            &[("fullName", "full_name"), ("createdAt", "created_at")];
        const TEXT_FIELDS: &'static [&'static str] = &["fullName"];

        fn field(&self, _name: &str) -> Option<FieldValue> {
            None
        }
    }

    const TABLE: &str = "\"building_a\".\"residents\"";

    #[test]
    fn plain_select_orders_by_id() {
        let q = build_select::<Row>(TABLE, &ListQuery::default()).unwrap();
        assert_eq!(q.sql, "SELECT * FROM \"building_a\".\"residents\" ORDER BY id ASC");
        assert!(q.params.is_empty());
    }

    #[test]
    fn select_with_filter_sort_and_page() {
        let query = ListQuery {
            filter: Some(FilterSpec::new::<Row>("fullName", "50%_off", FilterMode::Contains).unwrap()),
            sort: Some(SortSpec::new::<Row>("createdAt", SortDirection::Desc).unwrap()),
            page: Some(PageRequest { page: 3, page_size: 20 }),
        };
        let q = build_select::<Row>(TABLE, &query).unwrap();
        assert_eq!(
            q.sql,
            "SELECT * FROM \"building_a\".\"residents\" WHERE full_name::text ILIKE $1 \
             ORDER BY created_at DESC NULLS LAST, id ASC LIMIT 20 OFFSET 40"
        );
        assert_eq!(q.params, vec!["%50\\%\\_off%".to_string()]);
    }

    #[test]
    fn exact_filter_binds_raw_value() {
        let filter = FilterSpec::new::<Row>("fullName", "Ana", FilterMode::Exact).unwrap();
        let q = build_count::<Row>(TABLE, Some(&filter)).unwrap();
        assert_eq!(
            q.sql,
            "SELECT COUNT(*) FROM \"building_a\".\"residents\" WHERE full_name::text = $1"
        );
        assert_eq!(q.params, vec!["Ana".to_string()]);
    }

    #[test]
    fn text_sort_uses_byte_collation() {
        let query = ListQuery {
            sort: Some(SortSpec::new::<Row>("fullName", SortDirection::Asc).unwrap()),
            ..Default::default()
        };
        let q = build_select::<Row>(TABLE, &query).unwrap();
        assert_eq!(
            q.sql,
            "SELECT * FROM \"building_a\".\"residents\" \
             ORDER BY full_name COLLATE \"C\" ASC NULLS FIRST, id ASC"
        );
    }

    #[test]
    fn unknown_sort_key_is_rejected_at_build_time() {
        let query = ListQuery {
            sort: Some(SortSpec { field: "password_hash".into(), direction: SortDirection::Asc }),
            ..Default::default()
        };
        assert!(matches!(
            build_select::<Row>(TABLE, &query),
            Err(AppError::InvalidSortKey(_))
        ));
    }
}
