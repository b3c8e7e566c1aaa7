//! SQL query builder shared by every entity repository
//!
//! Builds parameterized SELECT and COUNT statements from one set of WHERE
//! conditions, so the page query and its total count always use the same
//! filter.

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteArguments, SqliteRow};

use crate::errors::{ApiError, ApiResult};
use crate::graphql::filters::OrderDirection;
use crate::graphql::pagination::{Page, PageRequest};

/// Metadata about a database entity (table).
pub trait DatabaseEntity:
    for<'r> sqlx::FromRow<'r, SqliteRow> + Send + Unpin + Sized
{
    /// The SQL table name (e.g., "products")
    const TABLE_NAME: &'static str;

    /// Comma-separated column list used by SELECT
    const COLUMNS: &'static str;

    /// Default sort column for list queries
    const DEFAULT_SORT: &'static str = "created_at";

    /// Human name used in error messages (e.g., "el producto")
    const DISPLAY_NAME: &'static str;

    /// Build a SELECT query for all columns
    fn select_sql() -> String {
        format!("SELECT {} FROM {}", Self::COLUMNS, Self::TABLE_NAME)
    }
}

/// Represents a SQL value that can be bound to a query.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::String(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::String(v.to_string())
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Int(v)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::Float(v)
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        SqlValue::Bool(v)
    }
}

fn bind_value<'q, O>(
    query: sqlx::query::QueryAs<'q, sqlx::Sqlite, O, SqliteArguments<'q>>,
    value: &'q SqlValue,
) -> sqlx::query::QueryAs<'q, sqlx::Sqlite, O, SqliteArguments<'q>> {
    match value {
        SqlValue::String(s) => query.bind(s.as_str()),
        SqlValue::Int(i) => query.bind(*i),
        SqlValue::Float(f) => query.bind(*f),
        SqlValue::Bool(b) => query.bind(*b),
        SqlValue::Null => query.bind(None::<String>),
    }
}

/// A query builder for database entities.
pub struct EntityQuery<E: DatabaseEntity> {
    _phantom: std::marker::PhantomData<E>,
    where_clauses: Vec<String>,
    values: Vec<SqlValue>,
    order_by: Option<String>,
}

impl<E: DatabaseEntity> EntityQuery<E> {
    /// Create a new query builder for the entity type.
    pub fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
            where_clauses: Vec::new(),
            values: Vec::new(),
            order_by: None,
        }
    }

    /// `column = value`
    pub fn eq(mut self, column: &'static str, value: impl Into<SqlValue>) -> Self {
        self.where_clauses.push(format!("{} = ?", column));
        self.values.push(value.into());
        self
    }

    /// `column = value` when a value is given; no-op otherwise.
    pub fn eq_opt<V: Into<SqlValue>>(self, column: &'static str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.eq(column, v),
            None => self,
        }
    }

    /// Case-insensitive substring match over any of `columns`.
    pub fn search(mut self, columns: &[&'static str], term: Option<&str>) -> Self {
        let Some(term) = term else {
            return self;
        };
        if columns.is_empty() {
            return self;
        }

        let pattern = format!("%{}%", term.replace('%', "\\%").replace('_', "\\_"));
        let ors: Vec<String> = columns
            .iter()
            .map(|c| format!("{} LIKE ? ESCAPE '\\'", c))
            .collect();
        self.where_clauses.push(format!("({})", ors.join(" OR ")));
        for _ in columns {
            self.values.push(SqlValue::String(pattern.clone()));
        }
        self
    }

    /// Add sorting to the query.
    pub fn order_by(mut self, column: &'static str, direction: OrderDirection) -> Self {
        self.order_by = Some(format!("{} {}", column, direction.to_sql()));
        self
    }

    fn where_sql(&self) -> String {
        if self.where_clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.where_clauses.join(" AND "))
        }
    }

    fn order_sql(&self) -> String {
        let order = self
            .order_by
            .clone()
            .unwrap_or_else(|| format!("{} DESC", E::DEFAULT_SORT));
        // id as tie-breaker keeps pages stable
        format!(" ORDER BY {}, id ASC", order)
    }

    /// Build the SQL query string.
    pub(crate) fn build_sql(&self, window: Option<PageRequest>) -> String {
        let mut sql = E::select_sql();
        sql.push_str(&self.where_sql());
        sql.push_str(&self.order_sql());

        if let Some(request) = window {
            sql.push_str(&format!(" LIMIT {} OFFSET {}", request.limit(), request.offset()));
        }

        sql
    }

    /// Build a COUNT query string.
    pub(crate) fn build_count_sql(&self) -> String {
        format!("SELECT COUNT(*) FROM {}{}", E::TABLE_NAME, self.where_sql())
    }

    async fn fetch(&self, pool: &SqlitePool, window: Option<PageRequest>) -> Result<Vec<E>, sqlx::Error> {
        let sql = self.build_sql(window);
        tracing::debug!(sql = %sql, "Executing entity query");

        let mut query = sqlx::query_as::<_, E>(&sql);
        for value in &self.values {
            query = bind_value(query, value);
        }
        query.fetch_all(pool).await
    }

    /// Execute the query and return all matching entities.
    pub async fn fetch_all(&self, pool: &SqlitePool) -> ApiResult<Vec<E>> {
        self.fetch(pool, None)
            .await
            .map_err(|e| ApiError::from_db(e, E::DISPLAY_NAME))
    }

    /// Execute a COUNT query over the same filter.
    pub async fn count(&self, pool: &SqlitePool) -> ApiResult<i64> {
        let sql = self.build_count_sql();
        tracing::debug!(sql = %sql, "Executing count query");

        let mut query = sqlx::query_as::<_, (i64,)>(&sql);
        for value in &self.values {
            query = bind_value(query, value);
        }
        let (count,) = query
            .fetch_one(pool)
            .await
            .map_err(|e| ApiError::from_db(e, E::DISPLAY_NAME))?;
        Ok(count)
    }

    /// Fetch one page plus the total count for the same filter.
    pub async fn fetch_page(&self, pool: &SqlitePool, request: PageRequest) -> ApiResult<Page<E>> {
        let total = self.count(pool).await?;
        let nodes = self
            .fetch(pool, Some(request))
            .await
            .map_err(|e| ApiError::from_db(e, E::DISPLAY_NAME))?;
        Ok(Page::new(nodes, total, request))
    }
}

impl<E: DatabaseEntity> Default for EntityQuery<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Fetch a single entity by primary key, `NotFound` when absent.
pub async fn find_by_id<E: DatabaseEntity>(pool: &SqlitePool, id: &str) -> ApiResult<E> {
    find_by_id_opt(pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("No se encontró {}", E::DISPLAY_NAME)))
}

/// Fetch a single entity by primary key.
pub async fn find_by_id_opt<E: DatabaseEntity>(pool: &SqlitePool, id: &str) -> ApiResult<Option<E>> {
    let sql = format!("{} WHERE id = ?", E::select_sql());
    sqlx::query_as::<_, E>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| ApiError::from_db(e, E::DISPLAY_NAME))
}

/// Delete a single entity by primary key, `NotFound` when nothing was removed.
pub async fn delete_by_id<E: DatabaseEntity>(pool: &SqlitePool, id: &str) -> ApiResult<()> {
    let sql = format!("DELETE FROM {} WHERE id = ?", E::TABLE_NAME);
    let result = sqlx::query(&sql)
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db) = &e
                && db.is_foreign_key_violation()
            {
                tracing::warn!(error = %e, table = E::TABLE_NAME, id, "Delete blocked by dependent rows");
                return ApiError::bad_request(format!(
                    "No se puede eliminar {}: tiene registros asociados",
                    E::DISPLAY_NAME
                ));
            }
            ApiError::from_db(e, E::DISPLAY_NAME)
        })?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found(format!("No se encontró {}", E::DISPLAY_NAME)));
    }
    Ok(())
}
