//! Products repository

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use super::query::{DatabaseEntity, EntityQuery, delete_by_id, find_by_id};
use super::sqlite_helpers::{new_id, now_iso8601, round_money};
use crate::errors::{ApiError, ApiResult};
use crate::graphql::pagination::{Page, PageRequest};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProductRecord {
    pub id: String,
    pub seller_id: String,
    pub category_id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: i64,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl DatabaseEntity for ProductRecord {
    const TABLE_NAME: &'static str = "products";
    const COLUMNS: &'static str = "id, seller_id, category_id, name, description, price, stock, status, created_at, updated_at";
    const DISPLAY_NAME: &'static str = "el producto";
}

#[derive(Debug, Clone)]
pub struct CreateProduct {
    pub seller_id: String,
    pub category_id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: i64,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateProduct {
    pub category_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub seller_id: Option<String>,
    pub category_id: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
}

pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a product in `draft` status
    pub async fn create(&self, input: CreateProduct) -> ApiResult<ProductRecord> {
        let id = new_id();
        let now = now_iso8601();

        sqlx::query(
            r#"
            INSERT INTO products (id, seller_id, category_id, name, description, price, stock, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, 'draft', ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&input.seller_id)
        .bind(&input.category_id)
        .bind(input.name.trim())
        .bind(&input.description)
        .bind(round_money(input.price))
        .bind(input.stock)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| ApiError::from_db(e, ProductRecord::DISPLAY_NAME))?;

        self.get_by_id(&id).await
    }

    pub async fn get_by_id(&self, id: &str) -> ApiResult<ProductRecord> {
        find_by_id(&self.pool, id).await
    }

    pub async fn list(&self, filter: ProductFilter, request: PageRequest) -> ApiResult<Page<ProductRecord>> {
        EntityQuery::<ProductRecord>::new()
            .eq_opt("seller_id", filter.seller_id)
            .eq_opt("category_id", filter.category_id)
            .eq_opt("status", filter.status)
            .search(&["name", "description"], filter.search.as_deref())
            .fetch_page(&self.pool, request)
            .await
    }

    pub async fn update(&self, id: &str, input: UpdateProduct) -> ApiResult<ProductRecord> {
        let result = sqlx::query(
            r#"
            UPDATE products SET
                category_id = COALESCE(?, category_id),
                name = COALESCE(?, name),
                description = COALESCE(?, description),
                price = COALESCE(?, price),
                stock = COALESCE(?, stock),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&input.category_id)
        .bind(input.name.as_deref().map(str::trim))
        .bind(&input.description)
        .bind(input.price.map(round_money))
        .bind(input.stock)
        .bind(now_iso8601())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| ApiError::from_db(e, ProductRecord::DISPLAY_NAME))?;

        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("No se encontró el producto"));
        }
        self.get_by_id(id).await
    }

    pub async fn set_status(&self, id: &str, status: &str) -> ApiResult<ProductRecord> {
        let result = sqlx::query("UPDATE products SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status)
            .bind(now_iso8601())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| ApiError::from_db(e, ProductRecord::DISPLAY_NAME))?;

        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("No se encontró el producto"));
        }
        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        delete_by_id::<ProductRecord>(&self.pool, id).await
    }
}
