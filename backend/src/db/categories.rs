//! Product categories repository

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use super::query::{DatabaseEntity, EntityQuery, delete_by_id, find_by_id};
use super::sqlite_helpers::{new_id, now_iso8601};
use crate::errors::{ApiError, ApiResult};
use crate::graphql::filters::OrderDirection;
use crate::graphql::pagination::{Page, PageRequest};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProductCategoryRecord {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl DatabaseEntity for ProductCategoryRecord {
    const TABLE_NAME: &'static str = "product_categories";
    const COLUMNS: &'static str = "id, name, description, created_at, updated_at";
    const DISPLAY_NAME: &'static str = "la categoría";
}

#[derive(Debug, Clone)]
pub struct CreateCategory {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateCategory {
    pub name: Option<String>,
    pub description: Option<String>,
}

pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: CreateCategory) -> ApiResult<ProductCategoryRecord> {
        let id = new_id();
        let now = now_iso8601();

        sqlx::query(
            r#"
            INSERT INTO product_categories (id, name, description, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(input.name.trim())
        .bind(&input.description)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| ApiError::from_db(e, ProductCategoryRecord::DISPLAY_NAME))?;

        self.get_by_id(&id).await
    }

    pub async fn get_by_id(&self, id: &str) -> ApiResult<ProductCategoryRecord> {
        find_by_id(&self.pool, id).await
    }

    pub async fn list(&self, request: PageRequest) -> ApiResult<Page<ProductCategoryRecord>> {
        EntityQuery::<ProductCategoryRecord>::new()
            .order_by("name", OrderDirection::Asc)
            .fetch_page(&self.pool, request)
            .await
    }

    pub async fn update(&self, id: &str, input: UpdateCategory) -> ApiResult<ProductCategoryRecord> {
        let result = sqlx::query(
            r#"
            UPDATE product_categories SET
                name = COALESCE(?, name),
                description = COALESCE(?, description),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(input.name.as_deref().map(str::trim))
        .bind(&input.description)
        .bind(now_iso8601())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| ApiError::from_db(e, ProductCategoryRecord::DISPLAY_NAME))?;

        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("No se encontró la categoría"));
        }
        self.get_by_id(id).await
    }

    /// Delete a category; its products keep existing without a category
    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        delete_by_id::<ProductCategoryRecord>(&self.pool, id).await
    }
}
