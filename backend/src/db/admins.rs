//! Admin accounts repository

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use super::query::{DatabaseEntity, EntityQuery, delete_by_id, find_by_id};
use super::sqlite_helpers::{new_id, now_iso8601};
use crate::errors::{ApiError, ApiResult};
use crate::graphql::filters::OrderDirection;
use crate::graphql::pagination::{Page, PageRequest};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AdminRecord {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl DatabaseEntity for AdminRecord {
    const TABLE_NAME: &'static str = "admins";
    const COLUMNS: &'static str =
        "id, email, password_hash, name, is_active, created_at, updated_at";
    const DISPLAY_NAME: &'static str = "el administrador";
}

#[derive(Debug, Clone)]
pub struct CreateAdmin {
    pub email: String,
    pub password_hash: String,
    pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateAdmin {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password_hash: Option<String>,
    pub is_active: Option<bool>,
}

pub struct AdminRepository {
    pool: SqlitePool,
}

impl AdminRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new admin
    pub async fn create(&self, input: CreateAdmin) -> ApiResult<AdminRecord> {
        let id = new_id();
        let now = now_iso8601();

        sqlx::query(
            r#"
            INSERT INTO admins (id, email, password_hash, name, is_active, created_at, updated_at)
            VALUES (?, ?, ?, ?, 1, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(input.email.trim())
        .bind(&input.password_hash)
        .bind(&input.name)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| ApiError::from_db(e, AdminRecord::DISPLAY_NAME))?;

        self.get_by_id(&id).await
    }

    /// Get admin by ID
    pub async fn get_by_id(&self, id: &str) -> ApiResult<AdminRecord> {
        find_by_id(&self.pool, id).await
    }

    /// Get admin by email (case-insensitive)
    pub async fn get_by_email(&self, email: &str) -> ApiResult<Option<AdminRecord>> {
        let sql = format!("{} WHERE email = ? COLLATE NOCASE", AdminRecord::select_sql());
        sqlx::query_as::<_, AdminRecord>(&sql)
            .bind(email.trim())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ApiError::from_db(e, AdminRecord::DISPLAY_NAME))
    }

    /// List admins, optionally searching by name or email
    pub async fn list(&self, search: Option<&str>, request: PageRequest) -> ApiResult<Page<AdminRecord>> {
        EntityQuery::<AdminRecord>::new()
            .search(&["name", "email"], search)
            .order_by("name", OrderDirection::Asc)
            .fetch_page(&self.pool, request)
            .await
    }

    pub async fn count(&self) -> ApiResult<i64> {
        EntityQuery::<AdminRecord>::new().count(&self.pool).await
    }

    /// Update an admin; absent fields are left unchanged
    pub async fn update(&self, id: &str, input: UpdateAdmin) -> ApiResult<AdminRecord> {
        let result = sqlx::query(
            r#"
            UPDATE admins SET
                email = COALESCE(?, email),
                name = COALESCE(?, name),
                password_hash = COALESCE(?, password_hash),
                is_active = COALESCE(?, is_active),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(input.email.as_deref().map(str::trim))
        .bind(&input.name)
        .bind(&input.password_hash)
        .bind(input.is_active)
        .bind(now_iso8601())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| ApiError::from_db(e, AdminRecord::DISPLAY_NAME))?;

        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("No se encontró el administrador"));
        }
        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        delete_by_id::<AdminRecord>(&self.pool, id).await
    }
}
