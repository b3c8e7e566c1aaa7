//! Community posts repository

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use super::query::{DatabaseEntity, EntityQuery, delete_by_id, find_by_id};
use super::sqlite_helpers::{new_id, now_iso8601};
use crate::errors::{ApiError, ApiResult};
use crate::graphql::pagination::{Page, PageRequest};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PostRecord {
    pub id: String,
    pub seller_id: String,
    pub title: String,
    pub content: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl DatabaseEntity for PostRecord {
    const TABLE_NAME: &'static str = "posts";
    const COLUMNS: &'static str = "id, seller_id, title, content, status, created_at, updated_at";
    const DISPLAY_NAME: &'static str = "la publicación";
}

#[derive(Debug, Clone)]
pub struct CreatePost {
    pub seller_id: String,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdatePost {
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    pub seller_id: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
}

pub struct PostRepository {
    pool: SqlitePool,
}

impl PostRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: CreatePost) -> ApiResult<PostRecord> {
        let id = new_id();
        let now = now_iso8601();

        sqlx::query(
            r#"
            INSERT INTO posts (id, seller_id, title, content, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, 'draft', ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&input.seller_id)
        .bind(input.title.trim())
        .bind(&input.content)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| ApiError::from_db(e, PostRecord::DISPLAY_NAME))?;

        self.get_by_id(&id).await
    }

    pub async fn get_by_id(&self, id: &str) -> ApiResult<PostRecord> {
        find_by_id(&self.pool, id).await
    }

    pub async fn list(&self, filter: PostFilter, request: PageRequest) -> ApiResult<Page<PostRecord>> {
        EntityQuery::<PostRecord>::new()
            .eq_opt("seller_id", filter.seller_id)
            .eq_opt("status", filter.status)
            .search(&["title", "content"], filter.search.as_deref())
            .fetch_page(&self.pool, request)
            .await
    }

    pub async fn update(&self, id: &str, input: UpdatePost) -> ApiResult<PostRecord> {
        let result = sqlx::query(
            r#"
            UPDATE posts SET
                title = COALESCE(?, title),
                content = COALESCE(?, content),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(input.title.as_deref().map(str::trim))
        .bind(&input.content)
        .bind(now_iso8601())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| ApiError::from_db(e, PostRecord::DISPLAY_NAME))?;

        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("No se encontró la publicación"));
        }
        self.get_by_id(id).await
    }

    pub async fn set_status(&self, id: &str, status: &str) -> ApiResult<PostRecord> {
        let result = sqlx::query("UPDATE posts SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status)
            .bind(now_iso8601())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| ApiError::from_db(e, PostRecord::DISPLAY_NAME))?;

        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("No se encontró la publicación"));
        }
        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        delete_by_id::<PostRecord>(&self.pool, id).await
    }
}
