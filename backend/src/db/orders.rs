//! Orders repository

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use super::products::ProductRecord;
use super::query::{DatabaseEntity, EntityQuery, find_by_id};
use super::sqlite_helpers::{new_id, now_iso8601, round_money};
use crate::errors::{ApiError, ApiResult};
use crate::graphql::pagination::{Page, PageRequest};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OrderRecord {
    pub id: String,
    pub seller_id: String,
    pub product_id: String,
    pub buyer_email: String,
    pub quantity: i64,
    pub total: f64,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl DatabaseEntity for OrderRecord {
    const TABLE_NAME: &'static str = "orders";
    const COLUMNS: &'static str =
        "id, seller_id, product_id, buyer_email, quantity, total, status, created_at, updated_at";
    const DISPLAY_NAME: &'static str = "la orden";
}

#[derive(Debug, Clone)]
pub struct CreateOrder {
    pub product_id: String,
    pub buyer_email: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub seller_id: Option<String>,
    pub status: Option<String>,
}

pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Place an order for a product.
    ///
    /// The total is `price * quantity` at the time of the order and the
    /// product stock is decremented in the same transaction.
    pub async fn create(&self, input: CreateOrder) -> ApiResult<OrderRecord> {
        if input.quantity < 1 {
            return Err(ApiError::bad_request("La cantidad debe ser mayor o igual a 1"));
        }

        let mut tx = self.pool.begin().await?;

        let sql = format!("{} WHERE id = ?", ProductRecord::select_sql());
        let product = sqlx::query_as::<_, ProductRecord>(&sql)
            .bind(&input.product_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| ApiError::from_db(e, ProductRecord::DISPLAY_NAME))?
            .ok_or_else(|| ApiError::not_found("No se encontró el producto"))?;

        if input.quantity > product.stock {
            return Err(ApiError::bad_request("Stock insuficiente para el producto"));
        }

        let id = new_id();
        let now = now_iso8601();
        let total = round_money(product.price * input.quantity as f64);

        sqlx::query(
            r#"
            INSERT INTO orders (id, seller_id, product_id, buyer_email, quantity, total, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, 'pending', ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&product.seller_id)
        .bind(&product.id)
        .bind(input.buyer_email.trim())
        .bind(input.quantity)
        .bind(total)
        .bind(&now)
        .bind(&now)
        .execute(&mut *tx)
        .await
        .map_err(|e| ApiError::from_db(e, OrderRecord::DISPLAY_NAME))?;

        sqlx::query("UPDATE products SET stock = stock - ?, updated_at = ? WHERE id = ?")
            .bind(input.quantity)
            .bind(&now)
            .bind(&product.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| ApiError::from_db(e, ProductRecord::DISPLAY_NAME))?;

        tx.commit().await?;

        tracing::info!(order_id = %id, product_id = %product.id, quantity = input.quantity, "Order created");
        self.get_by_id(&id).await
    }

    pub async fn get_by_id(&self, id: &str) -> ApiResult<OrderRecord> {
        find_by_id(&self.pool, id).await
    }

    pub async fn list(&self, filter: OrderFilter, request: PageRequest) -> ApiResult<Page<OrderRecord>> {
        EntityQuery::<OrderRecord>::new()
            .eq_opt("seller_id", filter.seller_id)
            .eq_opt("status", filter.status)
            .fetch_page(&self.pool, request)
            .await
    }

    pub async fn set_status(&self, id: &str, status: &str) -> ApiResult<OrderRecord> {
        let result = sqlx::query("UPDATE orders SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status)
            .bind(now_iso8601())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| ApiError::from_db(e, OrderRecord::DISPLAY_NAME))?;

        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("No se encontró la orden"));
        }
        self.get_by_id(id).await
    }
}
