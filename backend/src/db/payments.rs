//! Payments and refunds repository

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use super::query::{DatabaseEntity, EntityQuery, find_by_id};
use super::sqlite_helpers::{new_id, now_iso8601, round_money};
use crate::errors::{ApiError, ApiResult};
use crate::graphql::pagination::{Page, PageRequest};

const STATUS_COMPLETED: &str = "completed";
const STATUS_PARTIALLY_REFUNDED: &str = "partially_refunded";
const STATUS_REFUNDED: &str = "refunded";

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PaymentRecord {
    pub id: String,
    pub order_id: String,
    pub amount: f64,
    pub method: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl DatabaseEntity for PaymentRecord {
    const TABLE_NAME: &'static str = "payments";
    const COLUMNS: &'static str = "id, order_id, amount, method, status, created_at, updated_at";
    const DISPLAY_NAME: &'static str = "el pago";
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RefundRecord {
    pub id: String,
    pub payment_id: String,
    pub amount: f64,
    pub reason: Option<String>,
    pub created_at: String,
}

impl DatabaseEntity for RefundRecord {
    const TABLE_NAME: &'static str = "refunds";
    const COLUMNS: &'static str = "id, payment_id, amount, reason, created_at";
    const DISPLAY_NAME: &'static str = "el reembolso";
}

#[derive(Debug, Clone)]
pub struct CreatePayment {
    pub order_id: String,
    pub amount: f64,
    pub method: String,
}

#[derive(Debug, Clone)]
pub struct CreateRefund {
    pub payment_id: String,
    pub amount: f64,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct PaymentFilter {
    pub order_id: Option<String>,
    pub status: Option<String>,
}

pub struct PaymentRepository {
    pool: SqlitePool,
}

impl PaymentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Record a payment in `pending` status
    pub async fn create(&self, input: CreatePayment) -> ApiResult<PaymentRecord> {
        let id = new_id();
        let now = now_iso8601();

        sqlx::query(
            r#"
            INSERT INTO payments (id, order_id, amount, method, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, 'pending', ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&input.order_id)
        .bind(round_money(input.amount))
        .bind(input.method.trim())
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| ApiError::from_db(e, PaymentRecord::DISPLAY_NAME))?;

        self.get_by_id(&id).await
    }

    pub async fn get_by_id(&self, id: &str) -> ApiResult<PaymentRecord> {
        find_by_id(&self.pool, id).await
    }

    pub async fn list(&self, filter: PaymentFilter, request: PageRequest) -> ApiResult<Page<PaymentRecord>> {
        EntityQuery::<PaymentRecord>::new()
            .eq_opt("order_id", filter.order_id)
            .eq_opt("status", filter.status)
            .fetch_page(&self.pool, request)
            .await
    }

    pub async fn set_status(&self, id: &str, status: &str) -> ApiResult<PaymentRecord> {
        let result = sqlx::query("UPDATE payments SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status)
            .bind(now_iso8601())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| ApiError::from_db(e, PaymentRecord::DISPLAY_NAME))?;

        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("No se encontró el pago"));
        }
        self.get_by_id(id).await
    }

    /// Refunds issued against a payment, newest first
    pub async fn list_refunds(&self, payment_id: &str, request: PageRequest) -> ApiResult<Page<RefundRecord>> {
        EntityQuery::<RefundRecord>::new()
            .eq("payment_id", payment_id)
            .fetch_page(&self.pool, request)
            .await
    }

    /// Refund part or all of a completed payment.
    ///
    /// The refund row and the payment status change commit together. The
    /// payment ends `refunded` once refunds add up to its amount, otherwise
    /// `partially_refunded`.
    pub async fn create_refund(&self, input: CreateRefund) -> ApiResult<(RefundRecord, PaymentRecord)> {
        let amount = round_money(input.amount);
        if amount <= 0.0 {
            return Err(ApiError::bad_request("El monto del reembolso debe ser mayor a 0"));
        }

        let mut tx = self.pool.begin().await?;

        let sql = format!("{} WHERE id = ?", PaymentRecord::select_sql());
        let payment = sqlx::query_as::<_, PaymentRecord>(&sql)
            .bind(&input.payment_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| ApiError::from_db(e, PaymentRecord::DISPLAY_NAME))?
            .ok_or_else(|| ApiError::not_found("No se encontró el pago"))?;

        if payment.status != STATUS_COMPLETED && payment.status != STATUS_PARTIALLY_REFUNDED {
            return Err(ApiError::bad_request("Solo se pueden reembolsar pagos completados"));
        }

        let (refunded,): (f64,) =
            sqlx::query_as("SELECT COALESCE(SUM(amount), 0.0) FROM refunds WHERE payment_id = ?")
                .bind(&payment.id)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| ApiError::from_db(e, RefundRecord::DISPLAY_NAME))?;

        let remaining = round_money(payment.amount - refunded);
        if amount > remaining {
            return Err(ApiError::bad_request(
                "El monto del reembolso excede el saldo reembolsable",
            ));
        }

        let refund_id = new_id();
        let now = now_iso8601();

        sqlx::query("INSERT INTO refunds (id, payment_id, amount, reason, created_at) VALUES (?, ?, ?, ?, ?)")
            .bind(&refund_id)
            .bind(&payment.id)
            .bind(amount)
            .bind(&input.reason)
            .bind(&now)
            .execute(&mut *tx)
            .await
            .map_err(|e| ApiError::from_db(e, RefundRecord::DISPLAY_NAME))?;

        let status = if round_money(remaining - amount) <= 0.0 {
            STATUS_REFUNDED
        } else {
            STATUS_PARTIALLY_REFUNDED
        };

        sqlx::query("UPDATE payments SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status)
            .bind(&now)
            .bind(&payment.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| ApiError::from_db(e, PaymentRecord::DISPLAY_NAME))?;

        tx.commit().await?;

        tracing::info!(payment_id = %payment.id, amount, status, "Refund issued");

        let refund = find_by_id::<RefundRecord>(&self.pool, &refund_id).await?;
        let payment = self.get_by_id(&payment.id).await?;
        Ok((refund, payment))
    }
}
