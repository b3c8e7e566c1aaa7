//! Seller services and quotation requests repository

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use super::query::{DatabaseEntity, EntityQuery, delete_by_id, find_by_id};
use super::sqlite_helpers::{new_id, now_iso8601, round_money};
use crate::errors::{ApiError, ApiResult};
use crate::graphql::pagination::{Page, PageRequest};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ServiceRecord {
    pub id: String,
    pub seller_id: String,
    pub name: String,
    pub description: Option<String>,
    pub base_price: f64,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl DatabaseEntity for ServiceRecord {
    const TABLE_NAME: &'static str = "services";
    const COLUMNS: &'static str =
        "id, seller_id, name, description, base_price, status, created_at, updated_at";
    const DISPLAY_NAME: &'static str = "el servicio";
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct QuotationRecord {
    pub id: String,
    pub service_id: String,
    pub requester_email: String,
    pub details: String,
    pub amount: Option<f64>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl DatabaseEntity for QuotationRecord {
    const TABLE_NAME: &'static str = "quotations";
    const COLUMNS: &'static str =
        "id, service_id, requester_email, details, amount, status, created_at, updated_at";
    const DISPLAY_NAME: &'static str = "la cotización";
}

#[derive(Debug, Clone)]
pub struct CreateService {
    pub seller_id: String,
    pub name: String,
    pub description: Option<String>,
    pub base_price: f64,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateService {
    pub name: Option<String>,
    pub description: Option<String>,
    pub base_price: Option<f64>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ServiceFilter {
    pub seller_id: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateQuotation {
    pub service_id: String,
    pub requester_email: String,
    pub details: String,
}

pub struct ServiceRepository {
    pool: SqlitePool,
}

impl ServiceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: CreateService) -> ApiResult<ServiceRecord> {
        let id = new_id();
        let now = now_iso8601();

        sqlx::query(
            r#"
            INSERT INTO services (id, seller_id, name, description, base_price, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, 'draft', ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&input.seller_id)
        .bind(input.name.trim())
        .bind(&input.description)
        .bind(round_money(input.base_price))
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| ApiError::from_db(e, ServiceRecord::DISPLAY_NAME))?;

        self.get_by_id(&id).await
    }

    pub async fn get_by_id(&self, id: &str) -> ApiResult<ServiceRecord> {
        find_by_id(&self.pool, id).await
    }

    pub async fn list(&self, filter: ServiceFilter, request: PageRequest) -> ApiResult<Page<ServiceRecord>> {
        EntityQuery::<ServiceRecord>::new()
            .eq_opt("seller_id", filter.seller_id)
            .eq_opt("status", filter.status)
            .search(&["name", "description"], filter.search.as_deref())
            .fetch_page(&self.pool, request)
            .await
    }

    pub async fn update(&self, id: &str, input: UpdateService) -> ApiResult<ServiceRecord> {
        let result = sqlx::query(
            r#"
            UPDATE services SET
                name = COALESCE(?, name),
                description = COALESCE(?, description),
                base_price = COALESCE(?, base_price),
                status = COALESCE(?, status),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(input.name.as_deref().map(str::trim))
        .bind(&input.description)
        .bind(input.base_price.map(round_money))
        .bind(&input.status)
        .bind(now_iso8601())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| ApiError::from_db(e, ServiceRecord::DISPLAY_NAME))?;

        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("No se encontró el servicio"));
        }
        self.get_by_id(id).await
    }

    /// Delete a service and its quotations
    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        delete_by_id::<ServiceRecord>(&self.pool, id).await
    }

    /// Open a quotation request in `pending` status
    pub async fn create_quotation(&self, input: CreateQuotation) -> ApiResult<QuotationRecord> {
        let id = new_id();
        let now = now_iso8601();

        sqlx::query(
            r#"
            INSERT INTO quotations (id, service_id, requester_email, details, amount, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, NULL, 'pending', ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&input.service_id)
        .bind(input.requester_email.trim())
        .bind(&input.details)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| ApiError::from_db(e, QuotationRecord::DISPLAY_NAME))?;

        find_by_id(&self.pool, &id).await
    }

    pub async fn get_quotation(&self, id: &str) -> ApiResult<QuotationRecord> {
        find_by_id(&self.pool, id).await
    }

    pub async fn list_quotations(
        &self,
        service_id: Option<&str>,
        status: Option<&str>,
        request: PageRequest,
    ) -> ApiResult<Page<QuotationRecord>> {
        EntityQuery::<QuotationRecord>::new()
            .eq_opt("service_id", service_id)
            .eq_opt("status", status)
            .fetch_page(&self.pool, request)
            .await
    }

    /// Answer a quotation; `amount` is kept when not given
    pub async fn set_quotation_status(
        &self,
        id: &str,
        status: &str,
        amount: Option<f64>,
    ) -> ApiResult<QuotationRecord> {
        let result = sqlx::query(
            "UPDATE quotations SET status = ?, amount = COALESCE(?, amount), updated_at = ? WHERE id = ?",
        )
        .bind(status)
        .bind(amount.map(round_money))
        .bind(now_iso8601())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| ApiError::from_db(e, QuotationRecord::DISPLAY_NAME))?;

        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("No se encontró la cotización"));
        }
        self.get_quotation(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::db::test_support::register_seller;
    use assert_matches::assert_matches;

    fn service(seller_id: &str, name: &str) -> CreateService {
        CreateService {
            seller_id: seller_id.to_string(),
            name: name.to_string(),
            description: Some("Instalación domiciliaria".into()),
            base_price: 150.0,
        }
    }

    #[tokio::test]
    async fn test_service_crud() {
        let db = Database::connect_in_memory().await.unwrap();
        let seller = register_seller(&db, "solar@eco.com").await;
        let created = db.services().create(service(&seller.id, "Paneles solares")).await.unwrap();
        assert_eq!(created.status, "draft");

        let updated = db
            .services()
            .update(
                &created.id,
                UpdateService {
                    status: Some("active".into()),
                    base_price: Some(175.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.status, "active");
        assert_eq!(updated.base_price, 175.0);
        assert_eq!(updated.name, "Paneles solares");

        db.services().delete(&created.id).await.unwrap();
        let err = db.services().get_by_id(&created.id).await.unwrap_err();
        assert_matches!(err, ApiError::NotFound(_));
    }

    #[tokio::test]
    async fn test_search_services() {
        let db = Database::connect_in_memory().await.unwrap();
        let seller = register_seller(&db, "solar@eco.com").await;
        db.services().create(service(&seller.id, "Paneles solares")).await.unwrap();
        db.services().create(service(&seller.id, "Compostaje")).await.unwrap();

        let page = db
            .services()
            .list(
                ServiceFilter {
                    search: Some("compost".into()),
                    ..Default::default()
                },
                PageRequest::default(),
            )
            .await
            .unwrap();
        assert_eq!(page.page_info.total_count, 1);
        assert_eq!(page.nodes[0].name, "Compostaje");
    }

    #[tokio::test]
    async fn test_quotation_lifecycle() {
        let db = Database::connect_in_memory().await.unwrap();
        let seller = register_seller(&db, "solar@eco.com").await;
        let svc = db.services().create(service(&seller.id, "Paneles solares")).await.unwrap();

        let quote = db
            .services()
            .create_quotation(CreateQuotation {
                service_id: svc.id.clone(),
                requester_email: "cliente@correo.com".into(),
                details: "Casa de dos pisos".into(),
            })
            .await
            .unwrap();
        assert_eq!(quote.status, "pending");
        assert_eq!(quote.amount, None);

        let accepted = db
            .services()
            .set_quotation_status(&quote.id, "accepted", Some(900.0))
            .await
            .unwrap();
        assert_eq!(accepted.amount, Some(900.0));

        let pending = db
            .services()
            .list_quotations(Some(svc.id.as_str()), Some("pending"), PageRequest::default())
            .await
            .unwrap();
        assert_eq!(pending.page_info.total_count, 0);
    }

    #[tokio::test]
    async fn test_quotation_for_missing_service_rejected() {
        let db = Database::connect_in_memory().await.unwrap();
        let err = db
            .services()
            .create_quotation(CreateQuotation {
                service_id: "missing".into(),
                requester_email: "cliente@correo.com".into(),
                details: "x".into(),
            })
            .await
            .unwrap_err();
        assert_matches!(err, ApiError::BadRequest(_));
    }
}
