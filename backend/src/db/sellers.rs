//! Sellers and seller profiles repository

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use super::query::{DatabaseEntity, EntityQuery, delete_by_id, find_by_id};
use super::sqlite_helpers::{new_id, now_iso8601};
use crate::errors::{ApiError, ApiResult};
use crate::graphql::pagination::{Page, PageRequest};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SellerRecord {
    pub id: String,
    pub email: String,
    pub name: String,
    pub seller_type: String,
    pub phone: Option<String>,
    pub city_id: Option<String>,
    pub is_verified: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl DatabaseEntity for SellerRecord {
    const TABLE_NAME: &'static str = "sellers";
    const COLUMNS: &'static str =
        "id, email, name, seller_type, phone, city_id, is_verified, created_at, updated_at";
    const DISPLAY_NAME: &'static str = "el vendedor";
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SellerProfileRecord {
    pub id: String,
    pub seller_id: String,
    pub description: Option<String>,
    pub avatar_url: Option<String>,
    pub website: Option<String>,
    pub sustainability_score: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl DatabaseEntity for SellerProfileRecord {
    const TABLE_NAME: &'static str = "seller_profiles";
    const COLUMNS: &'static str = "id, seller_id, description, avatar_url, website, sustainability_score, created_at, updated_at";
    const DISPLAY_NAME: &'static str = "el perfil del vendedor";
}

/// Seller plus initial profile, stored together
#[derive(Debug, Clone)]
pub struct RegisterSeller {
    pub email: String,
    pub name: String,
    pub seller_type: String,
    pub phone: Option<String>,
    pub city_id: Option<String>,
    pub description: Option<String>,
    pub avatar_url: Option<String>,
    pub website: Option<String>,
    pub sustainability_score: i64,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateSeller {
    pub email: Option<String>,
    pub name: Option<String>,
    pub seller_type: Option<String>,
    pub phone: Option<String>,
    pub city_id: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateSellerProfile {
    pub description: Option<String>,
    pub avatar_url: Option<String>,
    pub website: Option<String>,
    pub sustainability_score: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct SellerFilter {
    pub search: Option<String>,
    pub seller_type: Option<String>,
}

pub struct SellerRepository {
    pool: SqlitePool,
}

impl SellerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a seller and its profile in one transaction
    pub async fn register(&self, input: RegisterSeller) -> ApiResult<(SellerRecord, SellerProfileRecord)> {
        let seller_id = new_id();
        let profile_id = new_id();
        let now = now_iso8601();

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO sellers (id, email, name, seller_type, phone, city_id, is_verified, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, 0, ?, ?)
            "#,
        )
        .bind(&seller_id)
        .bind(input.email.trim())
        .bind(&input.name)
        .bind(&input.seller_type)
        .bind(&input.phone)
        .bind(&input.city_id)
        .bind(&now)
        .bind(&now)
        .execute(&mut *tx)
        .await
        .map_err(|e| ApiError::from_db(e, SellerRecord::DISPLAY_NAME))?;

        sqlx::query(
            r#"
            INSERT INTO seller_profiles (id, seller_id, description, avatar_url, website, sustainability_score, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&profile_id)
        .bind(&seller_id)
        .bind(&input.description)
        .bind(&input.avatar_url)
        .bind(&input.website)
        .bind(input.sustainability_score)
        .bind(&now)
        .bind(&now)
        .execute(&mut *tx)
        .await
        .map_err(|e| ApiError::from_db(e, SellerProfileRecord::DISPLAY_NAME))?;

        tx.commit().await?;

        let seller = self.get_by_id(&seller_id).await?;
        let profile = self.get_profile(&seller_id).await?;
        Ok((seller, profile))
    }

    pub async fn get_by_id(&self, id: &str) -> ApiResult<SellerRecord> {
        find_by_id(&self.pool, id).await
    }

    /// Profile of a seller
    pub async fn get_profile(&self, seller_id: &str) -> ApiResult<SellerProfileRecord> {
        let sql = format!("{} WHERE seller_id = ?", SellerProfileRecord::select_sql());
        sqlx::query_as::<_, SellerProfileRecord>(&sql)
            .bind(seller_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ApiError::from_db(e, SellerProfileRecord::DISPLAY_NAME))
    }

    /// List sellers, newest first
    pub async fn list(&self, filter: SellerFilter, request: PageRequest) -> ApiResult<Page<SellerRecord>> {
        EntityQuery::<SellerRecord>::new()
            .eq_opt("seller_type", filter.seller_type)
            .search(&["name", "email"], filter.search.as_deref())
            .fetch_page(&self.pool, request)
            .await
    }

    pub async fn update(&self, id: &str, input: UpdateSeller) -> ApiResult<SellerRecord> {
        let result = sqlx::query(
            r#"
            UPDATE sellers SET
                email = COALESCE(?, email),
                name = COALESCE(?, name),
                seller_type = COALESCE(?, seller_type),
                phone = COALESCE(?, phone),
                city_id = COALESCE(?, city_id),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(input.email.as_deref().map(str::trim))
        .bind(&input.name)
        .bind(&input.seller_type)
        .bind(&input.phone)
        .bind(&input.city_id)
        .bind(now_iso8601())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| ApiError::from_db(e, SellerRecord::DISPLAY_NAME))?;

        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("No se encontró el vendedor"));
        }
        self.get_by_id(id).await
    }

    pub async fn update_profile(
        &self,
        seller_id: &str,
        input: UpdateSellerProfile,
    ) -> ApiResult<SellerProfileRecord> {
        let result = sqlx::query(
            r#"
            UPDATE seller_profiles SET
                description = COALESCE(?, description),
                avatar_url = COALESCE(?, avatar_url),
                website = COALESCE(?, website),
                sustainability_score = COALESCE(?, sustainability_score),
                updated_at = ?
            WHERE seller_id = ?
            "#,
        )
        .bind(&input.description)
        .bind(&input.avatar_url)
        .bind(&input.website)
        .bind(input.sustainability_score)
        .bind(now_iso8601())
        .bind(seller_id)
        .execute(&self.pool)
        .await
        .map_err(|e| ApiError::from_db(e, SellerProfileRecord::DISPLAY_NAME))?;

        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("No se encontró el perfil del vendedor"));
        }
        self.get_profile(seller_id).await
    }

    /// Mark a seller as verified (or revoke it)
    pub async fn set_verified(&self, id: &str, verified: bool) -> ApiResult<SellerRecord> {
        let result = sqlx::query("UPDATE sellers SET is_verified = ?, updated_at = ? WHERE id = ?")
            .bind(verified)
            .bind(now_iso8601())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| ApiError::from_db(e, SellerRecord::DISPLAY_NAME))?;

        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("No se encontró el vendedor"));
        }
        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        delete_by_id::<SellerRecord>(&self.pool, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::create_product;
    use crate::db::{CreateOrder, Database};
    use assert_matches::assert_matches;

    fn registration(email: &str) -> RegisterSeller {
        RegisterSeller {
            email: email.to_string(),
            name: "Huerta Viva".to_string(),
            seller_type: "business".to_string(),
            phone: None,
            city_id: None,
            description: Some("Hortalizas orgánicas".to_string()),
            avatar_url: None,
            website: None,
            sustainability_score: 80,
        }
    }

    #[tokio::test]
    async fn test_register_creates_seller_and_profile() {
        let db = Database::connect_in_memory().await.unwrap();
        let (seller, profile) = db.sellers().register(registration("huerta@eco.com")).await.unwrap();

        assert_eq!(profile.seller_id, seller.id);
        assert_eq!(profile.sustainability_score, 80);
        assert!(!seller.is_verified);
    }

    #[tokio::test]
    async fn test_register_rolls_back_when_profile_fails() {
        let db = Database::connect_in_memory().await.unwrap();
        let mut input = registration("huerta@eco.com");
        input.sustainability_score = 150;

        let err = db.sellers().register(input).await.unwrap_err();
        assert_matches!(err, ApiError::BadRequest(_));

        let page = db
            .sellers()
            .list(SellerFilter::default(), PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.page_info.total_count, 0);
    }

    #[tokio::test]
    async fn test_invalid_seller_type_rejected() {
        let db = Database::connect_in_memory().await.unwrap();
        let mut input = registration("huerta@eco.com");
        input.seller_type = "robot".to_string();
        let err = db.sellers().register(input).await.unwrap_err();
        assert_matches!(err, ApiError::BadRequest(_));
    }

    #[tokio::test]
    async fn test_filter_by_type_and_search() {
        let db = Database::connect_in_memory().await.unwrap();
        db.sellers().register(registration("huerta@eco.com")).await.unwrap();
        let mut person = registration("lucia@eco.com");
        person.name = "Lucía Reciclaje".to_string();
        person.seller_type = "person".to_string();
        db.sellers().register(person).await.unwrap();

        let people = db
            .sellers()
            .list(
                SellerFilter {
                    seller_type: Some("person".into()),
                    ..Default::default()
                },
                PageRequest::default(),
            )
            .await
            .unwrap();
        assert_eq!(people.nodes.len(), 1);
        assert_eq!(people.nodes[0].email, "lucia@eco.com");

        let found = db
            .sellers()
            .list(
                SellerFilter {
                    search: Some("huerta".into()),
                    ..Default::default()
                },
                PageRequest::default(),
            )
            .await
            .unwrap();
        assert_eq!(found.page_info.total_count, 1);
    }

    #[tokio::test]
    async fn test_verify_and_update_profile() {
        let db = Database::connect_in_memory().await.unwrap();
        let (seller, _) = db.sellers().register(registration("huerta@eco.com")).await.unwrap();

        let verified = db.sellers().set_verified(&seller.id, true).await.unwrap();
        assert!(verified.is_verified);

        let profile = db
            .sellers()
            .update_profile(
                &seller.id,
                UpdateSellerProfile {
                    sustainability_score: Some(95),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(profile.sustainability_score, 95);
        assert_eq!(profile.description.as_deref(), Some("Hortalizas orgánicas"));
    }

    #[tokio::test]
    async fn test_delete_seller_with_orders_is_refused() {
        let db = Database::connect_in_memory().await.unwrap();
        let (seller, _) = db.sellers().register(registration("huerta@eco.com")).await.unwrap();
        let product = create_product(&db, &seller.id, 12.5, 4).await;
        db.orders()
            .create(CreateOrder {
                product_id: product.id,
                buyer_email: "cliente@eco.com".to_string(),
                quantity: 1,
            })
            .await
            .unwrap();

        let err = db.sellers().delete(&seller.id).await.unwrap_err();
        assert_eq!(
            err,
            ApiError::BadRequest(
                "No se puede eliminar el vendedor: tiene registros asociados".to_string()
            )
        );
        assert!(db.sellers().get_by_id(&seller.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_seller_without_orders() {
        let db = Database::connect_in_memory().await.unwrap();
        let (seller, _) = db.sellers().register(registration("huerta@eco.com")).await.unwrap();
        create_product(&db, &seller.id, 12.5, 4).await;

        db.sellers().delete(&seller.id).await.unwrap();
        assert_matches!(db.sellers().get_by_id(&seller.id).await, Err(ApiError::NotFound(_)));
    }
}
