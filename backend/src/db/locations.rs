//! Reference location data: countries, departments and cities

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use super::query::{DatabaseEntity, EntityQuery, delete_by_id, find_by_id};
use super::sqlite_helpers::{new_id, now_iso8601};
use crate::errors::{ApiError, ApiResult};
use crate::graphql::filters::OrderDirection;
use crate::graphql::pagination::{Page, PageRequest};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CountryRecord {
    pub id: String,
    pub name: String,
    pub code: String,
    pub created_at: String,
    pub updated_at: String,
}

impl DatabaseEntity for CountryRecord {
    const TABLE_NAME: &'static str = "countries";
    const COLUMNS: &'static str = "id, name, code, created_at, updated_at";
    const DISPLAY_NAME: &'static str = "el país";
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct DepartmentRecord {
    pub id: String,
    pub country_id: String,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

impl DatabaseEntity for DepartmentRecord {
    const TABLE_NAME: &'static str = "departments";
    const COLUMNS: &'static str = "id, country_id, name, created_at, updated_at";
    const DISPLAY_NAME: &'static str = "el departamento";
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CityRecord {
    pub id: String,
    pub department_id: String,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

impl DatabaseEntity for CityRecord {
    const TABLE_NAME: &'static str = "cities";
    const COLUMNS: &'static str = "id, department_id, name, created_at, updated_at";
    const DISPLAY_NAME: &'static str = "la ciudad";
}

pub struct LocationRepository {
    pool: SqlitePool,
}

impl LocationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List countries alphabetically
    pub async fn list_countries(&self, request: PageRequest) -> ApiResult<Page<CountryRecord>> {
        EntityQuery::<CountryRecord>::new()
            .order_by("name", OrderDirection::Asc)
            .fetch_page(&self.pool, request)
            .await
    }

    pub async fn get_country(&self, id: &str) -> ApiResult<CountryRecord> {
        find_by_id(&self.pool, id).await
    }

    /// Create a country; `code` is stored upper-cased
    pub async fn create_country(&self, name: &str, code: &str) -> ApiResult<CountryRecord> {
        let id = new_id();
        let now = now_iso8601();

        sqlx::query(
            "INSERT INTO countries (id, name, code, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(name.trim())
        .bind(code.trim().to_uppercase())
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| ApiError::from_db(e, CountryRecord::DISPLAY_NAME))?;

        self.get_country(&id).await
    }

    /// Delete a country together with its departments and cities
    pub async fn delete_country(&self, id: &str) -> ApiResult<()> {
        delete_by_id::<CountryRecord>(&self.pool, id).await
    }

    pub async fn list_departments(
        &self,
        country_id: Option<&str>,
        request: PageRequest,
    ) -> ApiResult<Page<DepartmentRecord>> {
        EntityQuery::<DepartmentRecord>::new()
            .eq_opt("country_id", country_id)
            .order_by("name", OrderDirection::Asc)
            .fetch_page(&self.pool, request)
            .await
    }

    pub async fn create_department(&self, country_id: &str, name: &str) -> ApiResult<DepartmentRecord> {
        let id = new_id();
        let now = now_iso8601();

        sqlx::query(
            "INSERT INTO departments (id, country_id, name, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(country_id)
        .bind(name.trim())
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| ApiError::from_db(e, DepartmentRecord::DISPLAY_NAME))?;

        find_by_id(&self.pool, &id).await
    }

    pub async fn list_cities(
        &self,
        department_id: Option<&str>,
        request: PageRequest,
    ) -> ApiResult<Page<CityRecord>> {
        EntityQuery::<CityRecord>::new()
            .eq_opt("department_id", department_id)
            .order_by("name", OrderDirection::Asc)
            .fetch_page(&self.pool, request)
            .await
    }

    pub async fn create_city(&self, department_id: &str, name: &str) -> ApiResult<CityRecord> {
        let id = new_id();
        let now = now_iso8601();

        sqlx::query(
            "INSERT INTO cities (id, department_id, name, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(department_id)
        .bind(name.trim())
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| ApiError::from_db(e, CityRecord::DISPLAY_NAME))?;

        find_by_id(&self.pool, &id).await
    }
}
