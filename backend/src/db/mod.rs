//! Database connection and operations

pub mod admins;
pub mod categories;
pub mod locations;
pub mod orders;
pub mod payments;
pub mod posts;
pub mod products;
pub mod query;
pub mod seed;
pub mod sellers;
pub mod services;
pub mod sqlite_helpers;

#[cfg(test)]
pub(crate) mod test_support;

use std::str::FromStr;

use anyhow::Result;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub use admins::{AdminRecord, AdminRepository, CreateAdmin, UpdateAdmin};
pub use categories::{CategoryRepository, CreateCategory, ProductCategoryRecord, UpdateCategory};
pub use locations::{CityRecord, CountryRecord, DepartmentRecord, LocationRepository};
pub use orders::{CreateOrder, OrderFilter, OrderRecord, OrderRepository};
pub use payments::{CreatePayment, CreateRefund, PaymentFilter, PaymentRecord, PaymentRepository, RefundRecord};
pub use posts::{CreatePost, PostFilter, PostRecord, PostRepository, UpdatePost};
pub use products::{CreateProduct, ProductFilter, ProductRecord, ProductRepository, UpdateProduct};
pub use query::{DatabaseEntity, EntityQuery, SqlValue};
pub use sellers::{
    RegisterSeller, SellerFilter, SellerProfileRecord, SellerRecord, SellerRepository,
    UpdateSeller, UpdateSellerProfile,
};
pub use services::{
    CreateQuotation, CreateService, QuotationRecord, ServiceFilter, ServiceRecord,
    ServiceRepository, UpdateService,
};

/// Database wrapper providing connection pool access
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a new database wrapper from an existing pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new database connection pool
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Fresh in-memory database with migrations applied.
    ///
    /// Uses a single connection so every query sees the same database.
    pub async fn connect_in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Get the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Get an admin repository
    pub fn admins(&self) -> AdminRepository {
        AdminRepository::new(self.pool.clone())
    }

    /// Get a seller repository (sellers and their profiles)
    pub fn sellers(&self) -> SellerRepository {
        SellerRepository::new(self.pool.clone())
    }

    /// Get a product category repository
    pub fn categories(&self) -> CategoryRepository {
        CategoryRepository::new(self.pool.clone())
    }

    /// Get a product repository
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.pool.clone())
    }

    /// Get an order repository
    pub fn orders(&self) -> OrderRepository {
        OrderRepository::new(self.pool.clone())
    }

    /// Get a payment repository (payments and refunds)
    pub fn payments(&self) -> PaymentRepository {
        PaymentRepository::new(self.pool.clone())
    }

    /// Get a service repository (services and quotations)
    pub fn services(&self) -> ServiceRepository {
        ServiceRepository::new(self.pool.clone())
    }

    /// Get a community post repository
    pub fn posts(&self) -> PostRepository {
        PostRepository::new(self.pool.clone())
    }

    /// Get a location repository (countries, departments, cities)
    pub fn locations(&self) -> LocationRepository {
        LocationRepository::new(self.pool.clone())
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Cheap connectivity probe
    pub async fn ping(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}
