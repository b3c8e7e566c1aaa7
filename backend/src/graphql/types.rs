//! GraphQL types for the EcoMarket API

use async_graphql::{ComplexObject, Context, Enum, InputObject, Result, ResultExt, SimpleObject};
use serde::{Deserialize, Serialize};

use crate::db::{
    AdminRecord, CityRecord, CountryRecord, Database, DepartmentRecord, OrderRecord,
    PaymentRecord, PostRecord, ProductCategoryRecord, ProductRecord, QuotationRecord,
    RefundRecord, SellerProfileRecord, SellerRecord, ServiceRecord,
};
use crate::define_page;

// ============================================================================
// Status Enums
// ============================================================================

/// Kind of marketplace participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum, Serialize, Deserialize, Default)]
#[graphql(rename_items = "SCREAMING_SNAKE_CASE")]
pub enum SellerType {
    #[default]
    Person,
    Business,
    ServiceProvider,
}

impl SellerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Business => "business",
            Self::ServiceProvider => "service_provider",
        }
    }
}

impl From<&str> for SellerType {
    fn from(s: &str) -> Self {
        match s {
            "business" => Self::Business,
            "service_provider" => Self::ServiceProvider,
            _ => Self::Person,
        }
    }
}

/// Publication status of a product or service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum, Serialize, Deserialize, Default)]
#[graphql(rename_items = "SCREAMING_SNAKE_CASE")]
pub enum ListingStatus {
    #[default]
    Draft,
    Active,
    Inactive,
}

impl ListingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl From<&str> for ListingStatus {
    fn from(s: &str) -> Self {
        match s {
            "active" => Self::Active,
            "inactive" => Self::Inactive,
            _ => Self::Draft,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum, Serialize, Deserialize, Default)]
#[graphql(rename_items = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Paid,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

impl From<&str> for OrderStatus {
    fn from(s: &str) -> Self {
        match s {
            "paid" => Self::Paid,
            "shipped" => Self::Shipped,
            "delivered" => Self::Delivered,
            "cancelled" => Self::Cancelled,
            _ => Self::Pending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum, Serialize, Deserialize, Default)]
#[graphql(rename_items = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Completed,
    Failed,
    PartiallyRefunded,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::PartiallyRefunded => "partially_refunded",
            Self::Refunded => "refunded",
        }
    }
}

impl From<&str> for PaymentStatus {
    fn from(s: &str) -> Self {
        match s {
            "completed" => Self::Completed,
            "failed" => Self::Failed,
            "partially_refunded" => Self::PartiallyRefunded,
            "refunded" => Self::Refunded,
            _ => Self::Pending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum, Serialize, Deserialize, Default)]
#[graphql(rename_items = "SCREAMING_SNAKE_CASE")]
pub enum QuotationStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl QuotationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }
}

impl From<&str> for QuotationStatus {
    fn from(s: &str) -> Self {
        match s {
            "accepted" => Self::Accepted,
            "rejected" => Self::Rejected,
            _ => Self::Pending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum, Serialize, Deserialize, Default)]
#[graphql(rename_items = "SCREAMING_SNAKE_CASE")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }
}

impl From<&str> for PostStatus {
    fn from(s: &str) -> Self {
        match s {
            "published" => Self::Published,
            "archived" => Self::Archived,
            _ => Self::Draft,
        }
    }
}

// ============================================================================
// Admins
// ============================================================================

/// A platform administrator
#[derive(Debug, Clone, SimpleObject)]
pub struct Admin {
    pub id: String,
    pub email: String,
    pub name: String,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<AdminRecord> for Admin {
    fn from(r: AdminRecord) -> Self {
        Self {
            id: r.id,
            email: r.email,
            name: r.name,
            is_active: r.is_active,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, InputObject)]
pub struct CreateAdminInput {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, InputObject)]
pub struct UpdateAdminInput {
    pub email: Option<String>,
    pub name: Option<String>,
    pub is_active: Option<bool>,
}

// ============================================================================
// Sellers
// ============================================================================

/// A marketplace seller
#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex)]
pub struct Seller {
    pub id: String,
    pub email: String,
    pub name: String,
    pub seller_type: SellerType,
    pub phone: Option<String>,
    pub city_id: Option<String>,
    pub is_verified: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[ComplexObject]
impl Seller {
    /// Public profile of the seller
    async fn profile(&self, ctx: &Context<'_>) -> Result<SellerProfile> {
        let db = ctx.data_unchecked::<Database>();
        let profile = db.sellers().get_profile(&self.id).await.extend()?;
        Ok(profile.into())
    }
}

impl From<SellerRecord> for Seller {
    fn from(r: SellerRecord) -> Self {
        Self {
            id: r.id,
            email: r.email,
            name: r.name,
            seller_type: SellerType::from(r.seller_type.as_str()),
            phone: r.phone,
            city_id: r.city_id,
            is_verified: r.is_verified,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
pub struct SellerProfile {
    pub id: String,
    pub seller_id: String,
    pub description: Option<String>,
    pub avatar_url: Option<String>,
    pub website: Option<String>,
    /// 0-100
    pub sustainability_score: i64,
    pub updated_at: String,
}

impl From<SellerProfileRecord> for SellerProfile {
    fn from(r: SellerProfileRecord) -> Self {
        Self {
            id: r.id,
            seller_id: r.seller_id,
            description: r.description,
            avatar_url: r.avatar_url,
            website: r.website,
            sustainability_score: r.sustainability_score,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, InputObject)]
pub struct RegisterSellerInput {
    pub email: String,
    pub name: String,
    pub seller_type: SellerType,
    pub phone: Option<String>,
    pub city_id: Option<String>,
    pub description: Option<String>,
    pub avatar_url: Option<String>,
    pub website: Option<String>,
    #[graphql(default = 0)]
    pub sustainability_score: i64,
}

#[derive(Debug, InputObject)]
pub struct UpdateSellerInput {
    pub email: Option<String>,
    pub name: Option<String>,
    pub seller_type: Option<SellerType>,
    pub phone: Option<String>,
    pub city_id: Option<String>,
}

#[derive(Debug, InputObject)]
pub struct UpdateSellerProfileInput {
    pub description: Option<String>,
    pub avatar_url: Option<String>,
    pub website: Option<String>,
    pub sustainability_score: Option<i64>,
}

// ============================================================================
// Catalog
// ============================================================================

#[derive(Debug, Clone, SimpleObject)]
pub struct ProductCategory {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

impl From<ProductCategoryRecord> for ProductCategory {
    fn from(r: ProductCategoryRecord) -> Self {
        Self {
            id: r.id,
            name: r.name,
            description: r.description,
        }
    }
}

#[derive(Debug, InputObject)]
pub struct ProductCategoryInput {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, InputObject)]
pub struct UpdateProductCategoryInput {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, SimpleObject)]
pub struct Product {
    pub id: String,
    pub seller_id: String,
    pub category_id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: i64,
    pub status: ListingStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ProductRecord> for Product {
    fn from(r: ProductRecord) -> Self {
        Self {
            id: r.id,
            seller_id: r.seller_id,
            category_id: r.category_id,
            name: r.name,
            description: r.description,
            price: r.price,
            stock: r.stock,
            status: ListingStatus::from(r.status.as_str()),
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, InputObject)]
pub struct CreateProductInput {
    pub seller_id: String,
    pub category_id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    #[graphql(default = 0)]
    pub stock: i64,
}

#[derive(Debug, InputObject)]
pub struct UpdateProductInput {
    pub category_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
}

// ============================================================================
// Orders & Payments
// ============================================================================

#[derive(Debug, Clone, SimpleObject)]
pub struct Order {
    pub id: String,
    pub seller_id: String,
    pub product_id: String,
    pub buyer_email: String,
    pub quantity: i64,
    pub total: f64,
    pub status: OrderStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl From<OrderRecord> for Order {
    fn from(r: OrderRecord) -> Self {
        Self {
            id: r.id,
            seller_id: r.seller_id,
            product_id: r.product_id,
            buyer_email: r.buyer_email,
            quantity: r.quantity,
            total: r.total,
            status: OrderStatus::from(r.status.as_str()),
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, InputObject)]
pub struct CreateOrderInput {
    pub product_id: String,
    pub buyer_email: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, SimpleObject)]
pub struct Payment {
    pub id: String,
    pub order_id: String,
    pub amount: f64,
    pub method: String,
    pub status: PaymentStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl From<PaymentRecord> for Payment {
    fn from(r: PaymentRecord) -> Self {
        Self {
            id: r.id,
            order_id: r.order_id,
            amount: r.amount,
            method: r.method,
            status: PaymentStatus::from(r.status.as_str()),
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, InputObject)]
pub struct CreatePaymentInput {
    pub order_id: String,
    pub amount: f64,
    pub method: String,
}

#[derive(Debug, Clone, SimpleObject)]
pub struct Refund {
    pub id: String,
    pub payment_id: String,
    pub amount: f64,
    pub reason: Option<String>,
    pub created_at: String,
}

impl From<RefundRecord> for Refund {
    fn from(r: RefundRecord) -> Self {
        Self {
            id: r.id,
            payment_id: r.payment_id,
            amount: r.amount,
            reason: r.reason,
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, InputObject)]
pub struct CreateRefundInput {
    pub payment_id: String,
    pub amount: f64,
    pub reason: Option<String>,
}

/// Refund plus the payment it was applied to
#[derive(Debug, Clone, SimpleObject)]
pub struct RefundResult {
    pub refund: Refund,
    pub payment: Payment,
}

// ============================================================================
// Services & Quotations
// ============================================================================

#[derive(Debug, Clone, SimpleObject)]
pub struct Service {
    pub id: String,
    pub seller_id: String,
    pub name: String,
    pub description: Option<String>,
    pub base_price: f64,
    pub status: ListingStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ServiceRecord> for Service {
    fn from(r: ServiceRecord) -> Self {
        Self {
            id: r.id,
            seller_id: r.seller_id,
            name: r.name,
            description: r.description,
            base_price: r.base_price,
            status: ListingStatus::from(r.status.as_str()),
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, InputObject)]
pub struct CreateServiceInput {
    pub seller_id: String,
    pub name: String,
    pub description: Option<String>,
    pub base_price: f64,
}

#[derive(Debug, InputObject)]
pub struct UpdateServiceInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub base_price: Option<f64>,
    pub status: Option<ListingStatus>,
}

#[derive(Debug, Clone, SimpleObject)]
pub struct Quotation {
    pub id: String,
    pub service_id: String,
    pub requester_email: String,
    pub details: String,
    pub amount: Option<f64>,
    pub status: QuotationStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl From<QuotationRecord> for Quotation {
    fn from(r: QuotationRecord) -> Self {
        Self {
            id: r.id,
            service_id: r.service_id,
            requester_email: r.requester_email,
            details: r.details,
            amount: r.amount,
            status: QuotationStatus::from(r.status.as_str()),
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, InputObject)]
pub struct CreateQuotationInput {
    pub service_id: String,
    pub requester_email: String,
    pub details: String,
}

// ============================================================================
// Community Posts
// ============================================================================

#[derive(Debug, Clone, SimpleObject)]
pub struct Post {
    pub id: String,
    pub seller_id: String,
    pub title: String,
    pub content: String,
    pub status: PostStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl From<PostRecord> for Post {
    fn from(r: PostRecord) -> Self {
        Self {
            id: r.id,
            seller_id: r.seller_id,
            title: r.title,
            content: r.content,
            status: PostStatus::from(r.status.as_str()),
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, InputObject)]
pub struct CreatePostInput {
    pub seller_id: String,
    pub title: String,
    pub content: String,
}

#[derive(Debug, InputObject)]
pub struct UpdatePostInput {
    pub title: Option<String>,
    pub content: Option<String>,
}

// ============================================================================
// Locations
// ============================================================================

#[derive(Debug, Clone, SimpleObject)]
pub struct Country {
    pub id: String,
    pub name: String,
    /// ISO 3166-1 alpha-2
    pub code: String,
}

impl From<CountryRecord> for Country {
    fn from(r: CountryRecord) -> Self {
        Self {
            id: r.id,
            name: r.name,
            code: r.code,
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
pub struct Department {
    pub id: String,
    pub country_id: String,
    pub name: String,
}

impl From<DepartmentRecord> for Department {
    fn from(r: DepartmentRecord) -> Self {
        Self {
            id: r.id,
            country_id: r.country_id,
            name: r.name,
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
pub struct City {
    pub id: String,
    pub department_id: String,
    pub name: String,
}

impl From<CityRecord> for City {
    fn from(r: CityRecord) -> Self {
        Self {
            id: r.id,
            department_id: r.department_id,
            name: r.name,
        }
    }
}

// ============================================================================
// Page envelopes
// ============================================================================

define_page!(AdminPage, Admin);
define_page!(SellerPage, Seller);
define_page!(ProductCategoryPage, ProductCategory);
define_page!(ProductPage, Product);
define_page!(OrderPage, Order);
define_page!(PaymentPage, Payment);
define_page!(RefundPage, Refund);
define_page!(ServicePage, Service);
define_page!(QuotationPage, Quotation);
define_page!(PostPage, Post);
define_page!(CountryPage, Country);
define_page!(DepartmentPage, Department);
define_page!(CityPage, City);

// ============================================================================
// Mutation results
// ============================================================================

ecomarket_macros::mutation_result!(DeletionResult, id: String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_strings_roundtrip() {
        for status in [
            PaymentStatus::Pending,
            PaymentStatus::Completed,
            PaymentStatus::Failed,
            PaymentStatus::PartiallyRefunded,
            PaymentStatus::Refunded,
        ] {
            assert_eq!(PaymentStatus::from(status.as_str()), status);
        }
        assert_eq!(SellerType::from("service_provider"), SellerType::ServiceProvider);
        assert_eq!(OrderStatus::from("cancelled").as_str(), "cancelled");
    }

    #[test]
    fn test_unknown_status_falls_back_to_default() {
        assert_eq!(ListingStatus::from("???"), ListingStatus::Draft);
        assert_eq!(PostStatus::from(""), PostStatus::Draft);
    }

    #[test]
    fn test_deletion_result_helpers() {
        let done = DeletionResult::done("Eliminado", "abc".to_string());
        assert!(done.success);
        assert_eq!(done.id.as_deref(), Some("abc"));

        let failed = DeletionResult::failed("No");
        assert!(!failed.success);
        assert_eq!(failed.id, None);
    }
}
