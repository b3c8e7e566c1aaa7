//! GraphQL schema definition
//!
//! Query and mutation roots are merged from the per-domain resolver
//! structs in `queries/` and `mutations/`. Everything requires an admin
//! session except the reference data (locations and product categories).

use async_graphql::{EmptySubscription, MergedObject, Schema};

use crate::db::Database;
use crate::services::AuthService;

use super::mutations::{
    AdminMutations, CatalogMutations, LocationMutations, OrderMutations, PostMutations,
    SellerMutations, ServiceMutations,
};
use super::queries::{
    AdminQueries, CatalogQueries, LocationQueries, OrderQueries, PostQueries, SellerQueries,
    ServiceQueries,
};

/// The GraphQL schema type
pub type EcoMarketSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

// ============================================================================
// Roots
// ============================================================================

#[derive(MergedObject, Default)]
pub struct QueryRoot(
    AdminQueries,
    SellerQueries,
    CatalogQueries,
    OrderQueries,
    ServiceQueries,
    PostQueries,
    LocationQueries,
);

#[derive(MergedObject, Default)]
pub struct MutationRoot(
    AdminMutations,
    SellerMutations,
    CatalogMutations,
    OrderMutations,
    ServiceMutations,
    PostMutations,
    LocationMutations,
);

/// Build the GraphQL schema with all resolvers
pub fn build_schema(db: Database, auth: AuthService) -> EcoMarketSchema {
    Schema::build(QueryRoot::default(), MutationRoot::default(), EmptySubscription)
        .data(db)
        .data(auth)
        .extension(async_graphql::extensions::Tracing)
        .enable_federation()
        .finish()
}
