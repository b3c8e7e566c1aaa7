//! GraphQL API
//!
//! Admin CRUD over the marketplace, built with async-graphql. Resolvers are
//! split per domain under `queries/` and `mutations/` and merged into the
//! roots in `schema.rs`. Every list query answers with a `{nodes, pageInfo}`
//! envelope (see [`pagination`]).

pub mod auth;
pub mod filters;
pub mod helpers;
pub mod mutations;
pub mod pagination;
pub mod queries;
mod schema;
pub mod types;

pub use auth::{AdminSession, session_from_headers};
pub use schema::{EcoMarketSchema, build_schema};
