//! EcoMarket backend
//!
//! Admin and marketplace API for the EcoMarket sustainability commerce
//! platform: a cookie-based admin session over REST and a paginated CRUD
//! API over GraphQL.

pub mod api;
pub mod app;
pub mod config;
pub mod db;
pub mod errors;
pub mod graphql;
pub mod services;

pub use app::{AppState, build_app};
