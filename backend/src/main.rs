//! EcoMarket backend entry point
//!
//! Loads configuration, prepares the database and serves the REST session
//! routes and the GraphQL API.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ecomarket::config::{Config, Environment};
use ecomarket::db::Database;
use ecomarket::db::seed::seed_bootstrap_admin;
use ecomarket::{AppState, build_app};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Arc::new(Config::from_env()?);

    init_tracing(config.environment);

    tracing::info!(environment = %config.environment, "Starting EcoMarket backend");

    let db = Database::connect(&config.database_url, config.database_max_connections).await?;
    db.migrate().await?;
    tracing::info!("Database connected and migrated");

    if let Some(bootstrap) = &config.bootstrap_admin {
        seed_bootstrap_admin(&db, bootstrap, config.bcrypt_cost).await?;
    }

    let state = AppState::new(config.clone(), db);
    let app = build_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);
    tracing::info!("GraphQL playground: http://localhost:{}/graphql", config.port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// JSON logs when deployed, human-readable output in development
fn init_tracing(environment: Environment) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "ecomarket=debug,tower_http=debug".into());

    if environment.is_deployed() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
