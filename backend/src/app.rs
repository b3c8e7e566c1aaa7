//! Application state and HTTP router construction.
//!
//! Used by `main` and by the integration tests to build the Axum app.

use std::sync::Arc;

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api;
use crate::config::Config;
use crate::db::Database;
use crate::graphql::{EcoMarketSchema, build_schema, session_from_headers};
use crate::services::{AuthService, CookiePolicy, TokenConfig, TokenIssuer};

/// Shared state for HTTP handlers (GraphQL, session routes).
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: Database,
    pub schema: EcoMarketSchema,
    pub auth: AuthService,
    pub cookies: CookiePolicy,
}

impl AppState {
    /// Wire the services for a configuration and a connected database
    pub fn new(config: Arc<Config>, db: Database) -> Self {
        let tokens = TokenIssuer::new(TokenConfig::from(config.as_ref()));
        let auth = AuthService::new(db.clone(), tokens, config.bcrypt_cost);
        let schema = build_schema(db.clone(), auth.clone());
        let cookies = CookiePolicy::new(config.environment, config.cookie_domain.clone());

        Self {
            config,
            db,
            schema,
            auth,
            cookies,
        }
    }
}

/// Build the full Axum router: health, /session, /graphql and layers.
/// Returns Router<()> (state fully applied) for use with axum::serve.
pub fn build_app(state: AppState) -> Router<()> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(api::health::router())
        .nest("/session", api::session::router())
        .route("/graphql", get(graphiql).post(graphql_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GraphQL query/mutation handler with the admin session attached
async fn graphql_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = req.into_inner();

    if let Some(session) = session_from_headers(&headers, state.auth.tokens()) {
        request = request.data(session);
    }

    state.schema.execute(request).await.into()
}

/// GraphiQL interactive playground (only for browsers)
async fn graphiql(headers: HeaderMap) -> impl IntoResponse {
    let accepts_html = headers
        .get(axum::http::header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("text/html"))
        .unwrap_or(false);

    if accepts_html {
        axum::response::Html(GraphiQLSource::build().endpoint("/graphql").finish()).into_response()
    } else {
        (
            StatusCode::METHOD_NOT_ALLOWED,
            axum::Json(serde_json::json!({
                "message": "Usa POST con Content-Type: application/json para consultas GraphQL"
            })),
        )
            .into_response()
    }
}
