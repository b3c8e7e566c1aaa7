//! Integration tests for the REST admin session handshake
//!
//! Drives the full Axum router with `tower::ServiceExt::oneshot` against an
//! in-memory database.

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tower::ServiceExt;

use ecomarket::config::{Config, DEFAULT_ACCESS_TOKEN_LIFETIME, DEFAULT_REFRESH_TOKEN_LIFETIME, Environment};
use ecomarket::db::{CreateAdmin, Database};
use ecomarket::{AppState, build_app};

const EMAIL: &str = "admin@ecomarket.test";
const PASSWORD: &str = "clave-segura-1";

fn config(environment: Environment) -> Config {
    Config {
        host: None,
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        database_max_connections: 1,
        environment,
        cookie_domain: Some("ecomarket.test".to_string()),
        access_token_secret: "test-access-secret".to_string(),
        refresh_token_secret: "test-refresh-secret".to_string(),
        access_token_lifetime: DEFAULT_ACCESS_TOKEN_LIFETIME,
        refresh_token_lifetime: DEFAULT_REFRESH_TOKEN_LIFETIME,
        bcrypt_cost: 4,
        bootstrap_admin: None,
    }
}

async fn app(environment: Environment) -> Router {
    let db = Database::connect_in_memory().await.unwrap();
    let state = AppState::new(Arc::new(config(environment)), db.clone());

    let password_hash = state.auth.hash_password(PASSWORD).unwrap();
    db.admins()
        .create(CreateAdmin {
            email: EMAIL.to_string(),
            password_hash,
            name: "Admin".to_string(),
        })
        .await
        .unwrap();

    build_app(state)
}

fn login_request(email: &str, password: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/session/authAdmin")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "email": email, "password": password }).to_string()))
        .unwrap()
}

fn refresh_request(cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("POST").uri("/session/refreshAdmin");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn set_cookies(response: &axum::response::Response) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

fn cookie_value(set_cookies: &[String], name: &str) -> Option<String> {
    let prefix = format!("{}=", name);
    set_cookies
        .iter()
        .find(|c| c.starts_with(&prefix))
        .and_then(|c| c[prefix.len()..].split(';').next())
        .map(|v| v.to_string())
}

// ============================================================================
// authAdmin
// ============================================================================

#[tokio::test]
async fn login_sets_both_cookies_and_returns_the_token() {
    let app = app(Environment::Development).await;

    let response = app.oneshot(login_request(EMAIL, PASSWORD)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cookies = set_cookies(&response);
    let access = cookie_value(&cookies, "x-o-token").expect("access cookie");
    let refresh = cookie_value(&cookies, "x-o-refresh-token").expect("refresh cookie");
    assert_ne!(access, refresh);

    // development cookies carry no security flags
    for cookie in &cookies {
        assert!(cookie.contains("SameSite=Lax"), "{}", cookie);
        assert!(!cookie.contains("HttpOnly"), "{}", cookie);
        assert!(!cookie.contains("Secure"), "{}", cookie);
        assert!(!cookie.contains("Domain="), "{}", cookie);
    }

    let body = json_body(response).await;
    assert_eq!(body["message"], json!("Autenticación exitosa"));
    assert_eq!(body["token"], json!(access));
}

#[tokio::test]
async fn deployed_cookies_are_locked_down() {
    let app = app(Environment::Qa).await;

    let response = app.oneshot(login_request(EMAIL, PASSWORD)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cookies = set_cookies(&response);
    assert_eq!(cookies.len(), 2);
    for cookie in &cookies {
        assert!(cookie.contains("HttpOnly"), "{}", cookie);
        assert!(cookie.contains("Secure"), "{}", cookie);
        assert!(cookie.contains("SameSite=Lax"), "{}", cookie);
        assert!(cookie.contains("Domain=ecomarket.test"), "{}", cookie);
    }

    let access = cookies.iter().find(|c| c.starts_with("x-o-token=")).unwrap();
    assert!(access.contains("Max-Age=900"), "{}", access);
    let refresh = cookies.iter().find(|c| c.starts_with("x-o-refresh-token=")).unwrap();
    assert!(refresh.contains("Max-Age=604800"), "{}", refresh);
}

#[tokio::test]
async fn login_with_unknown_email_is_rejected() {
    let app = app(Environment::Development).await;

    let response = app
        .oneshot(login_request("nadie@ecomarket.test", PASSWORD))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(set_cookies(&response).is_empty());
    assert_eq!(json_body(response).await, json!({ "message": "No se encontró al usuario" }));
}

#[tokio::test]
async fn login_with_wrong_password_is_rejected() {
    let app = app(Environment::Development).await;

    let response = app.oneshot(login_request(EMAIL, "otra-clave-123")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await, json!({ "message": "Credenciales inválidas" }));
}

#[tokio::test]
async fn malformed_login_body_answers_with_json_message() {
    let app = app(Environment::Development).await;

    for body in [json!({ "email": EMAIL }).to_string(), "{not json".to_string()] {
        let request = Request::builder()
            .method("POST")
            .uri("/session/authAdmin")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(set_cookies(&response).is_empty());
        assert_eq!(
            json_body(response).await,
            json!({ "message": "Se requieren el correo y la contraseña" })
        );
    }
}

// ============================================================================
// refreshAdmin / logoutAdmin
// ============================================================================

#[tokio::test]
async fn refresh_issues_a_new_access_cookie() {
    let app = app(Environment::Development).await;

    let response = app.clone().oneshot(login_request(EMAIL, PASSWORD)).await.unwrap();
    let refresh = cookie_value(&set_cookies(&response), "x-o-refresh-token").unwrap();

    let cookie = format!("x-o-refresh-token={}", refresh);
    let response = app.oneshot(refresh_request(Some(&cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cookies = set_cookies(&response);
    let access = cookie_value(&cookies, "x-o-token").expect("new access cookie");
    // the refresh token is not rotated
    assert_eq!(cookie_value(&cookies, "x-o-refresh-token"), None);

    let body = json_body(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["token"], json!(access));
}

#[tokio::test]
async fn refresh_with_tampered_cookie_is_unauthorized() {
    let app = app(Environment::Development).await;

    let response = app
        .oneshot(refresh_request(Some("x-o-refresh-token=not.a.jwt")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await, json!({ "message": "Token de acceso inválido" }));
}

#[tokio::test]
async fn refresh_rejects_an_access_token() {
    let app = app(Environment::Development).await;

    let response = app.clone().oneshot(login_request(EMAIL, PASSWORD)).await.unwrap();
    let access = cookie_value(&set_cookies(&response), "x-o-token").unwrap();

    let cookie = format!("x-o-refresh-token={}", access);
    let response = app.oneshot(refresh_request(Some(&cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn refresh_without_cookie_is_unauthorized() {
    let app = app(Environment::Development).await;

    let response = app.oneshot(refresh_request(None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await, json!({ "message": "Token de acceso inválido" }));
}

#[tokio::test]
async fn logout_clears_both_cookies() {
    let app = app(Environment::Development).await;

    let request = Request::builder()
        .method("POST")
        .uri("/session/logoutAdmin")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cookies = set_cookies(&response);
    assert_eq!(cookie_value(&cookies, "x-o-token").as_deref(), Some(""));
    assert_eq!(cookie_value(&cookies, "x-o-refresh-token").as_deref(), Some(""));
    assert!(cookies.iter().all(|c| c.contains("Max-Age=0")));
    assert_eq!(json_body(response).await, json!({ "success": true }));
}

#[tokio::test]
async fn health_endpoints_answer() {
    let app = app(Environment::Development).await;

    let request = Request::builder().uri("/readyz").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "ready": true, "database": true }));
}
