//! Integration tests for the GraphQL endpoint
//!
//! Requests go through the full router so that session extraction from the
//! `x-o-token` cookie and the bearer header is covered too.

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

struct TestApp {
    router: Router,
    db: Database,
    access_token: String,
}

async fn setup() -> TestApp {
    let config = Config {
        host: None,
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        database_max_connections: 1,
        environment: Environment::Development,
        cookie_domain: None,
        access_token_secret: "gql-access-secret".to_string(),
        refresh_token_secret: "gql-refresh-secret".to_string(),
        access_token_lifetime: DEFAULT_ACCESS_TOKEN_LIFETIME,
        refresh_token_lifetime: DEFAULT_REFRESH_TOKEN_LIFETIME,
        bcrypt_cost: 4,
        bootstrap_admin: None,
    };

    let db = Database::connect_in_memory().await.unwrap();
    let state = AppState::new(Arc::new(config), db.clone());

    let admin = db
        .admins()
        .create(CreateAdmin {
            email: "admin@ecomarket.test".to_string(),
            password_hash: state.auth.hash_password("clave-segura-1").unwrap(),
            name: "Admin".to_string(),
        })
        .await
        .unwrap();
    let access_token = state.auth.tokens().issue_pair(&admin.id).unwrap().access_token;

    TestApp {
        router: build_app(state),
        db,
        access_token,
    }
}

enum Auth<'a> {
    None,
    Cookie(&'a str),
    Bearer(&'a str),
}

async fn graphql(app: &TestApp, query: &str, auth: Auth<'_>) -> Value {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/graphql")
        .header(header::CONTENT_TYPE, "application/json");
    builder = match auth {
        Auth::None => builder,
        Auth::Cookie(token) => builder.header(header::COOKIE, format!("x-o-token={}", token)),
        Auth::Bearer(token) => builder.header(header::AUTHORIZATION, format!("Bearer {}", token)),
    };

    let request = builder
        .body(Body::from(json!({ "query": query }).to_string()))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn seed_countries(db: &Database, count: u8) {
    for i in 0..count {
        let code = format!("{}{}", (b'A' + i / 5) as char, (b'A' + i % 5) as char);
        db.locations()
            .create_country(&format!("País {:02}", i), &code)
            .await
            .unwrap();
    }
}

// ============================================================================
// Pagination envelope
// ============================================================================

#[tokio::test]
async fn countries_second_page_of_twenty_five() {
    let app = setup().await;
    seed_countries(&app.db, 25).await;

    let body = graphql(
        &app,
        "{ countries(page: 2, pageSize: 10) { nodes { name } pageInfo { totalCount totalPages currentPage pageSize hasNextPage hasPreviousPage } } }",
        Auth::None,
    )
    .await;

    let countries = &body["data"]["countries"];
    let nodes = countries["nodes"].as_array().unwrap();
    assert_eq!(nodes.len(), 10);
    assert_eq!(nodes[0]["name"], json!("País 10"));
    assert_eq!(nodes[9]["name"], json!("País 19"));
    assert_eq!(
        countries["pageInfo"],
        json!({
            "totalCount": 25,
            "totalPages": 3,
            "currentPage": 2,
            "pageSize": 10,
            "hasNextPage": true,
            "hasPreviousPage": true
        })
    );
}

#[tokio::test]
async fn out_of_range_page_is_a_bad_request() {
    let app = setup().await;
    seed_countries(&app.db, 3).await;

    let body = graphql(
        &app,
        "{ countries(page: 9223372036854775807, pageSize: 10) { nodes { name } } }",
        Auth::None,
    )
    .await;
    assert_eq!(body["errors"][0]["message"], json!("La página solicitada está fuera de rango"));
    assert_eq!(body["errors"][0]["extensions"]["code"], json!("BAD_REQUEST"));

    let body = graphql(
        &app,
        "{ countries(page: 1, pageSize: 9223372036854775807) { nodes { name } pageInfo { totalCount totalPages hasNextPage } } }",
        Auth::None,
    )
    .await;
    assert_eq!(body["data"]["countries"]["nodes"].as_array().unwrap().len(), 3);
    assert_eq!(
        body["data"]["countries"]["pageInfo"],
        json!({ "totalCount": 3, "totalPages": 1, "hasNextPage": false })
    );
}

#[tokio::test]
async fn empty_list_has_no_pages() {
    let app = setup().await;

    let body = graphql(
        &app,
        "{ productCategories { nodes { id } pageInfo { totalCount totalPages hasNextPage hasPreviousPage } } }",
        Auth::None,
    )
    .await;

    assert_eq!(
        body["data"]["productCategories"],
        json!({
            "nodes": [],
            "pageInfo": { "totalCount": 0, "totalPages": 0, "hasNextPage": false, "hasPreviousPage": false }
        })
    );
}

// ============================================================================
// Session handling
// ============================================================================

#[tokio::test]
async fn protected_query_without_session_is_unauthorized() {
    let app = setup().await;

    let body = graphql(&app, "{ me { id } }", Auth::None).await;
    assert_eq!(body["errors"][0]["message"], json!("Token de acceso inválido"));
    assert_eq!(body["errors"][0]["extensions"]["code"], json!("UNAUTHORIZED"));

    let body = graphql(&app, "{ me { id } }", Auth::Cookie("forged.token.value")).await;
    assert_eq!(body["errors"][0]["extensions"]["code"], json!("UNAUTHORIZED"));
}

#[tokio::test]
async fn session_from_cookie_or_bearer() {
    let app = setup().await;

    let body = graphql(&app, "{ me { email } }", Auth::Cookie(&app.access_token)).await;
    assert_eq!(body["data"]["me"]["email"], json!("admin@ecomarket.test"));

    let body = graphql(&app, "{ me { email } }", Auth::Bearer(&app.access_token)).await;
    assert_eq!(body["data"]["me"]["email"], json!("admin@ecomarket.test"));
}

#[tokio::test]
async fn missing_record_reports_not_found() {
    let app = setup().await;

    let body = graphql(
        &app,
        r#"{ product(id: "no-existe") { id } }"#,
        Auth::Cookie(&app.access_token),
    )
    .await;
    assert_eq!(body["errors"][0]["extensions"]["code"], json!("NOT_FOUND"));
}

// ============================================================================
// Refund flow
// ============================================================================

#[tokio::test]
async fn partial_then_full_refund() {
    let app = setup().await;
    let token = app.access_token.clone();

    let body = graphql(
        &app,
        r#"mutation { registerSeller(input: { email: "eco@tienda.com", name: "Eco Tienda", sellerType: PERSON }) { id } }"#,
        Auth::Cookie(&token),
    )
    .await;
    let seller_id = body["data"]["registerSeller"]["id"].as_str().unwrap().to_string();

    let body = graphql(
        &app,
        &format!(
            r#"mutation {{ createProduct(input: {{ sellerId: "{}", name: "Cepillo de bambú", price: 10.0, stock: 5 }}) {{ id }} }}"#,
            seller_id
        ),
        Auth::Cookie(&token),
    )
    .await;
    let product_id = body["data"]["createProduct"]["id"].as_str().unwrap().to_string();

    let body = graphql(
        &app,
        &format!(
            r#"mutation {{ createOrder(input: {{ productId: "{}", buyerEmail: "ana@correo.com", quantity: 4 }}) {{ id total }} }}"#,
            product_id
        ),
        Auth::Cookie(&token),
    )
    .await;
    let order = &body["data"]["createOrder"];
    assert_eq!(order["total"], json!(40.0));
    let order_id = order["id"].as_str().unwrap().to_string();

    let body = graphql(
        &app,
        &format!(
            r#"mutation {{ createPayment(input: {{ orderId: "{}", amount: 40.0, method: "card" }}) {{ id status }} }}"#,
            order_id
        ),
        Auth::Cookie(&token),
    )
    .await;
    assert_eq!(body["data"]["createPayment"]["status"], json!("PENDING"));
    let payment_id = body["data"]["createPayment"]["id"].as_str().unwrap().to_string();

    let refund = |amount: f64| {
        format!(
            r#"mutation {{ createRefund(input: {{ paymentId: "{}", amount: {:.2} }}) {{ refund {{ amount }} payment {{ status }} }} }}"#,
            payment_id, amount
        )
    };

    // pending payments cannot be refunded
    let body = graphql(&app, &refund(10.0), Auth::Cookie(&token)).await;
    assert_eq!(
        body["errors"][0]["message"],
        json!("Solo se pueden reembolsar pagos completados")
    );

    graphql(
        &app,
        &format!(r#"mutation {{ setPaymentStatus(id: "{}", status: COMPLETED) {{ id }} }}"#, payment_id),
        Auth::Cookie(&token),
    )
    .await;

    let body = graphql(&app, &refund(15.0), Auth::Cookie(&token)).await;
    assert_eq!(
        body["data"]["createRefund"]["payment"]["status"],
        json!("PARTIALLY_REFUNDED")
    );

    let body = graphql(&app, &refund(30.0), Auth::Cookie(&token)).await;
    assert_eq!(
        body["errors"][0]["message"],
        json!("El monto del reembolso excede el saldo reembolsable")
    );

    let body = graphql(&app, &refund(25.0), Auth::Cookie(&token)).await;
    assert_eq!(body["data"]["createRefund"]["payment"]["status"], json!("REFUNDED"));

    let body = graphql(
        &app,
        &format!(r#"{{ refunds(paymentId: "{}") {{ pageInfo {{ totalCount }} }} }}"#, payment_id),
        Auth::Cookie(&token),
    )
    .await;
    assert_eq!(body["data"]["refunds"]["pageInfo"]["totalCount"], json!(2));
}
