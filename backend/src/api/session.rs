//! Admin session endpoints
//!
//! - `POST /session/authAdmin` - log in, set both session cookies
//! - `POST /session/refreshAdmin` - new access cookie from the refresh cookie
//! - `POST /session/logoutAdmin` - clear both cookies

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::errors::ApiError;
use crate::services::auth::INVALID_ACCESS_TOKEN;
use crate::services::{ACCESS_COOKIE, REFRESH_COOKIE};

/// Answer for a login body that is not valid JSON or lacks a field
pub const INVALID_LOGIN_BODY: &str = "Se requieren el correo y la contraseña";

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub token: String,
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

async fn auth_admin(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body.map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "Malformed login body");
        ApiError::bad_request(INVALID_LOGIN_BODY)
    })?;
    let (_admin, pair) = state.auth.login(body.email.trim(), &body.password).await?;
    let tokens = state.auth.tokens();

    let jar = jar
        .add(state.cookies.access_cookie(pair.access_token.clone(), tokens.access_lifetime()))
        .add(state.cookies.refresh_cookie(pair.refresh_token, tokens.refresh_lifetime()));

    Ok((
        jar,
        Json(LoginResponse {
            token: pair.access_token,
            message: "Autenticación exitosa",
        }),
    ))
}

async fn refresh_admin(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError> {
    let refresh_token = jar
        .get(REFRESH_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::unauthorized(INVALID_ACCESS_TOKEN))?;

    let access_token = state.auth.refresh(&refresh_token).await?;
    let lifetime = state.auth.tokens().access_lifetime();
    let jar = jar.add(state.cookies.access_cookie(access_token.clone(), lifetime));

    Ok((
        jar,
        Json(RefreshResponse {
            token: access_token,
            success: true,
        }),
    ))
}

async fn logout_admin(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let jar = jar
        .add(state.cookies.removal(ACCESS_COOKIE))
        .add(state.cookies.removal(REFRESH_COOKIE));

    (jar, Json(LogoutResponse { success: true }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/authAdmin", post(auth_admin))
        .route("/refreshAdmin", post(refresh_admin))
        .route("/logoutAdmin", post(logout_admin))
}
