//! GraphQL authentication and authorization
//!
//! The HTTP handler verifies the access token (from the `x-o-token` cookie
//! or an `Authorization: Bearer` header) and attaches an [`AdminSession`] to
//! the request. Resolvers then require it through [`AuthGuard`] or
//! [`AuthExt::admin_session`]. The guard also checks that the account is
//! still active, so disabling or deleting an admin takes effect at once.
//!
//! ```ignore
//! #[graphql(guard = "AuthGuard")]
//! async fn protected_query(&self, ctx: &Context<'_>) -> Result<String> { ... }
//! ```

use async_graphql::{Context, ErrorExtensions, Result};
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum_extra::extract::cookie::CookieJar;

use crate::errors::ApiError;
use crate::services::auth::INVALID_ACCESS_TOKEN;
use crate::services::{ACCESS_COOKIE, AuthService, TokenIssuer};

/// Authenticated admin, available in GraphQL resolvers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSession {
    pub admin_id: String,
}

/// Access token from the session cookie, falling back to a bearer header
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    if let Some(cookie) = jar.get(ACCESS_COOKIE)
        && !cookie.value().is_empty()
    {
        return Some(cookie.value().to_string());
    }

    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Resolve the admin session for a request, if its token verifies
pub fn session_from_headers(headers: &HeaderMap, tokens: &TokenIssuer) -> Option<AdminSession> {
    let token = extract_token(headers)?;
    match tokens.verify_access(&token) {
        Ok(claims) => Some(AdminSession {
            admin_id: claims.subject_id,
        }),
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring invalid access token");
            None
        }
    }
}

/// Extension trait to get the authenticated admin from GraphQL context
pub trait AuthExt {
    /// Get the admin session, or return an error if not authenticated
    fn admin_session(&self) -> Result<&AdminSession>;
}

impl<'a> AuthExt for Context<'a> {
    fn admin_session(&self) -> Result<&AdminSession> {
        self.data_opt::<AdminSession>()
            .ok_or_else(|| ApiError::unauthorized(INVALID_ACCESS_TOKEN).extend())
    }
}

/// Guard that requires an authenticated admin.
///
/// Use with `#[graphql(guard = "AuthGuard")]` on queries and mutations.
pub struct AuthGuard;

impl async_graphql::Guard for AuthGuard {
    async fn check(&self, ctx: &Context<'_>) -> Result<()> {
        let session = ctx.admin_session()?;
        let auth = ctx.data_unchecked::<AuthService>();
        auth.active_admin(&session.admin_id).await.map_err(|e| e.extend())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::TokenConfig;
    use axum::http::HeaderValue;
    use axum::http::header::COOKIE;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(TokenConfig::new("a-secret", "r-secret"))
    }

    #[test]
    fn test_cookie_takes_precedence_over_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("theme=dark; x-o-token=from-cookie"));
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer from-header"));
        assert_eq!(extract_token(&headers).as_deref(), Some("from-cookie"));
    }

    #[test]
    fn test_bearer_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(extract_token(&headers).as_deref(), Some("abc"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(extract_token(&headers), None);
    }

    #[test]
    fn test_session_from_valid_and_invalid_tokens() {
        let tokens = issuer();
        let pair = tokens.issue_pair("admin-7").unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", pair.access_token)).unwrap(),
        );
        assert_eq!(
            session_from_headers(&headers, &tokens),
            Some(AdminSession { admin_id: "admin-7".into() })
        );

        // a refresh token is not an access token
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", pair.refresh_token)).unwrap(),
        );
        assert_eq!(session_from_headers(&headers, &tokens), None);
    }
}
