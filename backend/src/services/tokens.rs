//! Session token issuer
//!
//! Mints and verifies the two HS256 tokens that make up an admin session:
//! - a short-lived access token (default 15 minutes)
//! - a long-lived refresh token (default 7 days)
//!
//! Both carry only the admin id. They are signed with distinct secrets, so
//! one can never be verified as the other.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::{Config, DEFAULT_ACCESS_TOKEN_LIFETIME, DEFAULT_REFRESH_TOKEN_LIFETIME};

/// Claims shared by access and refresh tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Admin id
    #[serde(rename = "subjectId")]
    pub subject_id: String,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expiration (unix seconds)
    pub exp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("invalid token")]
    Invalid,
    #[error("failed to sign token: {0}")]
    Signing(String),
}

/// Signing material and lifetimes
#[derive(Clone)]
pub struct TokenConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    /// Access token lifetime in seconds
    pub access_lifetime: i64,
    /// Refresh token lifetime in seconds
    pub refresh_lifetime: i64,
}

impl TokenConfig {
    pub fn new(access_secret: impl Into<String>, refresh_secret: impl Into<String>) -> Self {
        Self {
            access_secret: access_secret.into(),
            refresh_secret: refresh_secret.into(),
            access_lifetime: DEFAULT_ACCESS_TOKEN_LIFETIME,
            refresh_lifetime: DEFAULT_REFRESH_TOKEN_LIFETIME,
        }
    }
}

impl From<&Config> for TokenConfig {
    fn from(config: &Config) -> Self {
        Self {
            access_secret: config.access_token_secret.clone(),
            refresh_secret: config.refresh_token_secret.clone(),
            access_lifetime: config.access_token_lifetime,
            refresh_lifetime: config.refresh_token_lifetime,
        }
    }
}

impl std::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("access_secret", &"***")
            .field("refresh_secret", &"***")
            .field("access_lifetime", &self.access_lifetime)
            .field("refresh_lifetime", &self.refresh_lifetime)
            .finish()
    }
}

/// Access + refresh token pair
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Clone, Copy)]
enum TokenKind {
    Access,
    Refresh,
}

/// Mints and verifies session tokens
#[derive(Clone, Debug)]
pub struct TokenIssuer {
    config: TokenConfig,
}

impl TokenIssuer {
    pub fn new(config: TokenConfig) -> Self {
        Self { config }
    }

    pub fn access_lifetime(&self) -> i64 {
        self.config.access_lifetime
    }

    pub fn refresh_lifetime(&self) -> i64 {
        self.config.refresh_lifetime
    }

    /// Mint a fresh access + refresh pair for an admin
    pub fn issue_pair(&self, subject_id: &str) -> Result<TokenPair, TokenError> {
        let now = Utc::now();
        Ok(TokenPair {
            access_token: self.mint_access_at(subject_id, now)?,
            refresh_token: self.mint_refresh_at(subject_id, now)?,
        })
    }

    /// Mint an access token as if issued at `issued_at`
    pub fn mint_access_at(&self, subject_id: &str, issued_at: DateTime<Utc>) -> Result<String, TokenError> {
        self.mint(TokenKind::Access, subject_id, issued_at)
    }

    /// Mint a refresh token as if issued at `issued_at`
    pub fn mint_refresh_at(&self, subject_id: &str, issued_at: DateTime<Utc>) -> Result<String, TokenError> {
        self.mint(TokenKind::Refresh, subject_id, issued_at)
    }

    pub fn verify_access(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify(TokenKind::Access, token)
    }

    pub fn verify_refresh(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify(TokenKind::Refresh, token)
    }

    /// New access token for the subject of a valid refresh token.
    ///
    /// The refresh token itself is not rotated.
    pub fn renew(&self, refresh_token: &str) -> Result<String, TokenError> {
        let claims = self.verify_refresh(refresh_token)?;
        self.mint_access_at(&claims.subject_id, Utc::now())
    }

    fn secret(&self, kind: TokenKind) -> &[u8] {
        match kind {
            TokenKind::Access => self.config.access_secret.as_bytes(),
            TokenKind::Refresh => self.config.refresh_secret.as_bytes(),
        }
    }

    fn lifetime(&self, kind: TokenKind) -> i64 {
        match kind {
            TokenKind::Access => self.config.access_lifetime,
            TokenKind::Refresh => self.config.refresh_lifetime,
        }
    }

    fn mint(&self, kind: TokenKind, subject_id: &str, issued_at: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = Claims {
            subject_id: subject_id.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + Duration::seconds(self.lifetime(kind))).timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret(kind)),
        )
        .map_err(|e| TokenError::Signing(e.to_string()))
    }

    fn verify(&self, kind: TokenKind, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        decode::<Claims>(token, &DecodingKey::from_secret(self.secret(kind)), &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => {
                    tracing::debug!(error = %e, "Token verification failed");
                    TokenError::Invalid
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(TokenConfig::new("access-secret-for-tests", "refresh-secret-for-tests"))
    }

    #[test]
    fn test_access_roundtrip_keeps_subject() {
        let issuer = issuer();
        let pair = issuer.issue_pair("admin-1").unwrap();
        let claims = issuer.verify_access(&pair.access_token).unwrap();
        assert_eq!(claims.subject_id, "admin-1");
        assert_eq!(claims.exp - claims.iat, 15 * 60);

        let refresh = issuer.verify_refresh(&pair.refresh_token).unwrap();
        assert_eq!(refresh.exp - refresh.iat, 7 * 24 * 60 * 60);
    }

    #[test]
    fn test_access_token_expires_after_fifteen_minutes() {
        let issuer = issuer();
        let issued = Utc::now() - Duration::minutes(16);
        let token = issuer.mint_access_at("admin-1", issued).unwrap();
        assert_matches!(issuer.verify_access(&token), Err(TokenError::Expired));

        let fresh = issuer.mint_access_at("admin-1", Utc::now() - Duration::minutes(14)).unwrap();
        assert!(issuer.verify_access(&fresh).is_ok());
    }

    #[test]
    fn test_refresh_token_expires_after_seven_days() {
        let issuer = issuer();
        let token = issuer
            .mint_refresh_at("admin-1", Utc::now() - Duration::days(7) - Duration::minutes(1))
            .unwrap();
        assert_matches!(issuer.verify_refresh(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_cross_secret_verification_fails() {
        let issuer = issuer();
        let pair = issuer.issue_pair("admin-1").unwrap();
        assert_matches!(issuer.verify_refresh(&pair.access_token), Err(TokenError::Invalid));
        assert_matches!(issuer.verify_access(&pair.refresh_token), Err(TokenError::Invalid));
    }

    #[test]
    fn test_foreign_secret_and_garbage_rejected() {
        let other = TokenIssuer::new(TokenConfig::new("other-access", "other-refresh"));
        let token = other.issue_pair("admin-1").unwrap().access_token;
        assert_matches!(issuer().verify_access(&token), Err(TokenError::Invalid));
        assert_matches!(issuer().verify_access("not.a.jwt"), Err(TokenError::Invalid));
        assert_matches!(issuer().verify_access(""), Err(TokenError::Invalid));
    }

    #[test]
    fn test_renew_keeps_subject_and_refresh_stays_valid() {
        let issuer = issuer();
        let pair = issuer.issue_pair("admin-42").unwrap();

        let access = issuer.renew(&pair.refresh_token).unwrap();
        assert_eq!(issuer.verify_access(&access).unwrap().subject_id, "admin-42");
        assert!(issuer.verify_refresh(&pair.refresh_token).is_ok());
    }

    #[test]
    fn test_renew_rejects_access_token() {
        let issuer = issuer();
        let pair = issuer.issue_pair("admin-1").unwrap();
        assert_matches!(issuer.renew(&pair.access_token), Err(TokenError::Invalid));
    }

    #[test]
    fn test_claims_use_subject_id_field() {
        let claims = Claims {
            subject_id: "a".into(),
            iat: 1,
            exp: 2,
        };
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["subjectId"], "a");
    }
}
