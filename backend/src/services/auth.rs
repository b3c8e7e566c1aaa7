//! Admin authentication service
//!
//! Provides:
//! - Credential login with bcrypt password verification
//! - Access token renewal from a refresh token
//! - Password hashing for admin management

use bcrypt::{hash, verify};

use crate::db::{AdminRecord, Database, UpdateAdmin};
use crate::errors::{ApiError, ApiResult};
use crate::services::tokens::{Claims, TokenError, TokenIssuer, TokenPair};

pub const USER_NOT_FOUND: &str = "No se encontró al usuario";
pub const INVALID_CREDENTIALS: &str = "Credenciales inválidas";
pub const INVALID_ACCESS_TOKEN: &str = "Token de acceso inválido";

const MIN_PASSWORD_LEN: usize = 8;

/// Admin authentication service
#[derive(Clone)]
pub struct AuthService {
    db: Database,
    tokens: TokenIssuer,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(db: Database, tokens: TokenIssuer, bcrypt_cost: u32) -> Self {
        Self {
            db,
            tokens,
            bcrypt_cost,
        }
    }

    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    // ========================================================================
    // Login
    // ========================================================================

    /// Verify admin credentials and mint a session
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<(AdminRecord, TokenPair)> {
        let admin = match self.db.admins().get_by_email(email).await? {
            Some(admin) => admin,
            None => {
                tracing::warn!(email = %email, "Login failed: unknown email");
                return Err(ApiError::bad_request(USER_NOT_FOUND));
            }
        };

        if !admin.is_active {
            tracing::warn!(admin_id = %admin.id, "Login failed: account disabled");
            return Err(ApiError::bad_request(INVALID_CREDENTIALS));
        }

        if !self.verify_password(password, &admin.password_hash)? {
            tracing::warn!(admin_id = %admin.id, "Login failed: wrong password");
            return Err(ApiError::bad_request(INVALID_CREDENTIALS));
        }

        let pair = self.tokens.issue_pair(&admin.id).map_err(token_failure)?;
        tracing::info!(admin_id = %admin.id, "Admin logged in");
        Ok((admin, pair))
    }

    // ========================================================================
    // Token Management
    // ========================================================================

    /// New access token from a refresh token; the refresh token stays valid.
    ///
    /// The admin must still exist and be active.
    pub async fn refresh(&self, refresh_token: &str) -> ApiResult<String> {
        let claims = self.tokens.verify_refresh(refresh_token).map_err(|e| {
            tracing::debug!(error = %e, "Refresh token rejected");
            ApiError::unauthorized(INVALID_ACCESS_TOKEN)
        })?;

        self.active_admin(&claims.subject_id).await?;

        self.tokens.renew(refresh_token).map_err(|e| match e {
            TokenError::Signing(_) => token_failure(e),
            _ => ApiError::unauthorized(INVALID_ACCESS_TOKEN),
        })
    }

    /// The admin behind a session, if the account still exists and is active
    pub async fn active_admin(&self, admin_id: &str) -> ApiResult<AdminRecord> {
        match self.db.admins().get_by_id(admin_id).await {
            Ok(admin) if admin.is_active => Ok(admin),
            Ok(_) | Err(ApiError::NotFound(_)) => {
                tracing::warn!(admin_id = %admin_id, "Session for unavailable admin");
                Err(ApiError::unauthorized(INVALID_ACCESS_TOKEN))
            }
            Err(e) => Err(e),
        }
    }

    /// Verify an access token and return its claims
    pub fn authenticate(&self, access_token: &str) -> ApiResult<Claims> {
        self.tokens
            .verify_access(access_token)
            .map_err(|_| ApiError::unauthorized(INVALID_ACCESS_TOKEN))
    }

    // ========================================================================
    // Passwords
    // ========================================================================

    /// Hash a password with bcrypt, enforcing the minimum length
    pub fn hash_password(&self, password: &str) -> ApiResult<String> {
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ApiError::bad_request(format!(
                "La contraseña debe tener al menos {} caracteres",
                MIN_PASSWORD_LEN
            )));
        }

        hash(password, self.bcrypt_cost).map_err(|e| {
            tracing::error!(error = %e, "Failed to hash password");
            ApiError::internal()
        })
    }

    /// Replace an admin's password
    pub async fn set_password(&self, admin_id: &str, new_password: &str) -> ApiResult<AdminRecord> {
        let password_hash = self.hash_password(new_password)?;
        self.db
            .admins()
            .update(
                admin_id,
                UpdateAdmin {
                    password_hash: Some(password_hash),
                    ..Default::default()
                },
            )
            .await
    }

    fn verify_password(&self, password: &str, password_hash: &str) -> ApiResult<bool> {
        verify(password, password_hash).map_err(|e| {
            tracing::error!(error = %e, "Failed to verify password");
            ApiError::internal()
        })
    }
}

fn token_failure(err: TokenError) -> ApiError {
    tracing::error!(error = %err, "Failed to mint session token");
    ApiError::internal()
}
