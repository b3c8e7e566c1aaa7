//! Error taxonomy shared by the REST and GraphQL surfaces
//!
//! Every fallible service and repository call returns [`ApiError`]. Storage
//! errors are classified once, here, and their detail is logged rather than
//! sent to the caller.

use async_graphql::ErrorExtensions;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Generic message for failures whose detail must not leak to the caller
pub const INTERNAL_MESSAGE: &str = "Error interno del servidor";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Missing or invalid caller identity
    #[error("{0}")]
    Unauthorized(String),

    /// Entity absent
    #[error("{0}")]
    NotFound(String),

    /// Invalid input or constraint violation (duplicate, dangling reference)
    #[error("{0}")]
    BadRequest(String),

    /// Anything else
    #[error("{0}")]
    Internal(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn internal() -> Self {
        Self::Internal(INTERNAL_MESSAGE.to_string())
    }

    /// Machine-readable code exposed in GraphQL error extensions
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Internal(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Classify a storage error. `what` names the entity for not-found messages.
    pub fn from_db(err: sqlx::Error, what: &str) -> Self {
        match &err {
            sqlx::Error::RowNotFound => ApiError::NotFound(format!("No se encontró {}", what)),
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                tracing::warn!(error = %err, "Unique constraint violated");
                ApiError::BadRequest(format!("Ya existe {} con esos datos", what))
            }
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                tracing::warn!(error = %err, "Foreign key constraint violated");
                ApiError::BadRequest("La referencia indicada no existe".to_string())
            }
            sqlx::Error::Database(db) if db.is_check_violation() => {
                tracing::warn!(error = %err, "Check constraint violated");
                ApiError::BadRequest(format!("Datos inválidos para {}", what))
            }
            _ => {
                tracing::error!(error = %err, entity = what, "Database operation failed");
                ApiError::internal()
            }
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::from_db(err, "el registro")
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> async_graphql::Error {
        let code = self.code();
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| e.set("code", code))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "message": self.to_string() }))).into_response()
    }
}
