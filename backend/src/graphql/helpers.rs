// Helper functions shared across GraphQL query/mutation modules.

use async_graphql::{Result, ResultExt};

use crate::errors::{ApiError, ApiResult};
use crate::graphql::pagination::PageRequest;

/// Validate `page`/`pageSize` arguments
pub(crate) fn page_request(page: i64, page_size: i64) -> Result<PageRequest> {
    PageRequest::new(page, page_size).map_err(ApiError::from).extend()
}

/// Reject blank required text
pub(crate) fn require_text(value: &str, field: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        return Err(ApiError::bad_request(format!("El campo {} es obligatorio", field)));
    }
    Ok(())
}

/// Minimal shape check for e-mail addresses
pub(crate) fn require_email(value: &str) -> ApiResult<()> {
    let value = value.trim();
    let valid = match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    };
    if !valid {
        return Err(ApiError::bad_request("Correo electrónico inválido"));
    }
    Ok(())
}

/// Reject negative money amounts
pub(crate) fn require_non_negative(value: f64, field: &str) -> ApiResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ApiError::bad_request(format!("El campo {} no puede ser negativo", field)));
    }
    Ok(())
}

/// Sustainability scores are percentages
pub(crate) fn require_score(value: i64) -> ApiResult<()> {
    if !(0..=100).contains(&value) {
        return Err(ApiError::bad_request(
            "La puntuación de sostenibilidad debe estar entre 0 y 100",
        ));
    }
    Ok(())
}
