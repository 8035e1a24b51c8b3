//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                   Error Flow in shopfront                       │
//! │                                                                 │
//! │  Handler                                                        │
//! │  Result<HttpResponse, ApiError>                                 │
//! │         │                                                       │
//! │         ▼                                                       │
//! │  Database error?  ──── DbError ──────────┐                      │
//! │         │                                │                      │
//! │         ▼                                ▼                      │
//! │  Checkout error?  ──── CheckoutError ── ApiError ──► HTTP JSON  │
//! │         │                                ▲                      │
//! │         ▼                                │                      │
//! │  Validation error? ─── ValidationError ──┘                      │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serialization
//! Every error response carries a machine-readable `code` and a
//! human-readable `message`:
//! ```json
//! {
//!   "code": "NOT_FOUND",
//!   "message": "Product not found: abc-123"
//! }
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;

use shopfront_core::ValidationError;
use shopfront_db::{CheckoutError, DbError};

/// API error returned from HTTP handlers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Login required (401)
    Unauthorized,

    /// Checkout could not complete; the cart is untouched (409)
    CheckoutFailed,

    /// Database operation failed (500)
    DatabaseError,

    /// Internal server error (500)
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Unauthorized, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self.code {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::CheckoutFailed => StatusCode::CONFLICT,
            ErrorCode::DatabaseError | ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::UniqueViolation { field, value } => ApiError::new(
                ErrorCode::ValidationError,
                format!("{} '{}' already exists", field, value),
            ),
            DbError::ForeignKeyViolation { message } => {
                tracing::warn!("Foreign key violation: {}", message);
                ApiError::new(
                    ErrorCode::ValidationError,
                    "Operation rejected: the record is still referenced",
                )
            }
            DbError::CheckViolation { message } => {
                tracing::warn!("Check constraint violation: {}", message);
                ApiError::new(ErrorCode::ValidationError, "Value out of allowed range")
            }
            DbError::ConnectionFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts checkout failures to API errors.
///
/// Every variant maps to `CheckoutFailed` except underlying database
/// errors: the client's remedy (fix the cart and retry) is the same
/// whether the culprit was a vanished product or a bad quantity.
impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::ProductNotFound(id) => ApiError::new(
                ErrorCode::CheckoutFailed,
                format!("Checkout failed: product no longer available: {}", id),
            ),
            CheckoutError::InvalidQuantity {
                product_id,
                quantity,
            } => ApiError::new(
                ErrorCode::CheckoutFailed,
                format!(
                    "Checkout failed: invalid quantity {} for product {}",
                    quantity, product_id
                ),
            ),
            CheckoutError::Db(db_err) => db_err.into(),
        }
    }
}

/// Converts input validation errors to API errors.
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::not_found("Product", "x").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::unauthorized("login required").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::from(CheckoutError::ProductNotFound("x".to_string())).status_code(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_validation_error_maps_to_bad_request() {
        // The one error flow out of shopfront-core: validation
        let err: ApiError = shopfront_core::validation::validate_price_cents(-1)
            .unwrap_err()
            .into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "price_cents must not be negative");
    }

    #[test]
    fn test_serializes_code_and_message() {
        let err = ApiError::not_found("Product", "abc-123");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Product not found: abc-123");
    }
}
