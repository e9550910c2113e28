//!
//! # Application Errors
//!
//! Defines `AppError`, the single error type surfaced by every handler in the
//! application. It implements `actix_web::error::ResponseError` so that a
//! `Result<_, AppError>` returned from a handler turns into the right HTTP status
//! and a JSON body. `From` implementations for `sqlx::Error`,
//! `validator::ValidationErrors`, `jsonwebtoken::errors::Error` and
//! `bcrypt::BcryptError` make the `?` operator work at the call sites.
//!
//! Persistence failures surface as `503 Service Unavailable`: the storage layer
//! propagates typed `sqlx` errors internally and they are generalized only here,
//! at the HTTP boundary.

use actix_web::{error::ResponseError, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// All error conditions a request can end in.
#[derive(Debug)]
pub enum AppError {
    /// The resource is absent or not owned by the caller, or credentials/token
    /// checks failed (HTTP 401). Missing and not-owned rows are intentionally
    /// indistinguishable to the caller.
    Unauthorized(String),
    /// The caller's role does not permit the operation (HTTP 403).
    Forbidden(String),
    /// The request conflicts with current state, e.g. linking an already linked
    /// pair (HTTP 400).
    BadRequest(String),
    /// Input payload failed validation (HTTP 422).
    Validation(String),
    /// Unexpected server-side failure outside the storage layer (HTTP 500).
    Internal(String),
    /// The storage backend failed (HTTP 503).
    Database(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::Validation(msg) => write!(f, "Validation Error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::Database(msg) => write!(f, "Database Error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Unauthorized(msg) => HttpResponse::Unauthorized().json(json!({
                "error": msg
            })),
            AppError::Forbidden(msg) => HttpResponse::Forbidden().json(json!({
                "error": msg
            })),
            AppError::BadRequest(msg) => HttpResponse::BadRequest().json(json!({
                "error": msg
            })),
            AppError::Validation(msg) => HttpResponse::UnprocessableEntity().json(json!({
                "error": msg
            })),
            AppError::Internal(msg) => HttpResponse::InternalServerError().json(json!({
                "error": msg
            })),
            // The underlying cause stays in the message for the logs; the status
            // tells the client the store could not complete the operation.
            AppError::Database(msg) => HttpResponse::ServiceUnavailable().json(json!({
                "error": msg
            })),
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        AppError::Database(error.to_string())
    }
}

impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::Validation(error.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthorized(error.to_string())
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::Internal(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_responses() {
        let error = AppError::Unauthorized("Unauthorized".into());
        let response = error.error_response();
        assert_eq!(response.status(), 401);

        let error = AppError::Forbidden("Only regular users can create a category".into());
        let response = error.error_response();
        assert_eq!(response.status(), 403);

        let error = AppError::BadRequest("Category already assigned to todo".into());
        let response = error.error_response();
        assert_eq!(response.status(), 400);

        let error = AppError::Validation("text too long".into());
        let response = error.error_response();
        assert_eq!(response.status(), 422);

        let error = AppError::Internal("JWT_SECRET not set".into());
        let response = error.error_response();
        assert_eq!(response.status(), 500);
    }

    #[test]
    fn test_database_errors_map_to_service_unavailable() {
        let error = AppError::from(sqlx::Error::PoolTimedOut);
        let response = error.error_response();
        assert_eq!(response.status(), 503);
    }
}
