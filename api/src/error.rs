//! Unified error types for the Stockroom API
//!
//! This module defines error types for each layer:
//! - `DomainError`: Core business logic errors raised by services and stores
//! - `AppError`: Application layer errors (wraps domain errors for HTTP responses)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// A single field constraint failure found while validating a draft.
///
/// Drafts are validated before any store interaction; all failures are
/// collected into one list rather than reported one at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: &'static str,
    pub message: String,
}

impl Violation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Domain layer errors - pure business logic errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("Insufficient stock: available {available}, requested {requested}")]
    InsufficientStock { available: i32, requested: i32 },

    #[error("Validation failed: {}", join_violations(.0))]
    Validation(Vec<Violation>),

    #[error("Database error: {0}")]
    Database(String),
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Invalid request: {0}")]
    BadRequest(String),
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Domain(DomainError::NotFound(msg)) => {
                (StatusCode::NOT_FOUND, "Not found", Some(msg.clone()))
            }
            AppError::Domain(DomainError::DuplicateKey(msg)) => {
                (StatusCode::CONFLICT, "Duplicate key", Some(msg.clone()))
            }
            AppError::Domain(DomainError::InvalidQuantity(msg)) => {
                (StatusCode::BAD_REQUEST, "Invalid quantity", Some(msg.clone()))
            }
            AppError::Domain(err @ DomainError::InsufficientStock { .. }) => {
                (StatusCode::CONFLICT, "Insufficient stock", Some(err.to_string()))
            }
            AppError::Domain(DomainError::Validation(violations)) => (
                StatusCode::BAD_REQUEST,
                "Validation error",
                Some(join_violations(violations)),
            ),
            AppError::Domain(DomainError::Database(msg)) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "Bad request", Some(msg.clone()))
            }
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            details,
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn violation_display() {
        let v = Violation::new("sku", "SKU is required");
        assert_eq!(v.to_string(), "sku: SKU is required");
    }

    #[test]
    fn validation_error_joins_violations() {
        let err = DomainError::Validation(vec![
            Violation::new("name", "Name is required"),
            Violation::new("price", "Price must be greater than 0"),
        ]);
        let msg = err.to_string();
        assert!(msg.contains("name: Name is required"));
        assert!(msg.contains("price: Price must be greater than 0"));
    }

    #[test]
    fn insufficient_stock_reports_both_sides() {
        let err = DomainError::InsufficientStock {
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock: available 3, requested 5"
        );
    }
}
