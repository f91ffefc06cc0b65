use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

/// Input rejected before it reaches the store.
#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum ValidationError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("{field} {reason}")]
    OutOfRange {
        field: &'static str,
        reason: &'static str,
    },

    /// The request body could not be decoded into a draft, e.g. `price=abc`.
    #[error("{detail}")]
    Malformed { detail: String },
}

impl From<JsonRejection> for ValidationError {
    fn from(rejection: JsonRejection) -> Self {
        ValidationError::Malformed {
            detail: rejection.body_text(),
        }
    }
}

impl From<FormRejection> for ValidationError {
    fn from(rejection: FormRejection) -> Self {
        ValidationError::Malformed {
            detail: rejection.body_text(),
        }
    }
}

#[derive(Debug, ThisError)]
pub enum EstoreError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("{field} '{value}' is already in use")]
    UniqueConstraintViolation { field: &'static str, value: String },

    #[error("Customer {0} does not exist")]
    UnknownCustomer(i64),

    #[error("Product {0} does not exist")]
    UnknownProduct(i64),

    #[error("Database error: {0}")]
    Persistence(#[from] SqlxError),
}

impl From<JsonRejection> for EstoreError {
    fn from(rejection: JsonRejection) -> Self {
        EstoreError::Validation(rejection.into())
    }
}

impl From<FormRejection> for EstoreError {
    fn from(rejection: FormRejection) -> Self {
        EstoreError::Validation(rejection.into())
    }
}

impl EstoreError {
    /// Stable machine-readable code, shared by the JSON API and the HTML pages.
    pub fn code(&self) -> &'static str {
        match self {
            EstoreError::Validation(_) => "VALIDATION_ERROR",
            EstoreError::UniqueConstraintViolation { .. } => "UNIQUE_CONSTRAINT",
            EstoreError::UnknownCustomer(_) | EstoreError::UnknownProduct(_) => "UNKNOWN_REFERENCE",
            EstoreError::Persistence(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            EstoreError::Validation(_)
            | EstoreError::UnknownCustomer(_)
            | EstoreError::UnknownProduct(_) => StatusCode::UNPROCESSABLE_ENTITY,
            EstoreError::UniqueConstraintViolation { .. } => StatusCode::CONFLICT,
            EstoreError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to an end user; storage failures stay opaque.
    pub fn public_message(&self) -> String {
        match self {
            EstoreError::Persistence(_) => "An internal server error occurred.".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for EstoreError {
    fn into_response(self) -> axum::response::Response {
        if let EstoreError::Persistence(e) = &self {
            tracing::error!(error = %e, "storage failure");
        }
        let status = self.status();
        let body = ApiErrorResponse {
            error: ApiErrorBody {
                code: self.code().to_string(),
                message: self.public_message(),
            },
        };
        (status, Json(body)).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
