//! HTTP error responses.
//!
//! Client errors carry a specific message; server errors carry a fixed, generic
//! message per operation while the underlying cause is only logged.

use crate::core::validation::FieldError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt::Display;
use thiserror::Error;
use tracing::error;

/// Errors returned by request handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Path id is not an integer
    #[error("ID inválido")]
    InvalidId,

    /// Request body is not valid JSON
    #[error("Dados inválidos: {0}")]
    MalformedBody(String),

    /// Payload violates one or more field rules
    #[error("Dados inválidos")]
    Validation(Vec<FieldError>),

    /// No plant with the requested id
    #[error("Planta não encontrada")]
    PlantaNotFound,

    /// Storage or other infrastructure failure
    #[error("{message}")]
    Internal {
        /// Generic, client-safe description of the failed operation
        message: &'static str,
    },
}

impl ApiError {
    /// Logs `cause` and returns a 500 error exposing only `message`.
    pub fn internal(message: &'static str, cause: &impl Display) -> Self {
        error!("{}: {}", message, cause);
        Self::Internal { message }
    }

    /// HTTP status code for this error
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidId | Self::MalformedBody(_) | Self::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::PlantaNotFound => StatusCode::NOT_FOUND,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Summary of the failure
    pub message: String,
    /// Field-level violations, present only for rejected payloads
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

/// Violation reported for a request body that could not be parsed as JSON.
pub const MALFORMED_BODY_ERROR: FieldError = FieldError {
    field: "body",
    message: "Corpo da requisição deve ser um JSON válido",
};

impl From<ApiError> for ErrorResponse {
    fn from(err: ApiError) -> Self {
        let message = err.to_string();
        let errors = match err {
            ApiError::Validation(errors) => Some(errors),
            ApiError::MalformedBody(_) => Some(vec![MALFORMED_BODY_ERROR]),
            _ => None,
        };
        Self { message, errors }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(ErrorResponse::from(self))).into_response()
    }
}
