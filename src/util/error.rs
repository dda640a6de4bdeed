use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use crate::repository::repository_error::RepositoryError;
use crate::validation::FieldError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HandlerErrorKind {
    NotFound,
    Validation,
    Internal,
    Conflict,
    BadRequest,
}

impl std::fmt::Display for HandlerErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HandlerErrorKind::NotFound => "NotFound",
            HandlerErrorKind::Validation => "Validation",
            HandlerErrorKind::Internal => "Internal",
            HandlerErrorKind::Conflict => "Conflict",
            HandlerErrorKind::BadRequest => "BadRequest",
        };
        write!(f, "{}", s)
    }
}

impl HandlerErrorKind {
    pub fn status(&self) -> StatusCode {
        match self {
            HandlerErrorKind::NotFound => StatusCode::NOT_FOUND,
            HandlerErrorKind::Validation | HandlerErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            HandlerErrorKind::Conflict => StatusCode::CONFLICT,
            HandlerErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Per-resource wording used in response envelopes.
#[derive(Debug)]
pub struct ResourceMessages {
    pub not_found: &'static str,
    pub invalid_id: &'static str,
    pub created: &'static str,
    pub listed: &'static str,
    pub fetched: &'static str,
    pub updated: &'static str,
    pub deleted: &'static str,
    pub create_failed: &'static str,
    pub list_failed: &'static str,
    pub fetch_failed: &'static str,
    pub update_failed: &'static str,
    pub delete_failed: &'static str,
}

/// Failure envelope: `{ success: false, message, errors? }`.
#[derive(Debug, Serialize)]
pub struct HandlerError {
    #[serde(skip)]
    pub error: HandlerErrorKind,
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl HandlerError {
    pub fn new(error: HandlerErrorKind, message: impl Into<String>) -> Self {
        HandlerError {
            error,
            success: false,
            message: message.into(),
            errors: None,
        }
    }

    pub fn validation(errors: Vec<FieldError>) -> Self {
        HandlerError {
            errors: Some(errors),
            ..HandlerError::new(HandlerErrorKind::Validation, "Validation failed")
        }
    }

    /// Maps a service failure to its envelope. Internal details are logged and
    /// replaced by `failure`.
    pub fn from_service(err: ServiceError, messages: &ResourceMessages, failure: &'static str) -> Self {
        match err {
            ServiceError::Validation(errors) => HandlerError::validation(errors),
            ServiceError::InvalidId => HandlerError::new(HandlerErrorKind::BadRequest, messages.invalid_id),
            ServiceError::NotFound => HandlerError::new(HandlerErrorKind::NotFound, messages.not_found),
            ServiceError::Conflict(message) => HandlerError::new(HandlerErrorKind::Conflict, message),
            ServiceError::Internal(detail) => {
                error!(detail = %detail, "{}", failure);
                HandlerError::new(HandlerErrorKind::Internal, failure)
            }
        }
    }
}

impl std::fmt::Display for HandlerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for HandlerError {}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let status = self.error.status();
        (status, Json(self)).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ServiceError {
    #[error("Validation failed")]
    Validation(Vec<FieldError>),
    #[error("Invalid identifier format")]
    InvalidId,
    #[error("Not Found")]
    NotFound,
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Internal Error: {0}")]
    Internal(String),
}

// Every persistence failure surfaces as an internal error
impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        ServiceError::Internal(err.to_string())
    }
}
