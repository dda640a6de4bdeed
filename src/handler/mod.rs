pub mod contact_handler;
pub mod quote_handler;

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde_json::Value;
use tracing::warn;

use crate::util::error::{HandlerError, HandlerErrorKind};

pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON payload";

/// Unwraps a JSON body that must be an object.
pub(crate) fn read_payload(body: Result<Json<Value>, JsonRejection>) -> Result<Value, HandlerError> {
    match body {
        Ok(Json(value)) if value.is_object() => Ok(value),
        Ok(_) => {
            warn!("Rejected request body that is not a JSON object");
            Err(HandlerError::new(HandlerErrorKind::BadRequest, INVALID_JSON_MESSAGE))
        }
        Err(rejection) => {
            warn!("Rejected request body: {}", rejection.body_text());
            Err(HandlerError::new(HandlerErrorKind::BadRequest, INVALID_JSON_MESSAGE))
        }
    }
}
