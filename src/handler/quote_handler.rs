use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

use crate::dto::api_response::ApiResponse;
use crate::dto::quote_dto::{QuoteListParams, QuoteResponse};
use crate::handler::read_payload;
use crate::service::quote_service::{QuoteService, QuoteServiceImpl};
use crate::util::error::{HandlerError, ResourceMessages, ServiceError};
use crate::validation::quote_schema::{validate_create_quote, validate_update_quote};

pub const QUOTE_MESSAGES: ResourceMessages = ResourceMessages {
    not_found: "Quote not found",
    invalid_id: "Invalid quote ID format",
    created: "Quote request submitted successfully",
    listed: "Quotes retrieved successfully",
    fetched: "Quote retrieved successfully",
    updated: "Quote updated successfully",
    deleted: "Quote deleted successfully",
    create_failed: "Failed to submit quote request",
    list_failed: "Failed to retrieve quotes",
    fetch_failed: "Failed to retrieve quote",
    update_failed: "Failed to update quote",
    delete_failed: "Failed to delete quote",
};

// Handler: Submit Quote Request
pub async fn create_quote_handler(
    State(service): State<Arc<QuoteServiceImpl>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    info!("[create_quote_handler] Handler called");
    let payload = read_payload(body)?;
    let created = match validate_create_quote(&payload) {
        Ok(new_quote) => service.create_quote(new_quote).await,
        Err(errors) => {
            warn!("[create_quote_handler] Validation failed on {} field(s)", errors.len());
            Err(ServiceError::Validation(errors))
        }
    }
    .map_err(|e| HandlerError::from_service(e, &QUOTE_MESSAGES, QUOTE_MESSAGES.create_failed))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_data(QUOTE_MESSAGES.created, QuoteResponse::from(created))),
    ))
}

// Handler: List Quotes
pub async fn list_quotes_handler(
    State(service): State<Arc<QuoteServiceImpl>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse, HandlerError> {
    let page = service
        .list_quotes(&QuoteListParams::from_pairs(&pairs))
        .await
        .map_err(|e| HandlerError::from_service(e, &QUOTE_MESSAGES, QUOTE_MESSAGES.list_failed))?;
    Ok(Json(ApiResponse::with_data(QUOTE_MESSAGES.listed, page.map(QuoteResponse::from))))
}

// Handler: Get Quote
pub async fn get_quote_handler(
    State(service): State<Arc<QuoteServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let quote = service
        .get_quote(&id)
        .await
        .map_err(|e| HandlerError::from_service(e, &QUOTE_MESSAGES, QUOTE_MESSAGES.fetch_failed))?;
    Ok(Json(ApiResponse::with_data(QUOTE_MESSAGES.fetched, QuoteResponse::from(quote))))
}

// Handler: Update Quote
pub async fn update_quote_handler(
    State(service): State<Arc<QuoteServiceImpl>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let payload = read_payload(body)?;
    let updated = match validate_update_quote(&payload) {
        Ok(patch) => service.update_quote(&id, patch).await,
        Err(errors) => Err(ServiceError::Validation(errors)),
    }
    .map_err(|e| HandlerError::from_service(e, &QUOTE_MESSAGES, QUOTE_MESSAGES.update_failed))?;
    Ok(Json(ApiResponse::with_data(QUOTE_MESSAGES.updated, QuoteResponse::from(updated))))
}

// Handler: Delete Quote
pub async fn delete_quote_handler(
    State(service): State<Arc<QuoteServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    service
        .delete_quote(&id)
        .await
        .map_err(|e| HandlerError::from_service(e, &QUOTE_MESSAGES, QUOTE_MESSAGES.delete_failed))?;
    Ok(Json(ApiResponse::message_only(QUOTE_MESSAGES.deleted)))
}
