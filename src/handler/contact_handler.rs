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
use crate::dto::contact_dto::{ContactListParams, ContactResponse};
use crate::handler::read_payload;
use crate::service::contact_service::{ContactService, ContactServiceImpl};
use crate::util::error::{HandlerError, ResourceMessages, ServiceError};
use crate::validation::contact_schema::{validate_create_contact, validate_update_contact};

pub const CONTACT_MESSAGES: ResourceMessages = ResourceMessages {
    not_found: "Contact not found",
    invalid_id: "Invalid contact ID format",
    created: "Contact message submitted successfully",
    listed: "Contacts retrieved successfully",
    fetched: "Contact retrieved successfully",
    updated: "Contact updated successfully",
    deleted: "Contact deleted successfully",
    create_failed: "Failed to submit contact message",
    list_failed: "Failed to retrieve contacts",
    fetch_failed: "Failed to retrieve contact",
    update_failed: "Failed to update contact",
    delete_failed: "Failed to delete contact",
};

pub async fn create_contact_handler(
    State(service): State<Arc<ContactServiceImpl>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    info!("[create_contact_handler] Handler called");
    let payload = read_payload(body)?;
    let created = match validate_create_contact(&payload) {
        Ok(new_contact) => service.create_contact(new_contact).await,
        Err(errors) => {
            warn!("[create_contact_handler] Validation failed on {} field(s)", errors.len());
            Err(ServiceError::Validation(errors))
        }
    }
    .map_err(|e| HandlerError::from_service(e, &CONTACT_MESSAGES, CONTACT_MESSAGES.create_failed))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_data(CONTACT_MESSAGES.created, ContactResponse::from(created))),
    ))
}

pub async fn list_contacts_handler(
    State(service): State<Arc<ContactServiceImpl>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse, HandlerError> {
    let page = service
        .list_contacts(&ContactListParams::from_pairs(&pairs))
        .await
        .map_err(|e| HandlerError::from_service(e, &CONTACT_MESSAGES, CONTACT_MESSAGES.list_failed))?;
    Ok(Json(ApiResponse::with_data(CONTACT_MESSAGES.listed, page.map(ContactResponse::from))))
}

pub async fn get_contact_handler(
    State(service): State<Arc<ContactServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let contact = service
        .get_contact(&id)
        .await
        .map_err(|e| HandlerError::from_service(e, &CONTACT_MESSAGES, CONTACT_MESSAGES.fetch_failed))?;
    Ok(Json(ApiResponse::with_data(CONTACT_MESSAGES.fetched, ContactResponse::from(contact))))
}

pub async fn update_contact_handler(
    State(service): State<Arc<ContactServiceImpl>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let payload = read_payload(body)?;
    let updated = match validate_update_contact(&payload) {
        Ok(patch) => service.update_contact(&id, patch).await,
        Err(errors) => Err(ServiceError::Validation(errors)),
    }
    .map_err(|e| HandlerError::from_service(e, &CONTACT_MESSAGES, CONTACT_MESSAGES.update_failed))?;
    Ok(Json(ApiResponse::with_data(CONTACT_MESSAGES.updated, ContactResponse::from(updated))))
}

pub async fn delete_contact_handler(
    State(service): State<Arc<ContactServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    service
        .delete_contact(&id)
        .await
        .map_err(|e| HandlerError::from_service(e, &CONTACT_MESSAGES, CONTACT_MESSAGES.delete_failed))?;
    Ok(Json(ApiResponse::message_only(CONTACT_MESSAGES.deleted)))
}
