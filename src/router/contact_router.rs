use axum::{routing::get, Router};
use std::sync::Arc;

use crate::handler::contact_handler::{
    create_contact_handler, delete_contact_handler, get_contact_handler, list_contacts_handler,
    update_contact_handler,
};
use crate::service::contact_service::ContactServiceImpl;

pub fn contact_router(service: Arc<ContactServiceImpl>) -> Router {
    Router::new()
        .route("/contact", get(list_contacts_handler).post(create_contact_handler))
        .route(
            "/contact/{id}",
            get(get_contact_handler).put(update_contact_handler).delete(delete_contact_handler),
        )
        .with_state(service)
}
