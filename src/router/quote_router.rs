use axum::{routing::get, Router};
use std::sync::Arc;

use crate::handler::quote_handler::{
    create_quote_handler, delete_quote_handler, get_quote_handler, list_quotes_handler,
    update_quote_handler,
};
use crate::service::quote_service::QuoteServiceImpl;

pub fn quote_router(service: Arc<QuoteServiceImpl>) -> Router {
    Router::new()
        .route("/quotes", get(list_quotes_handler).post(create_quote_handler))
        .route(
            "/quotes/{id}",
            get(get_quote_handler).put(update_quote_handler).delete(delete_quote_handler),
        )
        .with_state(service)
}
