use axum::{
    http::{header, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::{
    AppConfig, ConfigError, CorsConfig, MongoConfig, QuotePolicyConfig, StoreBackend, StoreConfig,
};
use crate::model::{Contact, Quote};
use crate::repository::memory::InMemoryRepository;
use crate::repository::mongo_repo::{connect, MongoRepository};
use crate::repository::DocumentRepository;
use crate::router::contact_router::contact_router;
use crate::router::quote_router::quote_router;
use crate::service::contact_service::ContactServiceImpl;
use crate::service::duplicate_policy::DuplicateQuotePolicy;
use crate::service::quote_service::QuoteServiceImpl;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),
    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

pub struct App {
    config: AppConfig,
    router: Router,
}

impl App {
    pub async fn new() -> Result<Self, AppError> {
        let config = AppConfig::from_env()?;
        let store = StoreConfig::from_env()?;
        let cors = CorsConfig::from_env()?;
        let policy = DuplicateQuotePolicy::from(&QuotePolicyConfig::from_env()?);

        let (quote_repo, contact_repo) = Self::repositories(store.backend).await?;
        info!(backend = %store.backend, ?policy, "Store selected");

        let quote_service = Arc::new(QuoteServiceImpl::new(quote_repo, policy));
        let contact_service = Arc::new(ContactServiceImpl::new(contact_repo));
        let router = create_router(quote_service, contact_service, &cors)?;
        Ok(App { config, router })
    }

    async fn repositories(
        backend: StoreBackend,
    ) -> Result<(Arc<dyn DocumentRepository<Quote>>, Arc<dyn DocumentRepository<Contact>>), AppError> {
        let repositories: (Arc<dyn DocumentRepository<Quote>>, Arc<dyn DocumentRepository<Contact>>) =
            match backend {
                StoreBackend::Mongo => {
                    let mongo_config = MongoConfig::from_env()?;
                    let database = connect(&mongo_config).await?;
                    (
                        Arc::new(MongoRepository::<Quote>::new(&database, &mongo_config.quote_collection)),
                        Arc::new(MongoRepository::<Contact>::new(&database, &mongo_config.contact_collection)),
                    )
                }
                StoreBackend::Memory => (
                    Arc::new(InMemoryRepository::<Quote>::default()),
                    Arc::new(InMemoryRepository::<Contact>::default()),
                ),
            };
        Ok(repositories)
    }

    pub async fn start(self) -> Result<(), AppError> {
        let addr = self.config.socket_addr()?;
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("Server running at http://{}", addr);
        axum::serve(listener, self.router).await?;
        Ok(())
    }
}

async fn root_handler() -> impl IntoResponse {
    Json(json!({ "message": "Server is running successfully!" }))
}

async fn route_not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "message": "Route not found" })))
}

/// Builds the full HTTP surface: resource routes under `/api`, health checks, CORS and tracing.
pub fn create_router(
    quote_service: Arc<QuoteServiceImpl>,
    contact_service: Arc<ContactServiceImpl>,
    cors: &CorsConfig,
) -> Result<Router, ConfigError> {
    let cors_layer = CorsLayer::new()
        .allow_origin(AllowOrigin::list(cors.header_values()?))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true);

    let api = quote_router(quote_service).merge(contact_router(contact_service));

    Ok(Router::new()
        .route("/", get(root_handler))
        .route("/health", get(|| async { "OK" }))
        .nest("/api", api)
        .fallback(route_not_found)
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http()))
}
