#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{Body, Bytes},
    http::{Request, StatusCode},
    Router,
};
use bson::{oid::ObjectId, Document};
use http_body_util::BodyExt;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use tower::ServiceExt;

use compass_backend::app::app::create_router;
use compass_backend::config::CorsConfig;
use compass_backend::dto::contact_dto::NewContact;
use compass_backend::dto::quote_dto::NewQuote;
use compass_backend::model::{Contact, ContactSubject, InsuranceType, Quote, Record};
use compass_backend::query::{Filter, ListQuery};
use compass_backend::repository::memory::InMemoryRepository;
use compass_backend::repository::repository_error::{RepositoryError, RepositoryResult};
use compass_backend::repository::DocumentRepository;
use compass_backend::service::contact_service::ContactServiceImpl;
use compass_backend::service::duplicate_policy::DuplicateQuotePolicy;
use compass_backend::service::quote_service::QuoteServiceImpl;

pub fn quote_service(policy: DuplicateQuotePolicy) -> Arc<QuoteServiceImpl> {
    Arc::new(QuoteServiceImpl::new(
        Arc::new(InMemoryRepository::<Quote>::default()),
        policy,
    ))
}

pub fn contact_service() -> Arc<ContactServiceImpl> {
    Arc::new(ContactServiceImpl::new(Arc::new(InMemoryRepository::<Contact>::default())))
}

pub fn test_app() -> Router {
    create_router(
        quote_service(DuplicateQuotePolicy::default()),
        contact_service(),
        &CorsConfig::default(),
    )
    .expect("default CORS config is valid")
}

/// Router whose stores fail every call.
pub fn failing_app() -> Router {
    create_router(
        Arc::new(QuoteServiceImpl::new(
            Arc::new(FailingRepository::<Quote>::new()),
            DuplicateQuotePolicy::default(),
        )),
        Arc::new(ContactServiceImpl::new(Arc::new(FailingRepository::<Contact>::new()))),
        &CorsConfig::default(),
    )
    .expect("default CORS config is valid")
}

pub async fn send_raw(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Bytes) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(text) => {
            builder = builder.header("content-type", "application/json");
            Body::from(text.to_string())
        }
        None => Body::empty(),
    };
    let resp = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    (status, bytes)
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let text = body.map(|v| v.to_string());
    let (status, bytes) = send_raw(app, method, uri, text.as_deref()).await;
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

pub fn new_quote(name: &str, email: &str, insurance_type: InsuranceType) -> NewQuote {
    NewQuote {
        full_name: name.to_string(),
        email: email.to_string(),
        phone_number: "+919876543210".to_string(),
        insurance_type,
        additional_info: None,
    }
}

pub fn new_contact(name: &str, subject: ContactSubject) -> NewContact {
    NewContact {
        full_name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        contact_number: "9876543210".to_string(),
        subject,
        message: "Please call me back about my policy".to_string(),
    }
}

/// Repository stub that reports an unavailable store.
pub struct FailingRepository<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> FailingRepository<T> {
    pub fn new() -> Self {
        FailingRepository { _marker: PhantomData }
    }
}

fn unavailable() -> RepositoryError {
    RepositoryError::connection("store unavailable")
}

#[async_trait]
impl<T: Record> DocumentRepository<T> for FailingRepository<T> {
    async fn insert(&self, _record: T) -> RepositoryResult<T> {
        Err(unavailable())
    }
    async fn find_by_id(&self, _id: ObjectId) -> RepositoryResult<Option<T>> {
        Err(unavailable())
    }
    async fn find_one(&self, _filter: &Filter) -> RepositoryResult<Option<T>> {
        Err(unavailable())
    }
    async fn update(&self, _id: ObjectId, _set: Document) -> RepositoryResult<Option<T>> {
        Err(unavailable())
    }
    async fn delete(&self, _id: ObjectId) -> RepositoryResult<bool> {
        Err(unavailable())
    }
    async fn list(&self, _query: &ListQuery) -> RepositoryResult<Vec<T>> {
        Err(unavailable())
    }
    async fn count(&self, _filter: &Filter) -> RepositoryResult<u64> {
        Err(unavailable())
    }
}
