use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::dto::quote_dto::{duplicate_quote_filter, NewQuote, QuoteListParams, QuotePatch};
use crate::model::{timestamp_now, Quote};
use crate::query::{Condition, ListQuery, Page};
use crate::repository::DocumentRepository;
use crate::service::duplicate_policy::DuplicateQuotePolicy;
use crate::service::parse_id;
use crate::util::error::ServiceError;

#[async_trait]
pub trait QuoteService: Send + Sync {
    async fn create_quote(&self, new_quote: NewQuote) -> Result<Quote, ServiceError>;
    async fn get_quote(&self, id: &str) -> Result<Quote, ServiceError>;
    async fn list_quotes(&self, params: &QuoteListParams) -> Result<Page<Quote>, ServiceError>;
    async fn update_quote(&self, id: &str, patch: QuotePatch) -> Result<Quote, ServiceError>;
    async fn delete_quote(&self, id: &str) -> Result<(), ServiceError>;
}

pub struct QuoteServiceImpl {
    pub quote_repo: Arc<dyn DocumentRepository<Quote>>,
    pub policy: DuplicateQuotePolicy,
}

impl QuoteServiceImpl {
    pub fn new(quote_repo: Arc<dyn DocumentRepository<Quote>>, policy: DuplicateQuotePolicy) -> Self {
        QuoteServiceImpl { quote_repo, policy }
    }
}

#[async_trait]
impl QuoteService for QuoteServiceImpl {
    #[instrument(skip(self, new_quote), fields(insurance_type = %new_quote.insurance_type))]
    async fn create_quote(&self, new_quote: NewQuote) -> Result<Quote, ServiceError> {
        info!("Registering new quote");
        let existing = self
            .quote_repo
            .find_one(&duplicate_quote_filter(&new_quote.email, new_quote.insurance_type))
            .await?;
        self.policy.check_create(existing.as_ref())?;

        let res = self.quote_repo.insert(new_quote.into_quote()).await;
        match &res {
            Ok(q) => info!(id = ?q.id, "Quote registered successfully"),
            Err(e) => error!("Failed to register quote: {e}"),
        }
        Ok(res?)
    }

    #[instrument(skip(self))]
    async fn get_quote(&self, id: &str) -> Result<Quote, ServiceError> {
        let id = parse_id(id)?;
        info!("Getting quote by id");
        self.quote_repo.find_by_id(id).await?.ok_or(ServiceError::NotFound)
    }

    #[instrument(skip(self, params))]
    async fn list_quotes(&self, params: &QuoteListParams) -> Result<Page<Quote>, ServiceError> {
        let page = params.page_request();
        let query = ListQuery::new(params.to_filter(), page);
        let quotes = self.quote_repo.list(&query).await?;
        let total = self.quote_repo.count(&query.filter).await?;
        info!(page = page.page, limit = page.limit, total, "Fetched {} quotes", quotes.len());
        Ok(Page::new(quotes, page, total))
    }

    #[instrument(skip(self, patch))]
    async fn update_quote(&self, id: &str, patch: QuotePatch) -> Result<Quote, ServiceError> {
        let id = parse_id(id)?;
        info!("Updating quote");
        let current = self.quote_repo.find_by_id(id).await?.ok_or(ServiceError::NotFound)?;

        if let Some(email) = patch.email.as_deref().filter(|email| *email != current.email) {
            let insurance_type = patch.insurance_type.unwrap_or(current.insuranceType);
            let filter = duplicate_quote_filter(email, insurance_type).and(Condition::not_equals("_id", id));
            let clash = self.quote_repo.find_one(&filter).await?;
            self.policy.check_update(clash.as_ref())?;
        }

        let mut set = patch.to_set_document();
        set.insert("updatedAt", timestamp_now());
        let updated = self.quote_repo.update(id, set).await?;
        // The record can vanish between the existence check and the write
        updated.ok_or(ServiceError::NotFound)
    }

    #[instrument(skip(self))]
    async fn delete_quote(&self, id: &str) -> Result<(), ServiceError> {
        let id = parse_id(id)?;
        info!("Deleting quote");
        if self.quote_repo.find_by_id(id).await?.is_none() {
            return Err(ServiceError::NotFound);
        }
        if !self.quote_repo.delete(id).await? {
            return Err(ServiceError::NotFound);
        }
        info!("Quote deleted successfully");
        Ok(())
    }
}
