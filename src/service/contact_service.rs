use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::dto::contact_dto::{ContactListParams, ContactPatch, NewContact};
use crate::model::{timestamp_now, Contact};
use crate::query::{ListQuery, Page};
use crate::repository::DocumentRepository;
use crate::service::parse_id;
use crate::util::error::ServiceError;

#[async_trait]
pub trait ContactService: Send + Sync {
    async fn create_contact(&self, new_contact: NewContact) -> Result<Contact, ServiceError>;
    async fn get_contact(&self, id: &str) -> Result<Contact, ServiceError>;
    async fn list_contacts(&self, params: &ContactListParams) -> Result<Page<Contact>, ServiceError>;
    async fn update_contact(&self, id: &str, patch: ContactPatch) -> Result<Contact, ServiceError>;
    async fn delete_contact(&self, id: &str) -> Result<(), ServiceError>;
}

pub struct ContactServiceImpl {
    pub contact_repo: Arc<dyn DocumentRepository<Contact>>,
}

impl ContactServiceImpl {
    pub fn new(contact_repo: Arc<dyn DocumentRepository<Contact>>) -> Self {
        ContactServiceImpl { contact_repo }
    }
}

#[async_trait]
impl ContactService for ContactServiceImpl {
    #[instrument(skip(self, new_contact), fields(subject = %new_contact.subject))]
    async fn create_contact(&self, new_contact: NewContact) -> Result<Contact, ServiceError> {
        info!("Submitting contact message");
        let res = self.contact_repo.insert(new_contact.into_contact()).await;
        match &res {
            Ok(c) => info!(id = ?c.id, "Contact message stored"),
            Err(e) => error!("Failed to store contact message: {e}"),
        }
        Ok(res?)
    }

    #[instrument(skip(self))]
    async fn get_contact(&self, id: &str) -> Result<Contact, ServiceError> {
        let id = parse_id(id)?;
        self.contact_repo.find_by_id(id).await?.ok_or(ServiceError::NotFound)
    }

    #[instrument(skip(self, params))]
    async fn list_contacts(&self, params: &ContactListParams) -> Result<Page<Contact>, ServiceError> {
        let page = params.page_request();
        let query = ListQuery::new(params.to_filter(), page);
        let contacts = self.contact_repo.list(&query).await?;
        let total = self.contact_repo.count(&query.filter).await?;
        info!(page = page.page, limit = page.limit, total, "Fetched {} contacts", contacts.len());
        Ok(Page::new(contacts, page, total))
    }

    #[instrument(skip(self, patch))]
    async fn update_contact(&self, id: &str, patch: ContactPatch) -> Result<Contact, ServiceError> {
        let id = parse_id(id)?;
        if self.contact_repo.find_by_id(id).await?.is_none() {
            return Err(ServiceError::NotFound);
        }
        let mut set = patch.to_set_document();
        set.insert("updatedAt", timestamp_now());
        self.contact_repo.update(id, set).await?.ok_or(ServiceError::NotFound)
    }

    #[instrument(skip(self))]
    async fn delete_contact(&self, id: &str) -> Result<(), ServiceError> {
        let id = parse_id(id)?;
        if self.contact_repo.find_by_id(id).await?.is_none() {
            return Err(ServiceError::NotFound);
        }
        if !self.contact_repo.delete(id).await? {
            return Err(ServiceError::NotFound);
        }
        info!("Contact deleted successfully");
        Ok(())
    }
}
