//! In-process store used for local development and tests.

use async_trait::async_trait;
use bson::{oid::ObjectId, Bson, Document};
use std::cmp::Reverse;
use tokio::sync::RwLock;
use tracing::debug;

use crate::model::{timestamp_now, Record};
use crate::query::{Condition, Filter, ListQuery};
use crate::repository::repository_error::RepositoryResult;
use crate::repository::DocumentRepository;

fn matches_condition(condition: &Condition, document: &Document) -> bool {
    match condition {
        Condition::Equals { field, value } => document.get(*field) == Some(value),
        Condition::NotEquals { field, value } => document.get(*field) != Some(value),
        Condition::ContainsCi { field, needle } => match document.get(*field) {
            Some(Bson::String(text)) => text.to_lowercase().contains(&needle.to_lowercase()),
            _ => false,
        },
        Condition::AnyOf(group) => group.iter().any(|c| matches_condition(c, document)),
    }
}

/// Evaluates a filter against the BSON form of a record.
pub fn matches(filter: &Filter, document: &Document) -> bool {
    filter
        .conditions()
        .iter()
        .all(|condition| matches_condition(condition, document))
}

type SortKey = Reverse<(Option<String>, Option<[u8; 12]>)>;

fn sort_key(document: &Document) -> SortKey {
    Reverse((
        document.get_str("createdAt").ok().map(str::to_owned),
        document.get_object_id("_id").ok().map(|id| id.bytes()),
    ))
}

pub struct InMemoryRepository<T: Record> {
    records: RwLock<Vec<T>>,
}

impl<T: Record> InMemoryRepository<T> {
    pub fn new() -> Self {
        InMemoryRepository {
            records: RwLock::new(Vec::new()),
        }
    }

    /// Matching records paired with their BSON form, newest first.
    fn matching(records: &[T], filter: &Filter) -> RepositoryResult<Vec<(SortKey, T)>> {
        let mut found = Vec::new();
        for record in records {
            let document = bson::to_document(record)?;
            if matches(filter, &document) {
                found.push((sort_key(&document), record.clone()));
            }
        }
        found.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(found)
    }
}

impl<T: Record> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record> DocumentRepository<T> for InMemoryRepository<T> {
    async fn insert(&self, mut record: T) -> RepositoryResult<T> {
        record.prepare_insert(ObjectId::new(), timestamp_now());
        self.records.write().await.push(record.clone());
        debug!("Record stored in memory");
        Ok(record)
    }

    async fn find_by_id(&self, id: ObjectId) -> RepositoryResult<Option<T>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id() == Some(id)).cloned())
    }

    async fn find_one(&self, filter: &Filter) -> RepositoryResult<Option<T>> {
        let records = self.records.read().await;
        let found = Self::matching(&records, filter)?;
        Ok(found.into_iter().next().map(|(_, record)| record))
    }

    async fn update(&self, id: ObjectId, set: Document) -> RepositoryResult<Option<T>> {
        let mut records = self.records.write().await;
        let Some(slot) = records.iter_mut().find(|r| r.id() == Some(id)) else {
            return Ok(None);
        };
        let mut document = bson::to_document(&*slot)?;
        for (key, value) in set {
            document.insert(key, value);
        }
        let updated: T = bson::from_document(document)?;
        *slot = updated.clone();
        Ok(Some(updated))
    }

    async fn delete(&self, id: ObjectId) -> RepositoryResult<bool> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.id() != Some(id));
        Ok(records.len() < before)
    }

    async fn list(&self, query: &ListQuery) -> RepositoryResult<Vec<T>> {
        let records = self.records.read().await;
        let found = Self::matching(&records, &query.filter)?;
        let skip = usize::try_from(query.skip()).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.limit()).unwrap_or(usize::MAX);
        Ok(found
            .into_iter()
            .skip(skip)
            .take(limit)
            .map(|(_, record)| record)
            .collect())
    }

    async fn count(&self, filter: &Filter) -> RepositoryResult<u64> {
        let records = self.records.read().await;
        Ok(Self::matching(&records, filter)?.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Contact, ContactSubject};
    use crate::query::PageRequest;
    use bson::doc;

    fn contact(name: &str, message: &str) -> Contact {
        Contact {
            id: None,
            fullName: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            contactNumber: "12345".to_string(),
            subject: ContactSubject::Other,
            message: message.to_string(),
            createdAt: None,
            updatedAt: None,
        }
    }

    #[test]
    fn test_contains_ci_matches_any_case() {
        let document = doc! { "message": "Please call me about FOO" };
        let filter = Filter::new().and(Condition::contains_ci("message", "foo"));
        assert!(matches(&filter, &document));
    }

    #[test]
    fn test_missing_field_never_matches_substring() {
        let document = doc! { "fullName": "Ann" };
        let filter = Filter::new().and(Condition::contains_ci("additionalInfo", "a"));
        assert!(!matches(&filter, &document));
    }

    #[test]
    fn test_substring_is_literal() {
        let document = doc! { "email": "ann@example.com" };
        assert!(!matches(&Filter::new().and(Condition::contains_ci("email", "a.n")), &document));
        assert!(matches(&Filter::new().and(Condition::contains_ci("email", "e.c")), &document));
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let repo = InMemoryRepository::<Contact>::new();
        let first = repo.insert(contact("First", "first message body")).await.unwrap();
        let second = repo.insert(contact("Second", "second message body")).await.unwrap();
        let listed = repo
            .list(&ListQuery::new(Filter::new(), PageRequest::default()))
            .await
            .unwrap();
        assert_eq!(listed, vec![second, first]);
    }

    #[tokio::test]
    async fn test_update_sets_only_given_fields() {
        let repo = InMemoryRepository::<Contact>::new();
        let stored = repo.insert(contact("Ann", "original message")).await.unwrap();
        let id = stored.id.unwrap();
        let updated = repo
            .update(id, doc! { "subject": "claim" })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.subject, ContactSubject::Claim);
        assert_eq!(updated.message, stored.message);
        assert!(repo.update(ObjectId::new(), doc! {}).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_reports_whether_removed() {
        let repo = InMemoryRepository::<Contact>::new();
        let stored = repo.insert(contact("Ann", "original message")).await.unwrap();
        assert!(repo.delete(stored.id.unwrap()).await.unwrap());
        assert!(!repo.delete(stored.id.unwrap()).await.unwrap());
        assert_eq!(repo.count(&Filter::new()).await.unwrap(), 0);
    }
}
