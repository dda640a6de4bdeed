use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Bson, Document};
use futures::stream::TryStreamExt;
use mongodb::options::{
    ClientOptions, Credential, FindOneAndUpdateOptions, FindOptions, ResolverConfig, ReturnDocument,
};
use mongodb::{Client, Collection, Database};
use tracing::{error, info};

use crate::config::mongo_conf::MongoConfig;
use crate::model::{timestamp_now, Record};
use crate::query::{Condition, Filter, ListQuery};
use crate::repository::repository_error::RepositoryResult;
use crate::repository::DocumentRepository;

/// Connects to MongoDB and returns the configured database handle.
pub async fn connect(config: &MongoConfig) -> Result<Database, mongodb::error::Error> {
    // Parse client options from URI
    let mut client_options =
        ClientOptions::parse_with_resolver_config(&config.uri, ResolverConfig::cloudflare()).await?;
    client_options.app_name = Some("CompassBackend".to_string());
    client_options.max_pool_size = Some(config.pool_size);
    client_options.connect_timeout = Some(std::time::Duration::from_secs(config.connection_timeout_secs));

    // Set credentials if username and password are provided
    if let (Some(username), Some(password)) = (&config.username, &config.password) {
        client_options.credential = Some(
            Credential::builder()
                .username(username.clone())
                .password(password.clone())
                .build(),
        );
    }

    let client = Client::with_options(client_options)?;
    info!(database = %config.database, "MongoDB client created");
    Ok(client.database(&config.database))
}

fn compile_condition(condition: &Condition) -> Document {
    let mut compiled = Document::new();
    match condition {
        Condition::Equals { field, value } => {
            compiled.insert(*field, value.clone());
        }
        Condition::NotEquals { field, value } => {
            compiled.insert(*field, doc! { "$ne": value.clone() });
        }
        Condition::ContainsCi { field, needle } => {
            compiled.insert(*field, doc! { "$regex": regex::escape(needle), "$options": "i" });
        }
        Condition::AnyOf(group) => {
            let alternatives: Vec<Bson> = group
                .iter()
                .map(|c| Bson::Document(compile_condition(c)))
                .collect();
            compiled.insert("$or", alternatives);
        }
    }
    compiled
}

/// Compiles a store-agnostic filter into a MongoDB query document.
pub fn compile_filter(filter: &Filter) -> Document {
    let mut clauses: Vec<Document> = filter.conditions().iter().map(compile_condition).collect();
    match clauses.len() {
        0 => Document::new(),
        1 => clauses.remove(0),
        _ => doc! { "$and": clauses },
    }
}

fn newest_first() -> Document {
    doc! { "createdAt": -1, "_id": -1 }
}

pub struct MongoRepository<T: Record> {
    collection: Collection<T>,
}

impl<T: Record> MongoRepository<T> {
    pub fn new(database: &Database, collection_name: &str) -> Self {
        MongoRepository {
            collection: database.collection::<T>(collection_name),
        }
    }
}

#[async_trait]
impl<T: Record> DocumentRepository<T> for MongoRepository<T> {
    #[tracing::instrument(skip(self, record), fields(collection = %self.collection.name()))]
    async fn insert(&self, mut record: T) -> RepositoryResult<T> {
        record.prepare_insert(ObjectId::new(), timestamp_now());
        match self.collection.insert_one(&record, None).await {
            Ok(_) => {
                info!("Record created successfully");
                Ok(record)
            }
            Err(e) => {
                error!("Failed to create record: {}", e);
                Err(e.into())
            }
        }
    }

    #[tracing::instrument(skip(self), fields(collection = %self.collection.name(), id = %id))]
    async fn find_by_id(&self, id: ObjectId) -> RepositoryResult<Option<T>> {
        let found = self.collection.find_one(doc! { "_id": id }, None).await?;
        Ok(found)
    }

    #[tracing::instrument(skip(self), fields(collection = %self.collection.name()))]
    async fn find_one(&self, filter: &Filter) -> RepositoryResult<Option<T>> {
        let found = self.collection.find_one(compile_filter(filter), None).await?;
        Ok(found)
    }

    #[tracing::instrument(skip(self, set), fields(collection = %self.collection.name(), id = %id))]
    async fn update(&self, id: ObjectId, set: Document) -> RepositoryResult<Option<T>> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();
        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": set }, options)
            .await
            .map_err(|e| {
                error!("Failed to update record: {}", e);
                e
            })?;
        Ok(updated)
    }

    #[tracing::instrument(skip(self), fields(collection = %self.collection.name(), id = %id))]
    async fn delete(&self, id: ObjectId) -> RepositoryResult<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }, None).await?;
        Ok(result.deleted_count > 0)
    }

    #[tracing::instrument(skip(self), fields(collection = %self.collection.name(), offset = query.skip(), limit = query.limit()))]
    async fn list(&self, query: &ListQuery) -> RepositoryResult<Vec<T>> {
        let options = FindOptions::builder()
            .sort(newest_first())
            .skip(query.skip())
            .limit(i64::try_from(query.limit()).unwrap_or(i64::MAX))
            .build();
        let cursor = self.collection.find(compile_filter(&query.filter), options).await?;
        let records: Vec<T> = cursor.try_collect().await?;
        info!("Fetched {} records", records.len());
        Ok(records)
    }

    #[tracing::instrument(skip(self), fields(collection = %self.collection.name()))]
    async fn count(&self, filter: &Filter) -> RepositoryResult<u64> {
        let count = self.collection.count_documents(compile_filter(filter), None).await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_compiles_to_empty_document() {
        assert_eq!(compile_filter(&Filter::new()), Document::new());
    }

    #[test]
    fn test_single_condition_is_not_wrapped() {
        let filter = Filter::new().and(Condition::equals("subject", "claim"));
        assert_eq!(compile_filter(&filter), doc! { "subject": "claim" });
    }

    #[test]
    fn test_substring_is_escaped_and_case_insensitive() {
        let filter = Filter::new().and(Condition::contains_ci("email", "a.b+c"));
        assert_eq!(
            compile_filter(&filter),
            doc! { "email": { "$regex": "a\\.b\\+c", "$options": "i" } }
        );
    }

    #[test]
    fn test_search_group_and_exclusion() {
        let id = ObjectId::new();
        let filter = Filter::new()
            .and(Condition::equals("insuranceType", "motor"))
            .and(Condition::search(&["fullName", "email"], "ann"))
            .and(Condition::not_equals("_id", id));
        assert_eq!(
            compile_filter(&filter),
            doc! {
                "$and": [
                    { "insuranceType": "motor" },
                    { "$or": [
                        { "fullName": { "$regex": "ann", "$options": "i" } },
                        { "email": { "$regex": "ann", "$options": "i" } },
                    ] },
                    { "_id": { "$ne": id } },
                ]
            }
        );
    }
}
