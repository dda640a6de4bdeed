pub mod memory;
pub mod mongo_repo;
pub mod repository_error;

use async_trait::async_trait;
use bson::{oid::ObjectId, Document};

use crate::model::Record;
use crate::query::{Filter, ListQuery};
use repository_error::RepositoryResult;

pub use memory::InMemoryRepository;
pub use mongo_repo::MongoRepository;

/// Persistence port for one collection of records.
///
/// Filters are store-agnostic; each adapter compiles them to its own query
/// language. `update` applies a `$set`-style document and returns the record
/// as stored afterwards, or `None` when the id no longer exists.
#[async_trait]
pub trait DocumentRepository<T: Record>: Send + Sync {
    async fn insert(&self, record: T) -> RepositoryResult<T>;
    async fn find_by_id(&self, id: ObjectId) -> RepositoryResult<Option<T>>;
    async fn find_one(&self, filter: &Filter) -> RepositoryResult<Option<T>>;
    async fn update(&self, id: ObjectId, set: Document) -> RepositoryResult<Option<T>>;
    async fn delete(&self, id: ObjectId) -> RepositoryResult<bool>;
    /// Matching records, newest first, within the query's window.
    async fn list(&self, query: &ListQuery) -> RepositoryResult<Vec<T>>;
    async fn count(&self, filter: &Filter) -> RepositoryResult<u64>;
}
