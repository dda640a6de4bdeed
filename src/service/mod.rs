pub mod contact_service;
pub mod duplicate_policy;
pub mod quote_service;

use bson::oid::ObjectId;

use crate::util::error::ServiceError;

/// Parses a path identifier; a malformed id is a client error, distinct from not found.
pub fn parse_id(id: &str) -> Result<ObjectId, ServiceError> {
    ObjectId::parse_str(id).map_err(|_| ServiceError::InvalidId)
}
