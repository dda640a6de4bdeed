pub mod contact;
pub mod quote;

use bson::oid::ObjectId;
use serde::{de::DeserializeOwned, Serialize};

pub use contact::{Contact, ContactSubject};
pub use quote::{InsuranceType, Quote};

/// A record persisted in its own collection with a store-generated id and
/// creation/update timestamps.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + Unpin + 'static {
    fn id(&self) -> Option<ObjectId>;

    /// Assigns the identifier and both timestamps right before the first insert.
    fn prepare_insert(&mut self, id: ObjectId, now: String);
}

/// Current UTC time, fixed width so stored values sort chronologically as strings.
pub fn timestamp_now() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}

/// Error returned when a string is not one of an enumeration's allowed values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown value: {0}")]
pub struct UnknownVariant(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_is_fixed_width_utc() {
        let ts = timestamp_now();
        assert!(ts.ends_with('Z'));
        // 2024-01-01T00:00:00.000000Z
        assert_eq!(ts.len(), 27);
    }
}
