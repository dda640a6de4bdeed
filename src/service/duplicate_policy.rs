use tracing::warn;

use crate::config::quote_policy_conf::QuotePolicyConfig;
use crate::model::Quote;
use crate::util::error::ServiceError;

pub const DUPLICATE_QUOTE_MESSAGE: &str =
    "A quote request for this insurance type already exists with this email";

/// Whether an existing quote with the same email and insurance type blocks a write.
///
/// Creation only records the collision by default while updates reject it;
/// both sides are configurable independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuplicateQuotePolicy {
    pub reject_on_create: bool,
    pub reject_on_update: bool,
}

impl DuplicateQuotePolicy {
    pub fn check_create(&self, existing: Option<&Quote>) -> Result<(), ServiceError> {
        Self::check(self.reject_on_create, existing, "create")
    }

    pub fn check_update(&self, existing: Option<&Quote>) -> Result<(), ServiceError> {
        Self::check(self.reject_on_update, existing, "update")
    }

    fn check(reject: bool, existing: Option<&Quote>, operation: &str) -> Result<(), ServiceError> {
        let Some(existing) = existing else {
            return Ok(());
        };
        if reject {
            return Err(ServiceError::Conflict(DUPLICATE_QUOTE_MESSAGE.to_string()));
        }
        warn!(
            existing_id = ?existing.id,
            operation,
            "Duplicate quote for email and insurance type accepted by policy"
        );
        Ok(())
    }
}

impl Default for DuplicateQuotePolicy {
    fn default() -> Self {
        DuplicateQuotePolicy {
            reject_on_create: false,
            reject_on_update: true,
        }
    }
}

impl From<&QuotePolicyConfig> for DuplicateQuotePolicy {
    fn from(config: &QuotePolicyConfig) -> Self {
        DuplicateQuotePolicy {
            reject_on_create: config.reject_duplicate_on_create,
            reject_on_update: config.reject_duplicate_on_update,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::InsuranceType;

    fn quote() -> Quote {
        Quote {
            id: None,
            fullName: "Ann".into(),
            email: "ann@example.com".into(),
            phoneNumber: "12345".into(),
            insuranceType: InsuranceType::Home,
            additionalInfo: None,
            createdAt: None,
            updatedAt: None,
        }
    }

    #[test]
    fn test_default_policy() {
        let policy = DuplicateQuotePolicy::default();
        let existing = quote();
        assert!(policy.check_create(Some(&existing)).is_ok());
        assert_eq!(
            policy.check_update(Some(&existing)),
            Err(ServiceError::Conflict(DUPLICATE_QUOTE_MESSAGE.to_string()))
        );
        assert!(policy.check_update(None).is_ok());
    }

    #[test]
    fn test_toggles_are_independent() {
        let policy = DuplicateQuotePolicy {
            reject_on_create: true,
            reject_on_update: false,
        };
        let existing = quote();
        assert!(policy.check_create(Some(&existing)).is_err());
        assert!(policy.check_update(Some(&existing)).is_ok());
    }
}
