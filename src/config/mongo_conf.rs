use serde::{Deserialize, Serialize};
use std::env;
use tracing::{debug, error, info, warn};

use crate::config::ConfigError;

/// MongoDB configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoConfig {
    /// MongoDB connection URI
    pub uri: String,
    /// Database name
    pub database: String,
    /// Username for authentication (optional)
    pub username: Option<String>,
    /// Password for authentication (optional)
    pub password: Option<String>,
    pub quote_collection: String,
    pub contact_collection: String,
    /// Connection pool size
    pub pool_size: u32,
    /// Connection timeout in seconds
    pub connection_timeout_secs: u64,
}

fn parse_or_default<T: std::str::FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse::<T>().map_err(|_| {
            error!("Invalid {} value", name);
            ConfigError::InvalidValue(format!("Invalid {name} value"))
        }),
        Err(_) => {
            warn!("{} not set, using default", name);
            Ok(default)
        }
    }
}

impl MongoConfig {
    /// Load MongoDB configuration from environment variables
    ///
    /// Expected environment variables:
    /// - MONGODB_URI (or MONGO_URI): MongoDB connection URI (required)
    /// - MONGO_DATABASE: Database name (defaults to "compass")
    /// - MONGO_QUOTE_COLLECTION / MONGO_CONTACT_COLLECTION: collection names
    /// - MONGO_POOL_SIZE: Connection pool size (defaults to 10)
    /// - MONGO_CONNECTION_TIMEOUT: Connection timeout in seconds (defaults to 5)
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading MongoDB configuration from environment variables");
        let defaults = MongoConfig::default();

        let uri = env::var("MONGODB_URI")
            .or_else(|_| env::var("MONGO_URI"))
            .map_err(|_| {
                error!("MONGODB_URI environment variable not found");
                ConfigError::EnvVarNotFound("MONGODB_URI".to_string())
            })?;

        let database = env::var("MONGO_DATABASE").unwrap_or(defaults.database);
        debug!("MongoDB database: {}", database);

        let username = env::var("MONGO_USERNAME").ok();
        let password = env::var("MONGO_PASSWORD").ok();
        if username.is_some() {
            debug!("MongoDB credentials provided");
        }

        let quote_collection = env::var("MONGO_QUOTE_COLLECTION").unwrap_or(defaults.quote_collection);
        let contact_collection =
            env::var("MONGO_CONTACT_COLLECTION").unwrap_or(defaults.contact_collection);
        debug!("MongoDB collections: {}, {}", quote_collection, contact_collection);

        let pool_size = parse_or_default("MONGO_POOL_SIZE", defaults.pool_size)?;
        let connection_timeout_secs =
            parse_or_default("MONGO_CONNECTION_TIMEOUT", defaults.connection_timeout_secs)?;

        let config = MongoConfig {
            uri,
            database,
            username,
            password,
            quote_collection,
            contact_collection,
            pool_size,
            connection_timeout_secs,
        };

        config.validate()?;
        info!("MongoDB configuration loaded successfully");
        Ok(config)
    }

    /// Create MongoConfig for testing
    pub fn from_test_env() -> Self {
        MongoConfig {
            uri: "mongodb://localhost:27017".to_string(),
            database: "compass_test".to_string(),
            username: None,
            password: None,
            quote_collection: "test_quotes".to_string(),
            contact_collection: "test_contacts".to_string(),
            pool_size: 2,
            connection_timeout_secs: 2,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.uri.is_empty() {
            error!("MongoDB URI is empty");
            return Err(ConfigError::ValidationError("MongoDB URI cannot be empty".to_string()));
        }

        if self.database.is_empty() {
            return Err(ConfigError::ValidationError("MongoDB database cannot be empty".to_string()));
        }

        if self.quote_collection.is_empty() || self.contact_collection.is_empty() {
            return Err(ConfigError::ValidationError(
                "MongoDB collection names cannot be empty".to_string(),
            ));
        }

        if self.pool_size == 0 {
            return Err(ConfigError::ValidationError(
                "MongoDB pool size must be greater than 0".to_string(),
            ));
        }

        if self.connection_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "MongoDB connection timeout must be greater than 0".to_string(),
            ));
        }

        if let Some(ref user) = self.username {
            if user.is_empty() {
                return Err(ConfigError::ValidationError(
                    "MongoDB username cannot be empty if set".to_string(),
                ));
            }
        }
        if let Some(ref pass) = self.password {
            if pass.is_empty() {
                return Err(ConfigError::ValidationError(
                    "MongoDB password cannot be empty if set".to_string(),
                ));
            }
        }
        Ok(())
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        MongoConfig {
            uri: "mongodb://localhost:27017".to_string(),
            database: "compass".to_string(),
            username: None,
            password: None,
            quote_collection: "quotes".to_string(),
            contact_collection: "contacts".to_string(),
            pool_size: 10,
            connection_timeout_secs: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MongoConfig::default();
        assert_eq!(config.database, "compass");
        assert_eq!(config.quote_collection, "quotes");
        assert_eq!(config.contact_collection, "contacts");
        assert_eq!(config.pool_size, 10);
        assert_eq!(config.connection_timeout_secs, 5);
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(MongoConfig::from_test_env().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_uri() {
        let mut config = MongoConfig::from_test_env();
        config.uri = "".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_empty_collection() {
        let mut config = MongoConfig::from_test_env();
        config.contact_collection = "".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_pool_size() {
        let mut config = MongoConfig::from_test_env();
        config.pool_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = MongoConfig::from_test_env();
        config.connection_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_empty_username() {
        let mut config = MongoConfig::from_test_env();
        config.username = Some(String::new());
        assert!(config.validate().is_err());
    }
}
