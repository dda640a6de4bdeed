pub mod app_conf;
pub mod cors_conf;
pub mod mongo_conf;
pub mod quote_policy_conf;
pub mod store_conf;

pub use app_conf::AppConfig;
pub use cors_conf::CorsConfig;
pub use mongo_conf::MongoConfig;
pub use quote_policy_conf::QuotePolicyConfig;
pub use store_conf::{StoreBackend, StoreConfig};

/// Common configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}
