use axum::http::HeaderValue;
use std::env;
use tracing::{debug, error};

use crate::config::ConfigError;

pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

/// Browser origins allowed to call the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.to_string());
        let config = Self::from_origins_str(&raw);
        config.validate()?;
        debug!("CORS allowed origins: {:?}", config.allowed_origins);
        Ok(config)
    }

    /// Splits a comma separated list, dropping blank entries.
    pub fn from_origins_str(raw: &str) -> Self {
        CorsConfig {
            allowed_origins: raw
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.header_values().map(|_| ())
    }

    pub fn header_values(&self) -> Result<Vec<HeaderValue>, ConfigError> {
        self.allowed_origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin).map_err(|_| {
                    error!("Invalid CORS origin: {}", origin);
                    ConfigError::InvalidValue(format!("Invalid CORS origin: {origin}"))
                })
            })
            .collect()
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self::from_origins_str(DEFAULT_ALLOWED_ORIGINS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_origins() {
        let config = CorsConfig::default();
        assert_eq!(
            config.allowed_origins,
            vec!["http://localhost:3000", "http://localhost:5173"]
        );
        assert_eq!(config.header_values().unwrap().len(), 2);
    }

    #[test]
    fn test_blank_entries_dropped() {
        let config = CorsConfig::from_origins_str(" https://a.example , ,https://b.example,");
        assert_eq!(config.allowed_origins, vec!["https://a.example", "https://b.example"]);
    }

    #[test]
    fn test_invalid_origin() {
        let config = CorsConfig::from_origins_str("https://ok.example,bad\norigin");
        assert!(config.validate().is_err());
    }
}
