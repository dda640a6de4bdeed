use std::env;
use tracing::debug;

use crate::config::ConfigError;

/// Toggles for rejecting duplicate quotes (same email and insurance type).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotePolicyConfig {
    pub reject_duplicate_on_create: bool,
    pub reject_duplicate_on_update: bool,
}

fn parse_bool(name: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::ParseError(format!("{name} must be a boolean, got {raw:?}"))),
    }
}

fn bool_var(name: &str, default: bool) -> Result<bool, ConfigError> {
    match env::var(name) {
        Ok(raw) => parse_bool(name, &raw),
        Err(_) => Ok(default),
    }
}

impl QuotePolicyConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = QuotePolicyConfig::default();
        let config = QuotePolicyConfig {
            reject_duplicate_on_create: bool_var(
                "QUOTE_REJECT_DUPLICATE_ON_CREATE",
                defaults.reject_duplicate_on_create,
            )?,
            reject_duplicate_on_update: bool_var(
                "QUOTE_REJECT_DUPLICATE_ON_UPDATE",
                defaults.reject_duplicate_on_update,
            )?,
        };
        debug!(?config, "Quote duplicate policy loaded");
        Ok(config)
    }
}

impl Default for QuotePolicyConfig {
    fn default() -> Self {
        QuotePolicyConfig {
            reject_duplicate_on_create: false,
            reject_duplicate_on_update: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("X", "TRUE").unwrap());
        assert!(parse_bool("X", " 1 ").unwrap());
        assert!(!parse_bool("X", "off").unwrap());
        assert!(matches!(parse_bool("X", "maybe"), Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_defaults() {
        let config = QuotePolicyConfig::default();
        assert!(!config.reject_duplicate_on_create);
        assert!(config.reject_duplicate_on_update);
    }
}
