use std::env;
use std::net::{IpAddr, SocketAddr};
use tracing::{debug, error, warn};

use crate::config::ConfigError;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    /// Reads `APP_HOST` and `APP_PORT`; `PORT` is accepted when `APP_PORT` is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("APP_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = match env::var("APP_PORT").or_else(|_| env::var("PORT")) {
            Ok(raw) => raw.trim().parse::<u16>().map_err(|_| {
                error!("Invalid port value: {}", raw);
                ConfigError::InvalidValue(format!("Invalid port value: {raw}"))
            })?,
            Err(_) => {
                warn!("APP_PORT not set, using default: {}", DEFAULT_PORT);
                DEFAULT_PORT
            }
        };
        debug!("Listen address: {}:{}", host, port);

        let config = AppConfig { host, port };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.socket_addr().map(|_| ())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| ConfigError::ParseError(format!("Invalid host address: {}", self.host)))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}
