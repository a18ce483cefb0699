use std::env;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    Missing(&'static str),

    #[error("environment variable {name} has an invalid value: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Connection settings, read from the environment (and `.env`, if present)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: Option<u32>,
}

impl DatabaseConfig {
    pub const URL_VAR: &'static str = "DATABASE_URL";
    pub const MAX_CONNECTIONS_VAR: &'static str = "DATABASE_MAX_CONNECTIONS";

    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: None,
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let url = env::var(Self::URL_VAR).map_err(|_| ConfigError::Missing(Self::URL_VAR))?;

        let max_connections = match env::var(Self::MAX_CONNECTIONS_VAR) {
            Ok(value) => Some(value.parse().map_err(|_| ConfigError::Invalid {
                name: Self::MAX_CONNECTIONS_VAR,
                value,
            })?),
            Err(_) => None,
        };

        Ok(Self {
            url,
            max_connections,
        })
    }
}
