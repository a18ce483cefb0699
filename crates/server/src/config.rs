use std::env;

/// Where the HTTP server listens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_address: String,
}

impl ServerConfig {
    pub const BIND_ADDRESS_VAR: &'static str = "BIND_ADDRESS";
    pub const DEFAULT_BIND_ADDRESS: &'static str = "0.0.0.0:3000";

    pub fn from_env() -> Self {
        Self {
            bind_address: env::var(Self::BIND_ADDRESS_VAR)
                .unwrap_or_else(|_| Self::DEFAULT_BIND_ADDRESS.to_owned()),
        }
    }
}
