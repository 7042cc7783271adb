use std::{env, net::SocketAddr};

use crate::{errors::AppError, services::pairing_service::PairingMethod};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub default_pairing: PairingMethod,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 3000,
            default_pairing: PairingMethod::IdOrder,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads `API_HOST`, `API_PORT` and `PAIRING_STRATEGY`, keeping the
    /// default for any key that is unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(host) = lookup("API_HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("API_PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| AppError::InvalidConfig(format!("API_PORT `{}`", port)))?;
        }
        if let Some(method) = lookup("PAIRING_STRATEGY") {
            config.default_pairing = PairingMethod::try_from(method.as_str())
                .map_err(|e| AppError::InvalidConfig(e.to_string()))?;
        }
        Ok(config)
    }

    pub fn addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| AppError::InvalidConfig(format!("API_HOST `{}`", self.host)))
    }
}
