//! Configuration read from the environment

use crate::error::ConfigError;
use crate::provider::{ContentProvider, JsonFileProvider, RestProvider};
use crate::query::DEFAULT_STALE_TIME;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_TABLE: &str = "conteudos";
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// Where the content rows come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderConfig {
    /// PostgREST endpoint (Supabase project URL)
    Rest {
        url: String,
        api_key: String,
        table: String,
    },
    /// Local JSON file with an array of rows
    Fixture(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstanteConfig {
    pub provider: ProviderConfig,
    pub stale_time: Duration,
    pub bind: SocketAddr,
    /// `None` means the default localhost development origins
    pub cors_origins: Option<Vec<String>>,
}

impl EstanteConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let provider = match lookup("ESTANTE_FIXTURE") {
            Some(path) if !path.is_empty() => ProviderConfig::Fixture(PathBuf::from(path)),
            _ => ProviderConfig::Rest {
                url: lookup("ESTANTE_PROVIDER_URL")
                    .ok_or(ConfigError::Missing("ESTANTE_PROVIDER_URL"))?,
                api_key: lookup("ESTANTE_API_KEY").ok_or(ConfigError::Missing("ESTANTE_API_KEY"))?,
                table: lookup("ESTANTE_TABLE").unwrap_or_else(|| DEFAULT_TABLE.to_string()),
            },
        };

        let stale_time = match lookup("ESTANTE_STALE_SECS") {
            Some(secs) => Duration::from_secs(secs.trim().parse().map_err(|_| {
                ConfigError::InvalidValue {
                    key: "ESTANTE_STALE_SECS",
                    reason: format!("'{}' is not a whole number of seconds", secs),
                }
            })?),
            None => DEFAULT_STALE_TIME,
        };

        let bind = lookup("ESTANTE_BIND")
            .unwrap_or_else(|| DEFAULT_BIND.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue {
                key: "ESTANTE_BIND",
                reason: e.to_string(),
            })?;

        let cors_origins = lookup("ESTANTE_CORS_ORIGINS").map(|origins| {
            origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        Ok(Self {
            provider,
            stale_time,
            bind,
            cors_origins,
        })
    }

    /// Instantiate the configured data provider
    pub fn build_provider(&self) -> Result<Arc<dyn ContentProvider>, ConfigError> {
        match &self.provider {
            ProviderConfig::Fixture(path) => Ok(Arc::new(JsonFileProvider::new(path))),
            ProviderConfig::Rest {
                url,
                api_key,
                table,
            } => {
                let provider = RestProvider::new(url, api_key, table).map_err(|e| {
                    ConfigError::InvalidValue {
                        key: "ESTANTE_PROVIDER_URL",
                        reason: e.to_string(),
                    }
                })?;
                Ok(Arc::new(provider))
            }
        }
    }
}
