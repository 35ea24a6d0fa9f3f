//! Configuration module
//!
//! Loads configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;

use crate::domain::PayoutSplit;
use crate::source::HttpCatalogConfig;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the LMS REST backend
    pub upstream_url: String,

    /// Bearer token for the backend's admin endpoints
    pub upstream_token: Option<String>,

    /// Timeout for each backend request
    pub upstream_timeout: Duration,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Environment (development, production)
    pub environment: String,

    /// Platform-wide payout split applied to every report
    pub payout_split: PayoutSplit,

    /// Emit logs as JSON lines
    pub log_json: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let upstream_url = lookup("UPSTREAM_API_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::MissingEnv("UPSTREAM_API_URL"))?;

        let upstream_token = lookup("UPSTREAM_API_TOKEN").filter(|v| !v.is_empty());

        let upstream_timeout_secs: u64 =
            parse_or(&lookup, "UPSTREAM_TIMEOUT_SECS", 10)?;

        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());

        let port = parse_or(&lookup, "PORT", 3000)?;

        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string());

        let payout_split = match lookup("PAYOUT_PENDING_RATIO") {
            Some(raw) => {
                let ratio = Decimal::from_str(raw.trim())
                    .map_err(|_| ConfigError::InvalidValue("PAYOUT_PENDING_RATIO"))?;
                PayoutSplit::new(ratio)
                    .map_err(|_| ConfigError::InvalidValue("PAYOUT_PENDING_RATIO"))?
            }
            None => PayoutSplit::placeholder(),
        };

        let log_json = lookup("LOG_FORMAT")
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        Ok(Self {
            upstream_url,
            upstream_token,
            upstream_timeout: Duration::from_secs(upstream_timeout_secs),
            host,
            port,
            environment,
            payout_split,
            log_json,
        })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Settings for the HTTP catalog source
    pub fn catalog_config(&self) -> HttpCatalogConfig {
        let config = HttpCatalogConfig::new(self.upstream_url.clone())
            .with_timeout(self.upstream_timeout);
        match &self.upstream_token {
            Some(token) => config.with_token(token.clone()),
            None => config,
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue(key)),
        None => Ok(default),
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
