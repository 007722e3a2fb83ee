//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the catalog
//! service and its adapters. Request handling never reads environment variables.
//!
//! Binaries read raw values from the environment (optionally seeded from a `.env` file) and
//! feed them through the `*_from_env_value` helpers below, which treat empty or
//! whitespace-only values as unset.

use crate::constants::{DEFAULT_DATABASE_URL, DEFAULT_DB_MAX_CONNECTIONS};
use crate::validation::validate_enrichment_base_url;
use crate::{CatalogError, CatalogResult};
use std::time::Duration;

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    database_url: String,
    db_max_connections: u32,
    enrichment_base_url: String,
    enrichment_timeout: Option<Duration>,
    max_page_limit: Option<u64>,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidConfig` if the database URL is empty, the pool size is
    /// zero, or the enrichment base URL is not an absolute http(s) URL.
    pub fn new(
        database_url: String,
        db_max_connections: u32,
        enrichment_base_url: &str,
    ) -> CatalogResult<Self> {
        if database_url.trim().is_empty() {
            return Err(CatalogError::InvalidConfig(
                "database URL cannot be empty".into(),
            ));
        }
        if db_max_connections == 0 {
            return Err(CatalogError::InvalidConfig(
                "database pool size must be positive".into(),
            ));
        }

        Ok(Self {
            database_url,
            db_max_connections,
            enrichment_base_url: validate_enrichment_base_url(enrichment_base_url)?,
            enrichment_timeout: None,
            max_page_limit: None,
        })
    }

    /// Sets the transport timeout for enrichment requests.
    pub fn with_enrichment_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.enrichment_timeout = timeout;
        self
    }

    /// Sets an upper bound applied to the `limit` of list and verse pages.
    pub fn with_max_page_limit(mut self, max_page_limit: Option<u64>) -> Self {
        self.max_page_limit = max_page_limit;
        self
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
    }

    pub fn enrichment_base_url(&self) -> &str {
        &self.enrichment_base_url
    }

    pub fn enrichment_timeout(&self) -> Option<Duration> {
        self.enrichment_timeout
    }

    pub fn max_page_limit(&self) -> Option<u64> {
        self.max_page_limit
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Resolve the database URL, falling back to [`DEFAULT_DATABASE_URL`].
pub fn database_url_from_env_value(value: Option<String>) -> String {
    non_blank(value).unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string())
}

/// Resolve the required enrichment base URL.
///
/// # Errors
///
/// Returns `CatalogError::InvalidConfig` if the value is missing.
pub fn enrichment_base_url_from_env_value(value: Option<String>) -> CatalogResult<String> {
    non_blank(value).ok_or_else(|| {
        CatalogError::InvalidConfig("ENRICHMENT_BASE_URL must be set".into())
    })
}

/// Parse an optional strictly positive integer setting.
///
/// `name` is only used in the error message.
///
/// # Errors
///
/// Returns `CatalogError::InvalidConfig` if the value is present but is not a positive integer.
pub fn positive_from_env_value(name: &str, value: Option<String>) -> CatalogResult<Option<u64>> {
    let Some(raw) = non_blank(value) else {
        return Ok(None);
    };

    match raw.parse::<u64>() {
        Ok(n) if n > 0 => Ok(Some(n)),
        _ => Err(CatalogError::InvalidConfig(format!(
            "{name} must be a positive integer, got '{raw}'"
        ))),
    }
}

/// Resolve the database pool size, falling back to [`DEFAULT_DB_MAX_CONNECTIONS`].
pub fn db_max_connections_from_env_value(value: Option<String>) -> CatalogResult<u32> {
    match positive_from_env_value("SONGLIB_DB_MAX_CONNECTIONS", value)? {
        Some(n) => u32::try_from(n).map_err(|_| {
            CatalogError::InvalidConfig("SONGLIB_DB_MAX_CONNECTIONS is too large".into())
        }),
        None => Ok(DEFAULT_DB_MAX_CONNECTIONS),
    }
}

/// Resolve the optional enrichment timeout, given in whole seconds.
pub fn enrichment_timeout_from_env_value(value: Option<String>) -> CatalogResult<Option<Duration>> {
    Ok(positive_from_env_value("ENRICHMENT_TIMEOUT_SECS", value)?.map(Duration::from_secs))
}
