//! Runtime configuration for repositories and connection bootstrap.
//!
//! # Invariants
//! - Every field has a default, so partial JSON documents are accepted.
//! - `default_per_page` is never zero after loading.

use serde::Deserialize;
use thiserror::Error;

/// Page size used when callers do not pass one.
pub const DEFAULT_PER_PAGE: u32 = 30;
/// SQLite busy timeout applied at connection open.
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("default_per_page must be at least 1")]
    ZeroPerPage,
}

/// Settings shared by [`crate::db::open_db_with_config`] and
/// [`crate::SqliteModelRepository::with_config`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CrudConfig {
    pub default_per_page: u32,
    pub busy_timeout_ms: u64,
    /// Falls back to [`crate::default_log_level`] when unset.
    pub log_level: Option<String>,
}

impl Default for CrudConfig {
    fn default() -> Self {
        Self {
            default_per_page: DEFAULT_PER_PAGE,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            log_level: None,
        }
    }
}

impl CrudConfig {
    /// Parses a JSON document, filling missing fields with defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        if config.default_per_page == 0 {
            return Err(ConfigError::ZeroPerPage);
        }
        Ok(config)
    }

    /// Level passed to [`crate::init_logging`].
    pub fn effective_log_level(&self) -> &str {
        self.log_level
            .as_deref()
            .unwrap_or(crate::logging::default_log_level())
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, CrudConfig, DEFAULT_BUSY_TIMEOUT_MS};

    #[test]
    fn partial_document_keeps_defaults() {
        let config = CrudConfig::from_json_str(r#"{ "default_per_page": 5 }"#).unwrap();
        assert_eq!(config.default_per_page, 5);
        assert_eq!(config.busy_timeout_ms, DEFAULT_BUSY_TIMEOUT_MS);
        assert!(config.log_level.is_none());
    }

    #[test]
    fn zero_per_page_is_rejected() {
        let err = CrudConfig::from_json_str(r#"{ "default_per_page": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroPerPage));
    }

    #[test]
    fn malformed_document_reports_parse_error() {
        let err = CrudConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn explicit_log_level_wins() {
        let config = CrudConfig {
            log_level: Some("warn".to_string()),
            ..CrudConfig::default()
        };
        assert_eq!(config.effective_log_level(), "warn");
    }

    #[test]
    fn missing_log_level_falls_back_to_build_default() {
        let config = CrudConfig::default();
        assert_eq!(
            config.effective_log_level(),
            crate::logging::default_log_level()
        );
    }
}
