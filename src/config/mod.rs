#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::app::render::OutputFormat;
use crate::domain::model::{Column, SearchType};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_url, Validate};
use std::time::Duration;

pub use toml_config::TomlConfig;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Fully resolved settings for one search run.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub timeout_seconds: u64,
    pub search_type: SearchType,
    pub query: String,
    pub sorts: Vec<Column>,
    pub format: OutputFormat,
}

impl AppConfig {
    pub fn new(api_base_url: impl Into<String>, search_type: SearchType, query: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            search_type,
            query: query.into(),
            sorts: Vec::new(),
            format: OutputFormat::default(),
        }
    }
}

impl ConfigProvider for AppConfig {
    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api_url", &self.api_base_url)?;
        validate_range("timeout_seconds", self.timeout_seconds, 1, 300)?;
        validate_non_empty_string("query", &self.query)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_validation() {
        let config = AppConfig::new(DEFAULT_API_URL, SearchType::Costco, "chair");
        assert!(config.validate().is_ok());
        assert_eq!(config.request_timeout(), Duration::from_secs(30));

        let blank = AppConfig::new(DEFAULT_API_URL, SearchType::Costco, "  ");
        assert!(blank.validate().is_err());

        let mut bad_url = AppConfig::new("not a url", SearchType::Amazon, "x");
        assert!(bad_url.validate().is_err());
        bad_url.api_base_url = "https://catalog.example.com".to_string();
        bad_url.timeout_seconds = 0;
        assert!(bad_url.validate().is_err());
    }
}
