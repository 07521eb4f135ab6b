use crate::app::render::OutputFormat;
use crate::config::{AppConfig, TomlConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECONDS};
use crate::domain::model::{Column, SearchType};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "catalog-search")]
#[command(about = "Search the product catalog and warehouse manifest")]
pub struct CliConfig {
    /// Search terms or a part number prefix
    #[arg(long, short)]
    pub query: String,

    #[arg(long, value_enum, default_value_t = SearchType::Costco)]
    pub search_type: SearchType,

    /// Base URL of the search API [default: http://localhost:5000/]
    #[arg(long)]
    pub api_url: Option<String>,

    /// Manifest column to sort by; repeat a column to flip its direction
    #[arg(long = "sort")]
    pub sorts: Vec<Column>,

    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// TOML file with [api] and [output] sections
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl CliConfig {
    /// Merges the optional TOML file under the command-line flags.
    pub fn resolve(&self) -> Result<AppConfig> {
        let file = match &self.config {
            Some(path) => {
                tracing::debug!("Loading config file {}", path.display());
                let file = TomlConfig::from_file(path)?;
                file.validate()?;
                file
            }
            None => TomlConfig::default(),
        };

        Ok(self.merge(&file))
    }

    pub fn merge(&self, file: &TomlConfig) -> AppConfig {
        AppConfig {
            api_base_url: self
                .api_url
                .clone()
                .or_else(|| file.base_url().map(str::to_string))
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            timeout_seconds: self
                .timeout_seconds
                .or(file.timeout_seconds())
                .unwrap_or(DEFAULT_TIMEOUT_SECONDS),
            search_type: self.search_type,
            query: self.query.clone(),
            sorts: self.sorts.clone(),
            format: self.format.or(file.format()).unwrap_or_default(),
        }
    }
}
