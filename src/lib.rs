pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::http::HttpCatalogSource;
pub use app::{render::OutputFormat, runner::SearchRunner};
pub use config::AppConfig;
pub use self::core::{
    grouping::group,
    search::{SearchRequest, SearchSession, SearchState},
    sorter::{ManifestTable, TableSorter},
};
pub use utils::error::{CatalogError, Result};
