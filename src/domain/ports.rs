use crate::domain::model::SearchType;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Remote search endpoint. Implementations return the raw JSON array;
/// shape checks happen in `core::schema`.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch(&self, search_type: SearchType, query: &str) -> Result<Vec<serde_json::Value>>;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn request_timeout(&self) -> Duration;
}
