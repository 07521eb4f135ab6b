use crate::domain::model::SearchType;
use crate::domain::ports::{CatalogSource, ConfigProvider};
use crate::utils::error::{CatalogError, Result};
use reqwest::Client;
use url::Url;

pub struct HttpCatalogSource {
    base_url: Url,
    client: Client,
}

impl HttpCatalogSource {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            base_url: normalize_base(config.api_base_url())?,
            client,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/{search_type}/search?query={query}`
    pub fn search_url(&self, search_type: SearchType, query: &str) -> Result<Url> {
        search_url(&self.base_url, search_type, query)
    }
}

#[async_trait::async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch(&self, search_type: SearchType, query: &str) -> Result<Vec<serde_json::Value>> {
        let url = self.search_url(search_type, query)?;
        tracing::debug!("Making API request to: {}", url);

        let response = self.client.get(url.clone()).send().await?;
        tracing::debug!("API response status: {}", response.status());

        if !response.status().is_success() {
            return Err(CatalogError::HttpStatus {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        match response.json::<serde_json::Value>().await? {
            serde_json::Value::Array(items) => {
                tracing::debug!("Received {} records", items.len());
                Ok(items)
            }
            other => Err(CatalogError::UnexpectedPayload {
                message: format!("expected a JSON array, got {}", summarize(&other)),
            }),
        }
    }
}

/// Parses the API base and guarantees a trailing slash so joins append
/// instead of replacing the last path segment.
pub fn normalize_base(base: &str) -> Result<Url> {
    let mut url = Url::parse(base)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

pub fn search_url(base: &Url, search_type: SearchType, query: &str) -> Result<Url> {
    let mut url = base.join(&format!("{}/search", search_type.path_segment()))?;
    url.query_pairs_mut().append_pair("query", query);
    Ok(url)
}

/// Where the rendering layer fetches an image reference from.
pub fn image_url(base: &Url, image_ref: &str) -> String {
    format!(
        "{}/image/{}",
        base.as_str().trim_end_matches('/'),
        image_ref.trim_start_matches('/')
    )
}

fn summarize(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Object(_) => "an object",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Null => "null",
        serde_json::Value::Array(_) => "an array",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use std::time::Duration;

    struct MockConfig {
        api_base_url: String,
    }

    impl ConfigProvider for MockConfig {
        fn api_base_url(&self) -> &str {
            &self.api_base_url
        }

        fn request_timeout(&self) -> Duration {
            Duration::from_secs(5)
        }
    }

    fn source_for(base: String) -> HttpCatalogSource {
        HttpCatalogSource::new(&MockConfig { api_base_url: base }).unwrap()
    }

    #[test]
    fn test_search_url_shapes() {
        let with_slash = normalize_base("http://localhost:5000/").unwrap();
        let without_slash = normalize_base("http://localhost:5000/api").unwrap();

        assert_eq!(
            search_url(&with_slash, SearchType::CostcoManifest, "desk lamp")
                .unwrap()
                .as_str(),
            "http://localhost:5000/costco_manifest/search?query=desk+lamp"
        );
        assert_eq!(
            search_url(&without_slash, SearchType::Amazon, "B07&X")
                .unwrap()
                .as_str(),
            "http://localhost:5000/api/amazon/search?query=B07%26X"
        );
    }

    #[test]
    fn test_image_url() {
        let base = normalize_base("http://localhost:5000").unwrap();
        assert_eq!(
            image_url(&base, "images/123/front.jpg"),
            "http://localhost:5000/image/images/123/front.jpg"
        );
        assert_eq!(
            image_url(&base, "/abs/path.jpg"),
            "http://localhost:5000/image/abs/path.jpg"
        );
    }

    #[tokio::test]
    async fn test_fetch_successful_response() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/costco/search")
                .query_param("query", "1234");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([
                    {"part_number": "1234", "description": "Chair", "image": "c1.jpg"},
                    {"part_number": "1234", "description": "Chair", "image": "c2.jpg"}
                ]));
        });

        let source = source_for(server.url("/"));
        let values = source.fetch(SearchType::Costco, "1234").await.unwrap();

        api_mock.assert();
        assert_eq!(values.len(), 2);
        assert_eq!(values[1]["image"], "c2.jpg");
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/amazon/search");
            then.status(500);
        });

        let source = source_for(server.url("/"));
        let err = source.fetch(SearchType::Amazon, "x").await.unwrap_err();

        api_mock.assert();
        assert!(matches!(err, CatalogError::HttpStatus { status: 500, .. }));
        assert!(err.is_fetch_error());
    }

    #[tokio::test]
    async fn test_fetch_rejects_non_array_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/costco/search");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"error": "oops"}));
        });

        let source = source_for(server.url("/"));
        let err = source.fetch(SearchType::Costco, "x").await.unwrap_err();
        assert!(matches!(err, CatalogError::UnexpectedPayload { .. }));
    }
}
