use super::types::LocationResult;
use super::Geocoder;
use crate::config::Config;
use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeocodeError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("JSON parsing failed: {0}")]
    JsonParsing(#[from] serde_json::Error),
    #[error("API error: {0}")]
    ApiError(String),
}

pub struct NominatimClient {
    client: Client,
    base_url: String,
}

impl NominatimClient {
    pub fn new(config: &Config) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.upstream_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.upstream_base_url.clone(),
        })
    }

    /// Builds the request target by hand so the query is percent-escaped
    /// exactly once and `format=json` always follows it.
    fn search_url(&self, query: &str) -> String {
        let separator = if self.base_url.contains('?') { '&' } else { '?' };
        format!(
            "{}{}q={}&format=json",
            self.base_url,
            separator,
            urlencoding::encode(query)
        )
    }
}

#[async_trait]
impl Geocoder for NominatimClient {
    async fn search(&self, query: &str) -> Result<Vec<LocationResult>, GeocodeError> {
        let url = self.search_url(query);
        tracing::debug!(query, "Querying Nominatim");

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GeocodeError::ApiError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let body = response.bytes().await?;
        let results: Vec<LocationResult> = serde_json::from_slice(&body)?;
        Ok(results)
    }
}
