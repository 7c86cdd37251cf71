//! HTTP implementation of [`CmrClient`] against the CMR search API.

use std::time::Duration;

use async_trait::async_trait;
use granule_common::GranuleMetadata;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::error::{CmrError, CmrResult};
use crate::response::CmrResponse;
use crate::CmrClient;

/// Production CMR granule search endpoint.
pub const DEFAULT_CMR_URL: &str = "https://cmr.earthdata.nasa.gov/search/granules.json";

/// Longest error body kept in [`CmrError::Status`].
const MAX_ERROR_BODY: usize = 512;

/// CMR connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CmrConfig {
    /// Granule search endpoint (JSON format).
    #[serde(default = "default_url")]
    pub url: String,

    /// Data provider the granules are registered under.
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Maximum records returned per request.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_url() -> String {
    DEFAULT_CMR_URL.to_string()
}

fn default_provider() -> String {
    "ASF".to_string()
}

fn default_page_size() -> u32 {
    2000
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for CmrConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            provider: default_provider(),
            page_size: default_page_size(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// CMR client issuing one form-encoded POST per batch of names.
pub struct HttpCmrClient {
    client: Client,
    config: CmrConfig,
}

impl HttpCmrClient {
    /// Create a client with the given configuration.
    pub fn new(config: CmrConfig) -> CmrResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self { client, config })
    }

    fn form_params(&self, names: &[String]) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(names.len() + 2);
        params.push(("provider", self.config.provider.clone()));
        params.push(("page_size", self.config.page_size.to_string()));
        params.extend(
            names
                .iter()
                .map(|name| ("producer_granule_id[]", name.clone())),
        );
        params
    }
}

#[async_trait]
impl CmrClient for HttpCmrClient {
    #[instrument(skip(self, names), fields(url = %self.config.url, requested = names.len()))]
    async fn fetch_metadata(&self, names: &[String]) -> CmrResult<Vec<GranuleMetadata>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        debug!("Querying CMR for granule metadata");

        let response = self
            .client
            .post(&self.config.url)
            .form(&self.form_params(names))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            body.truncate(floor_char_boundary(&body, MAX_ERROR_BODY));
            warn!(status = status.as_u16(), "CMR query failed");
            return Err(CmrError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let parsed: CmrResponse = serde_json::from_str(&body)?;
        let granules = parsed.into_granules()?;

        info!(found = granules.len(), "CMR query complete");
        Ok(granules)
    }
}

fn floor_char_boundary(s: &str, max: usize) -> usize {
    if s.len() <= max {
        return s.len();
    }
    (0..=max).rev().find(|&i| s.is_char_boundary(i)).unwrap_or(0)
}
