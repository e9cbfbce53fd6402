use reqwest::{header, Client};
use serde_json::Value;
use shared::config::{NearBlocksConfig, UpstreamConfig};
use shared::{Error, Result};
use std::time::Duration;
use tracing::{debug, error};

use crate::retry::{retry_with_delay, RetryConfig};

/// Explorer endpoints for a fungible-token contract.
///
/// The contract id is percent-encoded as a single path segment. Dot
/// segments are rejected since URL parsers resolve them even when encoded.
pub mod endpoints {
    use shared::{Error, Result};

    fn segment(contract_id: &str) -> Result<String> {
        if matches!(contract_id, "" | "." | "..") {
            return Err(Error::Validation(format!(
                "Invalid contract ID: {:?}",
                contract_id
            )));
        }
        Ok(urlencoding::encode(contract_id).into_owned())
    }

    pub fn token(contract_id: &str) -> Result<String> {
        Ok(format!("/fts/{}", segment(contract_id)?))
    }

    pub fn holders(contract_id: &str) -> Result<String> {
        Ok(format!("/fts/{}/holders", segment(contract_id)?))
    }

    pub fn transactions(contract_id: &str) -> Result<String> {
        Ok(format!("/fts/{}/txns", segment(contract_id)?))
    }
}

/// HTTP client for the NearBlocks explorer API
///
/// Every request carries the bearer token, is bounded by a per-attempt
/// deadline and retried on timeouts and transport failures.
#[derive(Clone)]
pub struct ExplorerClient {
    client: Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
    retry: RetryConfig,
}

impl ExplorerClient {
    pub fn new(config: &NearBlocksConfig, upstream: &UpstreamConfig) -> Result<Self> {
        Self::with_settings(
            config.api_url.clone(),
            config.api_key.clone(),
            upstream.timeout(),
            RetryConfig::from(upstream),
        )
    }

    pub fn with_settings(
        base_url: String,
        api_key: String,
        timeout: Duration,
        retry: RetryConfig,
    ) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| Error::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            timeout,
            retry,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `endpoint` relative to the base URL and decode the JSON body
    pub async fn fetch_resource(&self, endpoint: &str) -> Result<Value> {
        let url = format!("{}{}", self.base_url, endpoint);
        retry_with_delay(endpoint, &self.retry, || self.fetch_once(&url)).await
    }

    async fn fetch_once(&self, url: &str) -> Result<Value> {
        debug!("Fetching from explorer: {}", url);

        let request = async {
            let response = self
                .client
                .get(url)
                .header(header::ACCEPT, "application/json")
                .bearer_auth(&self.api_key)
                .send()
                .await
                .map_err(transport_error)?;

            let status = response.status();
            if !status.is_success() {
                let error_text = response.text().await.unwrap_or_default();
                error!("Explorer API error: {} - {}", status, error_text);
                return Err(Error::UpstreamHttp {
                    status: status.as_u16(),
                });
            }

            response.json::<Value>().await.map_err(transport_error)
        };

        // Dropping the request future on expiry aborts the in-flight call
        match tokio::time::timeout(self.timeout, request).await {
            Ok(result) => result,
            Err(_) => Err(Error::UpstreamTimeout(format!(
                "{} exceeded {:?}",
                url, self.timeout
            ))),
        }
    }
}

fn transport_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::UpstreamTimeout(err.to_string())
    } else if err.is_decode() {
        Error::Parse(format!("Invalid explorer response body: {}", err))
    } else {
        Error::UpstreamNetwork(err.to_string())
    }
}
