//! HTTP client with per-attempt timeout and fixed-delay retry logic

use std::time::Duration;

use reqwest::{Client, ClientBuilder};
use serde_json::Value;
use tracing::debug;
use url::Url;

use binscope_core::error::BinscopeError;

use crate::api::{PackageDocument, SearchResponse};
use crate::RegistryResult;

/// Public npm registry host
pub const DEFAULT_REGISTRY_URL: &str = "https://registry.npmjs.org";

/// Configuration for the retrying fetch primitive.
///
/// An immutable value passed to the client at construction, never
/// process-wide state. The timeout applies to each individual attempt, so a
/// fully failing fetch can take up to
/// `(timeout + retry_delay) * (max_retries + 1)` of wall-clock time.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Timeout for a single HTTP attempt
    pub timeout: Duration,
    /// Number of retries after the initial attempt
    pub max_retries: u32,
    /// Fixed delay between attempts (no backoff, no jitter)
    pub retry_delay: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(10_000),
            max_retries: 3,
            retry_delay: Duration::from_millis(1_000),
        }
    }
}

/// HTTP client for npm registry lookups
#[derive(Debug, Clone)]
pub struct RegistryClient {
    /// Underlying HTTP client with connection pooling
    client: Client,
    /// Timeout and retry configuration
    config: FetchConfig,
    /// Base registry URL
    base_url: String,
}

impl RegistryClient {
    /// Create a client against the public npm registry with default config
    pub fn new() -> RegistryResult<Self> {
        Self::with_config(FetchConfig::default())
    }

    /// Create a client against the public npm registry
    pub fn with_config(config: FetchConfig) -> RegistryResult<Self> {
        Self::with_base_url(DEFAULT_REGISTRY_URL, config)
    }

    /// Create a client against a non-default registry host
    pub fn with_base_url(base_url: &str, config: FetchConfig) -> RegistryResult<Self> {
        let client = ClientBuilder::new()
            // Connection pooling configuration
            .pool_max_idle_per_host(50)
            .pool_idle_timeout(Duration::from_secs(90))
            // Enable gzip compression
            .gzip(true)
            // User agent
            .user_agent(concat!("binscope/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                BinscopeError::network("Failed to create HTTP client".to_string(), e)
            })?;

        Ok(Self {
            client,
            config,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET a URL and decode the body as JSON, retrying on any failure.
    ///
    /// Makes up to `max_retries + 1` attempts with a fixed delay in between.
    /// Transport errors, timeouts and non-2xx statuses all count as failed
    /// attempts. The error captured on the last attempt is what the caller
    /// sees once attempts are exhausted.
    pub async fn fetch_json(&self, url: &str) -> RegistryResult<Value> {
        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            match self.fetch_once(url).await {
                Ok(value) => return Ok(value),
                Err(error) => {
                    debug!(url, attempt, %error, "fetch attempt failed");
                    last_error = Some(error);

                    if attempt < self.config.max_retries {
                        tokio::time::sleep(self.config.retry_delay).await;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| BinscopeError::Network {
            message: format!("Request to {} failed without an error", url),
            source: None,
        }))
    }

    /// Single GET attempt with the per-attempt timeout applied.
    ///
    /// The timeout cancels only this attempt, sibling fetches and later
    /// retries are unaffected.
    async fn fetch_once(&self, url: &str) -> RegistryResult<Value> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .timeout(self.config.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    BinscopeError::Timeout {
                        url: url.to_string(),
                        timeout_ms: self.config.timeout.as_millis() as u64,
                    }
                } else {
                    BinscopeError::network(format!("Request to {} failed", url), e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(BinscopeError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response.json::<Value>().await.map_err(|e| {
            if e.is_timeout() {
                BinscopeError::Timeout {
                    url: url.to_string(),
                    timeout_ms: self.config.timeout.as_millis() as u64,
                }
            } else {
                BinscopeError::network(format!("Failed to read response from {}", url), e)
            }
        })
    }

    /// Run a full-text search for `text` and decode the response
    pub async fn search(&self, text: &str) -> RegistryResult<SearchResponse> {
        let url = self.search_url(text)?;
        let body = self.fetch_json(url.as_str()).await?;

        serde_json::from_value(body).map_err(|e| BinscopeError::InvalidResponseFormat {
            message: format!("Invalid search response format: {}", e),
        })
    }

    /// Fetch the full metadata document for one package.
    ///
    /// Returns the typed view alongside the raw document so callers can
    /// retain the original JSON untouched.
    pub async fn fetch_package(&self, name: &str) -> RegistryResult<(PackageDocument, Value)> {
        let url = self.package_url(name);
        let raw = self.fetch_json(&url).await?;

        let document = serde_json::from_value(raw.clone()).map_err(|e| {
            BinscopeError::InvalidResponseFormat {
                message: format!("Invalid metadata document for '{}': {}", name, e),
            }
        })?;

        Ok((document, raw))
    }

    /// Search endpoint URL with the query text percent-encoded
    pub fn search_url(&self, text: &str) -> RegistryResult<Url> {
        Url::parse_with_params(
            &format!("{}/-/v1/search", self.base_url),
            &[("text", text)],
        )
        .map_err(|e| BinscopeError::network(format!("Invalid search URL for '{}'", text), e))
    }

    /// Detail endpoint URL for a package
    pub fn package_url(&self, name: &str) -> String {
        format!("{}/{}", self.base_url, encode_package_name(name))
    }
}

/// Encode package name for URL (handle scoped packages)
fn encode_package_name(name: &str) -> String {
    if name.starts_with('@') {
        // Scoped package: @org/pkg becomes @org%2fpkg
        name.replace('/', "%2f")
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests;
