//! HTTP client for the catalog search and seller endpoints.

mod headers;
mod url;

use std::time::Duration;

use harvester_core::HarvestConfig;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::ScraperError;
use crate::rate_limit::retry_with_backoff;
use crate::types::{RawSeller, SearchResponse};

pub use url::SearchQuery;

/// Upstream locations and region parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub search_url: String,
    pub seller_url: String,
    pub product_url: String,
    pub seller_page_url: String,
    pub dest: i64,
}

impl Endpoints {
    #[must_use]
    pub fn from_config(config: &HarvestConfig) -> Self {
        Self {
            search_url: config.search_url.clone(),
            seller_url: config.seller_url.clone(),
            product_url: config.product_url.clone(),
            seller_page_url: config.seller_page_url.clone(),
            dest: config.dest,
        }
    }
}

/// HTTP client for the catalog search and seller endpoints.
///
/// Maps 429, 404 and other non-2xx responses, empty bodies and undecodable
/// JSON to typed [`ScraperError`]s. Transient errors (429, network failures,
/// 5xx) are retried with exponential backoff up to `max_retries` additional
/// attempts.
///
/// Cloning is cheap: the underlying `reqwest::Client` is reference-counted.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    endpoints: Endpoints,
    /// `Origin` header value, derived from the product page base.
    origin: String,
    /// Maximum number of retry attempts after the first failure.
    max_retries: u32,
    /// Base delay in milliseconds for exponential backoff.
    backoff_base_ms: u64,
}

impl CatalogClient {
    /// Creates a `CatalogClient` with the given endpoints, timeout and retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        endpoints: Endpoints,
        timeout_secs: u64,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .build()?;
        let origin = headers::storefront_origin(&endpoints.product_url);
        Ok(Self {
            client,
            endpoints,
            origin,
            max_retries,
            backoff_base_ms,
        })
    }

    /// # Errors
    ///
    /// See [`CatalogClient::new`].
    pub fn from_config(config: &HarvestConfig) -> Result<Self, ScraperError> {
        Self::new(
            Endpoints::from_config(config),
            config.request_timeout_secs,
            config.max_retries,
            config.retry_backoff_base_ms,
        )
    }

    #[must_use]
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Fetches one page of catalog search results.
    ///
    /// A response without `data.products` decodes to an empty page rather
    /// than an error.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::RateLimited`]: HTTP 429 after all retries exhausted.
    /// - [`ScraperError::NotFound`]: HTTP 404 (not retried).
    /// - [`ScraperError::UnexpectedStatus`]: any other non-2xx status (5xx retried, 4xx not).
    /// - [`ScraperError::Http`]: network or TLS failure after all retries exhausted.
    /// - [`ScraperError::EmptyBody`] / [`ScraperError::Deserialize`]: no usable JSON.
    /// - [`ScraperError::InvalidBaseUrl`]: the configured search URL is malformed.
    pub async fn fetch_search_page(
        &self,
        search: &SearchQuery<'_>,
    ) -> Result<SearchResponse, ScraperError> {
        let url = url::catalog_url(&self.endpoints, search)?;
        let context = match search.brand_id {
            Some(brand_id) => format!("search page {} for brand {brand_id}", search.page),
            None => format!("search page {}", search.page),
        };
        self.get_json(&url, &context).await
    }

    /// Returns the number of catalog entries the upstream reports for `query`.
    ///
    /// # Errors
    ///
    /// Same as [`CatalogClient::fetch_search_page`].
    pub async fn fetch_search_total(&self, query: &str) -> Result<u64, ScraperError> {
        let url = url::filters_url(&self.endpoints, query)?;
        let response: SearchResponse = self.get_json(&url, "search filters").await?;
        Ok(response.total().unwrap_or(0))
    }

    /// Fetches the seller document for `seller_id`.
    ///
    /// # Errors
    ///
    /// Same transport errors as [`CatalogClient::fetch_search_page`].
    pub async fn fetch_seller(&self, seller_id: u64) -> Result<RawSeller, ScraperError> {
        let url = url::seller_url(&self.endpoints, seller_id);
        self.get_json(&url, &format!("seller {seller_id}")).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        context: &str,
    ) -> Result<T, ScraperError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || async move {
            let response = self
                .client
                .get(url)
                .header(reqwest::header::USER_AGENT, headers::random_user_agent())
                .header(reqwest::header::ACCEPT, "application/json")
                .header(reqwest::header::ACCEPT_LANGUAGE, headers::ACCEPT_LANGUAGE)
                .header(reqwest::header::ORIGIN, &self.origin)
                .header(reqwest::header::REFERER, format!("{}/", self.origin))
                .send()
                .await?;
            let status = response.status();

            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                let retry_after_secs = response
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.parse::<u64>().ok())
                    .unwrap_or(60);

                return Err(ScraperError::RateLimited {
                    domain: headers::host_of(url),
                    retry_after_secs,
                });
            }

            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(ScraperError::NotFound {
                    url: url.to_owned(),
                });
            }

            if !status.is_success() {
                return Err(ScraperError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: url.to_owned(),
                });
            }

            let body = response.text().await?;
            if body.trim().is_empty() {
                return Err(ScraperError::EmptyBody {
                    url: url.to_owned(),
                });
            }

            serde_json::from_str::<T>(&body).map_err(|e| ScraperError::Deserialize {
                context: context.to_owned(),
                source: e,
            })
        })
        .await
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
