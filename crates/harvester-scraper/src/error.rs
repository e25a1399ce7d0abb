use thiserror::Error;

/// Failures of a single upstream request.
///
/// None of these abort a harvest: the discovery and fetch loops treat them
/// as end-of-data, the orchestrator drops the failing facet, and the seller
/// resolver substitutes a placeholder record.
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("empty response body from {url}")]
    EmptyBody { url: String },

    #[error("rate limited by {domain} (retry after {retry_after_secs}s)")]
    RateLimited {
        domain: String,
        retry_after_secs: u64,
    },

    #[error("endpoint not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error("normalization error: {reason}")]
    Normalization { reason: String },
}
