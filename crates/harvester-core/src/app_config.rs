/// Runtime settings for a harvest session, loaded from `HARVEST_*` env vars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestConfig {
    pub log_level: String,
    /// Catalog search endpoint.
    pub search_url: String,
    /// Base of the per-seller JSON documents (`{seller_url}/{id}.json`).
    pub seller_url: String,
    /// Base of public product pages (`{product_url}/{id}/detail.aspx`).
    pub product_url: String,
    /// Base of public seller pages (`{seller_page_url}/{id}`).
    pub seller_page_url: String,
    /// Delivery region sent as `dest`; affects stock and prices upstream.
    pub dest: i64,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    pub inter_page_delay_ms: u64,
    pub max_concurrent_facets: usize,
    pub discovery_max_pages: u32,
    pub max_pages_per_facet: u32,
}
