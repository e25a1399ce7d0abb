//! URL builders for the search and seller endpoints.

use crate::error::ScraperError;

use super::Endpoints;

/// One page of a catalog search, optionally restricted to a brand facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchQuery<'a> {
    pub query: &'a str,
    pub brand_id: Option<u64>,
    /// 1-based.
    pub page: u32,
}

/// Builds the `resultset=catalog` URL for one search page.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidBaseUrl`] if the configured search URL
/// cannot be parsed.
pub(super) fn catalog_url(
    endpoints: &Endpoints,
    search: &SearchQuery<'_>,
) -> Result<String, ScraperError> {
    let mut url = parse_base(&endpoints.search_url)?;
    {
        let mut pairs = url.query_pairs_mut();
        pairs
            .append_pair("ab_testing", "false")
            .append_pair("appType", "1")
            .append_pair("curr", "rub")
            .append_pair("dest", &endpoints.dest.to_string());
        if let Some(brand_id) = search.brand_id {
            pairs.append_pair("fbrand", &brand_id.to_string());
        }
        pairs
            .append_pair("hide_dtype", "13")
            .append_pair("lang", "ru")
            .append_pair("page", &search.page.to_string())
            .append_pair("query", search.query)
            .append_pair("resultset", "catalog")
            .append_pair("sort", "popular")
            .append_pair("spp", "30")
            .append_pair("suppressSpellcheck", "false");
    }
    Ok(url.to_string())
}

/// Builds the `resultset=filters` URL, which reports `data.total` for a query.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidBaseUrl`] if the configured search URL
/// cannot be parsed.
pub(super) fn filters_url(endpoints: &Endpoints, query: &str) -> Result<String, ScraperError> {
    let mut url = parse_base(&endpoints.search_url)?;
    url.query_pairs_mut()
        .append_pair("ab_testing", "false")
        .append_pair("appType", "1")
        .append_pair("curr", "rub")
        .append_pair("dest", &endpoints.dest.to_string())
        .append_pair("hide_dtype", "13")
        .append_pair("lang", "ru")
        .append_pair("query", query)
        .append_pair("resultset", "filters")
        .append_pair("spp", "30")
        .append_pair("suppressSpellcheck", "false");
    Ok(url.to_string())
}

/// `{seller_url}/{id}.json`
pub(super) fn seller_url(endpoints: &Endpoints, seller_id: u64) -> String {
    format!("{}/{seller_id}.json", endpoints.seller_url.trim_end_matches('/'))
}

fn parse_base(base_url: &str) -> Result<reqwest::Url, ScraperError> {
    reqwest::Url::parse(base_url).map_err(|e| ScraperError::InvalidBaseUrl {
        base_url: base_url.to_owned(),
        reason: e.to_string(),
    })
}
