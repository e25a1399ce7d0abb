//! Per-facet paginated product fetch.

use std::time::Duration;

use harvester_core::ProductRecord;

use crate::client::{CatalogClient, SearchQuery};
use crate::error::ScraperError;
use crate::normalize::normalize_product;
use crate::pagination::PageWalker;
use crate::progress::ProgressSink;
use crate::types::RawProduct;

/// One facet's share of a harvest.
#[derive(Debug, Clone, Copy)]
pub struct FacetRequest<'a> {
    pub query: &'a str,
    pub brand_id: u64,
    /// Stop once this many records have been collected.
    pub target: usize,
    pub max_pages: u32,
    pub delay: Duration,
}

/// Fetches normalized products for one brand facet.
///
/// Pages are requested sequentially from 1. Fetching stops when `target`
/// records have been collected, a page comes back empty, or `max_pages`
/// pages have been requested. Entries that cannot be decoded or lack an id
/// or a name are skipped with a warning. `progress` receives `update(1)`
/// per accepted record.
///
/// # Errors
///
/// Returns the [`ScraperError`] of the first page if that page fails. A
/// failure on any later page ends the walk and the records gathered so far
/// are returned.
pub async fn fetch_facet_products(
    client: &CatalogClient,
    request: &FacetRequest<'_>,
    progress: &dyn ProgressSink,
) -> Result<Vec<ProductRecord>, ScraperError> {
    let mut products = Vec::new();
    if request.target == 0 {
        return Ok(products);
    }

    let product_url = client.endpoints().product_url.as_str();
    let mut walker = PageWalker::new(request.max_pages, request.delay);

    while let Some(page) = walker.next_page().await {
        let search = SearchQuery {
            query: request.query,
            brand_id: Some(request.brand_id),
            page,
        };
        let response = match client.fetch_search_page(&search).await {
            Ok(response) => response,
            Err(e) if page == 1 => return Err(e),
            Err(e) => {
                tracing::warn!(
                    brand_id = request.brand_id,
                    page,
                    collected = products.len(),
                    error = %e,
                    "facet fetch stopped early; keeping partial results"
                );
                break;
            }
        };

        let entries = response.products();
        if entries.is_empty() {
            break;
        }

        for entry in entries {
            let record = serde_json::from_value::<RawProduct>(entry.clone())
                .map_err(|e| ScraperError::Deserialize {
                    context: format!("product entry for brand {}", request.brand_id),
                    source: e,
                })
                .and_then(|raw| normalize_product(raw, product_url));

            match record {
                Ok(record) => {
                    products.push(record);
                    progress.update(1);
                    if products.len() >= request.target {
                        tracing::debug!(
                            brand_id = request.brand_id,
                            page,
                            collected = products.len(),
                            "facet reached its target"
                        );
                        return Ok(products);
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        brand_id = request.brand_id,
                        page,
                        error = %e,
                        "skipping product entry"
                    );
                }
            }
        }
    }

    tracing::debug!(
        brand_id = request.brand_id,
        pages = walker.pages_issued(),
        collected = products.len(),
        "facet fetch finished"
    );
    Ok(products)
}
