//! Brand facet discovery.
//!
//! Walks the unrestricted search result pages for a query and collects
//! every distinct non-zero `brandId` seen on them.

use std::collections::BTreeSet;
use std::time::Duration;

use serde_json::Value;

use crate::client::{CatalogClient, SearchQuery};
use crate::pagination::PageWalker;

/// Collects the distinct brand ids present in the search results for `query`.
///
/// Pages are requested sequentially starting at 1, with `delay` between
/// consecutive requests. The walk stops at the first empty page, the first
/// failed or undecodable page, or after `max_pages` pages. A failure is a
/// soft stop: it is logged and the ids gathered so far are returned.
pub async fn discover_brand_ids(
    client: &CatalogClient,
    query: &str,
    max_pages: u32,
    delay: Duration,
) -> BTreeSet<u64> {
    let mut brand_ids = BTreeSet::new();
    let mut walker = PageWalker::new(max_pages, delay);

    while let Some(page) = walker.next_page().await {
        let search = SearchQuery {
            query,
            brand_id: None,
            page,
        };
        let response = match client.fetch_search_page(&search).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(
                    query,
                    page,
                    error = %e,
                    "facet discovery stopped early; keeping brands found so far"
                );
                break;
            }
        };

        let products = response.products();
        if products.is_empty() {
            tracing::debug!(query, page, "facet discovery reached an empty page");
            break;
        }

        brand_ids.extend(products.iter().filter_map(brand_id_of));
    }

    tracing::info!(
        query,
        pages = walker.pages_issued(),
        brands = brand_ids.len(),
        "facet discovery finished"
    );
    brand_ids
}

fn brand_id_of(entry: &Value) -> Option<u64> {
    entry
        .get("brandId")
        .and_then(Value::as_u64)
        .filter(|&id| id != 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn brand_id_of_reads_non_zero_ids() {
        assert_eq!(brand_id_of(&json!({"brandId": 17})), Some(17));
        assert_eq!(brand_id_of(&json!({"brandId": 0})), None);
        assert_eq!(brand_id_of(&json!({"brandId": "17"})), None);
        assert_eq!(brand_id_of(&json!({"id": 1})), None);
    }
}
