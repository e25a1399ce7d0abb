//! Harvest orchestration: discovery, bounded per-facet fan-out, merge,
//! and seller enrichment.

use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use futures::stream::{self, StreamExt};
use harvester_core::{distinct_seller_ids, HarvestConfig, HarvestResult, ProductRecord};

use crate::client::CatalogClient;
use crate::discovery::discover_brand_ids;
use crate::error::ScraperError;
use crate::fetch::{fetch_facet_products, FacetRequest};
use crate::progress::ProgressSink;
use crate::sellers::{SellerCache, SellerResolver};

/// Limits applied to one harvest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestOptions {
    /// Global ceiling on the number of products returned.
    pub max_products: usize,
    /// Optional ceiling on products retained per brand name.
    pub max_per_brand: Option<usize>,
    pub discovery_max_pages: u32,
    pub max_pages_per_facet: u32,
    /// Facet fetches (and seller lookups) in flight at once.
    pub max_concurrent: usize,
    /// Delay between consecutive pages of one pagination stream.
    pub inter_page_delay: Duration,
}

impl HarvestOptions {
    /// Options taken from `config`, with the given product ceiling and no
    /// per-brand cap.
    #[must_use]
    pub fn from_config(config: &HarvestConfig, max_products: usize) -> Self {
        Self {
            max_products,
            max_per_brand: None,
            discovery_max_pages: config.discovery_max_pages,
            max_pages_per_facet: config.max_pages_per_facet,
            max_concurrent: config.max_concurrent_facets,
            inter_page_delay: Duration::from_millis(config.inter_page_delay_ms),
        }
    }
}

/// Result of one facet task, collected before aggregation.
#[derive(Debug)]
pub enum FacetOutcome {
    Fetched {
        brand_id: u64,
        products: Vec<ProductRecord>,
    },
    Failed {
        brand_id: u64,
        error: ScraperError,
    },
}

impl FacetOutcome {
    #[must_use]
    pub fn brand_id(&self) -> u64 {
        match self {
            Self::Fetched { brand_id, .. } | Self::Failed { brand_id, .. } => *brand_id,
        }
    }
}

/// Drives a complete harvest against one [`CatalogClient`].
#[derive(Debug, Clone)]
pub struct Harvester {
    client: CatalogClient,
    options: HarvestOptions,
}

impl Harvester {
    #[must_use]
    pub fn new(client: CatalogClient, options: HarvestOptions) -> Self {
        Self { client, options }
    }

    #[must_use]
    pub fn client(&self) -> &CatalogClient {
        &self.client
    }

    #[must_use]
    pub fn options(&self) -> &HarvestOptions {
        &self.options
    }

    /// Discovers brand facets for `query` and fetches their products.
    ///
    /// At most `max_concurrent` facet fetches run at once. Each task sizes
    /// its target from the budget still open when it starts, so the merged
    /// set can briefly exceed `max_products`; [`assemble`] truncates it.
    /// A failing facet is logged and dropped. Zero discovered facets yields
    /// an empty vector.
    ///
    /// Progress: `set_total(max_products)`, then `update(1)` per product
    /// fetched.
    pub async fn harvest_products(
        &self,
        query: &str,
        progress: &dyn ProgressSink,
    ) -> Vec<ProductRecord> {
        let opts = &self.options;
        if opts.max_products == 0 {
            return Vec::new();
        }

        let brand_ids = discover_brand_ids(
            &self.client,
            query,
            opts.discovery_max_pages,
            opts.inter_page_delay,
        )
        .await;

        if brand_ids.is_empty() {
            tracing::info!(query, "no brand facets to fetch");
            return Vec::new();
        }

        progress.set_total(opts.max_products as u64);

        let collected = AtomicUsize::new(0);
        let collected = &collected;
        let client = &self.client;

        let outcomes: Vec<FacetOutcome> = stream::iter(brand_ids)
            .map(|brand_id| async move {
                let remaining = opts
                    .max_products
                    .saturating_sub(collected.load(Ordering::Relaxed));
                let target = opts
                    .max_per_brand
                    .map_or(remaining, |cap| cap.min(remaining));
                let request = FacetRequest {
                    query,
                    brand_id,
                    target,
                    max_pages: opts.max_pages_per_facet,
                    delay: opts.inter_page_delay,
                };

                match fetch_facet_products(client, &request, progress).await {
                    Ok(products) => {
                        collected.fetch_add(products.len(), Ordering::Relaxed);
                        FacetOutcome::Fetched { brand_id, products }
                    }
                    Err(error) => FacetOutcome::Failed { brand_id, error },
                }
            })
            .buffer_unordered(opts.max_concurrent.max(1))
            .collect()
            .await;

        let products = assemble(outcomes, opts.max_products, opts.max_per_brand);
        tracing::info!(query, products = products.len(), "product harvest finished");
        products
    }

    /// Runs [`Harvester::harvest_products`], then resolves every distinct
    /// non-zero seller id they reference (ascending) through `cache`.
    ///
    /// Progress is reset to the seller count before the seller stage.
    pub async fn harvest(
        &self,
        query: &str,
        cache: &SellerCache,
        progress: &dyn ProgressSink,
    ) -> HarvestResult {
        let products = self.harvest_products(query, progress).await;
        if products.is_empty() {
            return HarvestResult::default();
        }

        let seller_ids = distinct_seller_ids(&products);
        progress.set_total(seller_ids.len() as u64);

        let sellers = SellerResolver::new(&self.client, cache)
            .resolve_many(&seller_ids, self.options.max_concurrent, progress)
            .await;
        let placeholders = sellers.iter().filter(|s| s.is_placeholder()).count();
        tracing::info!(
            query,
            sellers = sellers.len(),
            placeholders,
            "seller resolution finished"
        );

        HarvestResult { products, sellers }
    }

    /// Number of catalog entries upstream reports for `query`; `0` when the
    /// request fails.
    pub async fn search_total(&self, query: &str) -> u64 {
        match self.client.fetch_search_total(query).await {
            Ok(total) => total,
            Err(e) => {
                tracing::warn!(query, error = %e, "search total unavailable");
                0
            }
        }
    }
}

/// Merges facet outcomes into the final product order.
///
/// Failed outcomes are logged and discarded. Products are de-duplicated by
/// id (the first occurrence in ascending `brand_id` order wins), grouped by
/// brand name, capped to `max_per_brand` within each group, emitted in
/// lexicographic brand order, and finally truncated to `max_products`.
/// The result does not depend on the order in which outcomes arrived.
#[must_use]
pub fn assemble(
    mut outcomes: Vec<FacetOutcome>,
    max_products: usize,
    max_per_brand: Option<usize>,
) -> Vec<ProductRecord> {
    outcomes.sort_by_key(FacetOutcome::brand_id);

    let mut seen = HashSet::new();
    let mut by_brand: BTreeMap<String, Vec<ProductRecord>> = BTreeMap::new();
    let mut failed = 0usize;

    for outcome in outcomes {
        match outcome {
            FacetOutcome::Fetched { products, .. } => {
                for product in products {
                    if seen.insert(product.id) {
                        by_brand.entry(product.brand.clone()).or_default().push(product);
                    }
                }
            }
            FacetOutcome::Failed { brand_id, error } => {
                failed += 1;
                tracing::warn!(brand_id, error = %error, "facet fetch failed; dropping facet");
            }
        }
    }

    if failed > 0 {
        tracing::info!(failed, "facets dropped from harvest");
    }

    let mut products: Vec<ProductRecord> = by_brand
        .into_values()
        .flat_map(|mut group| {
            if let Some(cap) = max_per_brand {
                group.truncate(cap);
            }
            group
        })
        .collect();
    products.truncate(max_products);
    products
}

#[cfg(test)]
#[path = "harvest_test.rs"]
mod tests;
