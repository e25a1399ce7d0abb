//! Command handlers for `harvest` and `count`.

use std::path::PathBuf;

use anyhow::Context;
use harvester_core::{merge_rows, HarvestConfig};
use harvester_scraper::{CatalogClient, HarvestOptions, Harvester, SellerCache};

use crate::progress::TracingProgress;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HarvestArgs {
    pub query: String,
    pub max_products: usize,
    pub per_brand: Option<usize>,
    pub max_pages: Option<u32>,
    pub concurrency: Option<usize>,
    pub output: PathBuf,
}

/// Builds the harvest limits from config, with command-line overrides.
pub(crate) fn harvest_options(config: &HarvestConfig, args: &HarvestArgs) -> HarvestOptions {
    let mut options = HarvestOptions::from_config(config, args.max_products);
    options.max_per_brand = args.per_brand;
    if let Some(max_pages) = args.max_pages {
        options.max_pages_per_facet = max_pages.max(1);
    }
    if let Some(concurrency) = args.concurrency {
        options.max_concurrent = concurrency.max(1);
    }
    options
}

fn build_harvester(config: &HarvestConfig, options: HarvestOptions) -> anyhow::Result<Harvester> {
    let client = CatalogClient::from_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build catalog client: {e}"))?;
    Ok(Harvester::new(client, options))
}

/// Runs a full harvest and writes the merged rows to `args.output`.
///
/// An empty harvest is not an error: it is logged and an empty array is
/// written.
///
/// # Errors
///
/// Returns an error if the client cannot be constructed or the output file
/// cannot be written.
pub(crate) async fn run_harvest(config: &HarvestConfig, args: &HarvestArgs) -> anyhow::Result<()> {
    let options = harvest_options(config, args);
    let harvester = build_harvester(config, options)?;

    let total = harvester.search_total(&args.query).await;
    tracing::info!(query = %args.query, total, "upstream reports matching products");

    let cache = SellerCache::new();
    let progress = TracingProgress::new();
    let result = harvester.harvest(&args.query, &cache, &progress).await;

    if result.is_empty() {
        tracing::warn!(query = %args.query, "no products found");
    }

    let rows = merge_rows(&result.products, &result.sellers);
    let json = serde_json::to_vec_pretty(&rows).context("failed to serialize merged rows")?;
    tokio::fs::write(&args.output, json)
        .await
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    tracing::info!(
        products = result.products.len(),
        sellers = result.sellers.len(),
        output = %args.output.display(),
        "harvest written"
    );
    Ok(())
}

/// Prints the upstream's reported result count for `query`.
///
/// # Errors
///
/// Returns an error if the client cannot be constructed.
pub(crate) async fn run_count(config: &HarvestConfig, query: &str) -> anyhow::Result<()> {
    let harvester = build_harvester(config, HarvestOptions::from_config(config, 0))?;
    let total = harvester.search_total(query).await;
    println!("{total}");
    Ok(())
}
