mod harvest;
mod progress;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "harvester")]
#[command(about = "Harvest catalog products and seller records for a search query")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Harvest products for a query, resolve their sellers, and write the
    /// merged rows as JSON
    Harvest {
        /// Search query
        query: String,

        /// Global ceiling on harvested products
        #[arg(long, default_value_t = 1000)]
        max_products: usize,

        /// Optional ceiling on products kept per brand
        #[arg(long)]
        per_brand: Option<usize>,

        /// Page cap per brand facet (overrides HARVEST_MAX_PAGES_PER_FACET)
        #[arg(long)]
        max_pages: Option<u32>,

        /// Concurrent facet fetches (overrides HARVEST_MAX_CONCURRENT_FACETS)
        #[arg(long)]
        concurrency: Option<usize>,

        /// Output file for the merged rows
        #[arg(long, short, default_value = "products.json")]
        output: PathBuf,
    },
    /// Print how many catalog entries the upstream reports for a query
    Count {
        /// Search query
        query: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = harvester_core::load_harvest_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Harvest {
            query,
            max_products,
            per_brand,
            max_pages,
            concurrency,
            output,
        } => {
            let args = harvest::HarvestArgs {
                query,
                max_products,
                per_brand,
                max_pages,
                concurrency,
                output,
            };
            harvest::run_harvest(&config, &args).await?;
        }
        Commands::Count { query } => harvest::run_count(&config, &query).await?,
    }

    Ok(())
}
