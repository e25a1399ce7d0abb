pub mod client;
pub mod discovery;
pub mod error;
pub mod fetch;
pub mod harvest;
pub mod normalize;
pub mod pagination;
pub mod progress;
pub(crate) mod rate_limit;
pub mod sellers;
pub mod types;

pub use client::{CatalogClient, Endpoints, SearchQuery};
pub use discovery::discover_brand_ids;
pub use error::ScraperError;
pub use fetch::{fetch_facet_products, FacetRequest};
pub use harvest::{assemble, FacetOutcome, HarvestOptions, Harvester};
pub use normalize::{normalize_price, normalize_product, normalize_seller};
pub use progress::{NoopProgress, ProgressCounter, ProgressSink};
pub use sellers::{SellerCache, SellerResolver};
pub use types::{RawProduct, RawSeller, SearchResponse};
