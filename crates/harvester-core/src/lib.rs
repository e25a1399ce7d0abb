//! Domain records and configuration shared by the harvester crates.
//!
//! Nothing in this crate performs I/O beyond reading the process
//! environment; the HTTP side lives in `harvester-scraper`.

mod app_config;
mod config;
pub mod products;
pub mod sellers;
pub mod table;

use thiserror::Error;

pub use app_config::HarvestConfig;
pub use config::{load_harvest_config, load_harvest_config_from_env};
pub use products::{distinct_seller_ids, HarvestResult, Price, ProductRecord};
pub use sellers::{SellerRecord, REGISTRATION_KEYS};
pub use table::{merge_rows, MergedRow};

/// Sentinel used for every seller string field the upstream did not provide.
pub const UNKNOWN: &str = "unknown";

/// Brand name used when a product payload carries no brand.
pub const UNKNOWN_BRAND: &str = "unknown brand";

/// Seller name used when a product payload carries no seller name.
pub const UNKNOWN_SELLER: &str = "unknown seller";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("configuration validation failed: {0}")]
    Validation(String),
}
