use crate::app_config::HarvestConfig;
use crate::ConfigError;

pub(crate) const DEFAULT_SEARCH_URL: &str = "https://search.wb.ru/exactmatch/ru/common/v13/search";
pub(crate) const DEFAULT_SELLER_URL: &str =
    "https://static-basket-01.wb.ru/vol0/data/supplier-by-id";
pub(crate) const DEFAULT_PRODUCT_URL: &str = "https://www.wildberries.ru/catalog";
pub(crate) const DEFAULT_SELLER_PAGE_URL: &str = "https://www.wildberries.ru/seller";

/// Load harvest configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value cannot be parsed or fails validation.
pub fn load_harvest_config() -> Result<HarvestConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_harvest_config_from_env()
}

/// Load harvest configuration from environment variables already in the process.
///
/// Unlike [`load_harvest_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value cannot be parsed or fails validation.
pub fn load_harvest_config_from_env() -> Result<HarvestConfig, ConfigError> {
    build_harvest_config(|key| std::env::var(key))
}

/// Build configuration using the provided env-var lookup function, so tests
/// can feed a `HashMap` instead of touching the process environment.
fn build_harvest_config<F>(lookup: F) -> Result<HarvestConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_i64 = |var: &str, default: &str| -> Result<i64, ConfigError> {
        or_default(var, default)
            .parse::<i64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let config = HarvestConfig {
        log_level: or_default("HARVEST_LOG_LEVEL", "info"),
        search_url: or_default("HARVEST_SEARCH_URL", DEFAULT_SEARCH_URL),
        seller_url: or_default("HARVEST_SELLER_URL", DEFAULT_SELLER_URL),
        product_url: or_default("HARVEST_PRODUCT_URL", DEFAULT_PRODUCT_URL),
        seller_page_url: or_default("HARVEST_SELLER_PAGE_URL", DEFAULT_SELLER_PAGE_URL),
        dest: parse_i64("HARVEST_DEST", "-1255987")?,
        request_timeout_secs: parse_u64("HARVEST_REQUEST_TIMEOUT_SECS", "10")?,
        max_retries: parse_u32("HARVEST_MAX_RETRIES", "0")?,
        retry_backoff_base_ms: parse_u64("HARVEST_RETRY_BACKOFF_BASE_MS", "500")?,
        inter_page_delay_ms: parse_u64("HARVEST_INTER_PAGE_DELAY_MS", "50")?,
        max_concurrent_facets: parse_usize("HARVEST_MAX_CONCURRENT_FACETS", "8")?,
        discovery_max_pages: parse_u32("HARVEST_DISCOVERY_MAX_PAGES", "50")?,
        max_pages_per_facet: parse_u32("HARVEST_MAX_PAGES_PER_FACET", "100")?,
    };

    validate(&config)?;
    Ok(config)
}

fn validate(config: &HarvestConfig) -> Result<(), ConfigError> {
    if config.max_concurrent_facets == 0 {
        return Err(ConfigError::Validation(
            "HARVEST_MAX_CONCURRENT_FACETS must be at least 1".to_string(),
        ));
    }
    if config.discovery_max_pages == 0 {
        return Err(ConfigError::Validation(
            "HARVEST_DISCOVERY_MAX_PAGES must be at least 1".to_string(),
        ));
    }
    if config.max_pages_per_facet == 0 {
        return Err(ConfigError::Validation(
            "HARVEST_MAX_PAGES_PER_FACET must be at least 1".to_string(),
        ));
    }
    if config.request_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "HARVEST_REQUEST_TIMEOUT_SECS must be at least 1".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
