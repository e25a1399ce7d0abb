//! Browser-like request headers.
//!
//! The search endpoint blocks obvious scripted clients, so every request
//! carries a desktop browser `User-Agent` picked at random per request, plus
//! `Origin`/`Referer` of the storefront.

use rand::seq::IndexedRandom;

pub(super) const USER_AGENTS: [&str; 4] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:127.0) Gecko/20100101 Firefox/127.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.5 Safari/605.1.15",
];

pub(super) const ACCEPT_LANGUAGE: &str = "ru-RU,ru;q=0.9,en-US;q=0.8,en;q=0.7";

pub(super) fn random_user_agent() -> &'static str {
    USER_AGENTS
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(USER_AGENTS[0])
}

/// `Origin` value for requests: scheme, host and port of the storefront
/// product URL. An unparseable URL is sent as given, minus a trailing `/`.
pub(super) fn storefront_origin(product_url: &str) -> String {
    match reqwest::Url::parse(product_url) {
        Ok(url) => url.origin().ascii_serialization(),
        Err(e) => {
            tracing::warn!(product_url, error = %e, "product URL does not parse; using it as Origin");
            product_url.trim_end_matches('/').to_owned()
        }
    }
}

/// Host of `url` for error messages, or the whole string if it has none.
pub(super) fn host_of(url: &str) -> String {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
        .unwrap_or_else(|| url.to_owned())
}
