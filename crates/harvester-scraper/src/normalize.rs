//! Normalization from raw upstream payloads to [`harvester_core`] records.
//!
//! Absent optional fields map to defined defaults (zero counts, sentinel
//! strings); only a missing id or name makes a product unrecoverable.

use harvester_core::{
    Price, ProductRecord, SellerRecord, REGISTRATION_KEYS, UNKNOWN, UNKNOWN_BRAND, UNKNOWN_SELLER,
};

use crate::error::ScraperError;
use crate::types::{RawPrice, RawProduct, RawSeller};

/// Normalizes a raw search entry into a [`ProductRecord`].
///
/// `product_url` is the base for public product pages; the record's `url`
/// becomes `{product_url}/{id}/detail.aspx`.
///
/// # Errors
///
/// Returns [`ScraperError::Normalization`] if the entry has no `id` or no
/// `name`.
pub fn normalize_product(raw: RawProduct, product_url: &str) -> Result<ProductRecord, ScraperError> {
    let price = normalize_price(&raw);

    let id = raw.id.ok_or_else(|| ScraperError::Normalization {
        reason: "product has no id".into(),
    })?;
    let name = raw.name.ok_or_else(|| ScraperError::Normalization {
        reason: format!("product {id} has no name"),
    })?;

    Ok(ProductRecord {
        id,
        name,
        brand: raw.brand.unwrap_or_else(|| UNKNOWN_BRAND.to_string()),
        url: format!("{}/{id}/detail.aspx", product_url.trim_end_matches('/')),
        price,
        feedback_count: raw.feedbacks.unwrap_or(0),
        rating: raw.review_rating.unwrap_or(0.0),
        seller_name: raw.supplier.unwrap_or_else(|| UNKNOWN_SELLER.to_string()),
        seller_id: raw.supplier_id.unwrap_or(0),
        seller_rating: raw.supplier_rating.unwrap_or(0.0),
    })
}

/// Applies the price precedence rule.
///
/// 1. A top-level `price` carrying any amount wins: only `product` is set,
///    `basic` and `total` stay absent. If its `product` is missing the
///    price is empty; `sizes` is not consulted.
/// 2. Otherwise the first entry of `sizes` whose price exposes all three
///    amounts supplies `basic`, `product` and `total`.
/// 3. Otherwise all three are absent.
///
/// A zero amount counts as absent; the upstream uses `0` for "no price".
#[must_use]
pub fn normalize_price(raw: &RawProduct) -> Price {
    if let Some(top) = raw.price.as_ref().filter(|p| p.has_any_amount()) {
        return Price {
            basic: None,
            product: amount(top.product).map(Price::from_minor),
            total: None,
        };
    }

    raw.sizes
        .iter()
        .filter_map(|size| size.price.as_ref())
        .find_map(complete_variant_price)
        .unwrap_or_default()
}

fn complete_variant_price(price: &RawPrice) -> Option<Price> {
    let basic = amount(price.basic)?;
    let product = amount(price.product)?;
    let total = amount(price.total)?;
    Some(Price {
        basic: Some(Price::from_minor(basic)),
        product: Some(Price::from_minor(product)),
        total: Some(Price::from_minor(total)),
    })
}

fn amount(minor: Option<i64>) -> Option<i64> {
    minor.filter(|&v| v != 0)
}

/// Normalizes a seller document into a [`SellerRecord`].
///
/// The record always carries `seller_id` (the id that was requested), and
/// every field the document lacks is set to [`UNKNOWN`].
#[must_use]
pub fn normalize_seller(raw: &RawSeller, seller_id: u64, seller_page_url: &str) -> SellerRecord {
    let text = |value: &Option<String>| value.clone().unwrap_or_else(|| UNKNOWN.to_string());

    SellerRecord {
        seller_id,
        display_name: text(&raw.supplier_name),
        legal_name: text(&raw.supplier_full_name),
        tax_id: text(&raw.inn),
        registration_ids: REGISTRATION_KEYS
            .iter()
            .map(|key| {
                let value = raw.registration_id(key).unwrap_or(UNKNOWN);
                ((*key).to_string(), value.to_string())
            })
            .collect(),
        legal_address: text(&raw.legal_address),
        trademark: text(&raw.trademark),
        profile_url: format!("{}/{seller_id}", seller_page_url.trim_end_matches('/')),
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
