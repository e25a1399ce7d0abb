use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::sellers::SellerRecord;

/// Price amounts in major currency units.
///
/// The upstream reports amounts in minor units (kopecks); conversion happens
/// once, at normalization time, through [`Price::from_minor`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// List price before any discount.
    pub basic: Option<Decimal>,
    /// Price with the marketplace card discount applied.
    pub product: Option<Decimal>,
    /// Price without the card discount.
    pub total: Option<Decimal>,
}

impl Price {
    /// Converts an amount in minor units to major units (divides by 100).
    #[must_use]
    pub fn from_minor(minor: i64) -> Decimal {
        Decimal::new(minor, 2)
    }

    /// Returns `true` when none of the three amounts is known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.basic.is_none() && self.product.is_none() && self.total.is_none()
    }
}

/// A catalog entry harvested for one facet, normalized from the search payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Upstream article number; unique within a [`HarvestResult`].
    pub id: u64,
    pub name: String,
    pub brand: String,
    /// Public product page, e.g. `"https://www.wildberries.ru/catalog/123/detail.aspx"`.
    pub url: String,
    pub price: Price,
    pub feedback_count: u64,
    pub rating: f64,
    pub seller_name: String,
    /// `0` when the payload carried no seller id.
    pub seller_id: u64,
    pub seller_rating: f64,
}

/// Output of one end-to-end harvest.
///
/// `products` is ordered by brand name, then by insertion within a brand.
/// `sellers` holds one record per distinct non-zero `seller_id` referenced
/// by `products`, in ascending id order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HarvestResult {
    pub products: Vec<ProductRecord>,
    pub sellers: Vec<SellerRecord>,
}

impl HarvestResult {
    /// Callers detect "no results found" through this rather than an error.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Distinct non-zero seller ids referenced by `products`, ascending.
#[must_use]
pub fn distinct_seller_ids(products: &[ProductRecord]) -> Vec<u64> {
    products
        .iter()
        .map(|p| p.seller_id)
        .filter(|&id| id != 0)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
