//! Flattening of a [`crate::HarvestResult`] into one row per product.
//!
//! This is the shape handed to tabular writers: product columns first,
//! then the matching seller's columns (left join on `seller_id`).

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use serde::Serialize;

use crate::products::ProductRecord;
use crate::sellers::SellerRecord;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedRow {
    pub id: u64,
    pub name: String,
    pub brand: String,
    pub url: String,
    pub price_basic: Option<Decimal>,
    pub price_product: Option<Decimal>,
    pub price_total: Option<Decimal>,
    pub feedback_count: u64,
    pub rating: f64,
    pub seller_name: String,
    pub seller_id: u64,
    pub seller_rating: f64,
    pub seller_display_name: Option<String>,
    pub seller_legal_name: Option<String>,
    pub seller_tax_id: Option<String>,
    pub seller_registration_ids: Option<BTreeMap<String, String>>,
    pub seller_legal_address: Option<String>,
    pub seller_trademark: Option<String>,
    pub seller_profile_url: Option<String>,
}

/// Left-joins `products` with `sellers` on seller id, preserving product order.
///
/// Products whose seller has no record get `None` in every seller column.
#[must_use]
pub fn merge_rows(products: &[ProductRecord], sellers: &[SellerRecord]) -> Vec<MergedRow> {
    let by_id: HashMap<u64, &SellerRecord> = sellers.iter().map(|s| (s.seller_id, s)).collect();

    products
        .iter()
        .map(|p| {
            let seller = by_id.get(&p.seller_id).copied();
            MergedRow {
                id: p.id,
                name: p.name.clone(),
                brand: p.brand.clone(),
                url: p.url.clone(),
                price_basic: p.price.basic,
                price_product: p.price.product,
                price_total: p.price.total,
                feedback_count: p.feedback_count,
                rating: p.rating,
                seller_name: p.seller_name.clone(),
                seller_id: p.seller_id,
                seller_rating: p.seller_rating,
                seller_display_name: seller.map(|s| s.display_name.clone()),
                seller_legal_name: seller.map(|s| s.legal_name.clone()),
                seller_tax_id: seller.map(|s| s.tax_id.clone()),
                seller_registration_ids: seller.map(|s| s.registration_ids.clone()),
                seller_legal_address: seller.map(|s| s.legal_address.clone()),
                seller_trademark: seller.map(|s| s.trademark.clone()),
                seller_profile_url: seller.map(|s| s.profile_url.clone()),
            }
        })
        .collect()
}
