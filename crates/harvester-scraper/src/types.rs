//! Upstream response types for the catalog search and seller endpoints.
//!
//! ## Search payload
//!
//! ```text
//! { "data": { "total": 1234, "products": [ { ... }, ... ] } }
//! ```
//!
//! `products` is decoded as raw [`serde_json::Value`]s so that one malformed
//! entry cannot fail the whole page; each entry is decoded into a
//! [`RawProduct`] individually and skipped on failure.
//!
//! ### Prices
//! Amounts are integers in minor units (kopecks). A product carries either a
//! top-level `price` object with a `product` amount, or a `sizes` array whose
//! entries each carry their own `price` with `basic`/`product`/`total`.
//! Older payloads carry `priceU`/`salePriceU` instead; those are ignored.
//!
//! ### Absent fields
//! `brand`, `supplier`, `feedbacks`, `reviewRating`, `supplierId` and
//! `supplierRating` may all be missing; defaults are applied in
//! [`crate::normalize`].
//!
//! ## Seller payload
//!
//! A flat object. Registration ids are sometimes numbers and sometimes
//! strings depending on the seller's country, so every field is read through
//! [`loose_string`].

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Top-level response from the search endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub data: Option<SearchData>,
}

impl SearchResponse {
    /// Raw product entries; empty when `data` or `data.products` is absent.
    #[must_use]
    pub fn products(&self) -> &[Value] {
        self.data
            .as_ref()
            .map(|d| d.products.as_slice())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn total(&self) -> Option<u64> {
        self.data.as_ref().and_then(|d| d.total)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub products: Vec<Value>,
    #[serde(default)]
    pub total: Option<u64>,
}

/// A single catalog entry as returned by the search endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    /// Article number. Required; entries without it are skipped.
    #[serde(default)]
    pub id: Option<u64>,
    /// Display name. Required; entries without it are skipped.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub price: Option<RawPrice>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sizes: Vec<RawSize>,
    #[serde(default)]
    pub feedbacks: Option<u64>,
    #[serde(default)]
    pub review_rating: Option<f64>,
    #[serde(default)]
    pub supplier: Option<String>,
    #[serde(default)]
    pub supplier_id: Option<u64>,
    #[serde(default)]
    pub supplier_rating: Option<f64>,
}

/// Price amounts in minor units.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RawPrice {
    #[serde(default, deserialize_with = "loose_amount")]
    pub basic: Option<i64>,
    #[serde(default, deserialize_with = "loose_amount")]
    pub product: Option<i64>,
    #[serde(default, deserialize_with = "loose_amount")]
    pub total: Option<i64>,
}

impl RawPrice {
    /// `false` for `{}` or an object whose amounts are all unreadable.
    #[must_use]
    pub fn has_any_amount(&self) -> bool {
        self.basic.is_some() || self.product.is_some() || self.total.is_some()
    }
}

/// One purchasable size/variant of a [`RawProduct`].
#[derive(Debug, Default, Deserialize)]
pub struct RawSize {
    #[serde(default)]
    pub price: Option<RawPrice>,
}

/// Seller document from `{seller_url}/{id}.json`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSeller {
    #[serde(default, deserialize_with = "loose_string")]
    pub supplier_name: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub supplier_full_name: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub inn: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub ogrn: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub ogrnip: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub kpp: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub taxpayer_code: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub unp: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub bin: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub unn: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub legal_address: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub trademark: Option<String>,
}

impl RawSeller {
    /// Looks up a registration id by its payload key (see
    /// [`harvester_core::REGISTRATION_KEYS`]).
    #[must_use]
    pub fn registration_id(&self, key: &str) -> Option<&str> {
        let value = match key {
            "ogrn" => &self.ogrn,
            "ogrnip" => &self.ogrnip,
            "kpp" => &self.kpp,
            "taxpayerCode" => &self.taxpayer_code,
            "unp" => &self.unp,
            "bin" => &self.bin,
            "unn" => &self.unn,
            _ => return None,
        };
        value.as_deref()
    }
}

/// Accepts a string or a number; anything else (null, bool, object) is `None`.
fn loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Accepts an integer or a float with no fractional part; anything else
/// (fractional floats, strings, null) is `None`.
fn loose_amount<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Number(n) = Value::deserialize(deserializer)? else {
        return Ok(None);
    };
    if let Some(v) = n.as_i64() {
        return Ok(Some(v));
    }
    #[allow(clippy::cast_possible_truncation)]
    let whole = n
        .as_f64()
        .filter(|f| f.fract() == 0.0 && f.abs() < 9.0e15)
        .map(|f| f as i64);
    Ok(whole)
}

/// Treats an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn search_response_without_data_has_no_products() {
        let parsed: SearchResponse = serde_json::from_value(json!({"state": 0})).unwrap();
        assert!(parsed.products().is_empty());
        assert!(parsed.total().is_none());
    }

    #[test]
    fn search_response_with_null_products_has_no_products() {
        let parsed: SearchResponse =
            serde_json::from_value(json!({"data": {"products": null, "total": 7}})).unwrap();
        assert!(parsed.products().is_empty());
        assert_eq!(parsed.total(), Some(7));
    }

    #[test]
    fn raw_product_reads_camel_case_fields() {
        let raw: RawProduct = serde_json::from_value(json!({
            "id": 1001,
            "name": "Кран шаровой",
            "brand": "Valtec",
            "brandId": 55,
            "feedbacks": 12,
            "reviewRating": 4.8,
            "supplier": "ООО Сантех",
            "supplierId": 900,
            "supplierRating": 4.6,
            "sizes": null
        }))
        .unwrap();
        assert_eq!(raw.id, Some(1001));
        assert_eq!(raw.feedbacks, Some(12));
        assert_eq!(raw.supplier_id, Some(900));
        assert!(raw.sizes.is_empty());
        assert!(raw.price.is_none());
    }

    #[test]
    fn raw_product_with_float_price_still_decodes() {
        let raw: RawProduct = serde_json::from_value(json!({
            "id": 1,
            "name": "Кран",
            "price": {"basic": 200_000.0, "product": 150_050.0, "total": 160_000.5}
        }))
        .unwrap();
        let price = raw.price.unwrap();
        assert_eq!(price.basic, Some(200_000));
        assert_eq!(price.product, Some(150_050));
        assert_eq!(price.total, None);
    }

    #[test]
    fn unreadable_amounts_become_none() {
        let price: RawPrice =
            serde_json::from_value(json!({"basic": "100", "product": null, "total": true}))
                .unwrap();
        assert!(!price.has_any_amount());
    }

    #[test]
    fn raw_seller_accepts_numeric_registration_ids() {
        let raw: RawSeller = serde_json::from_value(json!({
            "supplierName": "Сантех",
            "inn": 7_701_234_567_u64,
            "unp": "190000001",
            "kpp": null
        }))
        .unwrap();
        assert_eq!(raw.inn.as_deref(), Some("7701234567"));
        assert_eq!(raw.registration_id("unp"), Some("190000001"));
        assert_eq!(raw.registration_id("kpp"), None);
        assert_eq!(raw.registration_id("nonsense"), None);
    }
}
