use rust_decimal::Decimal;
use serde_json::json;

use super::*;
use crate::types::RawSize;

const PRODUCT_URL: &str = "https://www.wildberries.ru/catalog";

fn raw_product(value: serde_json::Value) -> RawProduct {
    serde_json::from_value(value).expect("fixture must decode")
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn raw_price(basic: Option<i64>, product: Option<i64>, total: Option<i64>) -> RawPrice {
    RawPrice {
        basic,
        product,
        total,
    }
}

// -----------------------------------------------------------------------
// normalize_price
// -----------------------------------------------------------------------

#[test]
fn top_level_price_sets_only_product_amount() {
    let raw = raw_product(json!({
        "id": 1,
        "name": "Кран",
        "price": {"basic": 200_000, "product": 150_050, "total": 160_000},
        "sizes": [{"price": {"basic": 1, "product": 2, "total": 3}}]
    }));
    let price = normalize_price(&raw);
    assert_eq!(price.product, Some(dec("1500.50")));
    assert_eq!(price.basic, None);
    assert_eq!(price.total, None);
}

#[test]
fn variant_prices_used_when_no_top_level_price() {
    let raw = raw_product(json!({
        "id": 1,
        "name": "Кран",
        "sizes": [
            {"price": {"basic": 120_000, "product": 99_900, "total": 105_000}},
            {"price": {"basic": 1, "product": 2, "total": 3}}
        ]
    }));
    let price = normalize_price(&raw);
    assert_eq!(price.basic, Some(dec("1200.00")));
    assert_eq!(price.product, Some(dec("999.00")));
    assert_eq!(price.total, Some(dec("1050.00")));
}

#[test]
fn first_variant_with_all_three_amounts_wins() {
    let raw = RawProduct {
        sizes: vec![
            RawSize { price: None },
            RawSize {
                price: Some(raw_price(Some(500), None, Some(450))),
            },
            RawSize {
                price: Some(raw_price(Some(900), Some(700), Some(800))),
            },
        ],
        ..RawProduct::default()
    };
    let price = normalize_price(&raw);
    assert_eq!(price.basic, Some(dec("9.00")));
    assert_eq!(price.product, Some(dec("7.00")));
    assert_eq!(price.total, Some(dec("8.00")));
}

#[test]
fn no_price_representation_leaves_all_amounts_absent() {
    let raw = raw_product(json!({"id": 1, "name": "Кран"}));
    assert!(normalize_price(&raw).is_empty());
}

#[test]
fn incomplete_variants_leave_all_amounts_absent() {
    let raw = RawProduct {
        sizes: vec![RawSize {
            price: Some(raw_price(Some(500), Some(400), None)),
        }],
        ..RawProduct::default()
    };
    assert!(normalize_price(&raw).is_empty());
}

#[test]
fn top_level_price_without_product_ignores_variants() {
    let raw = RawProduct {
        price: Some(raw_price(Some(10_000), None, None)),
        sizes: vec![RawSize {
            price: Some(raw_price(Some(300), Some(200), Some(250))),
        }],
        ..RawProduct::default()
    };
    assert!(normalize_price(&raw).is_empty());
}

#[test]
fn empty_top_level_price_falls_through_to_variants() {
    let raw = raw_product(json!({
        "id": 1,
        "name": "Кран",
        "price": {},
        "sizes": [{"price": {"basic": 300, "product": 200, "total": 250}}]
    }));
    let price = normalize_price(&raw);
    assert_eq!(price.basic, Some(dec("3.00")));
    assert_eq!(price.product, Some(dec("2.00")));
    assert_eq!(price.total, Some(dec("2.50")));
}

#[test]
fn whole_float_amounts_are_accepted() {
    let raw = raw_product(json!({
        "id": 1,
        "name": "Кран",
        "price": {"product": 150_050.0}
    }));
    assert_eq!(normalize_price(&raw).product, Some(dec("1500.50")));
}

#[test]
fn zero_product_amount_counts_as_absent() {
    let raw = RawProduct {
        price: Some(raw_price(None, Some(0), None)),
        ..RawProduct::default()
    };
    assert!(normalize_price(&raw).is_empty());
}

// -----------------------------------------------------------------------
// normalize_product
// -----------------------------------------------------------------------

#[test]
fn normalize_product_builds_url_from_id() {
    let raw = raw_product(json!({"id": 123_456, "name": "Кран латунный"}));
    let record = normalize_product(raw, "https://www.wildberries.ru/catalog/").unwrap();
    assert_eq!(
        record.url,
        "https://www.wildberries.ru/catalog/123456/detail.aspx"
    );
}

#[test]
fn normalize_product_applies_defaults_for_missing_fields() {
    let raw = raw_product(json!({"id": 5, "name": "Кран"}));
    let record = normalize_product(raw, PRODUCT_URL).unwrap();
    assert_eq!(record.brand, UNKNOWN_BRAND);
    assert_eq!(record.seller_name, UNKNOWN_SELLER);
    assert_eq!(record.seller_id, 0);
    assert_eq!(record.feedback_count, 0);
    assert!(record.rating.abs() < f64::EPSILON);
    assert!(record.seller_rating.abs() < f64::EPSILON);
}

#[test]
fn normalize_product_copies_present_fields() {
    let raw = raw_product(json!({
        "id": 77,
        "name": "Кран шаровой 1/2",
        "brand": "Valtec",
        "feedbacks": 340,
        "reviewRating": 4.7,
        "supplier": "ООО Сантехника",
        "supplierId": 4242,
        "supplierRating": 4.9,
        "price": {"product": 45_900}
    }));
    let record = normalize_product(raw, PRODUCT_URL).unwrap();
    assert_eq!(record.id, 77);
    assert_eq!(record.name, "Кран шаровой 1/2");
    assert_eq!(record.brand, "Valtec");
    assert_eq!(record.feedback_count, 340);
    assert!((record.rating - 4.7).abs() < f64::EPSILON);
    assert_eq!(record.seller_name, "ООО Сантехника");
    assert_eq!(record.seller_id, 4242);
    assert_eq!(record.price.product, Some(dec("459.00")));
}

#[test]
fn normalize_product_rejects_missing_id() {
    let raw = raw_product(json!({"name": "Кран"}));
    let err = normalize_product(raw, PRODUCT_URL).unwrap_err();
    assert!(
        matches!(err, ScraperError::Normalization { .. }),
        "expected Normalization, got: {err:?}"
    );
}

#[test]
fn normalize_product_rejects_missing_name() {
    let raw = raw_product(json!({"id": 9}));
    let err = normalize_product(raw, PRODUCT_URL).unwrap_err();
    assert!(
        matches!(err, ScraperError::Normalization { ref reason } if reason.contains('9')),
        "expected Normalization mentioning the id, got: {err:?}"
    );
}

// -----------------------------------------------------------------------
// normalize_seller
// -----------------------------------------------------------------------

#[test]
fn normalize_seller_maps_fields_and_builds_profile_url() {
    let raw: RawSeller = serde_json::from_value(json!({
        "supplierId": 4242,
        "supplierName": "Сантехника",
        "supplierFullName": "ООО \"Сантехника\"",
        "inn": "7701234567",
        "ogrn": "1027700000000",
        "kpp": "770101001",
        "legalAddress": "г. Москва, ул. Лесная, 1",
        "trademark": "Valtec"
    }))
    .unwrap();
    let seller = normalize_seller(&raw, 4242, "https://www.wildberries.ru/seller");
    assert_eq!(seller.seller_id, 4242);
    assert_eq!(seller.display_name, "Сантехника");
    assert_eq!(seller.legal_name, "ООО \"Сантехника\"");
    assert_eq!(seller.tax_id, "7701234567");
    assert_eq!(seller.registration_ids["ogrn"], "1027700000000");
    assert_eq!(seller.registration_ids["kpp"], "770101001");
    assert_eq!(seller.registration_ids["unp"], UNKNOWN);
    assert_eq!(seller.trademark, "Valtec");
    assert_eq!(seller.profile_url, "https://www.wildberries.ru/seller/4242");
}

#[test]
fn normalize_seller_fills_sentinels_for_empty_document() {
    let seller = normalize_seller(&RawSeller::default(), 7, "https://www.wildberries.ru/seller/");
    assert_eq!(seller.seller_id, 7);
    assert_eq!(seller.display_name, UNKNOWN);
    assert_eq!(seller.legal_address, UNKNOWN);
    assert_eq!(seller.registration_ids.len(), REGISTRATION_KEYS.len());
    assert_eq!(seller.profile_url, "https://www.wildberries.ru/seller/7");
}
