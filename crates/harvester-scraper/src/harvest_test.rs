use super::*;
use harvester_core::Price;

fn product(id: u64, brand: &str) -> ProductRecord {
    ProductRecord {
        id,
        name: format!("product {id}"),
        brand: brand.to_owned(),
        url: format!("https://catalog.example.test/{id}/detail.aspx"),
        price: Price::default(),
        feedback_count: 0,
        rating: 0.0,
        seller_name: "seller".to_owned(),
        seller_id: 1,
        seller_rating: 0.0,
    }
}

fn fetched(brand_id: u64, products: Vec<ProductRecord>) -> FacetOutcome {
    FacetOutcome::Fetched { brand_id, products }
}

fn failed(brand_id: u64) -> FacetOutcome {
    FacetOutcome::Failed {
        brand_id,
        error: ScraperError::UnexpectedStatus {
            status: 500,
            url: "http://upstream/search".to_owned(),
        },
    }
}

fn ids(products: &[ProductRecord]) -> Vec<u64> {
    products.iter().map(|p| p.id).collect()
}

#[test]
fn assemble_orders_brands_lexicographically() {
    let outcomes = vec![
        fetched(1, vec![product(10, "B"), product(11, "B")]),
        fetched(2, vec![product(20, "A"), product(21, "A")]),
    ];
    let products = assemble(outcomes, 100, None);
    assert_eq!(ids(&products), vec![20, 21, 10, 11]);
}

#[test]
fn assemble_is_independent_of_completion_order() {
    let forward = assemble(
        vec![
            fetched(1, vec![product(10, "Zeta")]),
            fetched(2, vec![product(20, "Alpha")]),
            fetched(3, vec![product(30, "Mid")]),
        ],
        100,
        None,
    );
    let reversed = assemble(
        vec![
            fetched(3, vec![product(30, "Mid")]),
            fetched(2, vec![product(20, "Alpha")]),
            fetched(1, vec![product(10, "Zeta")]),
        ],
        100,
        None,
    );
    assert_eq!(forward, reversed);
    assert_eq!(ids(&forward), vec![20, 30, 10]);
}

#[test]
fn assemble_keeps_insertion_order_within_a_brand() {
    let outcomes = vec![fetched(
        1,
        vec![product(3, "A"), product(1, "A"), product(2, "A")],
    )];
    assert_eq!(ids(&assemble(outcomes, 100, None)), vec![3, 1, 2]);
}

#[test]
fn assemble_drops_failed_facets() {
    let outcomes = vec![
        fetched(1, vec![product(10, "A")]),
        failed(2),
        fetched(3, vec![product(30, "C")]),
    ];
    assert_eq!(ids(&assemble(outcomes, 100, None)), vec![10, 30]);
}

#[test]
fn assemble_truncates_to_max_products() {
    let outcomes = vec![
        fetched(1, vec![product(10, "B"), product(11, "B")]),
        fetched(2, vec![product(20, "A"), product(21, "A")]),
    ];
    assert_eq!(ids(&assemble(outcomes, 3, None)), vec![20, 21, 10]);
}

#[test]
fn assemble_applies_per_brand_cap_before_global_cap() {
    let outcomes = vec![
        fetched(1, vec![product(10, "B"), product(11, "B"), product(12, "B")]),
        fetched(2, vec![product(20, "A"), product(21, "A"), product(22, "A")]),
    ];
    assert_eq!(ids(&assemble(outcomes, 100, Some(2))), vec![20, 21, 10, 11]);
}

#[test]
fn assemble_deduplicates_by_product_id() {
    let outcomes = vec![
        fetched(2, vec![product(7, "Other")]),
        fetched(1, vec![product(7, "First"), product(8, "First")]),
    ];
    let products = assemble(outcomes, 100, None);
    assert_eq!(ids(&products), vec![7, 8]);
    assert_eq!(products[0].brand, "First");
}

#[test]
fn assemble_with_only_failures_is_empty() {
    assert!(assemble(vec![failed(1), failed(2)], 10, None).is_empty());
}

#[test]
fn options_from_config_copy_limits() {
    let config = HarvestConfig {
        log_level: "info".to_owned(),
        search_url: "http://localhost/search".to_owned(),
        seller_url: "http://localhost/sellers".to_owned(),
        product_url: "http://localhost/catalog".to_owned(),
        seller_page_url: "http://localhost/seller".to_owned(),
        dest: -1,
        request_timeout_secs: 10,
        max_retries: 0,
        retry_backoff_base_ms: 500,
        inter_page_delay_ms: 75,
        max_concurrent_facets: 4,
        discovery_max_pages: 3,
        max_pages_per_facet: 9,
    };
    let options = HarvestOptions::from_config(&config, 250);
    assert_eq!(options.max_products, 250);
    assert_eq!(options.max_per_brand, None);
    assert_eq!(options.max_concurrent, 4);
    assert_eq!(options.discovery_max_pages, 3);
    assert_eq!(options.max_pages_per_facet, 9);
    assert_eq!(options.inter_page_delay, Duration::from_millis(75));
}
