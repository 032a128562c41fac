//! Tests against the live public catalog API.
//!
//! These tests require network access to <https://dummyjson.com> and are
//! ignored by default.
//!
//! Run with: `cargo test -p cartwheel-integration-tests -- --ignored`

use cartwheel_core::ProductId;
use cartwheel_storefront::catalog::CatalogClient;
use cartwheel_storefront::catalog::CatalogError;
use cartwheel_storefront::config::AppConfig;

fn client() -> CatalogClient {
    CatalogClient::new(&AppConfig::default())
}

#[tokio::test]
#[ignore = "Requires network access to dummyjson.com"]
async fn test_categories_are_nonempty() {
    let categories = client()
        .categories()
        .await
        .expect("the catalog API should list categories");

    assert!(!categories.is_empty());
    assert!(
        categories.iter().any(|c| c.slug == "laptops"),
        "the live catalog is known to carry a laptops category"
    );
}

#[tokio::test]
#[ignore = "Requires network access to dummyjson.com"]
async fn test_product_pages_respect_limit_and_skip() {
    let catalog = client();

    let first = catalog
        .products(5, 0)
        .await
        .expect("the catalog API should page products");
    assert_eq!(first.products.len(), 5);
    assert_eq!(first.skip, 0);

    let second = catalog
        .products(5, 5)
        .await
        .expect("the catalog API should page products");
    assert_eq!(second.skip, 5);
    assert_ne!(
        first.products.first().map(|p| p.id),
        second.products.first().map(|p| p.id),
        "pages at different offsets should start with different products"
    );
}

#[tokio::test]
#[ignore = "Requires network access to dummyjson.com"]
async fn test_category_listing_stays_in_category() {
    let page = client()
        .products_in_category("laptops")
        .await
        .expect("the catalog API should filter by category");

    assert!(!page.products.is_empty());
    assert!(page.products.iter().all(|p| p.category == "laptops"));
}

#[tokio::test]
#[ignore = "Requires network access to dummyjson.com"]
async fn test_single_product_fetch() {
    let product = client()
        .product(ProductId::new(1))
        .await
        .expect("product 1 should exist in the live catalog");

    assert_eq!(product.id, ProductId::new(1));
    assert!(!product.title.is_empty());
    assert!(product.discounted_price() <= product.list_price());
}

#[tokio::test]
#[ignore = "Requires network access to dummyjson.com"]
async fn test_missing_product_maps_to_not_found() {
    let err = client()
        .product(ProductId::new(999_999))
        .await
        .expect_err("a nonsense ID should not resolve");
    assert!(matches!(err, CatalogError::NotFound(_)));
}
