//! Cache types for catalog API responses.

use cartwheel_core::ProductId;

use super::types::{Category, Product, ProductPage};

/// Cache key for catalog lookups.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Categories,
    Page { limit: u32, skip: u32 },
    CategoryPage(String),
    Product(ProductId),
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Categories(Vec<Category>),
    Page(ProductPage),
    Product(Box<Product>),
}
