//! Catalog wire types.
//!
//! Shapes mirror the public catalog API's camelCase JSON, trimmed to the
//! fields the screens and checkout actually consume. These types only
//! deserialize; nothing is ever written back to the catalog.

use rust_decimal::Decimal;
use serde::Deserialize;

use cartwheel_core::{Price, ProductId};

/// A product category entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    /// URL-safe identifier used in the category products endpoint.
    pub slug: String,
    /// Human-readable name for the category chip.
    pub name: String,
    /// Canonical endpoint URL for this category's products.
    pub url: String,
}

/// One product as served by the catalog.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// List price before any discount.
    pub price: Decimal,
    /// Discount percentage; `12.96` means 12.96% off.
    #[serde(default)]
    pub discount_percentage: Decimal,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub stock: i64,
    /// Some catalog entries carry no brand.
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub thumbnail: String,
}

impl Product {
    /// List price as a [`Price`].
    #[must_use]
    pub const fn list_price(&self) -> Price {
        Price::new(self.price)
    }

    /// Effective price after the catalog's discount, rounded to cents.
    ///
    /// This is the unit price checkout charges; the product screen shows it
    /// next to the struck-through list price.
    #[must_use]
    pub fn discounted_price(&self) -> Price {
        self.list_price().discounted(self.discount_percentage)
    }
}

/// One page of products, as returned by the list endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    /// Total rows on the server, for "showing X of Y".
    pub total: u64,
    /// Offset this page starts at.
    pub skip: u64,
    /// Page size the server applied.
    pub limit: u64,
}
