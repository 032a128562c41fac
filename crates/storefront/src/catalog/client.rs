//! Catalog API client implementation.
//!
//! Plain JSON-over-HTTP with `reqwest`; responses are cached with `moka`
//! (5-minute TTL) since the demo catalog changes rarely and the products
//! screen refetches on every category switch.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use cartwheel_core::ProductId;

use super::CatalogError;
use super::cache::{CacheKey, CacheValue};
use super::types::{Category, Product, ProductPage};
use crate::config::AppConfig;

// =============================================================================
// CatalogClient
// =============================================================================

/// Client for the public catalog API.
///
/// Provides read-only access to categories, product pages, and product
/// detail. Cheap to clone; clones share the HTTP pool and the cache.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: String,
    cache: Cache<CacheKey, CacheValue>,
}

impl CatalogClient {
    /// Create a new catalog client from the app configuration.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be constructed (TLS backend
    /// failure).
    #[must_use]
    pub fn new(config: &AppConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            inner: Arc::new(CatalogClientInner {
                client,
                base_url: config.catalog_url.as_str().trim_end_matches('/').to_owned(),
                cache,
            }),
        }
    }

    // =========================================================================
    // Category Methods
    // =========================================================================

    /// Get all product categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<Category>, CatalogError> {
        if let Some(CacheValue::Categories(categories)) =
            self.inner.cache.get(&CacheKey::Categories).await
        {
            debug!("Cache hit for categories");
            return Ok(categories);
        }

        let categories: Vec<Category> = self.fetch_json("/products/categories").await?;

        self.inner
            .cache
            .insert(CacheKey::Categories, CacheValue::Categories(categories.clone()))
            .await;

        Ok(categories)
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Get a page of products across all categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn products(&self, limit: u32, skip: u32) -> Result<ProductPage, CatalogError> {
        let cache_key = CacheKey::Page { limit, skip };

        if let Some(CacheValue::Page(page)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product page");
            return Ok(page);
        }

        let page: ProductPage = self
            .fetch_json(&format!("/products?limit={limit}&skip={skip}"))
            .await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Page(page.clone()))
            .await;

        Ok(page)
    }

    /// Get the products in one category.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(slug = %slug))]
    pub async fn products_in_category(&self, slug: &str) -> Result<ProductPage, CatalogError> {
        let cache_key = CacheKey::CategoryPage(slug.to_owned());

        if let Some(CacheValue::Page(page)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for category page");
            return Ok(page);
        }

        let page: ProductPage = self
            .fetch_json(&format!(
                "/products/category/{}",
                urlencoding::encode(slug)
            ))
            .await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Page(page.clone()))
            .await;

        Ok(page)
    }

    /// Get a single product by ID.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` for an unknown ID, or another error
    /// if the API request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        let cache_key = CacheKey::Product(id);

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let product: Product = self.fetch_json(&format!("/products/{id}")).await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// GET `path` and decode the JSON body.
    ///
    /// Reads the body as text before decoding so a mismatched shape can be
    /// logged with the payload that caused it.
    async fn fetch_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, CatalogError> {
        let url = format!("{}{path}", self.inner.base_url);
        let response = self.inner.client.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(path.to_owned()));
        }

        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "catalog API returned non-success status"
            );
            return Err(CatalogError::Status {
                status,
                path: path.to_owned(),
            });
        }

        match serde_json::from_str(&body) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %body.chars().take(500).collect::<String>(),
                    "Failed to parse catalog response"
                );
                Err(CatalogError::Parse(e))
            }
        }
    }
}
