//! Public catalog API client.
//!
//! # Architecture
//!
//! - Read-only JSON REST client over `reqwest`
//! - The catalog API is the source of truth - no local product data at all
//! - In-memory caching via `moka` for API responses (5 minute TTL)
//!
//! The catalog is intentionally dumb: fetch, render, done. The interesting
//! state lives in [`CategoryFeed`], which keeps a stale response from a slow
//! category switch from clobbering a newer one.
//!
//! # Example
//!
//! ```rust,ignore
//! use cartwheel_storefront::catalog::CatalogClient;
//!
//! let client = CatalogClient::new(&config);
//!
//! let categories = client.categories().await?;
//! let page = client.products(10, 0).await?;
//! let detail = client.product(page.products[0].id).await?;
//! ```

mod cache;
mod client;
mod feed;
pub mod types;

pub use client::CatalogClient;
pub use feed::{CategoryFeed, FetchTicket};
pub use types::{Category, Product, ProductPage};

use thiserror::Error;

/// Errors from the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The API answered with a non-success status.
    #[error("catalog returned HTTP {status} for {path}")]
    Status {
        /// Response status code.
        status: reqwest::StatusCode,
        /// Request path, for the log line.
        path: String,
    },
}
