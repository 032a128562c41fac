//! Catalog browsing commands.
//!
//! # Usage
//!
//! ```bash
//! # List every category
//! cartwheel catalog categories
//!
//! # Page through products
//! cartwheel catalog products --limit 5 --skip 10
//!
//! # Products in one category
//! cartwheel catalog products --category laptops
//!
//! # One product in detail
//! cartwheel catalog show 78
//! ```

use cartwheel_core::ProductId;
use cartwheel_storefront::catalog::CatalogError;
use cartwheel_storefront::state::AppState;

/// List every category.
pub async fn categories(state: &AppState) -> Result<(), CatalogError> {
    let categories = state.catalog().categories().await?;

    #[allow(clippy::print_stdout)]
    {
        for category in &categories {
            println!("{:<24}  {}", category.slug, category.name);
        }
        println!("{} categories", categories.len());
    }
    Ok(())
}

/// List a page of products, optionally restricted to one category.
pub async fn products(
    state: &AppState,
    limit: u32,
    skip: u32,
    category: Option<&str>,
) -> Result<(), CatalogError> {
    let page = match category {
        Some(slug) => state.catalog().products_in_category(slug).await?,
        None => state.catalog().products(limit, skip).await?,
    };

    #[allow(clippy::print_stdout)]
    {
        for product in &page.products {
            println!(
                "{:>6}  {:<48}  {:>10}",
                product.id.as_i64(),
                product.title,
                product.discounted_price().to_string(),
            );
        }
        println!("showing {} of {} products", page.products.len(), page.total);
    }
    Ok(())
}

/// Show one product in detail.
pub async fn show(state: &AppState, id: i64) -> Result<(), CatalogError> {
    let product = state.catalog().product(ProductId::new(id)).await?;

    #[allow(clippy::print_stdout)]
    {
        println!("{} (#{})", product.title, product.id);
        if let Some(brand) = &product.brand {
            println!("  brand:     {brand}");
        }
        println!("  category:  {}", product.category);
        println!("  price:     {}", product.discounted_price());
        println!(
            "  list:      {} ({}% off)",
            product.list_price(),
            product.discount_percentage
        );
        println!("  rating:    {:.2}", product.rating);
        println!("  stock:     {}", product.stock);
        if !product.description.is_empty() {
            println!();
            println!("{}", product.description);
        }
    }
    Ok(())
}
