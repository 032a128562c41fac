//! One-shot checkout command.
//!
//! Walks the whole purchase flow in a single invocation: shipping details,
//! payment method, the simulated processing pause, then the confirmation.
//! Requires a logged-in session; prices come from the live catalog.
//!
//! # Usage
//!
//! ```bash
//! cartwheel checkout --product 78 --quantity 2 \
//!     --name "Ava Jones" --email ava@example.com --phone 555-0134 \
//!     --address "7 Orchard Lane" --city Springfield --zip 62704 \
//!     --card-number 4111111111111111 --expiry 1227 --cvv 123
//!
//! # UPI and wallet skip the card fields
//! cartwheel checkout --product 78 --method upi \
//!     --name "Ava Jones" --email ava@example.com --phone 555-0134 \
//!     --address "7 Orchard Lane" --city Springfield --zip 62704
//! ```

use clap::Args;
use thiserror::Error;

use cartwheel_core::ProductId;
use cartwheel_storefront::catalog::CatalogError;
use cartwheel_storefront::checkout::{CheckoutError, CheckoutSession, PaymentMethod};
use cartwheel_storefront::state::AppState;

/// Arguments for one checkout run.
#[derive(Debug, Args)]
pub struct CheckoutArgs {
    /// Product ID to purchase
    #[arg(long)]
    pub product: i64,

    /// Quantity
    #[arg(long, default_value_t = 1)]
    pub quantity: u32,

    /// Payment method: card, upi, or wallet
    #[arg(long, default_value = "card")]
    pub method: PaymentMethod,

    /// Full name for shipping
    #[arg(long = "name")]
    pub full_name: String,

    /// Contact email
    #[arg(long)]
    pub email: String,

    /// Contact phone
    #[arg(long)]
    pub phone: String,

    /// Street address
    #[arg(long)]
    pub address: String,

    /// City
    #[arg(long)]
    pub city: String,

    /// Postal code
    #[arg(long = "zip")]
    pub zip_code: String,

    /// Card number (card payments only)
    #[arg(long)]
    pub card_number: Option<String>,

    /// Card expiry, digits only, as MMYY (card payments only)
    #[arg(long)]
    pub expiry: Option<String>,

    /// Card security code (card payments only)
    #[arg(long)]
    pub cvv: Option<String>,

    /// Name on the card (defaults to the shipping name)
    #[arg(long)]
    pub card_name: Option<String>,
}

/// Errors that can occur while driving a checkout.
#[derive(Debug, Error)]
pub enum OrderError {
    /// No persisted session to restore.
    #[error("not logged in (run 'cartwheel auth login' first)")]
    NotLoggedIn,

    /// Product lookup failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The flow rejected the input.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),
}

/// Walk the full purchase flow for one product.
pub async fn run(state: &AppState, args: &CheckoutArgs) -> Result<(), OrderError> {
    let Some(user) = state.session().restore_session().await else {
        return Err(OrderError::NotLoggedIn);
    };

    let product = state.catalog().product(ProductId::new(args.product)).await?;

    let mut session = CheckoutSession::new(product.discounted_price());
    session.set_quantity(args.quantity)?;
    session.set_payment_method(args.method);

    let shipping = session.shipping_mut();
    shipping.full_name = args.full_name.clone();
    shipping.email = args.email.clone();
    shipping.phone = args.phone.clone();
    shipping.address = args.address.clone();
    shipping.city = args.city.clone();
    shipping.zip_code = args.zip_code.clone();
    session.submit_details()?;

    if args.method == PaymentMethod::Card {
        session.enter_card_number(args.card_number.as_deref().unwrap_or_default());
        session.enter_expiry_date(args.expiry.as_deref().unwrap_or_default());
        let card = session.card_mut();
        card.cvv = args.cvv.clone().unwrap_or_default();
        card.card_name = args
            .card_name
            .clone()
            .unwrap_or_else(|| args.full_name.clone());
    }
    session.submit_payment()?;

    #[allow(clippy::print_stdout)]
    {
        println!(
            "Processing {} x{} ({}) via {}...",
            product.title,
            session.quantity(),
            session.total(),
            args.method
        );
    }

    let confirmation = session.process(state.clock().as_ref()).await?;

    #[allow(clippy::print_stdout)]
    {
        println!("Order {} confirmed for {}.", confirmation.order_id, user.email);
        println!("  total:     {}", confirmation.total);
        println!("  delivery:  {}", confirmation.delivery_estimate);
    }
    Ok(())
}
