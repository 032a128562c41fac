//! Cartwheel CLI - the storefront demo from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Create the local account and sign in
//! cartwheel auth signup -e ava@example.com -p hunter2 -n "Ava Jones"
//!
//! # Browse the catalog
//! cartwheel catalog categories
//! cartwheel catalog products --limit 5 --category laptops
//! cartwheel catalog show 78
//!
//! # Buy something
//! cartwheel checkout --product 78 --quantity 2 \
//!     --name "Ava Jones" --email ava@example.com --phone 555-0134 \
//!     --address "7 Orchard Lane" --city Springfield --zip 62704 \
//!     --card-number 4111111111111111 --expiry 1227 --cvv 123
//! ```
//!
//! # Commands
//!
//! - `auth` - Sign up, log in, log out, show the session
//! - `catalog` - Browse categories and products
//! - `checkout` - Walk the purchase flow for one product

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

use cartwheel_storefront::config::AppConfig;
use cartwheel_storefront::state::AppState;

mod commands;

#[derive(Parser)]
#[command(name = "cartwheel")]
#[command(author, version, about = "Cartwheel storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the local account and session
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
    /// Browse the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Walk the purchase flow for one product
    Checkout(commands::checkout::CheckoutArgs),
}

#[derive(Subcommand)]
enum AuthAction {
    /// Create the local account and sign in
    Signup {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Account password (stored as entered; this is a demo)
        #[arg(short, long)]
        password: String,

        /// Display name
        #[arg(short, long, default_value = "")]
        name: String,
    },
    /// Log in as the stored account
    Login {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },
    /// End the persisted session
    Logout,
    /// Show who is logged in
    Status,
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List every category
    Categories,
    /// List a page of products
    Products {
        /// Page size
        #[arg(long, default_value_t = 10)]
        limit: u32,

        /// Products to skip before the page
        #[arg(long, default_value_t = 0)]
        skip: u32,

        /// Restrict to one category slug
        #[arg(long)]
        category: Option<String>,
    },
    /// Show one product in detail
    Show {
        /// Product ID
        id: i64,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    let state = AppState::new(config);

    match cli.command {
        Commands::Auth { action } => match action {
            AuthAction::Signup {
                email,
                password,
                name,
            } => {
                commands::auth::signup(&state, &email, &password, &name).await?;
            }
            AuthAction::Login { email, password } => {
                commands::auth::login(&state, &email, &password).await?;
            }
            AuthAction::Logout => commands::auth::logout(&state).await,
            AuthAction::Status => commands::auth::status(&state).await,
        },
        Commands::Catalog { action } => match action {
            CatalogAction::Categories => commands::catalog::categories(&state).await?,
            CatalogAction::Products {
                limit,
                skip,
                category,
            } => {
                commands::catalog::products(&state, limit, skip, category.as_deref()).await?;
            }
            CatalogAction::Show { id } => commands::catalog::show(&state, id).await?,
        },
        Commands::Checkout(args) => commands::checkout::run(&state, &args).await?,
    }
    Ok(())
}
