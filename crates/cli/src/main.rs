//! Mangaba CLI - command-line storefront for the Mangaba marketplace.
//!
//! # Usage
//!
//! ```bash
//! # Sign in (persisted across invocations)
//! mangaba auth login -e ana@example.com -p s3cret
//!
//! # Browse the catalog
//! mangaba products --search fone
//!
//! # Cart and checkout
//! mangaba cart add <product-id> --quantity 2
//! mangaba cart show
//! mangaba checkout --method instant --address <address-id>
//! ```
//!
//! # Commands
//!
//! - `auth` - login, logout, registration, current user
//! - `products` / `shop` - catalog browsing
//! - `cart` - show, add, set quantity, remove
//! - `checkout` - place an order from the current cart
//! - `orders` - order history
//! - `address` - address book, with postal-code autofill
//! - `favorites` - toggle and list favorites

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mangaba_client::{AppState, ClientConfig};

mod commands;

#[derive(Parser)]
#[command(name = "mangaba")]
#[command(author, version, about = "Mangaba marketplace storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the signed-in session
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
    /// List catalog products
    Products {
        /// Filter by name
        #[arg(short, long)]
        search: Option<String>,

        /// Restrict to one shop
        #[arg(long)]
        shop: Option<String>,
    },
    /// Show a shop and its products
    Shop {
        /// Shop ID
        id: String,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Place an order from the current cart
    Checkout {
        /// Payment method (`card` or `instant`)
        #[arg(short, long)]
        method: String,

        /// Delivery address ID
        #[arg(short, long)]
        address: String,

        /// Card number (card payments)
        #[arg(long)]
        card_number: Option<String>,

        /// Name on the card (card payments)
        #[arg(long)]
        card_holder: Option<String>,

        /// Card expiry, MM/YY (card payments)
        #[arg(long)]
        card_expiry: Option<String>,

        /// Card security code (card payments)
        #[arg(long)]
        card_cvv: Option<String>,
    },
    /// Show order history
    Orders,
    /// Manage delivery addresses
    Address {
        #[command(subcommand)]
        action: AddressAction,
    },
    /// Manage favorites
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },
    /// Look up a postal code
    Postal {
        /// 8-digit postal code, with or without the dash
        code: String,
    },
}

#[derive(Subcommand)]
enum AuthAction {
    /// Sign in with email and password
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },
    /// Sign out and forget the persisted session
    Logout,
    /// Register a new account with its first address
    Register(commands::auth::RegisterArgs),
    /// Update profile fields of the signed-in user
    Update(commands::auth::UpdateArgs),
    /// Show the signed-in user
    Whoami,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the current cart
    Show,
    /// Add a product to the cart
    Add {
        /// Product ID
        product: String,

        /// Quantity
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Set the quantity of a cart line (zero removes it)
    Set {
        /// Cart line ID
        line: String,

        /// New quantity
        quantity: i32,
    },
    /// Remove a cart line
    Remove {
        /// Cart line ID
        line: String,
    },
}

#[derive(Subcommand)]
enum AddressAction {
    /// List the address book
    List,
    /// Add an address, pre-filled from the postal code
    Add(commands::address::AddArgs),
    /// Delete an address
    Remove {
        /// Address ID
        id: String,
    },
}

#[derive(Subcommand)]
enum FavoritesAction {
    /// List favorite products
    List,
    /// Toggle a product's favorite flag
    Toggle {
        /// Product ID
        product: String,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = ClientConfig::from_env()?;
    let state = AppState::new(config)?;

    // Every invocation starts from the persisted session.
    state.session().restore().await;

    match cli.command {
        Commands::Auth { action } => match action {
            AuthAction::Login { email, password } => {
                commands::auth::login(&state, &email, password).await?;
            }
            AuthAction::Logout => commands::auth::logout(&state).await,
            AuthAction::Register(args) => commands::auth::register(&state, args).await?,
            AuthAction::Update(args) => commands::auth::update(&state, args).await?,
            AuthAction::Whoami => commands::auth::whoami(&state),
        },
        Commands::Products { search, shop } => {
            commands::catalog::products(&state, search.as_deref(), shop.as_deref()).await?;
        }
        Commands::Shop { id } => commands::catalog::shop(&state, &id).await?,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&state).await?,
            CartAction::Add { product, quantity } => {
                commands::cart::add(&state, &product, quantity).await?;
            }
            CartAction::Set { line, quantity } => {
                commands::cart::set_quantity(&state, &line, quantity).await?;
            }
            CartAction::Remove { line } => commands::cart::remove(&state, &line).await?,
        },
        Commands::Checkout {
            method,
            address,
            card_number,
            card_holder,
            card_expiry,
            card_cvv,
        } => {
            let card = commands::checkout::CardArgs {
                number: card_number,
                holder: card_holder,
                expiry: card_expiry,
                cvv: card_cvv,
            };
            commands::checkout::run(&state, &method, &address, card).await?;
        }
        Commands::Orders => commands::orders::history(&state).await?,
        Commands::Address { action } => match action {
            AddressAction::List => commands::address::list(&state).await?,
            AddressAction::Add(args) => commands::address::add(&state, args).await?,
            AddressAction::Remove { id } => commands::address::remove(&state, &id).await?,
        },
        Commands::Favorites { action } => match action {
            FavoritesAction::List => commands::favorites::list(&state).await?,
            FavoritesAction::Toggle { product } => {
                commands::favorites::toggle(&state, &product).await?;
            }
        },
        Commands::Postal { code } => commands::address::lookup(&state, &code).await?,
    }

    Ok(())
}
