use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use axum_cart_api::{
    dto::{cart::CartView, checkout::HistoryEntry},
    routes::params::QuantityAction,
    storefront::{
        CartApiClient, CatalogClient, Product,
        catalog::{DEFAULT_CATALOG_URL, categories, filter_by_category},
    },
};

/// Terminal storefront: browse the catalog and drive the cart API.
#[derive(Debug, Parser)]
#[command(name = "storefront", version)]
struct Cli {
    /// Base URL of the cart API.
    #[arg(long, env = "CART_API_URL", default_value = "http://127.0.0.1:3000")]
    api_url: String,

    /// Product catalog endpoint.
    #[arg(long, env = "CATALOG_URL", default_value = DEFAULT_CATALOG_URL)]
    catalog_url: String,

    /// Name or email identifying the shopper.
    #[arg(long, short, env = "CART_USER")]
    user: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List catalog products, optionally restricted to one category.
    Products {
        #[arg(long)]
        category: Option<String>,
    },
    /// List catalog categories.
    Categories,
    /// Show one product in detail.
    Show { id: u64 },
    /// Add a catalog product to the cart.
    Add {
        product_id: u64,
        #[arg(long, default_value_t = 1)]
        quantity: i32,
    },
    /// Show the open cart.
    Cart,
    /// Increase an item's quantity by one.
    Increase { id: String },
    /// Decrease an item's quantity by one, removing it at zero.
    Decrease { id: String },
    /// Remove units of an item from the cart.
    Remove {
        id: String,
        #[arg(default_value_t = 1)]
        quantity: i32,
    },
    /// Check out the open cart.
    Checkout,
    /// Show past checkouts, newest first.
    History,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let http = reqwest::Client::builder()
        .user_agent(concat!("storefront/", env!("CARGO_PKG_VERSION")))
        .build()?;
    let catalog = CatalogClient::new(http.clone(), &cli.catalog_url)?;
    let api = CartApiClient::new(http, &cli.api_url)?;
    let user = || {
        cli.user
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .context("no shopper given: pass --user or set CART_USER")
    };

    match &cli.command {
        Command::Products { category } => {
            let products = catalog.list_products().await?;
            for product in filter_by_category(&products, category.as_deref()) {
                println!("{:>4}  {:>9.2}  {}", product.id, product.price, product.title);
            }
        }
        Command::Categories => {
            let products = catalog.list_products().await?;
            for category in categories(&products) {
                println!("{category}");
            }
        }
        Command::Show { id } => {
            let product = catalog.get_product(*id).await?;
            print_product(&product);
        }
        Command::Add {
            product_id,
            quantity,
        } => {
            let user = user()?;
            let product = catalog.get_product(*product_id).await?;
            let message = api.add_to_cart(user, &product, *quantity).await?;
            println!("{message}: {}", product.title);
        }
        Command::Cart => {
            let cart = api.get_cart(user()?).await?;
            print_cart(&cart);
        }
        Command::Increase { id } => {
            let cart = api.update_quantity(user()?, id, QuantityAction::Increase).await?;
            print_cart(&cart);
        }
        Command::Decrease { id } => {
            let cart = api.update_quantity(user()?, id, QuantityAction::Decrease).await?;
            print_cart(&cart);
        }
        Command::Remove { id, quantity } => {
            let user = user()?;
            api.remove_item(user, id, *quantity).await?;
            print_cart(&api.get_cart(user).await?);
        }
        Command::Checkout => {
            let receipt = api.checkout(user()?).await?;
            println!("Checkout successful");
            println!("Total: ${:.2}", receipt.total_price);
            println!("Time:  {}", receipt.timestamp.format("%Y-%m-%d %H:%M:%S UTC"));
        }
        Command::History => {
            let history = api.history(user()?).await?;
            if history.is_empty() {
                println!("No checkout history yet.");
            }
            for entry in &history {
                print_history_entry(entry);
            }
        }
    }

    Ok(())
}

fn print_product(product: &Product) {
    println!("{} (#{})", product.title, product.id);
    println!("  ${:.2}  [{}]", product.price, product.category);
    if !product.description.is_empty() {
        println!("  {}", product.description);
    }
    if !product.image.is_empty() {
        println!("  {}", product.image);
    }
}

fn print_cart(cart: &CartView) {
    if cart.items.is_empty() {
        println!("Your cart is empty.");
        return;
    }
    for item in &cart.items {
        println!(
            "{:>6}  {:<40}  ${:>8.2} x {:<3} = ${:>9.2}",
            item.id,
            item.name,
            item.price,
            item.quantity,
            item.price * f64::from(item.quantity)
        );
    }
    println!("Total: ${:.2}", cart.total_price);
}

fn print_history_entry(entry: &HistoryEntry) {
    println!(
        "{}  ${:.2}",
        entry.created_at.format("%Y-%m-%d %H:%M:%S"),
        entry.total_price
    );
    let items = entry.products.items();
    if items.is_empty() {
        println!("    (items unavailable)");
    }
    for item in items {
        println!("    {} x{}  ${:.2}", item.name, item.quantity, item.price);
    }
}
