//! # Griddle Checkout Demo
//!
//! Seeds an in-memory store and walks one cart through checkout.
//!
//! ## Usage
//! ```bash
//! cargo run -p griddle-store --bin griddle-demo
//!
//! # Custom config file, verbose engine output
//! RUST_LOG=griddle_core=trace cargo run -p griddle-store --bin griddle-demo -- --config ./griddle.toml
//!
//! # Print summaries as JSON
//! cargo run -p griddle-store --bin griddle-demo -- --json
//! ```

use std::env;
use std::path::PathBuf;

use griddle_core::{LineItem, OrderStatus, Product};
use griddle_store::{seed, CartSummary, Store, StoreConfig, StoreError, Storefront};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut config_path: Option<PathBuf> = None;
    let mut json = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--json" => json = true,
            "--help" | "-h" => {
                println!("Griddle checkout demo");
                println!();
                println!("Usage: griddle-demo [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --config <PATH>  Config file (default: platform config dir)");
                println!("      --json           Print cart and order as JSON");
                println!("  -h, --help           Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    init_tracing();

    let config = StoreConfig::load(config_path)?;
    info!(store = %config.store.name, "Starting demo");

    let store = Store::shared();
    if config.seed.catalog {
        seed::seed_catalog(&store)?;
    }
    if config.seed.default_rules {
        seed::seed_default_rules(&store)?;
    }

    let storefront = Storefront::new(store.clone());
    let product = |name: &str| -> Result<Product, StoreError> {
        store
            .products()
            .find_by_name(name)?
            .ok_or_else(|| StoreError::not_found("Product", name))
    };

    let burger = product("X Burger")?;
    let bacon = product("X Bacon")?;
    let fries = product("Fries")?;
    let drink = product("Soft Drink")?;

    let cart_id = storefront.create_cart()?.cart_id;
    storefront.add_to_cart(cart_id, burger.id(), 1)?;
    storefront.add_to_cart(cart_id, fries.id(), 1)?;
    let summary = storefront.add_to_cart(cart_id, drink.id(), 1)?;

    println!("{}", config.store.name);
    println!("================================");
    print_summary(&config, &summary, json)?;

    // With the house rules loaded this is refused and the cart is unchanged.
    if let Err(err) = storefront.add_to_cart(cart_id, bacon.id(), 1) {
        println!();
        println!("Could not add {}: {}", bacon.name(), err);
    }

    let order = storefront.place_order(cart_id)?;
    storefront.update_order_status(order.id(), OrderStatus::Confirmed)?;
    let order = storefront.update_order_status(order.id(), OrderStatus::Preparing)?;

    println!();
    println!("Order {} ({})", order.id(), order.status());
    println!("  placed   {}", order.created_at().format("%Y-%m-%d %H:%M:%S UTC"));
    println!("  subtotal {}", config.format_money(order.subtotal()));
    if let Some(discount) = order.discount_amount() {
        println!("  discount {}", config.format_money(discount));
    }
    println!("  total    {}", config.format_money(order.total()));
    if json {
        println!("{}", serde_json::to_string_pretty(&order)?);
    }

    Ok(())
}

fn print_summary(
    config: &StoreConfig,
    summary: &CartSummary,
    json: bool,
) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
        return Ok(());
    }

    for item in &summary.items {
        println!(
            "  {:>3} x {:<12} {}",
            item.quantity(),
            item.product_name(),
            config.format_money(item.subtotal())
        );
    }
    println!("  subtotal {}", config.format_money(summary.pricing.subtotal));
    if let (Some(amount), Some(name)) = (
        summary.pricing.discount_amount,
        summary.pricing.discount_name.as_deref(),
    ) {
        println!("  {} -{}", name, config.format_money(amount));
    }
    println!("  total    {}", config.format_money(summary.pricing.total));
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=griddle_core=trace` - Show every quantity rule evaluation
/// - Default: INFO, DEBUG for griddle crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,griddle=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
