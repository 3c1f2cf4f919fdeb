//! # Seed Data
//!
//! Loads the demo menu into an empty store.
//!
//! ## Seeded Catalog
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Sandwiches   X Burger 5.00 · X Egg 4.50 · X Bacon 7.00                │
//! │  Extras       Fries 2.00 · Soft Drink 2.50                             │
//! │                                                                         │
//! │  Complete Combo 20%   sandwich + fries + soft drink                    │
//! │  Drink Combo    15%   sandwich + soft drink                            │
//! │  Fries Combo    10%   sandwich + fries                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both seeders are idempotent: the catalog is skipped once any category
//! exists, the rules once any rule exists.

use griddle_core::{default_rules, Category, Discount, DiscountCondition, Money, Product};
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::error::StoreResult;
use crate::store::Store;

const SANDWICHES: &[(&str, i64)] = &[("X Burger", 500), ("X Egg", 450), ("X Bacon", 700)];

/// Seeds categories, products and combo discounts.
///
/// Returns `false` when the store already had a catalog.
pub fn seed_catalog(store: &Store) -> StoreResult<bool> {
    if !store.categories().is_empty()? {
        debug!("Catalog already present, skipping seed");
        return Ok(false);
    }

    let extras = Category::new("Extras")?;
    let sandwiches = Category::new("Sandwiches")?;
    store.categories().create(extras.clone())?;
    store.categories().create(sandwiches.clone())?;

    for &(name, cents) in SANDWICHES {
        store
            .products()
            .create(Product::new(name, &sandwiches, Money::from_cents(cents))?)?;
    }

    let fries = Product::new("Fries", &extras, Money::from_cents(200))?;
    let soft_drink = Product::new("Soft Drink", &extras, Money::from_cents(250))?;
    store.products().create(fries.clone())?;
    store.products().create(soft_drink.clone())?;

    let any_sandwich = DiscountCondition::for_category(sandwiches.id(), 1)?;
    let with_fries = DiscountCondition::for_product(fries.id(), 1)?;
    let with_drink = DiscountCondition::for_product(soft_drink.id(), 1)?;

    let combos = [
        ("Complete Combo", 20, vec![any_sandwich, with_fries, with_drink]),
        ("Drink Combo", 15, vec![any_sandwich, with_drink]),
        ("Fries Combo", 10, vec![any_sandwich, with_fries]),
    ];
    for (name, percentage, conditions) in combos {
        let mut discount = Discount::new(name, Decimal::from(percentage))?;
        for condition in conditions {
            discount.add_condition(condition);
        }
        store.discounts().create(discount)?;
    }

    info!(
        categories = 2,
        products = SANDWICHES.len() + 2,
        discounts = 3,
        "Catalog seeded"
    );
    Ok(true)
}

/// Seeds the house quantity rules against whatever catalog is present.
///
/// Returns the number of rules created.
pub fn seed_default_rules(store: &Store) -> StoreResult<usize> {
    if !store.rules().is_empty()? {
        debug!("Quantity rules already present, skipping seed");
        return Ok(0);
    }

    let categories = store.categories().list()?;
    let products = store.products().list()?;

    let rules = default_rules(
        |name| {
            categories
                .iter()
                .find(|c| c.name().eq_ignore_ascii_case(name))
                .map(Category::id)
        },
        |name| {
            products
                .iter()
                .find(|p| p.name().eq_ignore_ascii_case(name))
                .map(Product::id)
        },
    )?;

    let count = rules.len();
    for rule in rules {
        store.rules().create(rule)?;
    }

    info!(count, "Default quantity rules were created");
    Ok(count)
}
