//! End-to-end checkout against the seeded demo menu.

use std::sync::Arc;
use std::thread;

use griddle_core::{DomainError, Money, OrderStatus, Product};
use griddle_store::{seed, Store, StoreError, Storefront};

fn seeded() -> (Arc<Store>, Storefront) {
    let store = Store::shared();
    seed::seed_catalog(&store).unwrap();
    seed::seed_default_rules(&store).unwrap();
    let storefront = Storefront::new(store.clone());
    (store, storefront)
}

fn product(store: &Store, name: &str) -> Product {
    store.products().find_by_name(name).unwrap().unwrap()
}

#[test]
fn test_complete_combo_checkout() {
    let (store, sf) = seeded();
    let burger = product(&store, "X Burger");
    let fries = product(&store, "Fries");
    let drink = product(&store, "Soft Drink");

    let cart_id = sf.create_cart().unwrap().cart_id;
    sf.add_to_cart(cart_id, burger.id(), 1).unwrap();

    let summary = sf.add_to_cart(cart_id, fries.id(), 1).unwrap();
    assert_eq!(summary.pricing.discount_name.as_deref(), Some("Fries Combo"));

    let summary = sf.add_to_cart(cart_id, drink.id(), 1).unwrap();
    // 5.00 + 2.00 + 2.50, 20% off
    assert_eq!(summary.pricing.subtotal, Money::from_cents(950));
    assert_eq!(summary.pricing.discount_name.as_deref(), Some("Complete Combo"));
    assert_eq!(summary.pricing.discount_amount, Some(Money::from_cents(190)));
    assert_eq!(summary.pricing.total, Money::from_cents(760));

    let order = sf.place_order(cart_id).unwrap();
    assert_eq!(order.items().len(), 3);
    assert_eq!(order.total(), Money::from_cents(760));
    assert_eq!(order.status(), OrderStatus::Pending);
}

#[test]
fn test_house_rules_block_second_sandwich() {
    let (store, sf) = seeded();
    let burger = product(&store, "X Burger");
    let bacon = product(&store, "X Bacon");

    let cart_id = sf.create_cart().unwrap().cart_id;
    sf.add_to_cart(cart_id, burger.id(), 1).unwrap();

    let err = sf.add_to_cart(cart_id, bacon.id(), 1).unwrap_err();
    assert!(matches!(err, StoreError::Domain(DomainError::RuleViolation(_))));
    assert!(err.is_rejection());

    let err = sf.add_to_cart(cart_id, burger.id(), 1).unwrap_err();
    assert_eq!(
        err.to_string(),
        "You already have sandwich in your cart. Only 1 per order is allowed."
    );

    let summary = sf.cart_summary(cart_id).unwrap();
    assert_eq!(summary.pricing.total_items, 1);
}

#[test]
fn test_removing_line_drops_discount() {
    let (store, sf) = seeded();
    let egg = product(&store, "X Egg");
    let drink = product(&store, "Soft Drink");

    let cart_id = sf.create_cart().unwrap().cart_id;
    sf.add_to_cart(cart_id, egg.id(), 1).unwrap();
    let summary = sf.add_to_cart(cart_id, drink.id(), 1).unwrap();
    assert_eq!(summary.pricing.discount_name.as_deref(), Some("Drink Combo"));

    let summary = sf.remove_from_cart(cart_id, egg.id()).unwrap();
    assert_eq!(summary.pricing.discount_name, None);
    assert_eq!(summary.pricing.discount_amount, None);
    assert_eq!(summary.pricing.total, Money::from_cents(250));

    assert!(matches!(
        sf.remove_from_cart(cart_id, egg.id()),
        Err(StoreError::Domain(DomainError::ItemNotFound))
    ));
}

#[test]
fn test_deactivated_discount_is_ignored_at_checkout() {
    let (store, sf) = seeded();
    let burger = product(&store, "X Burger");
    let fries = product(&store, "Fries");

    let fries_combo = sf
        .list_discounts()
        .unwrap()
        .into_iter()
        .find(|d| d.name() == "Fries Combo")
        .unwrap();
    sf.update_discount(
        fries_combo.id(),
        &griddle_store::DiscountUpdate {
            is_active: Some(false),
            ..Default::default()
        },
    )
    .unwrap();

    let cart_id = sf.create_cart().unwrap().cart_id;
    sf.add_to_cart(cart_id, burger.id(), 1).unwrap();
    sf.add_to_cart(cart_id, fries.id(), 1).unwrap();

    let order = sf.place_order(cart_id).unwrap();
    assert_eq!(order.discount_amount(), None);
    assert_eq!(order.total(), Money::from_cents(700));
}

#[test]
fn test_cleared_rules_allow_bigger_orders() {
    let (store, sf) = seeded();
    let burger = product(&store, "X Burger");

    sf.clear_rules().unwrap();

    let cart_id = sf.create_cart().unwrap().cart_id;
    let summary = sf.add_to_cart(cart_id, burger.id(), 4).unwrap();
    assert_eq!(summary.pricing.total_items, 4);

    let order = sf.place_order(cart_id).unwrap();
    assert_eq!(order.subtotal(), Money::from_cents(2000));
}

#[test]
fn test_concurrent_adds_respect_category_rule() {
    let (store, sf) = seeded();
    let sandwiches: Vec<_> = ["X Burger", "X Egg", "X Bacon"]
        .into_iter()
        .map(|name| product(&store, name))
        .collect();

    let cart_id = sf.create_cart().unwrap().cart_id;

    let handles: Vec<_> = sandwiches
        .into_iter()
        .map(|sandwich| {
            let sf = sf.clone();
            thread::spawn(move || sf.add_to_cart(cart_id, sandwich.id(), 1).is_ok())
        })
        .collect();

    let accepted = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|ok| *ok)
        .count();

    assert_eq!(accepted, 1);
    assert_eq!(sf.cart_summary(cart_id).unwrap().pricing.total_items, 1);
}
