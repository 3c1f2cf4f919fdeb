//! # Cart Aggregate & Pricing
//!
//! The cart owns its line items and derives every total on demand.
//!
//! ## Pricing Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  items ──► subtotal = Σ unit_price × qty                               │
//! │                                                                         │
//! │  discounts ──► filter is_applicable(items, lookup)                     │
//! │            ──► highest percentage (first one wins a tie)               │
//! │            ──► discount_amount = subtotal × pct / 100                  │
//! │                                                                         │
//! │  total = subtotal - discount_amount                                    │
//! │                                                                         │
//! │  Only ONE discount is ever applied. Discounts never stack.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog::{Product, ProductLookup};
use crate::discount::Discount;
use crate::error::{DomainError, DomainResult};
use crate::ids::{CartId, ProductId};
use crate::line_item::{CartItem, LineItem};
use crate::money::Money;
use crate::quantity_validator::OrderQuantityValidator;

// =============================================================================
// Cart
// =============================================================================

/// A shopping cart.
///
/// Holds at most one line per product; adding a product that is already
/// present increases that line's quantity.
///
/// Carts are serialized for display only. They are built through
/// [`Cart::new`] and its mutators, never from raw data:
///
/// ```compile_fail
/// let cart: griddle_core::Cart = serde_json::from_str(r#"{"id":"","items":[]}"#).unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cart {
    id: CartId,
    items: Vec<CartItem>,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

impl Cart {
    pub fn new() -> Self {
        Self::with_id(CartId::new())
    }

    pub fn with_id(id: CartId) -> Self {
        Cart {
            id,
            items: Vec::new(),
        }
    }

    pub fn id(&self) -> CartId {
        self.id
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn item(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.product_id() == product_id)
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // -------------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------------

    /// Adds `quantity` units of `product`, snapshotting its name and price.
    ///
    /// If the product is already in the cart the existing line grows and
    /// keeps its original snapshot.
    pub fn add_item(&mut self, product: &Product, quantity: u32) -> DomainResult<()> {
        if let Some(existing) = self.item_mut(product.id()) {
            return existing.increase_quantity(quantity);
        }

        let item = CartItem::new(product.id(), product.name(), product.price(), quantity)?;
        self.items.push(item);
        Ok(())
    }

    pub fn update_item_quantity(&mut self, product_id: ProductId, quantity: u32) -> DomainResult<()> {
        self.item_mut(product_id)
            .ok_or(DomainError::ItemNotFound)?
            .update_quantity(quantity)
    }

    pub fn remove_item(&mut self, product_id: ProductId) -> DomainResult<()> {
        let index = self
            .items
            .iter()
            .position(|item| item.product_id() == product_id)
            .ok_or(DomainError::ItemNotFound)?;

        self.items.remove(index);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    fn item_mut(&mut self, product_id: ProductId) -> Option<&mut CartItem> {
        self.items
            .iter_mut()
            .find(|item| item.product_id() == product_id)
    }

    // -------------------------------------------------------------------------
    // Totals
    // -------------------------------------------------------------------------

    /// Sum of line subtotals; zero for an empty cart.
    pub fn total(&self) -> Money {
        self.items.iter().map(LineItem::subtotal).sum()
    }

    /// Sum of quantities across all lines.
    pub fn total_items(&self) -> u32 {
        self.items.iter().map(LineItem::quantity).sum()
    }

    /// The applicable discount with the highest percentage.
    ///
    /// Equal percentages resolve to the one that comes first in
    /// `discounts`.
    pub fn best_applicable_discount<'d, L>(
        &self,
        discounts: &'d [Discount],
        lookup: &L,
    ) -> Option<&'d Discount>
    where
        L: ProductLookup + ?Sized,
    {
        if self.is_empty() || discounts.is_empty() {
            return None;
        }

        discounts
            .iter()
            .filter(|discount| discount.is_applicable(&self.items, lookup))
            .fold(None, |best: Option<&Discount>, candidate| match best {
                Some(best) if best.percentage() >= candidate.percentage() => Some(best),
                _ => Some(candidate),
            })
    }

    /// Amount taken off by the best discount, zero if none applies.
    pub fn discount_amount<L>(&self, discounts: &[Discount], lookup: &L) -> Money
    where
        L: ProductLookup + ?Sized,
    {
        self.best_applicable_discount(discounts, lookup)
            .map(|discount| discount.calculate_discount(self.total()))
            .unwrap_or_default()
    }

    /// `total() - discount_amount(..)`.
    pub fn total_with_discount<L>(&self, discounts: &[Discount], lookup: &L) -> Money
    where
        L: ProductLookup + ?Sized,
    {
        self.total() - self.discount_amount(discounts, lookup)
    }

    /// Computes every reported figure in one pass.
    pub fn price<L>(&self, discounts: &[Discount], lookup: &L) -> CartPricing
    where
        L: ProductLookup + ?Sized,
    {
        let subtotal = self.total();
        let best = self.best_applicable_discount(discounts, lookup);
        let discount_amount = best
            .map(|discount| discount.calculate_discount(subtotal))
            .unwrap_or_default();

        CartPricing {
            subtotal,
            discount_amount: (!discount_amount.is_zero()).then_some(discount_amount),
            discount_name: best.map(|discount| discount.name().to_string()),
            total: subtotal - discount_amount,
            total_items: self.total_items(),
        }
    }

    // -------------------------------------------------------------------------
    // Quantity Rules
    // -------------------------------------------------------------------------

    /// Runs the validator and turns a failure into
    /// [`DomainError::RuleViolation`] with every message joined by a space.
    pub fn validate_quantity_rules<L>(
        &self,
        validator: &OrderQuantityValidator,
        lookup: &L,
    ) -> DomainResult<()>
    where
        L: ProductLookup + ?Sized,
    {
        validator.validate_cart(Some(self), lookup).into_domain_result()
    }
}

// =============================================================================
// Cart Pricing
// =============================================================================

/// Derived figures for a cart at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartPricing {
    pub subtotal: Money,
    /// `None` when no discount applies.
    pub discount_amount: Option<Money>,
    pub discount_name: Option<String>,
    pub total: Money,
    pub total_items: u32,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;
    use crate::discount::DiscountCondition;
    use crate::quantity_rule::OrderQuantityRule;
    use rust_decimal::Decimal;
    use std::collections::HashMap;

    struct Menu {
        sandwiches: Category,
        burger: Product,
        egg: Product,
        fries: Product,
        products: HashMap<ProductId, Product>,
    }

    fn menu() -> Menu {
        let sandwiches = Category::new("Sandwiches").unwrap();
        let extras = Category::new("Extras").unwrap();
        let burger = Product::new("Burger", &sandwiches, Money::from_cents(500)).unwrap();
        let egg = Product::new("X Egg", &sandwiches, Money::from_cents(450)).unwrap();
        let fries = Product::new("Fries", &extras, Money::from_cents(200)).unwrap();
        let products = [&burger, &egg, &fries]
            .into_iter()
            .map(|p| (p.id(), p.clone()))
            .collect();

        Menu {
            sandwiches,
            burger,
            egg,
            fries,
            products,
        }
    }

    fn combo(m: &Menu, name: &str, pct: i64) -> Discount {
        let mut discount = Discount::new(name, Decimal::from(pct)).unwrap();
        discount.add_condition(DiscountCondition::for_category(m.sandwiches.id(), 1).unwrap());
        discount.add_condition(DiscountCondition::for_product(m.fries.id(), 1).unwrap());
        discount
    }

    #[test]
    fn test_new_cart_is_empty() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.len(), 0);
        assert_eq!(cart.total(), Money::zero());
        assert_eq!(cart.total_items(), 0);
    }

    #[test]
    fn test_add_same_product_merges_lines() {
        let m = menu();
        let mut cart = Cart::new();

        cart.add_item(&m.burger, 1).unwrap();
        cart.add_item(&m.burger, 2).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.item(m.burger.id()).unwrap().quantity(), 3);
        assert_eq!(cart.total(), Money::from_cents(1500));
    }

    #[test]
    fn test_add_beyond_line_cap_fails_without_change() {
        let m = menu();
        let mut cart = Cart::new();
        cart.add_item(&m.fries, 998).unwrap();

        assert!(cart.add_item(&m.fries, 2).is_err());
        assert_eq!(cart.item(m.fries.id()).unwrap().quantity(), 998);
    }

    #[test]
    fn test_update_and_remove_items() {
        let m = menu();
        let mut cart = Cart::new();
        cart.add_item(&m.burger, 1).unwrap();
        cart.add_item(&m.fries, 1).unwrap();

        cart.update_item_quantity(m.fries.id(), 4).unwrap();
        assert_eq!(cart.total_items(), 5);

        cart.remove_item(m.burger.id()).unwrap();
        assert_eq!(cart.len(), 1);

        assert_eq!(
            cart.remove_item(m.burger.id()),
            Err(DomainError::ItemNotFound)
        );
        assert_eq!(
            cart.update_item_quantity(m.egg.id(), 1).unwrap_err().to_string(),
            "Item was not found in the cart."
        );

        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_items_keep_insertion_order() {
        let m = menu();
        let mut cart = Cart::new();
        cart.add_item(&m.fries, 1).unwrap();
        cart.add_item(&m.burger, 1).unwrap();
        cart.add_item(&m.fries, 1).unwrap();

        let names: Vec<_> = cart.items().iter().map(|i| i.product_name()).collect();
        assert_eq!(names, ["Fries", "Burger"]);
    }

    #[test]
    fn test_burger_and_fries_combo() {
        let m = menu();
        let mut cart = Cart::new();
        cart.add_item(&m.burger, 2).unwrap();
        cart.add_item(&m.fries, 1).unwrap();

        let discounts = [combo(&m, "Combo", 20)];

        assert!(discounts[0].is_applicable(cart.items(), &m.products));
        assert_eq!(cart.total(), Money::from_cents(1200));
        assert_eq!(
            cart.discount_amount(&discounts, &m.products),
            Money::from_cents(240)
        );
        assert_eq!(
            cart.total_with_discount(&discounts, &m.products),
            Money::from_cents(960)
        );
    }

    #[test]
    fn test_unmet_minimum_means_no_discount() {
        let m = menu();
        let mut cart = Cart::new();
        cart.add_item(&m.burger, 2).unwrap();

        let mut three_burgers = Discount::new("Three", Decimal::from(30)).unwrap();
        three_burgers.add_condition(DiscountCondition::for_product(m.burger.id(), 3).unwrap());
        let discounts = [three_burgers];

        assert!(!discounts[0].is_applicable(cart.items(), &m.products));
        assert_eq!(cart.discount_amount(&discounts, &m.products), Money::zero());
        assert_eq!(cart.total_with_discount(&discounts, &m.products), cart.total());
    }

    #[test]
    fn test_best_discount_picks_highest_applicable() {
        let m = menu();
        let mut cart = Cart::new();
        cart.add_item(&m.burger, 1).unwrap();
        cart.add_item(&m.fries, 1).unwrap();

        let mut unreachable = Discount::new("Five Fries", Decimal::from(50)).unwrap();
        unreachable.add_condition(DiscountCondition::for_product(m.fries.id(), 5).unwrap());

        let discounts = [
            combo(&m, "Small", 10),
            unreachable,
            combo(&m, "Big", 20),
        ];

        let best = cart.best_applicable_discount(&discounts, &m.products).unwrap();
        assert_eq!(best.name(), "Big");
    }

    #[test]
    fn test_best_discount_tie_keeps_input_order() {
        let m = menu();
        let mut cart = Cart::new();
        cart.add_item(&m.burger, 1).unwrap();
        cart.add_item(&m.fries, 1).unwrap();

        let discounts = [combo(&m, "First", 15), combo(&m, "Second", 15)];
        let best = cart.best_applicable_discount(&discounts, &m.products).unwrap();
        assert_eq!(best.name(), "First");
    }

    #[test]
    fn test_best_discount_none_for_empty_inputs() {
        let m = menu();
        let discounts = [combo(&m, "Combo", 20)];

        assert!(Cart::new()
            .best_applicable_discount(&discounts, &m.products)
            .is_none());

        let mut cart = Cart::new();
        cart.add_item(&m.burger, 1).unwrap();
        assert!(cart.best_applicable_discount(&[], &m.products).is_none());
    }

    #[test]
    fn test_amount_and_total_are_consistent() {
        let m = menu();
        let mut cart = Cart::new();
        cart.add_item(&m.egg, 3).unwrap();
        cart.add_item(&m.fries, 2).unwrap();

        let discounts = [combo(&m, "Combo", 15)];
        let amount = cart.discount_amount(&discounts, &m.products);

        assert_eq!(
            cart.total() - amount,
            cart.total_with_discount(&discounts, &m.products)
        );
    }

    #[test]
    fn test_price_summary() {
        let m = menu();
        let mut cart = Cart::new();
        cart.add_item(&m.burger, 2).unwrap();
        cart.add_item(&m.fries, 1).unwrap();

        let pricing = cart.price(&[combo(&m, "Combo", 20)], &m.products);
        assert_eq!(pricing.subtotal, Money::from_cents(1200));
        assert_eq!(pricing.discount_amount, Some(Money::from_cents(240)));
        assert_eq!(pricing.discount_name.as_deref(), Some("Combo"));
        assert_eq!(pricing.total, Money::from_cents(960));
        assert_eq!(pricing.total_items, 3);

        let plain = cart.price(&[], &m.products);
        assert_eq!(plain.discount_amount, None);
        assert_eq!(plain.discount_name, None);
        assert_eq!(plain.total, plain.subtotal);
    }

    #[test]
    fn test_validate_quantity_rules_joins_messages() {
        let m = menu();
        let mut cart = Cart::new();
        cart.add_item(&m.burger, 1).unwrap();
        cart.add_item(&m.egg, 1).unwrap();
        cart.add_item(&m.fries, 2).unwrap();

        let validator = OrderQuantityValidator::new([
            OrderQuantityRule::for_category(m.sandwiches.id(), 1, "sandwich").unwrap(),
            OrderQuantityRule::for_product(m.fries.id(), 1, "fries").unwrap(),
        ]);

        let err = cart
            .validate_quantity_rules(&validator, &m.products)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "You already have sandwich in your cart. Only 1 per order is allowed. \
             You already have fries in your cart. Only 1 per order is allowed."
        );
    }
}
