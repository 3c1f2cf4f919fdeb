//! # Storefront Service
//!
//! Cart, checkout and back-office operations over a shared [`Store`].
//! Every pricing or validation pass pre-resolves the products it needs
//! into a [`ProductSnapshot`](crate::ProductSnapshot) and hands that to
//! the engine.
//!
//! ## Cart Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add_to_cart(cart, product, qty)                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  carts().modify(cart) ── works on a draft copy of the cart             │
//! │       │                                                                 │
//! │       ├── draft.add_item(product, qty)                                 │
//! │       ├── snapshot every product in the draft                          │
//! │       ├── draft.validate_quantity_rules(validator, snapshot)           │
//! │       │        │                                                        │
//! │       │        ├── Err ──► draft dropped, stored cart unchanged        │
//! │       │        └── Ok  ──► draft committed                             │
//! │       ▼                                                                 │
//! │  price(draft, active discounts) ──► CartSummary                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lock order is always carts → products, never the reverse.

use std::sync::Arc;

use griddle_core::{
    Cart, CartId, CartItem, CartPricing, CategoryId, Discount, DiscountCondition, DiscountId,
    LineItem, Order, OrderId, OrderQuantityRuleEntity, OrderQuantityValidator, OrderStatus,
    ProductId, RuleId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::repository::ProductSnapshot;
use crate::store::Store;

// =============================================================================
// Request / Response Types
// =============================================================================

/// A cart with its derived figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub cart_id: CartId,
    pub items: Vec<CartItem>,
    #[serde(flatten)]
    pub pricing: CartPricing,
}

/// One discount condition as supplied by an administrator.
///
/// Which ids are set decides the condition shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionSpec {
    #[serde(default)]
    pub product_id: Option<ProductId>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    pub minimum_quantity: u32,
}

impl ConditionSpec {
    pub fn product(product_id: ProductId, minimum_quantity: u32) -> Self {
        ConditionSpec {
            product_id: Some(product_id),
            category_id: None,
            minimum_quantity,
        }
    }

    pub fn category(category_id: CategoryId, minimum_quantity: u32) -> Self {
        ConditionSpec {
            product_id: None,
            category_id: Some(category_id),
            minimum_quantity,
        }
    }

    fn build(&self) -> StoreResult<DiscountCondition> {
        Ok(DiscountCondition::new(
            self.product_id,
            self.category_id,
            self.minimum_quantity,
        )?)
    }
}

/// Partial discount update. Absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub percentage: Option<Decimal>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Partial quantity-rule update. Absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleUpdate {
    #[serde(default)]
    pub product_id: Option<ProductId>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub max_quantity: Option<u32>,
    #[serde(default)]
    pub rule_name: Option<String>,
}

// =============================================================================
// Storefront
// =============================================================================

/// Cart, order, discount and rule operations.
#[derive(Clone)]
pub struct Storefront {
    store: Arc<Store>,
}

impl Storefront {
    pub fn new(store: Arc<Store>) -> Self {
        Storefront { store }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    // -------------------------------------------------------------------------
    // Carts
    // -------------------------------------------------------------------------

    pub fn create_cart(&self) -> StoreResult<CartSummary> {
        let cart = Cart::new();
        debug!(cart_id = %cart.id(), "Creating cart");

        self.store.carts().create(cart.clone())?;
        self.summarize(&cart)
    }

    pub fn cart_summary(&self, cart_id: CartId) -> StoreResult<CartSummary> {
        let cart = self.store.carts().get(cart_id)?;
        self.summarize(&cart)
    }

    /// Adds `quantity` of a product, merging with an existing line.
    ///
    /// The change is only committed if the resulting cart still satisfies
    /// every quantity rule.
    pub fn add_to_cart(
        &self,
        cart_id: CartId,
        product_id: ProductId,
        quantity: u32,
    ) -> StoreResult<CartSummary> {
        debug!(%cart_id, %product_id, quantity, "Adding item to cart");

        let product = self.store.products().get(product_id)?;
        let validator = self.store.rules().validator()?;

        let cart = self
            .store
            .carts()
            .modify(cart_id, |draft| {
                draft.add_item(&product, quantity)?;
                self.check_rules(draft, &validator)
            })
            .inspect_err(|e| log_rejection("add item to cart", e))?;

        self.summarize(&cart)
    }

    /// Sets the quantity of a line already in the cart.
    pub fn update_cart_item(
        &self,
        cart_id: CartId,
        product_id: ProductId,
        quantity: u32,
    ) -> StoreResult<CartSummary> {
        debug!(%cart_id, %product_id, quantity, "Updating cart item quantity");

        let validator = self.store.rules().validator()?;

        let cart = self
            .store
            .carts()
            .modify(cart_id, |draft| {
                draft.update_item_quantity(product_id, quantity)?;
                self.check_rules(draft, &validator)
            })
            .inspect_err(|e| log_rejection("update cart item", e))?;

        self.summarize(&cart)
    }

    pub fn remove_from_cart(&self, cart_id: CartId, product_id: ProductId) -> StoreResult<CartSummary> {
        debug!(%cart_id, %product_id, "Removing item from cart");

        let cart = self
            .store
            .carts()
            .modify(cart_id, |draft| draft.remove_item(product_id))
            .inspect_err(|e| log_rejection("remove item from cart", e))?;

        self.summarize(&cart)
    }

    pub fn delete_cart(&self, cart_id: CartId) -> StoreResult<()> {
        self.store.carts().delete(cart_id)
    }

    // -------------------------------------------------------------------------
    // Orders
    // -------------------------------------------------------------------------

    /// Turns the cart into a pending order.
    ///
    /// The best active discount is applied and the snapshot is checked
    /// against every quantity rule. The cart itself is left in place.
    pub fn place_order(&self, cart_id: CartId) -> StoreResult<Order> {
        let cart = self.store.carts().get(cart_id)?;
        if cart.is_empty() {
            warn!(%cart_id, "Order requested for an empty cart");
            return Err(StoreError::EmptyCart);
        }

        let discounts = self.store.discounts().list_active()?;
        let snapshot = self.snapshot(&cart)?;
        let validator = self.store.rules().validator()?;

        let discount_amount = cart.discount_amount(&discounts, &snapshot);
        let order = Order::from_cart_validated(&cart, discount_amount, &validator, &snapshot)
            .map_err(StoreError::from)
            .inspect_err(|e| log_rejection("place order", e))?;

        self.store.orders().create(order.clone())?;
        info!(
            order_id = %order.id(),
            %cart_id,
            items = order.items().len(),
            subtotal = %order.subtotal(),
            total = %order.total(),
            "Order placed"
        );
        Ok(order)
    }

    pub fn get_order(&self, order_id: OrderId) -> StoreResult<Order> {
        self.store.orders().get(order_id)
    }

    pub fn list_orders(&self) -> StoreResult<Vec<Order>> {
        self.store.orders().list()
    }

    pub fn orders_by_status(&self, status: OrderStatus) -> StoreResult<Vec<Order>> {
        self.store.orders().list_by_status(status)
    }

    pub fn update_order_status(&self, order_id: OrderId, status: OrderStatus) -> StoreResult<Order> {
        debug!(%order_id, %status, "Updating order status");
        self.store
            .orders()
            .modify(order_id, |order| order.update_status(status))
            .inspect_err(|e| log_rejection("update order status", e))
    }

    pub fn cancel_order(&self, order_id: OrderId) -> StoreResult<Order> {
        debug!(%order_id, "Cancelling order");
        self.store
            .orders()
            .modify(order_id, Order::cancel)
            .inspect_err(|e| log_rejection("cancel order", e))
    }

    pub fn delete_order(&self, order_id: OrderId) -> StoreResult<()> {
        self.store.orders().delete(order_id)
    }

    // -------------------------------------------------------------------------
    // Discounts
    // -------------------------------------------------------------------------

    pub fn list_discounts(&self) -> StoreResult<Vec<Discount>> {
        self.store.discounts().list()
    }

    /// Creates an active discount with the given conditions.
    pub fn create_discount(
        &self,
        name: &str,
        percentage: Decimal,
        conditions: &[ConditionSpec],
    ) -> StoreResult<Discount> {
        let mut discount = Discount::new(name, percentage)?;
        for spec in conditions {
            discount.add_condition(spec.build()?);
        }

        self.store.discounts().create(discount.clone())?;
        Ok(discount)
    }

    /// Applies a partial update. Nothing changes if any field is invalid.
    pub fn update_discount(&self, id: DiscountId, update: &DiscountUpdate) -> StoreResult<Discount> {
        debug!(%id, ?update, "Updating discount");
        self.store
            .discounts()
            .modify(id, |discount| {
                if let Some(name) = update.name.as_deref() {
                    discount.update_name(name)?;
                }
                if let Some(percentage) = update.percentage {
                    discount.update_percentage(percentage)?;
                }
                match update.is_active {
                    Some(true) => discount.activate(),
                    Some(false) => discount.deactivate(),
                    None => {}
                }
                Ok::<_, StoreError>(())
            })
            .inspect_err(|e| log_rejection("update discount", e))
    }

    pub fn add_discount_condition(&self, id: DiscountId, spec: ConditionSpec) -> StoreResult<Discount> {
        let condition = spec.build()?;
        self.store.discounts().modify(id, |discount| {
            discount.add_condition(condition);
            Ok::<_, StoreError>(())
        })
    }

    pub fn delete_discount(&self, id: DiscountId) -> StoreResult<()> {
        self.store.discounts().delete(id)
    }

    // -------------------------------------------------------------------------
    // Quantity Rules
    // -------------------------------------------------------------------------

    pub fn list_rules(&self) -> StoreResult<Vec<OrderQuantityRuleEntity>> {
        self.store.rules().list()
    }

    pub fn create_rule(
        &self,
        product_id: Option<ProductId>,
        category_id: Option<CategoryId>,
        max_quantity: u32,
        rule_name: &str,
    ) -> StoreResult<OrderQuantityRuleEntity> {
        let rule = OrderQuantityRuleEntity::new(product_id, category_id, max_quantity, rule_name)?;
        self.store.rules().create(rule.clone())?;
        Ok(rule)
    }

    pub fn update_rule(&self, id: RuleId, update: &RuleUpdate) -> StoreResult<OrderQuantityRuleEntity> {
        debug!(%id, "Updating quantity rule");

        self.store
            .rules()
            .modify(id, |rule| {
                rule.update(
                    update.product_id,
                    update.category_id,
                    update.max_quantity,
                    update.rule_name.as_deref(),
                )
            })
            .inspect_err(|e| log_rejection("update quantity rule", e))
    }

    pub fn delete_rule(&self, id: RuleId) -> StoreResult<()> {
        self.store.rules().delete(id)
    }

    pub fn clear_rules(&self) -> StoreResult<()> {
        self.store.rules().clear()
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    fn snapshot(&self, cart: &Cart) -> StoreResult<ProductSnapshot> {
        self.store
            .products()
            .snapshot(cart.items().iter().map(LineItem::product_id))
    }

    fn check_rules(&self, cart: &Cart, validator: &OrderQuantityValidator) -> StoreResult<()> {
        if validator.rules().is_empty() {
            return Ok(());
        }

        let snapshot = self.snapshot(cart)?;
        cart.validate_quantity_rules(validator, &snapshot)?;
        Ok(())
    }

    fn summarize(&self, cart: &Cart) -> StoreResult<CartSummary> {
        let discounts = self.store.discounts().list_active()?;
        let snapshot = self.snapshot(cart)?;

        Ok(CartSummary {
            cart_id: cart.id(),
            items: cart.items().to_vec(),
            pricing: cart.price(&discounts, &snapshot),
        })
    }
}

fn log_rejection(action: &'static str, err: &StoreError) {
    if err.is_rejection() {
        warn!(action, error = %err, "Request rejected");
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
