//! # Line Items
//!
//! Quantity-bearing entries of a cart or an order.
//!
//! ```text
//! ┌──────────────────────────────┬──────────────────────────────┐
//! │  CartItem                    │  OrderItem                   │
//! ├──────────────────────────────┼──────────────────────────────┤
//! │  quantity 1..=999            │  quantity >= 1, no cap       │
//! │  update / increase in place  │  frozen after construction   │
//! └──────────────────────────────┴──────────────────────────────┘
//! ```
//!
//! Both implement [`LineItem`], which is all the discount and quantity-rule
//! code needs to see.

use serde::Serialize;

use crate::error::{DomainError, DomainResult};
use crate::ids::{CartItemId, OrderItemId, ProductId};
use crate::money::Money;
use crate::validation::{
    validate_cart_quantity, validate_positive, validate_required, validate_unit_price,
};

// =============================================================================
// LineItem Trait
// =============================================================================

/// Read access shared by cart and order line items.
pub trait LineItem {
    fn product_id(&self) -> ProductId;

    /// Product name captured when the item was created.
    fn product_name(&self) -> &str;

    /// Unit price captured when the item was created.
    fn unit_price(&self) -> Money;

    fn quantity(&self) -> u32;

    /// `unit_price * quantity`.
    fn subtotal(&self) -> Money {
        self.unit_price() * self.quantity()
    }
}

fn validate_product_id(product_id: ProductId) -> DomainResult<ProductId> {
    if product_id.is_nil() {
        return Err(DomainError::EmptyId { field: "Product ID" });
    }

    Ok(product_id)
}

// =============================================================================
// CartItem
// =============================================================================

/// One product line inside a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartItem {
    id: CartItemId,
    product_id: ProductId,
    product_name: String,
    unit_price: Money,
    quantity: u32,
}

impl CartItem {
    pub fn new(
        product_id: ProductId,
        product_name: &str,
        unit_price: Money,
        quantity: u32,
    ) -> DomainResult<Self> {
        Self::with_id(CartItemId::new(), product_id, product_name, unit_price, quantity)
    }

    pub fn with_id(
        id: CartItemId,
        product_id: ProductId,
        product_name: &str,
        unit_price: Money,
        quantity: u32,
    ) -> DomainResult<Self> {
        Ok(CartItem {
            id,
            product_id: validate_product_id(product_id)?,
            product_name: validate_required("Product name", product_name)?,
            unit_price: validate_unit_price(unit_price)?,
            quantity: validate_cart_quantity(quantity)?,
        })
    }

    pub fn id(&self) -> CartItemId {
        self.id
    }

    /// Replaces the quantity.
    pub fn update_quantity(&mut self, quantity: u32) -> DomainResult<()> {
        self.quantity = validate_cart_quantity(quantity)?;
        Ok(())
    }

    /// Adds to the current quantity; the result must stay within 999.
    pub fn increase_quantity(&mut self, amount: u32) -> DomainResult<()> {
        if amount == 0 {
            return Err(DomainError::MustBePositive {
                field: "Quantity to add",
            });
        }

        let new_quantity = self.quantity.saturating_add(amount);
        self.quantity = validate_cart_quantity(new_quantity)?;
        Ok(())
    }
}

impl LineItem for CartItem {
    fn product_id(&self) -> ProductId {
        self.product_id
    }

    fn product_name(&self) -> &str {
        &self.product_name
    }

    fn unit_price(&self) -> Money {
        self.unit_price
    }

    fn quantity(&self) -> u32 {
        self.quantity
    }
}

// =============================================================================
// OrderItem
// =============================================================================

/// A frozen line of a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderItem {
    id: OrderItemId,
    product_id: ProductId,
    product_name: String,
    unit_price: Money,
    quantity: u32,
}

impl OrderItem {
    pub fn new(
        product_id: ProductId,
        product_name: &str,
        unit_price: Money,
        quantity: u32,
    ) -> DomainResult<Self> {
        Self::with_id(OrderItemId::new(), product_id, product_name, unit_price, quantity)
    }

    pub fn with_id(
        id: OrderItemId,
        product_id: ProductId,
        product_name: &str,
        unit_price: Money,
        quantity: u32,
    ) -> DomainResult<Self> {
        Ok(OrderItem {
            id,
            product_id: validate_product_id(product_id)?,
            product_name: validate_required("Product name", product_name)?,
            unit_price: validate_unit_price(unit_price)?,
            quantity: validate_positive("Quantity", quantity)?,
        })
    }

    /// Snapshots a cart line.
    pub fn from_cart_item(item: &CartItem) -> DomainResult<Self> {
        Self::new(
            item.product_id(),
            item.product_name(),
            item.unit_price(),
            item.quantity(),
        )
    }

    pub fn id(&self) -> OrderItemId {
        self.id
    }
}

impl LineItem for OrderItem {
    fn product_id(&self) -> ProductId {
        self.product_id
    }

    fn product_name(&self) -> &str {
        &self.product_name
    }

    fn unit_price(&self) -> Money {
        self.unit_price
    }

    fn quantity(&self) -> u32 {
        self.quantity
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
