//! # Orders
//!
//! An order is a frozen snapshot of a cart plus a status.
//!
//! ## Status Lifecycle
//! ```text
//!   Pending ──► Confirmed ──► Preparing ──► Ready ──► Delivered (terminal)
//!      │            │             │           │
//!      └────────────┴─────────────┴───────────┴─────► Cancelled (terminal)
//! ```
//!
//! The arrows show the usual path only. `update_status` accepts any target
//! while the order is open, including going backwards; once the order is
//! `Delivered` or `Cancelled` nothing can change it. `cancel` is refused
//! only for a delivered order and is a no-op on a cancelled one.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::catalog::ProductLookup;
use crate::error::{DomainError, DomainResult};
use crate::ids::OrderId;
use crate::line_item::{LineItem, OrderItem};
use crate::money::Money;
use crate::quantity_validator::OrderQuantityValidator;

// =============================================================================
// Order Status
// =============================================================================

/// Where an order is in the kitchen workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Placed, not yet confirmed.
    #[default]
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// Delivered and cancelled orders accept no further changes.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::Ready => "Ready",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "preparing" => Ok(OrderStatus::Preparing),
            "ready" => Ok(OrderStatus::Ready),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" | "canceled" => Ok(OrderStatus::Cancelled),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

// =============================================================================
// Order
// =============================================================================

/// A placed order.
///
/// Invariant: `total == subtotal - discount_amount.unwrap_or(0)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    id: OrderId,
    items: Vec<OrderItem>,
    status: OrderStatus,
    created_at: DateTime<Utc>,
    subtotal: Money,
    discount_amount: Option<Money>,
    total: Money,
}

impl Default for Order {
    fn default() -> Self {
        Self::new()
    }
}

impl Order {
    /// An empty pending order stamped with the current time.
    pub fn new() -> Self {
        Self::with_id(OrderId::new(), Utc::now())
    }

    pub fn with_id(id: OrderId, created_at: DateTime<Utc>) -> Self {
        Order {
            id,
            items: Vec::new(),
            status: OrderStatus::Pending,
            created_at,
            subtotal: Money::zero(),
            discount_amount: None,
            total: Money::zero(),
        }
    }

    /// Snapshots the cart's lines into a new pending order.
    ///
    /// `discount_amount` is stored only when positive.
    pub fn from_cart(cart: &Cart, discount_amount: Money) -> DomainResult<Self> {
        let mut order = Order::new();

        order.items = cart
            .items()
            .iter()
            .map(OrderItem::from_cart_item)
            .collect::<DomainResult<_>>()?;
        order.subtotal = cart.total();
        order.discount_amount = discount_amount.is_positive().then_some(discount_amount);
        order.total = order.subtotal - order.discount_amount.unwrap_or_default();

        Ok(order)
    }

    /// Like [`Order::from_cart`], but first checks the snapshot against the
    /// quantity rules. Any violation becomes [`DomainError::RuleViolation`].
    pub fn from_cart_validated<L>(
        cart: &Cart,
        discount_amount: Money,
        validator: &OrderQuantityValidator,
        lookup: &L,
    ) -> DomainResult<Self>
    where
        L: ProductLookup + ?Sized,
    {
        let order = Self::from_cart(cart, discount_amount)?;

        validator
            .validate_order(Some(&order), lookup)
            .into_domain_result()?;

        Ok(order)
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn subtotal(&self) -> Money {
        self.subtotal
    }

    pub fn discount_amount(&self) -> Option<Money> {
        self.discount_amount
    }

    pub fn total(&self) -> Money {
        self.total
    }

    /// Appends a line and recomputes subtotal and total.
    pub fn add_item(&mut self, item: OrderItem) {
        self.items.push(item);
        self.recalculate_totals();
    }

    pub fn update_status(&mut self, status: OrderStatus) -> DomainResult<()> {
        if self.status.is_terminal() {
            return Err(DomainError::OrderClosed);
        }

        self.status = status;
        Ok(())
    }

    pub fn cancel(&mut self) -> DomainResult<()> {
        if self.status == OrderStatus::Delivered {
            return Err(DomainError::OrderAlreadyDelivered);
        }

        self.status = OrderStatus::Cancelled;
        Ok(())
    }

    fn recalculate_totals(&mut self) {
        self.subtotal = self.items.iter().map(LineItem::subtotal).sum();
        self.total = self.subtotal - self.discount_amount.unwrap_or_default();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, Product};
    use crate::ids::ProductId;

    fn burger_cart() -> Cart {
        let sandwiches = Category::new("Sandwiches").unwrap();
        let burger = Product::new("X Burger", &sandwiches, Money::from_cents(500)).unwrap();
        let mut cart = Cart::new();
        cart.add_item(&burger, 2).unwrap();
        cart
    }

    #[test]
    fn test_new_order_is_pending_and_empty() {
        let order = Order::new();
        assert_eq!(order.status(), OrderStatus::Pending);
        assert!(order.items().is_empty());
        assert_eq!(order.total(), Money::zero());
        assert_eq!(order.discount_amount(), None);
    }

    #[test]
    fn test_with_id_keeps_timestamp() {
        let id = OrderId::new();
        let at = DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);

        let order = Order::with_id(id, at);
        assert_eq!(order.id(), id);
        assert_eq!(order.created_at(), at);
    }

    #[test]
    fn test_from_cart_snapshots_lines() {
        let cart = burger_cart();
        let order = Order::from_cart(&cart, Money::from_cents(200)).unwrap();

        assert_eq!(order.items().len(), 1);
        assert_eq!(order.items()[0].product_name(), "X Burger");
        assert_eq!(order.subtotal(), Money::from_cents(1000));
        assert_eq!(order.discount_amount(), Some(Money::from_cents(200)));
        assert_eq!(order.total(), Money::from_cents(800));
    }

    #[test]
    fn test_zero_discount_is_not_stored() {
        let order = Order::from_cart(&burger_cart(), Money::zero()).unwrap();
        assert_eq!(order.discount_amount(), None);
        assert_eq!(order.total(), order.subtotal());
    }

    #[test]
    fn test_add_item_recalculates() {
        let mut order = Order::from_cart(&burger_cart(), Money::from_cents(100)).unwrap();
        let fries = OrderItem::new(ProductId::new(), "Fries", Money::from_cents(200), 1).unwrap();

        order.add_item(fries);
        assert_eq!(order.subtotal(), Money::from_cents(1200));
        assert_eq!(order.total(), Money::from_cents(1100));
    }

    #[test]
    fn test_open_order_accepts_any_status() {
        let mut order = Order::new();
        order.update_status(OrderStatus::Ready).unwrap();
        order.update_status(OrderStatus::Confirmed).unwrap();
        assert_eq!(order.status(), OrderStatus::Confirmed);
    }

    #[test]
    fn test_delivered_order_cannot_be_cancelled() {
        let mut order = Order::new();
        order.update_status(OrderStatus::Delivered).unwrap();

        assert_eq!(order.cancel(), Err(DomainError::OrderAlreadyDelivered));
        assert_eq!(order.status(), OrderStatus::Delivered);
    }

    #[test]
    fn test_terminal_orders_reject_status_changes() {
        let mut order = Order::new();
        order.cancel().unwrap();

        assert_eq!(
            order.update_status(OrderStatus::Cancelled),
            Err(DomainError::OrderClosed)
        );
        // cancelling twice is fine
        assert!(order.cancel().is_ok());
        assert_eq!(order.status(), OrderStatus::Cancelled);
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("ready".parse::<OrderStatus>().unwrap(), OrderStatus::Ready);
        assert_eq!(
            "Delivered".parse::<OrderStatus>().unwrap(),
            OrderStatus::Delivered
        );
        let err = " Shipped".parse::<OrderStatus>().unwrap_err();
        assert_eq!(err, DomainError::InvalidStatus(" Shipped".to_string()));
        assert_eq!(err.to_string(), "Invalid status.");

        for status in OrderStatus::ALL {
            assert_eq!(status.to_string().parse::<OrderStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Preparing).unwrap(),
            "\"preparing\""
        );
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::Ready.is_terminal());
    }
}
