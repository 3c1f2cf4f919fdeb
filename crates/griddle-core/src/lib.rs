//! # griddle-core: Pricing & Quantity-Rule Engine
//!
//! Everything that makes a decision about a cart lives here: which discount
//! applies, what the totals are, and whether a cart or order breaks a
//! per-order quantity limit.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Griddle Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 griddle-store (collaborator)                    │   │
//! │  │   repositories ──► Storefront ──► seed / config / demo bin     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ plain data + ProductLookup             │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ griddle-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────────────┐  │   │
//! │  │   │ catalog  │ │line_item │ │ discount │ │ quantity_rule    │  │   │
//! │  │   │ Product  │ │ CartItem │ │ Discount │ │ OrderQuantityRule│  │   │
//! │  │   │ Category │ │OrderItem │ │Condition │ │ RuleScope        │  │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────────────┘  │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────────────────────────┐   │   │
//! │  │   │   cart   │ │  order   │ │ quantity_validator           │   │   │
//! │  │   │ pricing  │ │ status   │ │ ValidationResult             │   │   │
//! │  │   └──────────┘ └──────────┘ └──────────────────────────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO LOCKS • DETERMINISTIC               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`ids`] - Newtype UUID identifiers
//! - [`money`] - Decimal `Money` and validated `Percentage`
//! - [`error`] - `DomainError`
//! - [`validation`] - Field validators and `ValidationResult`
//! - [`catalog`] - `Product`, `Category`, `ProductLookup`
//! - [`line_item`] - `CartItem`, `OrderItem`
//! - [`discount`] - `Discount`, `DiscountCondition`
//! - [`quantity_rule`] - `OrderQuantityRule` and its persisted entity
//! - [`quantity_validator`] - Rule evaluation over carts and orders
//! - [`cart`] - Cart aggregate and pricing
//! - [`order`] - Orders and their status lifecycle
//! - [`defaults`] - House quantity rules
//!
//! ## Example Usage
//!
//! ```rust
//! use std::collections::HashMap;
//! use griddle_core::{Cart, Category, Discount, DiscountCondition, Money, Product};
//! use rust_decimal::Decimal;
//!
//! let sandwiches = Category::new("Sandwiches").unwrap();
//! let extras = Category::new("Extras").unwrap();
//! let burger = Product::new("Burger", &sandwiches, Money::from_cents(500)).unwrap();
//! let fries = Product::new("Fries", &extras, Money::from_cents(200)).unwrap();
//!
//! let mut combo = Discount::new("Combo", Decimal::from(20)).unwrap();
//! combo.add_condition(DiscountCondition::for_category(sandwiches.id(), 1).unwrap());
//! combo.add_condition(DiscountCondition::for_product(fries.id(), 1).unwrap());
//!
//! let mut cart = Cart::new();
//! cart.add_item(&burger, 2).unwrap();
//! cart.add_item(&fries, 1).unwrap();
//!
//! let products: HashMap<_, _> = [(burger.id(), burger), (fries.id(), fries)].into();
//! let pricing = cart.price(&[combo], &products);
//!
//! assert_eq!(pricing.subtotal, Money::from_cents(1200));
//! assert_eq!(pricing.discount_amount, Some(Money::from_cents(240)));
//! assert_eq!(pricing.total, Money::from_cents(960));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod defaults;
pub mod discount;
pub mod error;
pub mod ids;
pub mod line_item;
pub mod money;
pub mod order;
pub mod quantity_rule;
pub mod quantity_validator;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartPricing};
pub use catalog::{Category, Product, ProductLookup};
pub use defaults::default_rules;
pub use discount::{Discount, DiscountCondition};
pub use error::{DomainError, DomainResult};
pub use ids::*;
pub use line_item::{CartItem, LineItem, OrderItem};
pub use money::{Money, Percentage};
pub use order::{Order, OrderStatus};
pub use quantity_rule::{OrderQuantityRule, OrderQuantityRuleEntity, RuleScope};
pub use quantity_validator::OrderQuantityValidator;
pub use validation::ValidationResult;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity of a single cart line.
///
/// Order lines have no cap; they are only ever copied from a cart.
pub const MAX_CART_ITEM_QUANTITY: u32 = 999;

/// Highest catalog price, in cents (999,999.99).
pub const MAX_PRODUCT_PRICE_CENTS: i64 = 99_999_999;

pub const MAX_CATEGORY_NAME_LEN: usize = 100;

pub const MAX_PRODUCT_NAME_LEN: usize = 200;

pub const MAX_DISCOUNT_NAME_LEN: usize = 200;
