//! # Store
//!
//! Owns one instance of every repository. Shared behind an `Arc` by the
//! [`Storefront`](crate::Storefront) and the seeders.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Store                                                                 │
//! │   ├── categories()  CategoryRepository                                 │
//! │   ├── products()    ProductRepository                                  │
//! │   ├── carts()       CartRepository                                     │
//! │   ├── orders()      OrderRepository                                    │
//! │   ├── discounts()   DiscountRepository                                 │
//! │   └── rules()       QuantityRuleRepository                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tracing::info;

use crate::repository::{
    CartRepository, CategoryRepository, DiscountRepository, OrderRepository, ProductRepository,
    QuantityRuleRepository,
};

/// In-memory backing store.
#[derive(Default)]
pub struct Store {
    categories: CategoryRepository,
    products: ProductRepository,
    carts: CartRepository,
    orders: OrderRepository,
    discounts: DiscountRepository,
    rules: QuantityRuleRepository,
}

impl Store {
    /// Creates an empty store.
    pub fn new() -> Self {
        info!("Creating in-memory store");
        Self::default()
    }

    /// Creates an empty store ready to be shared.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    pub fn categories(&self) -> &CategoryRepository {
        &self.categories
    }

    pub fn products(&self) -> &ProductRepository {
        &self.products
    }

    pub fn carts(&self) -> &CartRepository {
        &self.carts
    }

    pub fn orders(&self) -> &OrderRepository {
        &self.orders
    }

    pub fn discounts(&self) -> &DiscountRepository {
        &self.discounts
    }

    pub fn rules(&self) -> &QuantityRuleRepository {
        &self.rules
    }
}
