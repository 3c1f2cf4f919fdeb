//! # griddle-store: In-Memory Storefront for Griddle
//!
//! Everything around the engine: repositories, the cart and checkout
//! service, demo seeding and configuration.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Griddle Data Flow                                │
//! │                                                                         │
//! │  griddle-demo (bin) / embedding application                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  griddle-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │  Storefront   │    │ Repositories  │    │ seed/config  │  │   │
//! │  │   │               │───►│ RwLock tables │    │              │  │   │
//! │  │   │ carts, orders │    │ one per       │    │ demo menu    │  │   │
//! │  │   │ admin         │    │ aggregate     │    │ griddle.toml │  │   │
//! │  │   └───────┬───────┘    └───────────────┘    └──────────────┘  │   │
//! │  └───────────┼─────────────────────────────────────────────────────┘   │
//! │              │ ProductSnapshot + active discounts + rules               │
//! │              ▼                                                          │
//! │  griddle-core (pricing, quantity rules, order lifecycle)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`repository`] - In-memory repositories
//! - [`store`] - The repository bundle
//! - [`storefront`] - Cart, checkout and admin operations
//! - [`seed`] - Demo catalog and house rules
//! - [`config`] - TOML + environment configuration
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust
//! use griddle_store::{seed, Store, Storefront};
//!
//! let store = Store::shared();
//! seed::seed_catalog(&store).unwrap();
//! seed::seed_default_rules(&store).unwrap();
//!
//! let storefront = Storefront::new(store.clone());
//! let burger = store.products().find_by_name("X Burger").unwrap().unwrap();
//! let fries = store.products().find_by_name("Fries").unwrap().unwrap();
//!
//! let cart = storefront.create_cart().unwrap();
//! storefront.add_to_cart(cart.cart_id, burger.id(), 1).unwrap();
//! let summary = storefront.add_to_cart(cart.cart_id, fries.id(), 1).unwrap();
//!
//! assert_eq!(summary.pricing.discount_name.as_deref(), Some("Fries Combo"));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod repository;
pub mod seed;
pub mod store;
pub mod storefront;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use store::Store;
pub use storefront::{CartSummary, ConditionSpec, DiscountUpdate, RuleUpdate, Storefront};

// Repository re-exports for convenience
pub use repository::{
    CartRepository, CategoryRepository, DiscountRepository, OrderRepository, ProductRepository,
    ProductSnapshot, QuantityRuleRepository,
};
