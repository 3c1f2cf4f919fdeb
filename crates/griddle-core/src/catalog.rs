//! # Catalog Types
//!
//! Reference data the engine reads but never owns: categories, products,
//! and the [`ProductLookup`] seam used to resolve a line item's product.
//!
//! ## Snapshot vs. Reference
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Product (catalog)          CartItem / OrderItem (line item)           │
//! │  ─────────────────          ────────────────────────────────            │
//! │  id           ◄──────────── product_id      (reference)                │
//! │  name         ── copied ──► product_name    (snapshot)                 │
//! │  price        ── copied ──► unit_price      (snapshot)                 │
//! │  category_id                (resolved through ProductLookup only)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use serde::Serialize;

use crate::error::{DomainError, DomainResult};
use crate::ids::{CategoryId, ProductId};
use crate::money::Money;
use crate::validation::{validate_name, validate_product_price};
use crate::{MAX_CATEGORY_NAME_LEN, MAX_PRODUCT_NAME_LEN};

// =============================================================================
// Category
// =============================================================================

/// A product category ("Sandwiches", "Extras").
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    id: CategoryId,
    name: String,
}

impl Category {
    /// Creates a category with a fresh id.
    pub fn new(name: &str) -> DomainResult<Self> {
        Self::with_id(CategoryId::new(), name)
    }

    /// Creates a category with a known id (rehydration).
    pub fn with_id(id: CategoryId, name: &str) -> DomainResult<Self> {
        Ok(Category {
            id,
            name: Self::check_name(name)?,
        })
    }

    pub fn id(&self) -> CategoryId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the category, re-validating the name.
    pub fn update_name(&mut self, name: &str) -> DomainResult<()> {
        self.name = Self::check_name(name)?;
        Ok(())
    }

    fn check_name(name: &str) -> DomainResult<String> {
        validate_name("Category name", name, MAX_CATEGORY_NAME_LEN)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A sellable product.
///
/// Holds its category by id; discount conditions and quantity rules compare
/// against `category_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    id: ProductId,
    name: String,
    category_id: CategoryId,
    price: Money,
}

impl Product {
    /// Creates a product with a fresh id.
    pub fn new(name: &str, category: &Category, price: Money) -> DomainResult<Self> {
        Self::with_id(ProductId::new(), name, category.id(), price)
    }

    /// Creates a product with a known id (rehydration).
    pub fn with_id(
        id: ProductId,
        name: &str,
        category_id: CategoryId,
        price: Money,
    ) -> DomainResult<Self> {
        Ok(Product {
            id,
            name: Self::check_name(name)?,
            category_id: Self::check_category(category_id)?,
            price: validate_product_price(price)?,
        })
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category_id(&self) -> CategoryId {
        self.category_id
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn update_name(&mut self, name: &str) -> DomainResult<()> {
        self.name = Self::check_name(name)?;
        Ok(())
    }

    pub fn update_category(&mut self, category: &Category) -> DomainResult<()> {
        self.category_id = Self::check_category(category.id())?;
        Ok(())
    }

    pub fn update_price(&mut self, price: Money) -> DomainResult<()> {
        self.price = validate_product_price(price)?;
        Ok(())
    }

    fn check_name(name: &str) -> DomainResult<String> {
        validate_name("Product name", name, MAX_PRODUCT_NAME_LEN)
    }

    fn check_category(category_id: CategoryId) -> DomainResult<CategoryId> {
        if category_id.is_nil() {
            return Err(DomainError::EmptyId {
                field: "Product category",
            });
        }

        Ok(category_id)
    }
}

// =============================================================================
// Product Lookup
// =============================================================================

/// Read-only product resolution supplied by the caller.
///
/// The engine may call this once per item per condition or rule, so
/// implementations should be a pre-fetched map, not a query. Returning
/// `None` excludes the item from every category aggregate and rule match.
pub trait ProductLookup {
    fn find_product(&self, id: ProductId) -> Option<&Product>;
}

impl<T: ProductLookup + ?Sized> ProductLookup for &T {
    fn find_product(&self, id: ProductId) -> Option<&Product> {
        (**self).find_product(id)
    }
}

impl ProductLookup for HashMap<ProductId, Product> {
    fn find_product(&self, id: ProductId) -> Option<&Product> {
        self.get(&id)
    }
}

/// Batch-fetch results where some ids resolved to nothing.
impl ProductLookup for HashMap<ProductId, Option<Product>> {
    fn find_product(&self, id: ProductId) -> Option<&Product> {
        self.get(&id).and_then(Option::as_ref)
    }
}

impl ProductLookup for [Product] {
    fn find_product(&self, id: ProductId) -> Option<&Product> {
        self.iter().find(|p| p.id() == id)
    }
}

impl ProductLookup for Vec<Product> {
    fn find_product(&self, id: ProductId) -> Option<&Product> {
        self.as_slice().find_product(id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_trims_and_validates() {
        let category = Category::new("  Sandwiches ").unwrap();
        assert_eq!(category.name(), "Sandwiches");

        assert_eq!(
            Category::new("").unwrap_err().to_string(),
            "Category name cannot be empty or null."
        );
        assert!(Category::new(&"A".repeat(101)).is_err());
    }

    #[test]
    fn test_category_update_name() {
        let mut category = Category::new("Extras").unwrap();
        category.update_name("Sides").unwrap();
        assert_eq!(category.name(), "Sides");

        assert!(category.update_name(" ").is_err());
        assert_eq!(category.name(), "Sides");
    }

    #[test]
    fn test_product_creation() {
        let category = Category::new("Sandwiches").unwrap();
        let product = Product::new("X Burger", &category, Money::from_cents(500)).unwrap();

        assert_eq!(product.name(), "X Burger");
        assert_eq!(product.category_id(), category.id());
        assert_eq!(product.price(), Money::from_cents(500));
    }

    #[test]
    fn test_product_rejects_bad_input() {
        let category = Category::new("Sandwiches").unwrap();

        assert!(Product::new("", &category, Money::from_cents(500)).is_err());
        assert!(Product::new(&"A".repeat(201), &category, Money::from_cents(500)).is_err());
        assert!(Product::new("X Egg", &category, Money::zero()).is_err());
        assert!(Product::new("X Egg", &category, Money::from_cents(-1)).is_err());
        assert_eq!(
            Product::new("X Egg", &category, Money::from_cents(100_000_000)),
            Err(DomainError::PriceTooHigh)
        );
        assert!(
            Product::with_id(ProductId::new(), "X Egg", CategoryId::nil(), Money::from_cents(450))
                .is_err()
        );
    }

    #[test]
    fn test_product_updates_revalidate() {
        let sandwiches = Category::new("Sandwiches").unwrap();
        let extras = Category::new("Extras").unwrap();
        let mut product = Product::new("X Bacon", &sandwiches, Money::from_cents(700)).unwrap();

        product.update_price(Money::from_cents(750)).unwrap();
        product.update_name("X Bacon Deluxe").unwrap();
        product.update_category(&extras).unwrap();

        assert_eq!(product.price(), Money::from_cents(750));
        assert_eq!(product.name(), "X Bacon Deluxe");
        assert_eq!(product.category_id(), extras.id());

        assert!(product.update_price(Money::zero()).is_err());
        assert_eq!(product.price(), Money::from_cents(750));
    }

    #[test]
    fn test_lookup_implementations() {
        let category = Category::new("Extras").unwrap();
        let fries = Product::new("Fries", &category, Money::from_cents(200)).unwrap();
        let missing = ProductId::new();

        let by_map: HashMap<ProductId, Product> = [(fries.id(), fries.clone())].into();
        assert_eq!(by_map.find_product(fries.id()), Some(&fries));
        assert_eq!(by_map.find_product(missing), None);

        let partial: HashMap<ProductId, Option<Product>> =
            [(fries.id(), Some(fries.clone())), (missing, None)].into();
        assert!(partial.find_product(fries.id()).is_some());
        assert!(partial.find_product(missing).is_none());

        let list = vec![fries.clone()];
        assert!(list.find_product(fries.id()).is_some());
        assert!((&list).find_product(missing).is_none());
    }
}
