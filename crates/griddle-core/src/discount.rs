//! # Discount Model
//!
//! Named percentage discounts guarded by a conjunction of conditions.
//!
//! ## Condition Shapes
//! ```text
//! ┌──────────────────────┬──────────────────────────────────────────────────┐
//! │  Shape               │  Matches when                                    │
//! ├──────────────────────┼──────────────────────────────────────────────────┤
//! │  Product             │  the line for that product has qty >= min        │
//! │  Category            │  sum(qty of lines in category) >= min            │
//! │  ProductAndCategory  │  the product is present (any qty)                │
//! │                      │  AND sum(qty of lines in category) >= min        │
//! └──────────────────────┴──────────────────────────────────────────────────┘
//! ```
//!
//! The product+category shape only checks presence of the product; the
//! threshold applies to the category aggregate. A discount matches when
//! it is active, has at least one condition, and every condition matches.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::catalog::ProductLookup;
use crate::error::{DomainError, DomainResult};
use crate::ids::{CategoryId, DiscountId, ProductId};
use crate::line_item::LineItem;
use crate::money::{Money, Percentage};
use crate::validation::{validate_name, validate_positive};
use crate::MAX_DISCOUNT_NAME_LEN;

// =============================================================================
// Discount Condition
// =============================================================================

/// A predicate over the line items of a cart or order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiscountCondition {
    Product {
        product_id: ProductId,
        minimum_quantity: u32,
    },
    Category {
        category_id: CategoryId,
        minimum_quantity: u32,
    },
    ProductAndCategory {
        product_id: ProductId,
        category_id: CategoryId,
        minimum_quantity: u32,
    },
}

impl DiscountCondition {
    /// Picks the shape from whichever ids are present.
    pub fn new(
        product_id: Option<ProductId>,
        category_id: Option<CategoryId>,
        minimum_quantity: u32,
    ) -> DomainResult<Self> {
        match (product_id, category_id) {
            (Some(product_id), Some(category_id)) => {
                Self::for_product_and_category(product_id, category_id, minimum_quantity)
            }
            (Some(product_id), None) => Self::for_product(product_id, minimum_quantity),
            (None, Some(category_id)) => Self::for_category(category_id, minimum_quantity),
            (None, None) => Err(DomainError::ConditionWithoutTarget),
        }
    }

    pub fn for_product(product_id: ProductId, minimum_quantity: u32) -> DomainResult<Self> {
        Ok(DiscountCondition::Product {
            product_id: check_product_id(product_id)?,
            minimum_quantity: check_minimum(minimum_quantity)?,
        })
    }

    pub fn for_category(category_id: CategoryId, minimum_quantity: u32) -> DomainResult<Self> {
        Ok(DiscountCondition::Category {
            category_id: check_category_id(category_id)?,
            minimum_quantity: check_minimum(minimum_quantity)?,
        })
    }

    pub fn for_product_and_category(
        product_id: ProductId,
        category_id: CategoryId,
        minimum_quantity: u32,
    ) -> DomainResult<Self> {
        Ok(DiscountCondition::ProductAndCategory {
            product_id: check_product_id(product_id)?,
            category_id: check_category_id(category_id)?,
            minimum_quantity: check_minimum(minimum_quantity)?,
        })
    }

    pub fn product_id(&self) -> Option<ProductId> {
        match *self {
            DiscountCondition::Product { product_id, .. }
            | DiscountCondition::ProductAndCategory { product_id, .. } => Some(product_id),
            DiscountCondition::Category { .. } => None,
        }
    }

    pub fn category_id(&self) -> Option<CategoryId> {
        match *self {
            DiscountCondition::Category { category_id, .. }
            | DiscountCondition::ProductAndCategory { category_id, .. } => Some(category_id),
            DiscountCondition::Product { .. } => None,
        }
    }

    pub fn minimum_quantity(&self) -> u32 {
        match *self {
            DiscountCondition::Product {
                minimum_quantity, ..
            }
            | DiscountCondition::Category {
                minimum_quantity, ..
            }
            | DiscountCondition::ProductAndCategory {
                minimum_quantity, ..
            } => minimum_quantity,
        }
    }

    /// Evaluates the condition against a set of line items.
    pub fn matches<I, L>(&self, items: &[I], lookup: &L) -> bool
    where
        I: LineItem,
        L: ProductLookup + ?Sized,
    {
        match *self {
            DiscountCondition::ProductAndCategory {
                product_id,
                category_id,
                minimum_quantity,
            } => {
                let has_product = items.iter().any(|item| item.product_id() == product_id);

                has_product && category_quantity(items, category_id, lookup) >= minimum_quantity
            }
            DiscountCondition::Product {
                product_id,
                minimum_quantity,
            } => items
                .iter()
                .find(|item| item.product_id() == product_id)
                .is_some_and(|item| item.quantity() >= minimum_quantity),
            DiscountCondition::Category {
                category_id,
                minimum_quantity,
            } => category_quantity(items, category_id, lookup) >= minimum_quantity,
        }
    }
}

/// Sum of quantities of items whose resolved product is in `category_id`.
/// Unresolved products contribute nothing.
fn category_quantity<I, L>(items: &[I], category_id: CategoryId, lookup: &L) -> u32
where
    I: LineItem,
    L: ProductLookup + ?Sized,
{
    items
        .iter()
        .filter(|item| {
            lookup
                .find_product(item.product_id())
                .is_some_and(|product| product.category_id() == category_id)
        })
        .map(|item| item.quantity())
        .fold(0u32, u32::saturating_add)
}

fn check_product_id(id: ProductId) -> DomainResult<ProductId> {
    if id.is_nil() {
        return Err(DomainError::EmptyId { field: "Product ID" });
    }
    Ok(id)
}

fn check_category_id(id: CategoryId) -> DomainResult<CategoryId> {
    if id.is_nil() {
        return Err(DomainError::EmptyId {
            field: "Category ID",
        });
    }
    Ok(id)
}

fn check_minimum(minimum_quantity: u32) -> DomainResult<u32> {
    validate_positive("Minimum quantity", minimum_quantity)
}

// =============================================================================
// Discount
// =============================================================================

/// A named percentage discount.
///
/// New discounts are active with no conditions, which makes them
/// inapplicable until a condition is added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Discount {
    id: DiscountId,
    name: String,
    percentage: Percentage,
    conditions: Vec<DiscountCondition>,
    is_active: bool,
}

impl Discount {
    pub fn new(name: &str, percentage: Decimal) -> DomainResult<Self> {
        Self::with_id(DiscountId::new(), name, percentage)
    }

    pub fn with_id(id: DiscountId, name: &str, percentage: Decimal) -> DomainResult<Self> {
        Ok(Discount {
            id,
            name: Self::check_name(name)?,
            percentage: Percentage::new(percentage)?,
            conditions: Vec::new(),
            is_active: true,
        })
    }

    pub fn id(&self) -> DiscountId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn percentage(&self) -> Percentage {
        self.percentage
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn conditions(&self) -> &[DiscountCondition] {
        &self.conditions
    }

    pub fn add_condition(&mut self, condition: DiscountCondition) {
        self.conditions.push(condition);
    }

    /// Removes the first condition equal to `condition`.
    /// Returns false when none was found.
    pub fn remove_condition(&mut self, condition: &DiscountCondition) -> bool {
        match self.conditions.iter().position(|c| c == condition) {
            Some(index) => {
                self.conditions.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn clear_conditions(&mut self) {
        self.conditions.clear();
    }

    pub fn activate(&mut self) {
        self.is_active = true;
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
    }

    pub fn update_name(&mut self, name: &str) -> DomainResult<()> {
        self.name = Self::check_name(name)?;
        Ok(())
    }

    pub fn update_percentage(&mut self, percentage: Decimal) -> DomainResult<()> {
        self.percentage = Percentage::new(percentage)?;
        Ok(())
    }

    /// True when active, non-empty, and every condition matches.
    pub fn is_applicable<I, L>(&self, items: &[I], lookup: &L) -> bool
    where
        I: LineItem,
        L: ProductLookup + ?Sized,
    {
        if !self.is_active || self.conditions.is_empty() {
            return false;
        }

        self.conditions
            .iter()
            .all(|condition| condition.matches(items, lookup))
    }

    /// `total * percentage / 100`, unrounded.
    pub fn calculate_discount(&self, total: Money) -> Money {
        self.percentage.of(total)
    }

    fn check_name(name: &str) -> DomainResult<String> {
        validate_name("Discount name", name, MAX_DISCOUNT_NAME_LEN)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
