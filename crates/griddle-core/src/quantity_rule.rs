//! # Quantity Rules
//!
//! "At most N units of this product, or of this category, per cart/order."
//!
//! A rule targeting both a product and a category matches a product that
//! satisfies EITHER one. This is deliberately different from
//! [`DiscountCondition::ProductAndCategory`](crate::discount::DiscountCondition),
//! which needs both.
//!
//! ```text
//! OrderQuantityRuleEntity ──to_value_object()──► OrderQuantityRule
//!   (has an id, mutable)                          (evaluated by the validator)
//! ```

use serde::Serialize;

use crate::catalog::Product;
use crate::error::{DomainError, DomainResult};
use crate::ids::{CategoryId, ProductId, RuleId};
use crate::validation::{validate_positive, validate_required};

// =============================================================================
// Rule Scope
// =============================================================================

/// What a rule counts. There is no "neither" scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleScope {
    Product {
        product_id: ProductId,
    },
    Category {
        category_id: CategoryId,
    },
    ProductOrCategory {
        product_id: ProductId,
        category_id: CategoryId,
    },
}

impl RuleScope {
    /// Builds a scope from optional ids.
    ///
    /// Fails when both are absent or either is the nil id.
    pub fn new(product_id: Option<ProductId>, category_id: Option<CategoryId>) -> DomainResult<Self> {
        if product_id.is_some_and(|id| id.is_nil()) {
            return Err(DomainError::EmptyId { field: "Product ID" });
        }
        if category_id.is_some_and(|id| id.is_nil()) {
            return Err(DomainError::EmptyId {
                field: "Category ID",
            });
        }

        match (product_id, category_id) {
            (Some(product_id), Some(category_id)) => Ok(RuleScope::ProductOrCategory {
                product_id,
                category_id,
            }),
            (Some(product_id), None) => Ok(RuleScope::Product { product_id }),
            (None, Some(category_id)) => Ok(RuleScope::Category { category_id }),
            (None, None) => Err(DomainError::RuleWithoutTarget),
        }
    }

    pub fn product_id(&self) -> Option<ProductId> {
        match *self {
            RuleScope::Product { product_id } | RuleScope::ProductOrCategory { product_id, .. } => {
                Some(product_id)
            }
            RuleScope::Category { .. } => None,
        }
    }

    pub fn category_id(&self) -> Option<CategoryId> {
        match *self {
            RuleScope::Category { category_id }
            | RuleScope::ProductOrCategory { category_id, .. } => Some(category_id),
            RuleScope::Product { .. } => None,
        }
    }

    /// True if the product's id or its category is targeted.
    pub fn matches(&self, product: &Product) -> bool {
        self.product_id() == Some(product.id()) || self.category_id() == Some(product.category_id())
    }
}

fn check_max_quantity(max_quantity: u32) -> DomainResult<u32> {
    validate_positive("Maximum quantity", max_quantity)
}

fn check_rule_name(rule_name: &str) -> DomainResult<String> {
    validate_required("Rule name", rule_name)
}

// =============================================================================
// OrderQuantityRule (value object)
// =============================================================================

/// A maximum-quantity constraint as evaluated by
/// [`OrderQuantityValidator`](crate::quantity_validator::OrderQuantityValidator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderQuantityRule {
    scope: RuleScope,
    max_quantity: u32,
    rule_name: String,
}

impl OrderQuantityRule {
    pub fn new(
        product_id: Option<ProductId>,
        category_id: Option<CategoryId>,
        max_quantity: u32,
        rule_name: &str,
    ) -> DomainResult<Self> {
        Self::with_scope(RuleScope::new(product_id, category_id)?, max_quantity, rule_name)
    }

    pub fn for_product(product_id: ProductId, max_quantity: u32, rule_name: &str) -> DomainResult<Self> {
        Self::new(Some(product_id), None, max_quantity, rule_name)
    }

    pub fn for_category(
        category_id: CategoryId,
        max_quantity: u32,
        rule_name: &str,
    ) -> DomainResult<Self> {
        Self::new(None, Some(category_id), max_quantity, rule_name)
    }

    pub fn with_scope(scope: RuleScope, max_quantity: u32, rule_name: &str) -> DomainResult<Self> {
        Ok(OrderQuantityRule {
            scope,
            max_quantity: check_max_quantity(max_quantity)?,
            rule_name: check_rule_name(rule_name)?,
        })
    }

    pub fn scope(&self) -> RuleScope {
        self.scope
    }

    pub fn product_id(&self) -> Option<ProductId> {
        self.scope.product_id()
    }

    pub fn category_id(&self) -> Option<CategoryId> {
        self.scope.category_id()
    }

    pub fn max_quantity(&self) -> u32 {
        self.max_quantity
    }

    pub fn rule_name(&self) -> &str {
        &self.rule_name
    }

    /// Whether the rule counts this product. `None` never matches.
    pub fn matches(&self, product: Option<&Product>) -> bool {
        product.is_some_and(|product| self.scope.matches(product))
    }
}

// =============================================================================
// OrderQuantityRuleEntity (persisted form)
// =============================================================================

/// A stored quantity rule with identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderQuantityRuleEntity {
    id: RuleId,
    scope: RuleScope,
    max_quantity: u32,
    rule_name: String,
}

impl OrderQuantityRuleEntity {
    pub fn new(
        product_id: Option<ProductId>,
        category_id: Option<CategoryId>,
        max_quantity: u32,
        rule_name: &str,
    ) -> DomainResult<Self> {
        Self::with_id(RuleId::new(), product_id, category_id, max_quantity, rule_name)
    }

    pub fn with_id(
        id: RuleId,
        product_id: Option<ProductId>,
        category_id: Option<CategoryId>,
        max_quantity: u32,
        rule_name: &str,
    ) -> DomainResult<Self> {
        Ok(OrderQuantityRuleEntity {
            id,
            scope: RuleScope::new(product_id, category_id)?,
            max_quantity: check_max_quantity(max_quantity)?,
            rule_name: check_rule_name(rule_name)?,
        })
    }

    pub fn id(&self) -> RuleId {
        self.id
    }

    pub fn scope(&self) -> RuleScope {
        self.scope
    }

    pub fn product_id(&self) -> Option<ProductId> {
        self.scope.product_id()
    }

    pub fn category_id(&self) -> Option<CategoryId> {
        self.scope.category_id()
    }

    pub fn max_quantity(&self) -> u32 {
        self.max_quantity
    }

    pub fn rule_name(&self) -> &str {
        &self.rule_name
    }

    /// Partial update.
    ///
    /// `None` keeps the current value, as does a blank `rule_name`. Setting
    /// an id adds it to the scope; ids are never removed. Nothing changes
    /// if any argument is invalid.
    pub fn update(
        &mut self,
        product_id: Option<ProductId>,
        category_id: Option<CategoryId>,
        max_quantity: Option<u32>,
        rule_name: Option<&str>,
    ) -> DomainResult<()> {
        let scope = RuleScope::new(
            product_id.or(self.scope.product_id()),
            category_id.or(self.scope.category_id()),
        )?;
        let max_quantity = match max_quantity {
            Some(max) => check_max_quantity(max)?,
            None => self.max_quantity,
        };
        let rule_name = match rule_name.filter(|name| !name.trim().is_empty()) {
            Some(name) => check_rule_name(name)?,
            None => self.rule_name.clone(),
        };

        self.scope = scope;
        self.max_quantity = max_quantity;
        self.rule_name = rule_name;
        Ok(())
    }

    pub fn to_value_object(&self) -> OrderQuantityRule {
        OrderQuantityRule {
            scope: self.scope,
            max_quantity: self.max_quantity,
            rule_name: self.rule_name.clone(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
