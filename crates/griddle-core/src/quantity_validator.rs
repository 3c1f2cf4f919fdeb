//! # Quantity Validator
//!
//! Evaluates every quantity rule against a cart or an order and collects
//! one message per violated rule, in rule order.
//!
//! ```text
//! for rule in rules:
//!     qty = Σ item.quantity   where rule.matches(lookup(item.product_id))
//!     qty > rule.max_quantity  ──► push message
//!
//! no messages ──► ValidationResult::success()
//! otherwise   ──► ValidationResult::failure_many(messages)
//! ```
//!
//! The same evaluation runs in two places: against a simulated cart before
//! a cart change is committed, and against the order snapshot being placed.
//! Only the message wording differs.

use tracing::trace;

use crate::cart::Cart;
use crate::catalog::ProductLookup;
use crate::line_item::LineItem;
use crate::order::Order;
use crate::quantity_rule::OrderQuantityRule;
use crate::validation::ValidationResult;

/// Holds an ordered set of rules; every rule is evaluated independently.
#[derive(Debug, Clone, Default)]
pub struct OrderQuantityValidator {
    rules: Vec<OrderQuantityRule>,
}

impl OrderQuantityValidator {
    pub fn new(rules: impl IntoIterator<Item = OrderQuantityRule>) -> Self {
        OrderQuantityValidator {
            rules: rules.into_iter().collect(),
        }
    }

    pub fn rules(&self) -> &[OrderQuantityRule] {
        &self.rules
    }

    /// Validates a cart. A missing cart is a failure.
    pub fn validate_cart<L>(&self, cart: Option<&Cart>, lookup: &L) -> ValidationResult
    where
        L: ProductLookup + ?Sized,
    {
        let Some(cart) = cart else {
            return ValidationResult::failure_many(["Cart cannot be null."]);
        };

        self.evaluate(cart.items(), lookup, |rule| {
            format!(
                "You already have {} in your cart. Only {} per order is allowed.",
                rule.rule_name(),
                rule.max_quantity()
            )
        })
    }

    /// Validates an order. A missing order is a failure.
    pub fn validate_order<L>(&self, order: Option<&Order>, lookup: &L) -> ValidationResult
    where
        L: ProductLookup + ?Sized,
    {
        let Some(order) = order else {
            return ValidationResult::failure_many(["Order cannot be null."]);
        };

        self.evaluate(order.items(), lookup, |rule| {
            format!(
                "The order contains {} in excess. Only {} per order is allowed.",
                rule.rule_name(),
                rule.max_quantity()
            )
        })
    }

    fn evaluate<I, L, F>(&self, items: &[I], lookup: &L, message: F) -> ValidationResult
    where
        I: LineItem,
        L: ProductLookup + ?Sized,
        F: Fn(&OrderQuantityRule) -> String,
    {
        if self.rules.is_empty() {
            return ValidationResult::success();
        }

        let errors: Vec<String> = self
            .rules
            .iter()
            .filter(|rule| {
                let quantity = items
                    .iter()
                    .filter(|item| rule.matches(lookup.find_product(item.product_id())))
                    .map(|item| item.quantity())
                    .fold(0u32, u32::saturating_add);

                trace!(
                    rule = rule.rule_name(),
                    quantity,
                    max = rule.max_quantity(),
                    "quantity rule evaluated"
                );

                quantity > rule.max_quantity()
            })
            .map(message)
            .collect();

        if errors.is_empty() {
            ValidationResult::success()
        } else {
            ValidationResult::failure_many(errors)
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
