//! # Validation Module
//!
//! Field validators shared by every entity constructor, plus the
//! [`ValidationResult`] value returned by quantity-rule evaluation.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Two Kinds of Failure                               │
//! │                                                                         │
//! │  Invariant violations (this module's validators)                       │
//! │  ├── Blank names, non-positive prices/quantities, nil ids              │
//! │  └── Err(DomainError) immediately, operation rejected                  │
//! │                                                                         │
//! │  Rule violations (quantity_validator.rs)                               │
//! │  ├── Too many sandwiches, too many fries, ...                          │
//! │  └── ValidationResult { is_valid: false, errors: [...] }               │
//! │      collected, never fail-fast                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use crate::error::{DomainError, DomainResult};
use crate::money::Money;
use crate::{MAX_CART_ITEM_QUANTITY, MAX_PRODUCT_PRICE_CENTS};

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required display name and returns it trimmed.
///
/// The length cap applies to the raw input, before trimming.
///
/// ```rust
/// use griddle_core::validation::validate_name;
///
/// assert_eq!(validate_name("Category name", "  Extras ", 100).unwrap(), "Extras");
/// assert!(validate_name("Category name", "   ", 100).is_err());
/// ```
pub fn validate_name(field: &'static str, value: &str, max: usize) -> DomainResult<String> {
    if value.trim().is_empty() {
        return Err(DomainError::Required { field });
    }

    if value.chars().count() > max {
        return Err(DomainError::TooLong { field, max });
    }

    Ok(value.trim().to_string())
}

/// Validates a required text field with no length cap.
pub fn validate_required(field: &'static str, value: &str) -> DomainResult<String> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(DomainError::Required { field });
    }

    Ok(trimmed.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a cart line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_CART_ITEM_QUANTITY (999)
pub fn validate_cart_quantity(qty: u32) -> DomainResult<u32> {
    let qty = validate_positive("Quantity", qty)?;

    if qty > MAX_CART_ITEM_QUANTITY {
        return Err(DomainError::QuantityTooLarge {
            max: MAX_CART_ITEM_QUANTITY,
        });
    }

    Ok(qty)
}

/// Validates that a count is strictly positive.
pub fn validate_positive(field: &'static str, value: u32) -> DomainResult<u32> {
    if value == 0 {
        return Err(DomainError::MustBePositive { field });
    }

    Ok(value)
}

/// Validates a snapshot unit price.
///
/// Snapshots are taken from catalog prices, so the catalog cap applies
/// here too and keeps `unit_price * quantity` in range.
pub fn validate_unit_price(price: Money) -> DomainResult<Money> {
    if !price.is_positive() {
        return Err(DomainError::MustBePositive { field: "Unit price" });
    }

    if price > Money::from_cents(MAX_PRODUCT_PRICE_CENTS) {
        return Err(DomainError::PriceTooHigh);
    }

    Ok(price)
}

/// Validates a catalog price.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed 999,999.99
pub fn validate_product_price(price: Money) -> DomainResult<Money> {
    if !price.is_positive() {
        return Err(DomainError::MustBePositive {
            field: "Product price",
        });
    }

    if price > Money::from_cents(MAX_PRODUCT_PRICE_CENTS) {
        return Err(DomainError::PriceTooHigh);
    }

    Ok(price)
}

// =============================================================================
// Validation Result
// =============================================================================

/// Outcome of evaluating quantity rules.
///
/// Immutable once built. `errors` keeps rule-iteration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    is_valid: bool,
    errors: Vec<String>,
}

impl ValidationResult {
    /// A passing result with no messages.
    pub fn success() -> Self {
        ValidationResult {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    /// A failing result with a single message.
    ///
    /// Blank messages are rejected.
    pub fn failure(error: impl Into<String>) -> DomainResult<Self> {
        let error = error.into();

        if error.trim().is_empty() {
            return Err(DomainError::BlankValidationMessage);
        }

        Ok(ValidationResult {
            is_valid: false,
            errors: vec![error],
        })
    }

    /// A failing result carrying every message given.
    ///
    /// An empty list is accepted and yields a failure with no messages.
    pub fn failure_many<I, S>(errors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ValidationResult {
            is_valid: false,
            errors: errors.into_iter().map(Into::into).collect(),
        }
    }

    /// True when no rule was violated.
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Violation messages in rule order.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Converts a failure into `DomainError::RuleViolation`, joining the
    /// messages with single spaces.
    pub fn into_domain_result(self) -> DomainResult<()> {
        if self.is_valid {
            return Ok(());
        }

        Err(DomainError::RuleViolation(self.errors.join(" ")))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("Product name", "X Burger", 200).unwrap(), "X Burger");
        assert_eq!(validate_name("Product name", "  Fries  ", 200).unwrap(), "Fries");
        assert!(validate_name("Product name", "", 200).is_err());
        assert!(validate_name("Product name", "   ", 200).is_err());
        assert_eq!(
            validate_name("Category name", &"A".repeat(101), 100),
            Err(DomainError::TooLong {
                field: "Category name",
                max: 100
            })
        );
        assert!(validate_name("Category name", &"A".repeat(100), 100).is_ok());
    }

    #[test]
    fn test_validate_cart_quantity() {
        assert!(validate_cart_quantity(1).is_ok());
        assert!(validate_cart_quantity(999).is_ok());

        assert_eq!(
            validate_cart_quantity(0),
            Err(DomainError::MustBePositive { field: "Quantity" })
        );
        assert_eq!(
            validate_cart_quantity(1000),
            Err(DomainError::QuantityTooLarge { max: 999 })
        );
    }

    #[test]
    fn test_validate_prices() {
        assert!(validate_unit_price(Money::from_cents(1)).is_ok());
        assert!(validate_unit_price(Money::zero()).is_err());
        assert!(validate_unit_price(Money::from_cents(-100)).is_err());
        assert!(validate_unit_price(Money::from_cents(99_999_999)).is_ok());
        assert_eq!(
            validate_unit_price(Money::from_cents(100_000_000)),
            Err(DomainError::PriceTooHigh)
        );

        assert!(validate_product_price(Money::from_cents(99_999_999)).is_ok());
        assert_eq!(
            validate_product_price(Money::from_cents(100_000_000)),
            Err(DomainError::PriceTooHigh)
        );
    }

    #[test]
    fn test_success_has_no_errors() {
        let result = ValidationResult::success();
        assert!(result.is_valid());
        assert!(result.errors().is_empty());
        assert!(result.into_domain_result().is_ok());
    }

    #[test]
    fn test_failure_with_single_message() {
        let result = ValidationResult::failure("Too many fries.").unwrap();
        assert!(!result.is_valid());
        assert_eq!(result.errors(), ["Too many fries."]);
    }

    #[test]
    fn test_failure_rejects_blank_message() {
        assert_eq!(
            ValidationResult::failure(""),
            Err(DomainError::BlankValidationMessage)
        );
        assert_eq!(
            ValidationResult::failure("   "),
            Err(DomainError::BlankValidationMessage)
        );
    }

    #[test]
    fn test_failure_many_accepts_empty_list() {
        let result = ValidationResult::failure_many(Vec::<String>::new());
        assert!(!result.is_valid());
        assert!(result.errors().is_empty());
    }

    #[test]
    fn test_failure_many_joins_into_rule_violation() {
        let result = ValidationResult::failure_many(["first.", "second."]);
        assert_eq!(result.errors().len(), 2);
        assert_eq!(
            result.into_domain_result(),
            Err(DomainError::RuleViolation("first. second.".to_string()))
        );
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(ValidationResult::success()).unwrap();
        assert_eq!(json, serde_json::json!({ "isValid": true, "errors": [] }));
    }
}
