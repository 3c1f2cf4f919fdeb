//! # Error Types
//!
//! Domain-specific error types for griddle-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  griddle-core errors (this file)                                       │
//! │  └── DomainError      - Invariant violations & rejected operations     │
//! │                                                                         │
//! │  griddle-store errors (separate crate)                                 │
//! │  └── StoreError       - Missing records, lock failures, config         │
//! │                                                                         │
//! │  Flow: DomainError → StoreError → caller                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Quantity-rule violations are NOT errors at this level. The validator
//! returns a [`ValidationResult`](crate::validation::ValidationResult) and
//! the caller decides whether to turn it into [`DomainError::RuleViolation`].

use thiserror::Error;

// =============================================================================
// Domain Error
// =============================================================================

/// Construction and mutation failures.
///
/// Raised at the point where an invariant would be broken. Never retried:
/// the whole operation is rejected and the message is shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A required text field is blank.
    #[error("{field} cannot be empty or null.")]
    Required { field: &'static str },

    /// A text field exceeds its maximum length.
    #[error("{field} cannot exceed {max} characters.")]
    TooLong { field: &'static str, max: usize },

    /// A required identifier is the nil UUID.
    #[error("{field} cannot be empty.")]
    EmptyId { field: &'static str },

    /// A numeric value must be strictly positive.
    #[error("{field} must be greater than zero.")]
    MustBePositive { field: &'static str },

    /// Cart item quantity above the per-line cap.
    #[error("Quantity cannot exceed {max}.")]
    QuantityTooLarge { max: u32 },

    /// Product price above the catalog cap.
    #[error("Product price cannot exceed 999,999.99.")]
    PriceTooHigh,

    /// Discount percentage above 100.
    #[error("Discount percentage cannot exceed 100%.")]
    PercentageTooHigh,

    /// Quantity rule constructed without a product or a category.
    #[error("The rule must have at least one ProductId or CategoryId.")]
    RuleWithoutTarget,

    /// Discount condition requested with neither a product nor a category.
    #[error("The condition must have at least ProductId or CategoryId.")]
    ConditionWithoutTarget,

    /// Cart mutation referenced a product that is not in the cart.
    #[error("Item was not found in the cart.")]
    ItemNotFound,

    /// Status change on a delivered or cancelled order.
    #[error("It is not possible to change the status of a delivered or cancelled order.")]
    OrderClosed,

    /// Cancellation of a delivered order.
    #[error("It is not possible to cancel an already delivered order.")]
    OrderAlreadyDelivered,

    /// Unknown order status name. Carries the caller's input unchanged.
    #[error("Invalid status.")]
    InvalidStatus(String),

    /// `ValidationResult::failure` called with a blank message.
    #[error("The error cannot be empty or null.")]
    BlankValidationMessage,

    /// One or more quantity rules were violated (messages joined by spaces).
    #[error("{0}")]
    RuleViolation(String),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with DomainError.
pub type DomainResult<T> = Result<T, DomainError>;

// =============================================================================
// Unit Tests
// =============================================================================
