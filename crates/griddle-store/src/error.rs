//! # Store Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  DomainError (griddle-core)   invariant broken / rule violated         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← adds missing-record, lock and config cases │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Caller maps to its own surface (exit code, HTTP status, ...)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use griddle_core::DomainError;
use thiserror::Error;

/// Errors raised by repositories, the storefront and config loading.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record with this id.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A record with this id already exists.
    #[error("{entity} already exists: {id}")]
    Duplicate { entity: &'static str, id: String },

    /// Order placement was attempted on an empty cart.
    #[error("It is not possible to create an order with an empty cart.")]
    EmptyCart,

    /// A repository lock was poisoned by a panicking writer.
    #[error("Repository lock poisoned")]
    LockPoisoned,

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Config serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Invariant or quantity-rule failure from the engine.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        StoreError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Creates a Duplicate error for a given entity type and id.
    pub fn duplicate(entity: &'static str, id: impl ToString) -> Self {
        StoreError::Duplicate {
            entity,
            id: id.to_string(),
        }
    }

    /// True for failures the caller caused (bad input, rule violations),
    /// as opposed to infrastructure failures.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            StoreError::NotFound { .. }
                | StoreError::Duplicate { .. }
                | StoreError::EmptyCart
                | StoreError::Domain(_)
        )
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
