//! # Repository Module
//!
//! In-memory repositories, one per aggregate.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Storefront                                                            │
//! │       │  store.carts().get(id)                                         │
//! │       ▼                                                                 │
//! │  CartRepository ──► Table<CartId, Cart>                                │
//! │                       RwLock { rows: HashMap, order: Vec }             │
//! │                                                                         │
//! │  • Readers share the lock, writers take it exclusively                 │
//! │  • Values are cloned in and out; callers never hold a guard            │
//! │  • `list()` returns rows in insertion order                            │
//! │  • A poisoned lock surfaces as StoreError::LockPoisoned                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Writes to a single aggregate are serialized by the table lock, but a
//! read-modify-write sequence spanning two calls is not atomic. Use
//! [`Table::update`] when that matters.
//!
//! ## Available Repositories
//!
//! - [`CategoryRepository`]
//! - [`ProductRepository`] (+ [`ProductSnapshot`] for engine lookups)
//! - [`CartRepository`]
//! - [`OrderRepository`]
//! - [`DiscountRepository`]
//! - [`QuantityRuleRepository`]

pub mod cart;
pub mod catalog;
pub mod discount;
pub mod order;
pub mod rules;

pub use cart::CartRepository;
pub use catalog::{CategoryRepository, ProductRepository, ProductSnapshot};
pub use discount::DiscountRepository;
pub use order::OrderRepository;
pub use rules::QuantityRuleRepository;

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Table
// =============================================================================

struct Rows<K, V> {
    rows: HashMap<K, V>,
    order: Vec<K>,
}

/// A lock-guarded, insertion-ordered map.
pub(crate) struct Table<K, V> {
    inner: RwLock<Rows<K, V>>,
}

impl<K, V> Default for Table<K, V> {
    fn default() -> Self {
        Table {
            inner: RwLock::new(Rows {
                rows: HashMap::new(),
                order: Vec::new(),
            }),
        }
    }
}

impl<K, V> Table<K, V>
where
    K: Copy + Eq + Hash,
    V: Clone,
{
    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Rows<K, V>>> {
        self.inner.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Rows<K, V>>> {
        self.inner.write().map_err(|_| StoreError::LockPoisoned)
    }

    pub(crate) fn get(&self, key: K) -> StoreResult<Option<V>> {
        Ok(self.read()?.rows.get(&key).cloned())
    }

    /// Fetches several rows under one read lock. Absent keys are skipped.
    pub(crate) fn get_many<I>(&self, keys: I) -> StoreResult<HashMap<K, V>>
    where
        I: IntoIterator<Item = K>,
    {
        let rows = self.read()?;
        Ok(keys
            .into_iter()
            .filter_map(|key| rows.rows.get(&key).map(|value| (key, value.clone())))
            .collect())
    }

    pub(crate) fn contains(&self, key: K) -> StoreResult<bool> {
        Ok(self.read()?.rows.contains_key(&key))
    }

    pub(crate) fn len(&self) -> StoreResult<usize> {
        Ok(self.read()?.order.len())
    }

    /// All rows in insertion order.
    pub(crate) fn list(&self) -> StoreResult<Vec<V>> {
        self.filter(|_| true)
    }

    /// Matching rows in insertion order.
    pub(crate) fn filter<F>(&self, mut keep: F) -> StoreResult<Vec<V>>
    where
        F: FnMut(&V) -> bool,
    {
        let rows = self.read()?;
        Ok(rows
            .order
            .iter()
            .filter_map(|key| rows.rows.get(key))
            .filter(|value| keep(*value))
            .cloned()
            .collect())
    }

    /// First matching row in insertion order.
    pub(crate) fn find<F>(&self, mut pred: F) -> StoreResult<Option<V>>
    where
        F: FnMut(&V) -> bool,
    {
        let rows = self.read()?;
        Ok(rows
            .order
            .iter()
            .filter_map(|key| rows.rows.get(key))
            .find(|value| pred(*value))
            .cloned())
    }

    /// Inserts a new row. Returns false (and changes nothing) if the key
    /// is taken.
    pub(crate) fn insert(&self, key: K, value: V) -> StoreResult<bool> {
        let mut rows = self.write()?;
        if rows.rows.contains_key(&key) {
            return Ok(false);
        }

        rows.rows.insert(key, value);
        rows.order.push(key);
        Ok(true)
    }

    /// Replaces an existing row. Returns false if the key is absent.
    pub(crate) fn replace(&self, key: K, value: V) -> StoreResult<bool> {
        let mut rows = self.write()?;
        match rows.rows.get_mut(&key) {
            Some(slot) => {
                *slot = value;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Inserts or replaces, keeping the original position on replace.
    pub(crate) fn upsert(&self, key: K, value: V) -> StoreResult<()> {
        let mut rows = self.write()?;
        if rows.rows.insert(key, value).is_none() {
            rows.order.push(key);
        }
        Ok(())
    }

    /// Applies `f` to a row under the write lock.
    ///
    /// Returns `Ok(None)` if the key is absent. The row is only changed if
    /// `f` returns `Ok`; `f` works on a copy.
    pub(crate) fn update<F, R, E>(&self, key: K, f: F) -> StoreResult<Option<Result<R, E>>>
    where
        F: FnOnce(&mut V) -> Result<R, E>,
    {
        let mut rows = self.write()?;
        let Some(slot) = rows.rows.get_mut(&key) else {
            return Ok(None);
        };

        let mut draft = slot.clone();
        let outcome = f(&mut draft);
        if outcome.is_ok() {
            *slot = draft;
        }
        Ok(Some(outcome))
    }

    pub(crate) fn remove(&self, key: K) -> StoreResult<Option<V>> {
        let mut rows = self.write()?;
        let removed = rows.rows.remove(&key);
        if removed.is_some() {
            rows.order.retain(|k| *k != key);
        }
        Ok(removed)
    }

    pub(crate) fn clear(&self) -> StoreResult<()> {
        let mut rows = self.write()?;
        rows.rows.clear();
        rows.order.clear();
        Ok(())
    }
}
