//! # Cart Repository

use griddle_core::{Cart, CartId};
use tracing::debug;

use super::Table;
use crate::error::{StoreError, StoreResult};

#[derive(Default)]
pub struct CartRepository {
    table: Table<CartId, Cart>,
}

impl CartRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, cart: Cart) -> StoreResult<()> {
        let id = cart.id();
        debug!(%id, "Creating cart");

        if !self.table.insert(id, cart)? {
            return Err(StoreError::duplicate("Cart", id));
        }
        Ok(())
    }

    pub fn get(&self, id: CartId) -> StoreResult<Cart> {
        self.table
            .get(id)?
            .ok_or_else(|| StoreError::not_found("Cart", id))
    }

    pub fn exists(&self, id: CartId) -> StoreResult<bool> {
        self.table.contains(id)
    }

    /// Stores the cart, creating it if it is new.
    pub fn save(&self, cart: Cart) -> StoreResult<()> {
        self.table.upsert(cart.id(), cart)
    }

    /// Applies a cart mutation atomically.
    ///
    /// The stored cart only changes if `f` succeeds. Returns the cart as
    /// stored afterwards.
    pub fn modify<F, E>(&self, id: CartId, f: F) -> StoreResult<Cart>
    where
        F: FnOnce(&mut Cart) -> Result<(), E>,
        E: Into<StoreError>,
    {
        self.table
            .update(id, |cart| {
                f(cart).map_err(Into::<StoreError>::into)?;
                Ok::<_, StoreError>(cart.clone())
            })?
            .ok_or_else(|| StoreError::not_found("Cart", id))?
    }

    pub fn delete(&self, id: CartId) -> StoreResult<()> {
        debug!(%id, "Deleting cart");
        self.table
            .remove(id)?
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found("Cart", id))
    }
}
