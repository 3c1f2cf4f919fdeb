//! # Order Repository

use griddle_core::{Order, OrderId, OrderStatus};
use tracing::debug;

use super::Table;
use crate::error::{StoreError, StoreResult};

#[derive(Default)]
pub struct OrderRepository {
    table: Table<OrderId, Order>,
}

impl OrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, order: Order) -> StoreResult<()> {
        let id = order.id();
        debug!(%id, total = %order.total(), "Storing order");

        if !self.table.insert(id, order)? {
            return Err(StoreError::duplicate("Order", id));
        }
        Ok(())
    }

    pub fn get(&self, id: OrderId) -> StoreResult<Order> {
        self.table
            .get(id)?
            .ok_or_else(|| StoreError::not_found("Order", id))
    }

    /// All orders, oldest first.
    pub fn list(&self) -> StoreResult<Vec<Order>> {
        self.table.list()
    }

    pub fn list_by_status(&self, status: OrderStatus) -> StoreResult<Vec<Order>> {
        self.table.filter(|order| order.status() == status)
    }

    /// Applies an order mutation atomically and returns the stored result.
    pub fn modify<F, E>(&self, id: OrderId, f: F) -> StoreResult<Order>
    where
        F: FnOnce(&mut Order) -> Result<(), E>,
        E: Into<StoreError>,
    {
        self.table
            .update(id, |order| {
                f(order).map_err(Into::<StoreError>::into)?;
                Ok::<_, StoreError>(order.clone())
            })?
            .ok_or_else(|| StoreError::not_found("Order", id))?
    }

    pub fn delete(&self, id: OrderId) -> StoreResult<()> {
        self.table
            .remove(id)?
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found("Order", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_by_status() {
        let repo = OrderRepository::new();
        let pending = Order::new();
        let ready = Order::new();
        let ready_id = ready.id();

        repo.create(pending).unwrap();
        repo.create(ready).unwrap();
        repo.modify(ready_id, |o| o.update_status(OrderStatus::Ready))
            .unwrap();

        assert_eq!(repo.list().unwrap().len(), 2);
        let ready = repo.list_by_status(OrderStatus::Ready).unwrap();
        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0].id(), ready_id);
    }

    #[test]
    fn test_modify_keeps_state_on_rejection() {
        let repo = OrderRepository::new();
        let order = Order::new();
        let id = order.id();
        repo.create(order).unwrap();

        repo.modify(id, |o| o.update_status(OrderStatus::Delivered))
            .unwrap();
        assert!(repo.modify(id, |o| o.cancel()).is_err());
        assert_eq!(repo.get(id).unwrap().status(), OrderStatus::Delivered);
    }
}
