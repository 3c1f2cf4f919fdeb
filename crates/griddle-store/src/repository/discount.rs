//! # Discount Repository

use griddle_core::{Discount, DiscountId};
use tracing::debug;

use super::Table;
use crate::error::{StoreError, StoreResult};

#[derive(Default)]
pub struct DiscountRepository {
    table: Table<DiscountId, Discount>,
}

impl DiscountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, discount: Discount) -> StoreResult<()> {
        let id = discount.id();
        debug!(
            %id,
            name = discount.name(),
            percentage = %discount.percentage(),
            conditions = discount.conditions().len(),
            "Creating discount"
        );

        if !self.table.insert(id, discount)? {
            return Err(StoreError::duplicate("Discount", id));
        }
        Ok(())
    }

    pub fn get(&self, id: DiscountId) -> StoreResult<Discount> {
        self.table
            .get(id)?
            .ok_or_else(|| StoreError::not_found("Discount", id))
    }

    pub fn list(&self) -> StoreResult<Vec<Discount>> {
        self.table.list()
    }

    /// Active discounts in creation order, the candidate set for pricing.
    pub fn list_active(&self) -> StoreResult<Vec<Discount>> {
        self.table.filter(Discount::is_active)
    }

    pub fn modify<F, E>(&self, id: DiscountId, f: F) -> StoreResult<Discount>
    where
        F: FnOnce(&mut Discount) -> Result<(), E>,
        E: Into<StoreError>,
    {
        self.table
            .update(id, |discount| {
                f(discount).map_err(Into::<StoreError>::into)?;
                Ok::<_, StoreError>(discount.clone())
            })?
            .ok_or_else(|| StoreError::not_found("Discount", id))?
    }

    pub fn delete(&self, id: DiscountId) -> StoreResult<()> {
        debug!(%id, "Deleting discount");
        self.table
            .remove(id)?
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found("Discount", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_list_active_skips_deactivated() {
        let repo = DiscountRepository::new();
        let on = Discount::new("On", Decimal::from(10)).unwrap();
        let off = Discount::new("Off", Decimal::from(20)).unwrap();
        let off_id = off.id();

        repo.create(on).unwrap();
        repo.create(off).unwrap();
        repo.modify(off_id, |d| {
            d.deactivate();
            Ok::<_, StoreError>(())
        })
        .unwrap();

        let active = repo.list_active().unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name(), "On");
        assert_eq!(repo.list().unwrap().len(), 2);
    }

    #[test]
    fn test_invalid_update_is_discarded() {
        let repo = DiscountRepository::new();
        let discount = Discount::new("Combo", Decimal::from(10)).unwrap();
        let id = discount.id();
        repo.create(discount).unwrap();

        let result = repo.modify(id, |d| {
            d.update_name("Renamed")?;
            d.update_percentage(Decimal::from(500))
        });
        assert!(result.is_err());
        assert_eq!(repo.get(id).unwrap().name(), "Combo");
    }
}
