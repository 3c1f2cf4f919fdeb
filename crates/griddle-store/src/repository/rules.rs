//! # Quantity Rule Repository
//!
//! Stores [`OrderQuantityRuleEntity`] records. Unlike the other
//! repositories, `update` takes a whole entity and refuses ids it has
//! never seen, and `clear` drops every rule at once.

use griddle_core::{OrderQuantityRule, OrderQuantityRuleEntity, OrderQuantityValidator, RuleId};
use tracing::{debug, info};

use super::Table;
use crate::error::{StoreError, StoreResult};

#[derive(Default)]
pub struct QuantityRuleRepository {
    table: Table<RuleId, OrderQuantityRuleEntity>,
}

impl QuantityRuleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, rule: OrderQuantityRuleEntity) -> StoreResult<()> {
        let id = rule.id();
        debug!(%id, name = rule.rule_name(), max = rule.max_quantity(), "Creating quantity rule");

        if !self.table.insert(id, rule)? {
            return Err(StoreError::duplicate("Quantity rule", id));
        }
        Ok(())
    }

    pub fn get(&self, id: RuleId) -> StoreResult<OrderQuantityRuleEntity> {
        self.table
            .get(id)?
            .ok_or_else(|| StoreError::not_found("Quantity rule", id))
    }

    pub fn list(&self) -> StoreResult<Vec<OrderQuantityRuleEntity>> {
        self.table.list()
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.table.len()? == 0)
    }

    /// Every rule as a value object, in creation order.
    pub fn rules(&self) -> StoreResult<Vec<OrderQuantityRule>> {
        Ok(self
            .table
            .list()?
            .iter()
            .map(OrderQuantityRuleEntity::to_value_object)
            .collect())
    }

    /// A validator over every stored rule.
    pub fn validator(&self) -> StoreResult<OrderQuantityValidator> {
        Ok(OrderQuantityValidator::new(self.rules()?))
    }

    pub fn update(&self, rule: OrderQuantityRuleEntity) -> StoreResult<()> {
        let id = rule.id();
        if !self.table.replace(id, rule)? {
            return Err(StoreError::not_found("Quantity rule", id));
        }
        Ok(())
    }

    /// Applies `f` to the stored rule under the write lock.
    ///
    /// Nothing is written when `f` fails.
    pub fn modify<F, E>(&self, id: RuleId, f: F) -> StoreResult<OrderQuantityRuleEntity>
    where
        F: FnOnce(&mut OrderQuantityRuleEntity) -> Result<(), E>,
        E: Into<StoreError>,
    {
        self.table
            .update(id, |rule| {
                f(rule).map_err(Into::<StoreError>::into)?;
                Ok::<_, StoreError>(rule.clone())
            })?
            .ok_or_else(|| StoreError::not_found("Quantity rule", id))?
    }

    pub fn delete(&self, id: RuleId) -> StoreResult<()> {
        self.table
            .remove(id)?
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found("Quantity rule", id))
    }

    pub fn clear(&self) -> StoreResult<()> {
        info!("Clearing all quantity rules");
        self.table.clear()
    }
}
